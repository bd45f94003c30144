//! Bootstrap declarations for `java.lang`.
//!
//! The registry resolves these by qualified name, so a frontend that already
//! models the JDK only needs to declare them under the same names.

use super::source::MethodData;
use super::source::SourceModelBuilder;
use super::source::TypeData;
use super::TypeBinding;
use ast_java::ast::modifiers::Modifiers;
use ast_java::ast::type_expr::PrimitiveKind;

pub const OBJECT: &str = "java.lang.Object";
pub const CLASS: &str = "java.lang.Class";
pub const CLONEABLE: &str = "java.lang.Cloneable";
pub const STRING: &str = "java.lang.String";
pub const NUMBER: &str = "java.lang.Number";
pub const VOID: &str = "java.lang.Void";
pub const CHAR_SEQUENCE: &str = "java.lang.CharSequence";
pub const SERIALIZABLE: &str = "java.io.Serializable";

/// Primitive kinds and their wrapper classes.
pub const WRAPPERS: [(PrimitiveKind, &str); 8] = [
  (PrimitiveKind::Boolean, "java.lang.Boolean"),
  (PrimitiveKind::Byte, "java.lang.Byte"),
  (PrimitiveKind::Char, "java.lang.Character"),
  (PrimitiveKind::Short, "java.lang.Short"),
  (PrimitiveKind::Int, "java.lang.Integer"),
  (PrimitiveKind::Long, "java.lang.Long"),
  (PrimitiveKind::Float, "java.lang.Float"),
  (PrimitiveKind::Double, "java.lang.Double"),
];

pub fn wrapper_name(kind: PrimitiveKind) -> Option<&'static str> {
  WRAPPERS.iter().find(|(k, _)| *k == kind).map(|(_, n)| *n)
}

pub fn unwrapped_kind(qualified_name: &str) -> Option<PrimitiveKind> {
  WRAPPERS.iter().find(|(_, n)| *n == qualified_name).map(|(k, _)| *k)
}

#[derive(Clone, Copy, Debug)]
pub struct JavaLang {
  pub object: TypeBinding,
  pub class: TypeBinding,
  pub cloneable: TypeBinding,
  pub serializable: TypeBinding,
  pub char_sequence: TypeBinding,
  pub string: TypeBinding,
  pub number: TypeBinding,
  pub void: TypeBinding,
  pub boolean: TypeBinding,
  pub integer: TypeBinding,
  pub long: TypeBinding,
}

impl SourceModelBuilder {
  /// Declares the `java.lang` types the translator depends on, with the members
  /// it maps onto runtime methods.
  pub fn declare_java_lang(&mut self) -> JavaLang {
    let boolean_p = self.primitive(PrimitiveKind::Boolean);
    let int_p = self.primitive(PrimitiveKind::Int);
    let long_p = self.primitive(PrimitiveKind::Long);
    let char_p = self.primitive(PrimitiveKind::Char);

    let object = self.declare_type(TypeData::class("java.lang", "Object"));
    let serializable = self.declare_type(TypeData::interface("java.io", "Serializable"));
    let cloneable = self.declare_type(TypeData::interface("java.lang", "Cloneable"));
    let char_sequence = self.declare_type(TypeData::interface("java.lang", "CharSequence"));
    let class = self.declare_type(
      TypeData::class("java.lang", "Class")
        .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
        .with_superclass(object)
        .with_interfaces(vec![serializable]),
    );
    let string = self.declare_type(
      TypeData::class("java.lang", "String")
        .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
        .with_superclass(object)
        .with_interfaces(vec![serializable, char_sequence]),
    );
    let number = self.declare_type(
      TypeData::class("java.lang", "Number")
        .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
        .with_superclass(object)
        .with_interfaces(vec![serializable]),
    );
    let void = self.declare_type(
      TypeData::class("java.lang", "Void")
        .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
        .with_superclass(object),
    );

    self.add_method(MethodData::new("equals", object, vec![object], boolean_p));
    self.add_method(MethodData::new("hashCode", object, vec![], int_p));
    self.add_method(MethodData::new("toString", object, vec![], string));
    self.add_method(MethodData::new("getClass", object, vec![], class).with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL));
    self.add_method(MethodData::new("clone", object, vec![], object).with_modifiers(Modifiers::PROTECTED));
    self.add_method(MethodData::new("length", char_sequence, vec![], int_p).with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT));
    self.add_method(MethodData::new("length", string, vec![], int_p));
    self.add_method(MethodData::new("charAt", string, vec![int_p], char_p));
    self.add_method(MethodData::new("isEmpty", string, vec![], boolean_p));
    let object_array = self.array_of(object);
    self.add_method(
      MethodData::new("format", string, vec![string, object_array], string)
        .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
        .varargs(),
    );
    self.add_method(MethodData::new("longValue", number, vec![], long_p).with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT));
    self.add_method(MethodData::new("intValue", number, vec![], int_p).with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT));

    let mut wrappers = Vec::new();
    for (kind, qualified) in WRAPPERS {
      let name = qualified.rsplit('.').next().unwrap_or(qualified);
      let numeric = kind.is_numeric() && kind != PrimitiveKind::Char;
      let superclass = if numeric { number } else { object };
      let wrapper = self.declare_type(
        TypeData::class("java.lang", name)
          .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
          .with_superclass(superclass)
          .with_interfaces(vec![serializable]),
      );
      if numeric {
        self.add_method(MethodData::new("longValue", wrapper, vec![], long_p));
        self.add_method(MethodData::new("intValue", wrapper, vec![], int_p));
      }
      wrappers.push((kind, wrapper));
    }
    let wrapper = |kind| {
      wrappers
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(object, |(_, w)| *w)
    };

    JavaLang {
      object,
      class,
      cloneable,
      serializable,
      char_sequence,
      string,
      number,
      void,
      boolean: wrapper(PrimitiveKind::Boolean),
      integer: wrapper(PrimitiveKind::Int),
      long: wrapper(PrimitiveKind::Long),
    }
  }
}
