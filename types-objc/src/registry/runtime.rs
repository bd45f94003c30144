//! The well-known source types the registry maps, and the runtime types it maps them to.

use crate::binding::java_lang;
use crate::binding::source::SourceModel;
use crate::binding::TypeBinding;
use crate::error::TypesError;
use crate::error::TypesResult;
use crate::synthetic::ArrayOps;
use crate::synthetic::SyntheticUniverse;
use ast_java::ast::type_expr::PrimitiveKind;

/// Runtime array classes: class, constructor, element accessor, bulk copy, element kind.
pub const ARRAY_CLASSES: [(&str, &str, &str, &str, PrimitiveKind); 8] = [
  ("IOSBooleanArray", "arrayWithBooleans", "booleanAtIndex", "getBooleans", PrimitiveKind::Boolean),
  ("IOSByteArray", "arrayWithBytes", "byteAtIndex", "getBytes", PrimitiveKind::Byte),
  ("IOSCharArray", "arrayWithCharacters", "charAtIndex", "getChars", PrimitiveKind::Char),
  ("IOSDoubleArray", "arrayWithDoubles", "doubleAtIndex", "getDoubles", PrimitiveKind::Double),
  ("IOSFloatArray", "arrayWithFloats", "floatAtIndex", "getFloats", PrimitiveKind::Float),
  ("IOSIntArray", "arrayWithInts", "intAtIndex", "getInts", PrimitiveKind::Int),
  ("IOSLongArray", "arrayWithLongs", "longAtIndex", "getLongs", PrimitiveKind::Long),
  ("IOSShortArray", "arrayWithShorts", "shortAtIndex", "getShorts", PrimitiveKind::Short),
];

pub const OBJECT_ARRAY: &str = "IOSObjectArray";

/// Source types the registry needs by name.
#[derive(Clone, Copy, Debug)]
pub struct JavaTypes {
  pub object: TypeBinding,
  pub class: TypeBinding,
  pub cloneable: TypeBinding,
  pub string: TypeBinding,
  pub number: TypeBinding,
  pub java_void: TypeBinding,
  pub void: TypeBinding,
  pub boolean: TypeBinding,
  pub boolean_wrapper: TypeBinding,
}

impl JavaTypes {
  pub fn resolve(model: &SourceModel) -> TypesResult<JavaTypes> {
    let get = |name: &str| {
      model
        .resolve_well_known_type(name)
        .ok_or_else(|| TypesError::MissingWellKnownType(name.to_string()))
    };
    Ok(JavaTypes {
      object: get(java_lang::OBJECT)?,
      class: get(java_lang::CLASS)?,
      cloneable: get(java_lang::CLONEABLE)?,
      string: get(java_lang::STRING)?,
      number: get(java_lang::NUMBER)?,
      java_void: get(java_lang::VOID)?,
      void: model.primitive(PrimitiveKind::Void),
      boolean: model.primitive(PrimitiveKind::Boolean),
      boolean_wrapper: get("java.lang.Boolean")?,
    })
  }
}

/// Runtime classes created for every translation unit.
#[derive(Clone, Debug)]
pub struct RuntimeTypes {
  pub ns_object: TypeBinding,
  pub ns_string: TypeBinding,
  pub ns_number: TypeBinding,
  pub ns_copying: TypeBinding,
  pub ios_class: TypeBinding,
  pub ns_any: TypeBinding,
  pub ios_array: TypeBinding,
  pub object_array: TypeBinding,
  /// Primitive array classes, keyed by element kind.
  pub primitive_arrays: Vec<(PrimitiveKind, TypeBinding)>,
}

impl RuntimeTypes {
  pub fn declare(synthetic: &mut SyntheticUniverse, model: &SourceModel, java: &JavaTypes) -> TypesResult<RuntimeTypes> {
    let ns_object = synthetic.new_type("NSObject", None, false, false);
    synthetic.set_mapped_from(ns_object, java.object);
    let root = Some(TypeBinding::Synthetic(ns_object));

    let ns_copying = synthetic.new_type("NSCopying", None, true, false);
    synthetic.set_mapped_from(ns_copying, java.cloneable);
    let ns_string = synthetic.new_type("NSString", root, false, false);
    synthetic.set_mapped_from(ns_string, java.string);
    let ns_number = synthetic.new_type("NSNumber", root, false, false);
    synthetic.set_mapped_from(ns_number, java.number);
    let ios_class = synthetic.new_type("IOSClass", root, false, false);
    synthetic.set_mapped_from(ios_class, java.class);
    synthetic.set_header(ios_class, "IOSClass");
    let ns_any = synthetic.new_type("id", None, false, false);

    let ios_array = synthetic.new_type("IOSArray", root, false, true);
    synthetic.set_header(ios_array, "IOSArray");
    let array_root = Some(TypeBinding::Synthetic(ios_array));

    let mut primitive_arrays = Vec::new();
    for (name, ctor_op, access_op, copy_op, kind) in ARRAY_CLASSES {
      let wrapper = java_lang::wrapper_name(kind)
        .and_then(|w| model.resolve_well_known_type(w))
        .ok_or_else(|| TypesError::MissingWellKnownType(java_lang::wrapper_name(kind).unwrap_or(name).to_string()))?;
      let ops = ArrayOps {
        ctor_op: ctor_op.to_string(),
        access_op: access_op.to_string(),
        copy_op: copy_op.to_string(),
        boxed_element: wrapper,
        primitive_element: Some(model.primitive(kind)),
      };
      let array = synthetic.new_array_type(name, array_root, ops);
      primitive_arrays.push((kind, TypeBinding::Synthetic(array)));
    }
    let object_array = synthetic.new_array_type(OBJECT_ARRAY, array_root, ArrayOps {
      ctor_op: "arrayWithObjects".to_string(),
      access_op: "objectAtIndex".to_string(),
      copy_op: "getObjects".to_string(),
      boxed_element: java.object,
      primitive_element: None,
    });

    Ok(RuntimeTypes {
      ns_object: TypeBinding::Synthetic(ns_object),
      ns_string: TypeBinding::Synthetic(ns_string),
      ns_number: TypeBinding::Synthetic(ns_number),
      ns_copying: TypeBinding::Synthetic(ns_copying),
      ios_class: TypeBinding::Synthetic(ios_class),
      ns_any: TypeBinding::Synthetic(ns_any),
      ios_array: TypeBinding::Synthetic(ios_array),
      object_array: TypeBinding::Synthetic(object_array),
      primitive_arrays,
    })
  }

  /// Source type each runtime class replaces.
  pub fn type_map(&self, java: &JavaTypes) -> [(TypeBinding, TypeBinding); 5] {
    [
      (java.object, self.ns_object),
      (java.class, self.ios_class),
      (java.cloneable, self.ns_copying),
      (java.string, self.ns_string),
      (java.number, self.ns_number),
    ]
  }
}
