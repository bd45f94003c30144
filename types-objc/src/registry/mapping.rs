use super::Types;
use crate::binding::java_lang;
use crate::binding::TypeBinding;
use ast_java::ast::decl::TypeDecl;
use ast_java::ast::node::Node;
use ast_java::ast::type_expr::PrimitiveKind;
use tracing::trace;

/// Camel-cased source names that the runtime spells differently.
const SIMPLE_TYPE_NAMES: [(&str, &str); 4] = [
  ("JavaLangObject", "NSObject"),
  ("JavaLangString", "NSString"),
  ("JavaLangNumber", "NSNumber"),
  ("JavaLangCloneable", "NSCopying"),
];

impl<'f> Types<'f> {
  pub(super) fn populate_type_maps(&mut self) {
    for (source, target) in self.runtime.type_map(&self.java) {
      self.type_map.insert(source, target);
    }
    for (kind, array) in self.runtime.primitive_arrays.clone() {
      let element = self.universe.model().primitive(kind);
      self.arrays_by_element.insert(element, array);
      self.array_elements.insert(array, element);
    }
    for (kind, name) in java_lang::WRAPPERS {
      if let Some(wrapper) = self.universe.model().resolve_well_known_type(name) {
        let primitive = self.universe.model().primitive(kind);
        self.wrappers.insert(primitive, wrapper);
        self.unwrapped.insert(wrapper, primitive);
      }
    }
  }

  /// The runtime type that stands in for `binding` in generated code.
  ///
  /// Arrays map to the runtime array class for their component. Other types map
  /// through the type map, and anything assignable to `java.lang.Class` maps to
  /// the runtime class type. Everything else maps to itself.
  pub fn map_type(&self, binding: TypeBinding) -> TypeBinding {
    if binding.is_null() || binding.is_synthetic() {
      return binding;
    }
    if self.universe.is_array(binding) {
      return match self.universe.component_type(binding) {
        Some(component) => self.resolve_array_type(component),
        None => self.runtime.object_array,
      };
    }
    if let Some(mapped) = self.type_map.get(&self.universe.type_declaration(binding)) {
      return *mapped;
    }
    if self.universe.is_assignment_compatible(binding, self.java.class) {
      if let Some(mapped) = self.type_map.get(&self.java.class) {
        return *mapped;
      }
    }
    binding
  }

  /// Maps a type named by its qualified name; `None` if the frontend does not know it.
  pub fn map_type_name(&self, qualified_name: &str) -> Option<TypeBinding> {
    self
      .universe
      .model()
      .resolve_well_known_type(qualified_name)
      .map(|b| self.map_type(b))
  }

  pub fn has_ios_equivalent(&self, binding: TypeBinding) -> bool {
    self.universe.is_array(binding) || self.type_map.contains_key(&self.universe.type_declaration(binding))
  }

  /// Whether `name` is a camel-cased source name with a runtime spelling, or that spelling.
  pub fn is_ios_type(&self, name: &str) -> bool {
    SIMPLE_TYPE_NAMES.iter().any(|(from, to)| *from == name || *to == name)
  }

  pub fn map_simple_type_name<'n>(&self, name: &'n str) -> &'n str {
    SIMPLE_TYPE_NAMES
      .iter()
      .find(|(from, _)| *from == name)
      .map_or(name, |(_, to)| *to)
  }

  pub fn wrapper_type(&self, primitive: TypeBinding) -> Option<TypeBinding> {
    self.wrappers.get(&primitive).copied()
  }

  pub fn primitive_type(&self, wrapper: TypeBinding) -> Option<TypeBinding> {
    self.unwrapped.get(&self.universe.type_declaration(wrapper)).copied()
  }

  /// Runtime spelling of a primitive type; `None` for references and `void`.
  pub fn primitive_type_name(&self, binding: TypeBinding) -> Option<&'static str> {
    Some(match self.universe.primitive_kind(binding)? {
      PrimitiveKind::Boolean => "BOOL",
      PrimitiveKind::Byte => "char",
      PrimitiveKind::Char => "unichar",
      PrimitiveKind::Double => "double",
      PrimitiveKind::Float => "float",
      PrimitiveKind::Int => "int",
      PrimitiveKind::Long => "long long",
      PrimitiveKind::Short => "short",
      PrimitiveKind::Void => return None,
    })
  }

  pub fn resolve_ios_type(&self, name: &str) -> Option<TypeBinding> {
    self.universe.synthetic().resolve_by_name(name)
  }

  /// Runtime array class holding `element`s; the object array for anything not primitive.
  pub fn resolve_array_type(&self, element: TypeBinding) -> TypeBinding {
    self
      .arrays_by_element
      .get(&element)
      .copied()
      .unwrap_or(self.runtime.object_array)
  }

  /// Runtime array class for a primitive keyword such as `int`.
  pub fn resolve_array_type_name(&self, primitive: &str) -> Option<TypeBinding> {
    let kind = PrimitiveKind::from_keyword(primitive)?;
    self
      .arrays_by_element
      .get(&self.universe.model().primitive(kind))
      .copied()
  }

  /// Element type of a runtime array class: its primitive, or `NSObject` for object arrays.
  pub fn ios_array_component_type(&self, array: TypeBinding) -> TypeBinding {
    self
      .array_elements
      .get(&array)
      .copied()
      .unwrap_or(self.runtime.ns_object)
  }

  pub fn ns_object(&self) -> TypeBinding {
    self.runtime.ns_object
  }

  pub fn ns_string(&self) -> TypeBinding {
    self.runtime.ns_string
  }

  pub fn ns_number(&self) -> TypeBinding {
    self.runtime.ns_number
  }

  pub fn ios_class(&self) -> TypeBinding {
    self.runtime.ios_class
  }

  pub fn ns_any(&self) -> TypeBinding {
    self.runtime.ns_any
  }

  pub fn object_array(&self) -> TypeBinding {
    self.runtime.object_array
  }

  /// Presents `original` under a new name and declaring class.
  pub fn rename_type_binding(
    &mut self,
    new_name: &str,
    new_declaring_class: Option<TypeBinding>,
    original: TypeBinding,
  ) -> TypeBinding {
    let renamed = self
      .universe
      .synthetic_mut()
      .new_renamed_type(new_name, new_declaring_class, original);
    let renamed = TypeBinding::Synthetic(renamed);
    trace!(from = %self.universe.qualified_name(original), to = new_name, "renamed type");
    self.renamed_types.insert(original, renamed);
    renamed
  }

  pub fn get_renamed_binding(&self, original: TypeBinding) -> TypeBinding {
    self.renamed_types.get(&original).copied().unwrap_or(original)
  }

  /// The declaration of `binding` among `declarations`, compared by generic declaration.
  pub fn get_type_declaration<'d>(
    &self,
    binding: TypeBinding,
    declarations: &'d [Node<TypeDecl>],
  ) -> Option<&'d Node<TypeDecl>> {
    let wanted = self.universe.type_declaration(binding);
    declarations.iter().find(|decl| {
      self
        .table
        .get(decl.id)
        .and_then(|b| b.as_type())
        .is_some_and(|ty| self.universe.type_declaration(ty) == wanted)
    })
  }
}
