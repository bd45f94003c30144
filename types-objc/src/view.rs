//! A uniform read interface over types, whatever answers for them.

use crate::binding::MethodBinding;
use crate::binding::TypeBinding;
use crate::universe::Universe;
use ast_java::ast::modifiers::Modifiers;

/// Structural queries code generators ask of a type.
///
/// Implemented by plain types ([`TypeRef`]), the type of `null` ([`NullType`])
/// and types whose hierarchy was replaced
/// ([`HierarchyOverride`](crate::hierarchy::HierarchyOverride)).
pub trait TypeView {
  fn binding(&self) -> TypeBinding;
  fn name(&self) -> &str;
  fn qualified_name(&self) -> &str;
  fn binary_name(&self) -> String;
  fn package(&self) -> Option<&str>;
  fn modifiers(&self) -> Modifiers;
  fn is_primitive(&self) -> bool;
  fn is_array(&self) -> bool;
  fn is_interface(&self) -> bool;
  fn is_type_variable(&self) -> bool;
  fn is_null_type(&self) -> bool;
  fn is_synthetic(&self) -> bool;
  fn component_type(&self) -> Option<TypeBinding>;
  fn superclass(&self) -> Option<TypeBinding>;
  fn interfaces(&self) -> &[TypeBinding];
  fn declared_methods(&self) -> &[MethodBinding];
  fn type_declaration(&self) -> TypeBinding;
  fn is_assignment_compatible(&self, to: TypeBinding) -> bool;
}

#[derive(Clone, Copy)]
pub struct TypeRef<'a> {
  universe: &'a Universe<'a>,
  ty: TypeBinding,
}

impl<'a> TypeRef<'a> {
  pub fn new(universe: &'a Universe<'a>, ty: TypeBinding) -> TypeRef<'a> {
    TypeRef { universe, ty }
  }
}

impl<'a> TypeView for TypeRef<'a> {
  fn binding(&self) -> TypeBinding {
    self.ty
  }

  fn name(&self) -> &str {
    self.universe.type_name(self.ty)
  }

  fn qualified_name(&self) -> &str {
    self.universe.qualified_name(self.ty)
  }

  fn binary_name(&self) -> String {
    self.universe.binary_name(self.ty)
  }

  fn package(&self) -> Option<&str> {
    self.universe.package(self.ty)
  }

  fn modifiers(&self) -> Modifiers {
    self.universe.modifiers(self.ty)
  }

  fn is_primitive(&self) -> bool {
    self.universe.is_primitive(self.ty)
  }

  fn is_array(&self) -> bool {
    self.universe.is_array(self.ty)
  }

  fn is_interface(&self) -> bool {
    self.universe.is_interface(self.ty)
  }

  fn is_type_variable(&self) -> bool {
    self.universe.is_type_variable(self.ty)
  }

  fn is_null_type(&self) -> bool {
    self.ty.is_null()
  }

  fn is_synthetic(&self) -> bool {
    self.ty.is_synthetic()
  }

  fn component_type(&self) -> Option<TypeBinding> {
    self.universe.component_type(self.ty)
  }

  fn superclass(&self) -> Option<TypeBinding> {
    self.universe.superclass_of(self.ty)
  }

  fn interfaces(&self) -> &[TypeBinding] {
    self.universe.interfaces_of(self.ty)
  }

  fn declared_methods(&self) -> &[MethodBinding] {
    self.universe.declared_methods(self.ty)
  }

  fn type_declaration(&self) -> TypeBinding {
    self.universe.type_declaration(self.ty)
  }

  fn is_assignment_compatible(&self, to: TypeBinding) -> bool {
    self.universe.is_assignment_compatible(self.ty, to)
  }
}

/// The type of the `null` literal.
///
/// Nothing declares it, so every structural query has a fixed bottom-type
/// answer: not primitive, not an array, no members, no supertypes. It converts
/// to every type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullType;

impl NullType {
  pub const NAME: &'static str = "null";
  pub const BINARY_NAME: &'static str = "N";
}

impl TypeView for NullType {
  fn binding(&self) -> TypeBinding {
    TypeBinding::Null
  }

  fn name(&self) -> &str {
    NullType::NAME
  }

  fn qualified_name(&self) -> &str {
    NullType::NAME
  }

  fn binary_name(&self) -> String {
    NullType::BINARY_NAME.to_string()
  }

  fn package(&self) -> Option<&str> {
    None
  }

  fn modifiers(&self) -> Modifiers {
    Modifiers::empty()
  }

  fn is_primitive(&self) -> bool {
    false
  }

  fn is_array(&self) -> bool {
    false
  }

  fn is_interface(&self) -> bool {
    false
  }

  fn is_type_variable(&self) -> bool {
    false
  }

  fn is_null_type(&self) -> bool {
    true
  }

  fn is_synthetic(&self) -> bool {
    false
  }

  fn component_type(&self) -> Option<TypeBinding> {
    None
  }

  fn superclass(&self) -> Option<TypeBinding> {
    None
  }

  fn interfaces(&self) -> &[TypeBinding] {
    &[]
  }

  fn declared_methods(&self) -> &[MethodBinding] {
    &[]
  }

  fn type_declaration(&self) -> TypeBinding {
    TypeBinding::Null
  }

  fn is_assignment_compatible(&self, _to: TypeBinding) -> bool {
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::binding::source::SourceModelBuilder;
  use ast_java::ast::type_expr::PrimitiveKind;

  #[test]
  fn null_type_answers_as_bottom() {
    let mut b = SourceModelBuilder::new();
    let jl = b.declare_java_lang();
    let model = b.finish();
    let u = Universe::new(&model);
    let null = TypeRef::new(&u, TypeBinding::Null);
    assert_eq!(null.name(), NullType.name());
    assert_eq!(null.binary_name(), "N");
    assert!(null.is_null_type());
    assert!(!null.is_array() && !null.is_primitive());
    assert!(null.superclass().is_none());
    assert!(NullType.is_assignment_compatible(jl.string));
    assert!(null.is_assignment_compatible(model.primitive(PrimitiveKind::Int)));
  }

  #[test]
  fn type_ref_forwards_to_universe() {
    let mut b = SourceModelBuilder::new();
    let jl = b.declare_java_lang();
    let model = b.finish();
    let u = Universe::new(&model);
    let string = TypeRef::new(&u, jl.string);
    assert_eq!(string.name(), "String");
    assert_eq!(string.qualified_name(), "java.lang.String");
    assert_eq!(string.package(), Some("java.lang"));
    assert_eq!(string.superclass(), Some(jl.object));
    assert_eq!(string.interfaces(), &[jl.serializable, jl.char_sequence]);
    assert!(string.is_assignment_compatible(jl.char_sequence));
  }
}
