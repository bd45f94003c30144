//! Types presented with a replaced superclass and interface list.
//!
//! Passes that prune unreachable supertypes cannot touch the frontend's model,
//! so they record the pruned hierarchy in the registry instead. Downstream
//! passes then query the type through a [`HierarchyOverride`], which answers
//! every question from the wrapped type except the two it overrides.

use crate::binding::MethodBinding;
use crate::binding::TypeBinding;
use crate::error::TypesResult;
use crate::registry::HierarchyData;
use crate::registry::Types;
use crate::view::TypeRef;
use crate::view::TypeView;
use ast_java::ast::decl::TypeDecl;
use ast_java::ast::decl::TypeDeclKind;
use ast_java::ast::modifiers::Modifiers;
use ast_java::ast::node::Node;

#[derive(Clone, Debug)]
pub struct HierarchyOverride<V: TypeView> {
  inner: V,
  superclass: Option<TypeBinding>,
  interfaces: Vec<TypeBinding>,
}

impl<V: TypeView> HierarchyOverride<V> {
  pub fn new(inner: V, superclass: Option<TypeBinding>, interfaces: Vec<TypeBinding>) -> HierarchyOverride<V> {
    HierarchyOverride {
      inner,
      superclass,
      interfaces,
    }
  }

  pub fn inner(&self) -> &V {
    &self.inner
  }

  pub fn into_data(self) -> HierarchyData {
    HierarchyData {
      superclass: self.superclass,
      interfaces: self.interfaces,
    }
  }
}

/// Views the type `decl` declares with the hierarchy `decl` currently spells out.
///
/// Supertype nodes must already be bound. A class without `extends` has
/// `java.lang.Object` as its superclass; an enum keeps whatever its binding
/// says, since `extends` cannot be written for one.
pub fn bind<'a>(types: &'a Types<'_>, decl: &Node<TypeDecl>) -> TypesResult<HierarchyOverride<TypeRef<'a>>> {
  let ty = types.get_type_binding(decl.id)?;
  let universe = types.universe();
  let superclass = match (&decl.stx.superclass, decl.stx.kind) {
    (Some(sup), _) => Some(types.get_type_binding(sup.id())?),
    (None, TypeDeclKind::Interface) => None,
    (None, TypeDeclKind::Enum) => universe.superclass_of(ty),
    (None, TypeDeclKind::Class) => {
      let object = types.java_types().object;
      (ty != object).then_some(object)
    }
  };
  let interfaces = decl
    .stx
    .interfaces
    .iter()
    .map(|i| types.get_type_binding(i.id()))
    .collect::<TypesResult<Vec<_>>>()?;
  Ok(HierarchyOverride::new(TypeRef::new(universe, ty), superclass, interfaces))
}

impl<V: TypeView> TypeView for HierarchyOverride<V> {
  fn binding(&self) -> TypeBinding {
    self.inner.binding()
  }

  fn name(&self) -> &str {
    self.inner.name()
  }

  fn qualified_name(&self) -> &str {
    self.inner.qualified_name()
  }

  fn binary_name(&self) -> String {
    self.inner.binary_name()
  }

  fn package(&self) -> Option<&str> {
    self.inner.package()
  }

  fn modifiers(&self) -> Modifiers {
    self.inner.modifiers()
  }

  fn is_primitive(&self) -> bool {
    self.inner.is_primitive()
  }

  fn is_array(&self) -> bool {
    self.inner.is_array()
  }

  fn is_interface(&self) -> bool {
    self.inner.is_interface()
  }

  fn is_type_variable(&self) -> bool {
    self.inner.is_type_variable()
  }

  fn is_null_type(&self) -> bool {
    self.inner.is_null_type()
  }

  fn is_synthetic(&self) -> bool {
    self.inner.is_synthetic()
  }

  fn component_type(&self) -> Option<TypeBinding> {
    self.inner.component_type()
  }

  fn superclass(&self) -> Option<TypeBinding> {
    self.superclass
  }

  fn interfaces(&self) -> &[TypeBinding] {
    &self.interfaces
  }

  fn declared_methods(&self) -> &[MethodBinding] {
    self.inner.declared_methods()
  }

  fn type_declaration(&self) -> TypeBinding {
    self.inner.type_declaration()
  }

  fn is_assignment_compatible(&self, to: TypeBinding) -> bool {
    self.inner.is_assignment_compatible(to)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::binding::source::SourceModelBuilder;
  use crate::binding::source::TypeData;
  use crate::universe::Universe;

  #[test]
  fn only_supertypes_are_replaced() {
    let mut b = SourceModelBuilder::new();
    let jl = b.declare_java_lang();
    let list = b.declare_type(
      TypeData::class("java.util", "ArrayList")
        .with_superclass(jl.object)
        .with_interfaces(vec![jl.cloneable]),
    );
    let model = b.finish();
    let u = Universe::new(&model);

    let plain = TypeRef::new(&u, list);
    let pruned = HierarchyOverride::new(plain, None, vec![jl.serializable]);
    assert_eq!(plain.superclass(), Some(jl.object));
    assert_eq!(pruned.superclass(), None);
    assert_eq!(pruned.interfaces(), &[jl.serializable]);
    assert_eq!(plain.interfaces(), &[jl.cloneable]);
    assert_eq!(pruned.qualified_name(), "java.util.ArrayList");
    assert_eq!(pruned.binding(), list);
    assert!(pruned.is_assignment_compatible(jl.cloneable));

    let data = pruned.into_data();
    assert_eq!(data.superclass, None);
    assert_eq!(data.interfaces, vec![jl.serializable]);
  }
}
