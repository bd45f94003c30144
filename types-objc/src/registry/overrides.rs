use super::HierarchyData;
use super::Types;
use crate::binding::TypeBinding;
use crate::binding::VariableBinding;
use crate::copy::Replacement;
use crate::error::TypesResult;
use crate::hierarchy;
use crate::hierarchy::HierarchyOverride;
use crate::synthetic::GeneratedVariable;
use crate::view::NullType;
use crate::view::TypeRef;
use crate::view::TypeView;
use ast_java::ast::decl::TypeDecl;
use ast_java::ast::node::Node;
use ast_java::ast::node::NodeId;
use tracing::trace;

impl<'f> Types<'f> {
  // Variables.

  /// Makes every later lookup of the variable `node` is bound to answer with `replacement`.
  pub fn add_mapped_variable(&mut self, node: NodeId, replacement: VariableBinding) -> TypesResult<()> {
    let original = self.get_variable_binding(node)?;
    self.mapped_variables.insert(original, replacement);
    Ok(())
  }

  pub fn get_mapped_variable(&self, var: VariableBinding) -> VariableBinding {
    self.mapped_variables.get(&var).copied().unwrap_or(var)
  }

  pub fn is_mapped_variable(&self, var: VariableBinding) -> bool {
    self.mapped_variables.contains_key(&var)
  }

  /// Requires every reference to `var`'s declaration to be cast to `cast`.
  pub fn add_variable_cast(&mut self, var: VariableBinding, cast: TypeBinding) {
    let decl = self.universe.variable_declaration(var);
    self.variable_casts.insert(decl, cast);
  }

  pub fn variable_has_cast(&self, var: VariableBinding) -> bool {
    self.variable_casts.contains_key(&self.universe.variable_declaration(var))
  }

  pub fn get_cast_for_variable(&self, var: VariableBinding) -> Option<TypeBinding> {
    self.variable_casts.get(&self.universe.variable_declaration(var)).copied()
  }

  pub fn add_releaseable_fields(&mut self, fields: impl IntoIterator<Item = VariableBinding>) {
    for field in fields {
      let decl = self.universe.variable_declaration(field);
      self.releaseable_fields.insert(decl);
    }
  }

  pub fn is_releaseable_field(&self, var: VariableBinding) -> bool {
    self.releaseable_fields.contains(&self.universe.variable_declaration(var))
  }

  /// A compiler-introduced variable. Equal variables share one binding.
  pub fn new_generated_variable(&mut self, var: GeneratedVariable) -> VariableBinding {
    VariableBinding::Generated(self.universe.synthetic_mut().new_variable(var))
  }

  // Hierarchy.

  pub fn set_hierarchy_override(
    &mut self,
    ty: TypeBinding,
    superclass: Option<TypeBinding>,
    interfaces: Vec<TypeBinding>,
  ) {
    trace!(ty = %self.universe.qualified_name(ty), "hierarchy override");
    self.hierarchy_overrides.insert(ty, HierarchyData { superclass, interfaces });
  }

  /// Takes `decl`'s hierarchy, as currently written, as the hierarchy of its type.
  pub fn record_hierarchy_override(&mut self, decl: &Node<TypeDecl>) -> TypesResult<TypeBinding> {
    let (ty, data) = {
      let view = hierarchy::bind(self, decl)?;
      (view.binding(), view.into_data())
    };
    self.set_hierarchy_override(ty, data.superclass, data.interfaces);
    Ok(ty)
  }

  pub fn hierarchy_override(&self, ty: TypeBinding) -> Option<HierarchyOverride<TypeRef<'_>>> {
    let data = self.hierarchy_overrides.get(&ty)?;
    Some(HierarchyOverride::new(
      TypeRef::new(&self.universe, ty),
      data.superclass,
      data.interfaces.clone(),
    ))
  }

  /// Superclass of `ty` as translation sees it, honouring hierarchy overrides.
  pub fn superclass(&self, ty: TypeBinding) -> Option<TypeBinding> {
    match self.hierarchy_overrides.get(&ty) {
      Some(data) => data.superclass,
      None => self.universe.superclass_of(ty),
    }
  }

  /// Interfaces of `ty` as translation sees them, honouring hierarchy overrides.
  pub fn interfaces(&self, ty: TypeBinding) -> &[TypeBinding] {
    match self.hierarchy_overrides.get(&ty) {
      Some(data) => &data.interfaces,
      None => self.universe.interfaces_of(ty),
    }
  }

  /// `ty` behind the type query interface, with any hierarchy override applied.
  pub fn view(&self, ty: TypeBinding) -> Box<dyn TypeView + '_> {
    if ty.is_null() {
      return Box::new(NullType);
    }
    match self.hierarchy_override(ty) {
      Some(view) => Box::new(view),
      None => Box::new(TypeRef::new(&self.universe, ty)),
    }
  }

  pub fn null_type(&self) -> NullType {
    NullType
  }

  // Substitutions.

  /// Queues `replacement` to take the place of `original` in the next copy of a tree containing it.
  pub fn substitute(&mut self, original: NodeId, replacement: Replacement) {
    self.substitutions.insert(original, replacement);
  }

  pub fn get_node(&self, original: NodeId) -> Option<&Replacement> {
    self.substitutions.get(&original)
  }

  pub(crate) fn take_substitution(&mut self, original: NodeId) -> Option<Replacement> {
    self.substitutions.remove(&original)
  }

  // Autorelease pools.

  pub fn add_autorelease_pool(&mut self, block: NodeId) {
    self.autorelease_pools.insert(block);
  }

  pub fn has_autorelease_pool(&self, block: NodeId) -> bool {
    self.autorelease_pools.contains(&block)
  }
}
