//! The per-unit registry every translation pass consults.
//!
//! [`Types`] is created by [`Types::initialize`] when a compilation unit enters
//! translation and dropped by [`Types::cleanup`] when it leaves. It owns the
//! binding table for the unit, the runtime types and every mapping table that
//! passes append to along the way. Nothing is shared between units: two units
//! in flight get two registries.

mod mapping;
mod methods;
mod overrides;
mod predicates;
pub mod runtime;

use crate::binding::source::SourceModel;
use crate::binding::Binding;
use crate::binding::MethodBinding;
use crate::binding::TypeBinding;
use crate::binding::VariableBinding;
use crate::copy::Replacement;
use crate::error::TypesError;
use crate::error::TypesResult;
use crate::options::TypesOptions;
use crate::synthetic::descriptor::MethodDescriptor;
use crate::table;
use crate::table::BindingTable;
use crate::universe::Universe;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use ast_java::ast::decl::CompilationUnit;
use ast_java::ast::expr::Expr;
use ast_java::ast::node::Node;
use ast_java::ast::node::NodeId;
use ast_java::ast::node::NodeIdGen;
use ast_java::ast::type_expr::TypeExpr;
use ast_java::factory::AstFactory;
use derive_visitor::Drive;
use runtime::JavaTypes;
use runtime::RuntimeTypes;
use tracing::debug;

pub use methods::BUILTIN_DESCRIPTORS;
pub use methods::GLOBAL_RENAMES;

/// A runtime method standing in for a source method.
#[derive(Clone, Debug)]
pub struct MappedMethod {
  pub descriptor: MethodDescriptor,
  pub binding: MethodBinding,
}

/// Superclass and interfaces presented in place of a declaration's own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HierarchyData {
  pub superclass: Option<TypeBinding>,
  pub interfaces: Vec<TypeBinding>,
}

pub struct Types<'f> {
  universe: Universe<'f>,
  options: TypesOptions,
  table: BindingTable,
  factory: AstFactory,
  java: JavaTypes,
  runtime: RuntimeTypes,
  type_map: HashMap<TypeBinding, TypeBinding>,
  arrays_by_element: HashMap<TypeBinding, TypeBinding>,
  array_elements: HashMap<TypeBinding, TypeBinding>,
  wrappers: HashMap<TypeBinding, TypeBinding>,
  unwrapped: HashMap<TypeBinding, TypeBinding>,
  renamed_types: HashMap<TypeBinding, TypeBinding>,
  method_renames: HashMap<MethodBinding, String>,
  mapped_methods: HashMap<MethodBinding, MappedMethod>,
  mapped_invocations: HashMap<NodeId, MethodBinding>,
  mapped_variables: HashMap<VariableBinding, VariableBinding>,
  hierarchy_overrides: HashMap<TypeBinding, HierarchyData>,
  substitutions: HashMap<NodeId, Replacement>,
  variable_casts: HashMap<VariableBinding, TypeBinding>,
  releaseable_fields: HashSet<VariableBinding>,
  functions: HashSet<MethodBinding>,
  autorelease_pools: HashSet<NodeId>,
}

impl<'f> Types<'f> {
  pub fn initialize(unit: &Node<CompilationUnit>, model: &'f SourceModel) -> TypesResult<Types<'f>> {
    Types::initialize_with_options(unit, model, TypesOptions::default())
  }

  /// Builds the registry for `unit`: resolves the well-known types, creates the
  /// runtime types, binds every significant node and applies the built-in
  /// method mappings and renames.
  pub fn initialize_with_options(
    unit: &Node<CompilationUnit>,
    model: &'f SourceModel,
    options: TypesOptions,
  ) -> TypesResult<Types<'f>> {
    let mut universe = Universe::new(model);
    let java = JavaTypes::resolve(model)?;
    let runtime = RuntimeTypes::declare(universe.synthetic_mut(), model, &java)?;
    let table = BindingTable::build(unit, model)?;

    let mut types = Types {
      universe,
      options,
      table,
      factory: AstFactory::with_ids(NodeIdGen::after(unit)),
      java,
      runtime,
      type_map: HashMap::new(),
      arrays_by_element: HashMap::new(),
      array_elements: HashMap::new(),
      wrappers: HashMap::new(),
      unwrapped: HashMap::new(),
      renamed_types: HashMap::new(),
      method_renames: HashMap::new(),
      mapped_methods: HashMap::new(),
      mapped_invocations: HashMap::new(),
      mapped_variables: HashMap::new(),
      hierarchy_overrides: HashMap::new(),
      substitutions: HashMap::new(),
      variable_casts: HashMap::new(),
      releaseable_fields: HashSet::new(),
      functions: HashSet::new(),
      autorelease_pools: HashSet::new(),
    };
    types.populate_type_maps();
    types.register_builtin_methods()?;
    types.apply_global_renamings();
    if types.options.verify_bindings {
      table::verify(unit, &types.table, &types.universe)?;
    }
    debug!(
      bindings = types.table.len(),
      synthetic_types = types.universe.synthetic().type_count(),
      synthetic_methods = types.universe.synthetic().method_count(),
      mapped_methods = types.mapped_methods.len(),
      "initialized type registry"
    );
    Ok(types)
  }

  /// Ends translation of the unit. Every table goes with the registry.
  pub fn cleanup(self) {
    debug!(
      bindings = self.table.len(),
      substitutions_pending = self.substitutions.len(),
      "cleaned up type registry"
    );
  }

  pub fn universe(&self) -> &Universe<'f> {
    &self.universe
  }

  pub fn options(&self) -> &TypesOptions {
    &self.options
  }

  pub fn table(&self) -> &BindingTable {
    &self.table
  }

  pub(crate) fn table_mut(&mut self) -> &mut BindingTable {
    &mut self.table
  }

  pub fn java_types(&self) -> &JavaTypes {
    &self.java
  }

  pub fn runtime_types(&self) -> &RuntimeTypes {
    &self.runtime
  }

  /// Factory for nodes created during translation. Its ids never collide with the unit's.
  pub fn factory(&mut self) -> &mut AstFactory {
    &mut self.factory
  }

  // Binding lookups.

  pub fn get_binding(&self, node: NodeId) -> TypesResult<Binding> {
    self.table.get(node).ok_or(TypesError::UnboundNode(node))
  }

  /// Type of whatever `node` denotes: a type itself, the class a constructor
  /// creates, a method's return type or a variable's type.
  pub fn get_type_binding(&self, node: NodeId) -> TypesResult<TypeBinding> {
    Ok(match self.get_binding(node)? {
      Binding::Type(ty) => ty,
      Binding::Method(m) if self.universe.is_constructor(m) => self.universe.method_declaring_class(m),
      Binding::Method(m) => self.universe.return_type(m),
      Binding::Variable(v) => self.universe.variable_type(v),
    })
  }

  pub fn get_method_binding(&self, node: NodeId) -> TypesResult<MethodBinding> {
    match self.get_binding(node)? {
      Binding::Method(m) => Ok(m),
      found => Err(TypesError::UnexpectedBinding {
        node,
        expected: "method",
        found,
      }),
    }
  }

  pub fn get_variable_binding(&self, node: NodeId) -> TypesResult<VariableBinding> {
    match self.get_binding(node)? {
      Binding::Variable(v) => Ok(v),
      found => Err(TypesError::UnexpectedBinding {
        node,
        expected: "variable",
        found,
      }),
    }
  }

  pub fn add_binding(&mut self, node: NodeId, binding: impl Into<Binding>) {
    self.table.insert(node, binding.into());
  }

  /// Checks that every significant node under `root` is bound.
  pub fn verify_node<S: Drive>(&self, root: &S) -> TypesResult<()> {
    table::verify(root, &self.table, &self.universe)
  }

  pub fn verify_nodes<S: Drive>(&self, roots: &[S]) -> TypesResult<()> {
    roots.iter().try_for_each(|root| self.verify_node(root))
  }

  // Node synthesis.

  /// Builds a type node for `binding`, binding every node it creates.
  pub fn make_type(&mut self, binding: TypeBinding) -> TypeExpr {
    let ty = if let Some(kind) = self.universe.primitive_kind(binding) {
      self.factory.primitive_type(kind)
    } else if let Some(component) = self
      .universe
      .component_type(binding)
      .filter(|_| !binding.is_synthetic() && self.universe.is_array(binding))
    {
      let component = self.make_type(component);
      self.factory.array_type(component)
    } else {
      let erasure = self.universe.erasure(binding);
      let name = match self.universe.type_name(erasure) {
        "" => "$Local$".to_string(),
        name => name.to_string(),
      };
      self.factory.simple_type(&name)
    };
    self.table.insert(ty.id(), Binding::Type(binding));
    ty
  }

  /// Builds the runtime type node replacing `binding`, if the runtime has one.
  pub fn make_ios_type(&mut self, binding: TypeBinding) -> Option<TypeExpr> {
    let mapped = self.map_type(binding);
    (mapped != binding).then(|| self.make_type(mapped))
  }

  pub fn new_null_literal(&mut self) -> Expr {
    let lit = self.factory.lit_null();
    self.table.insert(lit.id(), Binding::Type(TypeBinding::Null));
    lit
  }

  pub fn new_boolean_literal(&mut self, value: bool) -> Expr {
    let lit = self.factory.lit_bool(value);
    self.table.insert(lit.id(), Binding::Type(self.java.boolean));
    lit
  }
}
