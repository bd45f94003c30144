//! Types a unit's generated header and implementation must be able to see.
//!
//! Types whose full definition is needed go into `imports`. Types only named as
//! a superclass or interface go into `super_types`; the header can forward
//! declare those, so nothing that ends up in `super_types` is also imported.

use crate::binding::Binding;
use crate::binding::TypeBinding;
use crate::names;
use crate::registry::Types;
use ahash::HashSet;
use ahash::HashSetExt;
use ast_java::ast::decl::CompilationUnit;
use ast_java::ast::decl::FieldDecl;
use ast_java::ast::decl::Member;
use ast_java::ast::decl::MethodDecl;
use ast_java::ast::decl::SingleVarDecl;
use ast_java::ast::decl::TypeDecl;
use ast_java::ast::expr::AssignOperator;
use ast_java::ast::expr::Expr;
use ast_java::ast::expr::InfixOperator;
use ast_java::ast::node::Node;
use ast_java::ast::node::NodeId;
use ast_java::ast::stmt::CtorCall;
use ast_java::ast::stmt::LocalVarStmt;
use ast_java::ast::stmt::SuperCtorCall;
use derive_visitor::Drive;
use derive_visitor::Visitor;
use serde::Serialize;
use std::collections::BTreeSet;

type SingleVarDeclNode = Node<SingleVarDecl>;
type LocalVarStmtNode = Node<LocalVarStmt>;
type SuperCtorCallNode = Node<SuperCtorCall>;
type CtorCallNode = Node<CtorCall>;

/// A type generated code refers to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Import {
  /// Name of the type in generated code.
  pub type_name: String,
  /// File to import, without extension.
  pub import_file_name: String,
  pub is_interface: bool,
}

impl Import {
  pub fn new(types: &Types<'_>, ty: TypeBinding) -> Import {
    let u = types.universe();
    Import {
      type_name: names::full_name(u, ty),
      import_file_name: names::import_file_name(u, ty),
      is_interface: u.is_interface(ty),
    }
  }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Target {
  Imports,
  SuperTypes,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ImportCollector {
  imports: BTreeSet<Import>,
  super_types: BTreeSet<Import>,
}

impl ImportCollector {
  /// References the header of `unit` needs: member signatures and supertypes.
  pub fn collect_header(types: &Types<'_>, unit: &Node<CompilationUnit>) -> ImportCollector {
    let mut collector = ImportCollector::default();
    for decl in &unit.stx.types {
      collector.collect_declaration(types, decl);
    }
    collector.finish();
    collector
  }

  /// References the implementation of `unit` needs.
  ///
  /// Adds everything method bodies refer to, and leaves out types the unit
  /// declares itself, except its primary type.
  pub fn collect_implementation(types: &Types<'_>, unit: &Node<CompilationUnit>) -> ImportCollector {
    let mut collector = ImportCollector::default();
    for decl in &unit.stx.types {
      collector.collect_declaration(types, decl);
      let mut refs = BodyReferences {
        types,
        found: Vec::new(),
      };
      decl.drive(&mut refs);
      for ty in refs.found {
        collector.add(types, ty, Target::Imports);
      }
    }

    let mut declared = Vec::new();
    for decl in &unit.stx.types {
      declared_types(types, decl, &mut declared);
    }
    let primary = unit
      .stx
      .types
      .iter()
      .find(|d| d.stx.name.stx.name == unit.stx.main_type_name())
      .or_else(|| unit.stx.types.first())
      .and_then(|d| bound_type(types, d.id));
    let excluded: HashSet<Import> = declared
      .into_iter()
      .filter(|ty| Some(*ty) != primary)
      .map(|ty| Import::new(types, ty))
      .collect();
    collector.imports.retain(|i| !excluded.contains(i));
    collector.super_types.retain(|i| !excluded.contains(i));
    if let Some(primary) = primary {
      let import = Import::new(types, primary);
      collector.super_types.remove(&import);
      collector.imports.insert(import);
    }
    collector.finish();
    collector
  }

  pub fn imports(&self) -> &BTreeSet<Import> {
    &self.imports
  }

  pub fn super_types(&self) -> &BTreeSet<Import> {
    &self.super_types
  }

  pub fn into_parts(self) -> (BTreeSet<Import>, BTreeSet<Import>) {
    (self.imports, self.super_types)
  }

  fn finish(&mut self) {
    let super_types = &self.super_types;
    self.imports.retain(|i| !super_types.contains(i));
  }

  fn collect_declaration(&mut self, types: &Types<'_>, decl: &Node<TypeDecl>) {
    if let Some(ty) = bound_type(types, decl.id) {
      if let Some(superclass) = types.superclass(ty) {
        self.add(types, superclass, Target::SuperTypes);
      }
      for interface in types.interfaces(ty) {
        self.add(types, *interface, Target::SuperTypes);
      }
    }
    for member in &decl.stx.members {
      match member {
        Member::Field(field) => self.collect_field(types, field),
        Member::Method(method) => self.collect_method(types, method),
        Member::Type(nested) => self.collect_declaration(types, nested),
        Member::Initializer(_) => {}
      }
    }
  }

  fn collect_field(&mut self, types: &Types<'_>, field: &Node<FieldDecl>) {
    if let Some(ty) = bound_type(types, field.stx.ty.id()) {
      self.add(types, ty, Target::Imports);
    }
  }

  fn collect_method(&mut self, types: &Types<'_>, method: &Node<MethodDecl>) {
    // Initialization binds every method declaration in the unit. A miss is a
    // declaration synthesized later without a binding, and it names no types.
    let Ok(binding) = types.get_method_binding(method.id) else {
      return;
    };
    let u = types.universe();
    if !u.is_constructor(binding) {
      self.add(types, u.return_type(binding), Target::Imports);
    }
    for param in u.parameter_types(binding) {
      self.add(types, *param, Target::Imports);
    }
    if method.stx.is_varargs() || u.is_varargs(binding) {
      self.add(types, types.object_array(), Target::Imports);
    }
  }

  fn add(&mut self, types: &Types<'_>, ty: TypeBinding, target: Target) {
    let mut referenced = Vec::new();
    references(types, ty, &mut HashSet::new(), &mut referenced);
    let set = match target {
      Target::Imports => &mut self.imports,
      Target::SuperTypes => &mut self.super_types,
    };
    for ty in referenced {
      set.insert(Import::new(types, ty));
    }
  }
}

fn bound_type(types: &Types<'_>, node: NodeId) -> Option<TypeBinding> {
  types.table().get(node).and_then(Binding::as_type)
}

fn declared_types(types: &Types<'_>, decl: &Node<TypeDecl>, out: &mut Vec<TypeBinding>) {
  out.extend(bound_type(types, decl.id));
  for member in &decl.stx.members {
    if let Member::Type(nested) = member {
      declared_types(types, nested, out);
    }
  }
}

/// Runtime types that do not come from a generated header, like `NSObject`.
fn is_native(types: &Types<'_>, ty: TypeBinding) -> bool {
  let u = types.universe();
  ty.is_synthetic() && u.header(ty).is_none() && u.renamed_from(ty).is_none()
}

/// The types generated code names when it refers to `ty`.
///
/// `seen` holds the types already walked; a type variable bounded by a type
/// mentioning itself, like `T extends Comparable<T>`, is walked once.
fn references(types: &Types<'_>, ty: TypeBinding, seen: &mut HashSet<TypeBinding>, out: &mut Vec<TypeBinding>) {
  if !seen.insert(ty) {
    return;
  }
  let u = types.universe();
  if ty.is_null() || u.is_primitive(ty) {
    return;
  }
  if u.is_type_variable(ty) {
    if let Some(bound) = u.type_bounds(ty).first().filter(|b| !types.is_java_object_type(**b)) {
      references(types, *bound, seen, out);
    }
    return;
  }
  if u.is_wildcard(ty) {
    if let Some(bound) = u.wildcard_bound(ty) {
      references(types, bound, seen, out);
    }
    return;
  }
  if let Some(wildcard) = u.capture_wildcard(ty) {
    if let Some(bound) = u.wildcard_bound(wildcard) {
      references(types, bound, seen, out);
    }
    return;
  }
  if u.is_parameterized(ty) {
    references(types, u.type_declaration(ty), seen, out);
    for argument in u.type_arguments(ty) {
      references(types, *argument, seen, out);
    }
    return;
  }
  if u.is_array(ty) && !ty.is_synthetic() {
    out.push(types.map_type(ty));
    references(types, u.element_type(ty), seen, out);
    return;
  }
  let mapped = types.map_type(types.get_renamed_binding(ty));
  if !is_native(types, mapped) {
    out.push(mapped);
  }
}

/// Types referred to from method bodies and initializers.
#[derive(Visitor)]
#[visitor(
  Expr(enter),
  SingleVarDeclNode(enter),
  LocalVarStmtNode(enter),
  SuperCtorCallNode(enter),
  CtorCallNode(enter)
)]
struct BodyReferences<'a, 'f> {
  types: &'a Types<'f>,
  found: Vec<TypeBinding>,
}

impl BodyReferences<'_, '_> {
  fn node_type(&mut self, node: NodeId) {
    self.found.extend(bound_type(self.types, node));
  }

  fn invocation(&mut self, node: NodeId) {
    let Some(method) = self.types.resolve_invocation_binding(node) else {
      return;
    };
    let u = self.types.universe();
    self.found.push(u.method_declaring_class(method));
    if !u.is_constructor(method) {
      self.found.push(u.return_type(method));
    }
    if u.is_varargs(method) {
      self.found.push(self.types.object_array());
    }
  }

  fn enter_expr(&mut self, expr: &Expr) {
    match expr {
      Expr::Call(n) => self.invocation(n.id),
      Expr::SuperCall(n) => self.invocation(n.id),
      Expr::New(n) => {
        self.node_type(n.stx.ty.id());
        self.invocation(n.id);
      }
      Expr::Cast(n) => self.node_type(n.stx.ty.id()),
      Expr::InstanceOf(n) => self.node_type(n.stx.ty.id()),
      Expr::TypeLiteral(n) => {
        self.found.push(self.types.ios_class());
        self.node_type(n.stx.ty.id());
      }
      Expr::ArrayCreation(n) => self.node_type(n.id),
      Expr::Infix(n) if n.stx.operator == InfixOperator::Add => self.concatenation(n.id, n.stx.operands()),
      Expr::Assign(n) if n.stx.operator == AssignOperator::AddAssign => {
        self.concatenation(n.id, [&n.stx.left, &n.stx.right].into_iter())
      }
      Expr::Name(n) => self.static_member(n.id),
      Expr::FieldAccess(n) => self.static_member(n.stx.name.id),
      _ => {}
    }
  }

  /// A string built from a `boolean` goes through the boxed wrapper's description.
  fn concatenation<'e>(&mut self, result: NodeId, mut operands: impl Iterator<Item = &'e Expr>) {
    let concat = bound_type(self.types, result).is_some_and(|t| self.types.is_java_string_type(t));
    let boolean = self.types.java_types().boolean;
    if concat && operands.any(|op| bound_type(self.types, op.id()) == Some(boolean)) {
      self.found.push(self.types.java_types().boolean_wrapper);
    }
  }

  fn static_member(&mut self, node: NodeId) {
    let Some(Binding::Variable(var)) = self.types.table().get(node) else {
      return;
    };
    let u = self.types.universe();
    if u.is_field(var) && self.types.is_static_variable(var) {
      self.found.extend(u.variable_declaring_class(var));
    }
  }

  fn enter_single_var_decl_node(&mut self, node: &SingleVarDeclNode) {
    self.node_type(node.stx.ty.id());
  }

  fn enter_local_var_stmt_node(&mut self, node: &LocalVarStmtNode) {
    self.node_type(node.stx.ty.id());
  }

  fn enter_super_ctor_call_node(&mut self, node: &SuperCtorCallNode) {
    self.invocation(node.id);
  }

  fn enter_ctor_call_node(&mut self, node: &CtorCallNode) {
    self.invocation(node.id);
  }
}
