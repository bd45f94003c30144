use ast_java::ast::decl::MethodDecl;
use ast_java::ast::decl::SingleVarDecl;
use ast_java::ast::decl::TypeDecl;
use ast_java::ast::decl::VarDeclFragment;
use ast_java::ast::expr::Expr;
use ast_java::ast::expr::SimpleName;
use ast_java::ast::kind::NodeKind;
use ast_java::ast::node::Node;
use ast_java::ast::node::NodeId;
use ast_java::ast::stmt::CtorCall;
use ast_java::ast::stmt::Label;
use ast_java::ast::stmt::SuperCtorCall;
use ast_java::ast::type_expr::TypeExpr;
use ast_java::loc::Loc;
use derive_visitor::Drive;
use derive_visitor::Visitor;

type SimpleNameNode = Node<SimpleName>;
type LabelNode = Node<Label>;
type TypeDeclNode = Node<TypeDecl>;
type MethodDeclNode = Node<MethodDecl>;
type SingleVarDeclNode = Node<SingleVarDecl>;
type VarDeclFragmentNode = Node<VarDeclFragment>;
type SuperCtorCallNode = Node<SuperCtorCall>;
type CtorCallNode = Node<CtorCall>;

/// A node the semantic model must resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignificantNode {
  pub id: NodeId,
  pub kind: NodeKind,
  pub loc: Loc,
  /// Argument count, for invocations.
  pub arity: Option<usize>,
}

#[derive(Default, Visitor)]
#[visitor(
  SimpleNameNode(enter),
  LabelNode(enter),
  Expr(enter),
  TypeExpr(enter),
  TypeDeclNode(enter),
  MethodDeclNode(enter),
  SingleVarDeclNode(enter),
  VarDeclFragmentNode(enter),
  SuperCtorCallNode(enter),
  CtorCallNode(enter)
)]
struct Collector {
  nodes: Vec<SignificantNode>,
}

impl Collector {
  fn push(&mut self, id: NodeId, kind: NodeKind, loc: Loc, arity: Option<usize>) {
    self.nodes.push(SignificantNode { id, kind, loc, arity });
  }

  fn enter_simple_name_node(&mut self, node: &SimpleNameNode) {
    self.push(node.id, NodeKind::SimpleName, node.loc, None);
  }

  fn enter_label_node(&mut self, node: &LabelNode) {
    self.push(node.id, NodeKind::Label, node.loc, None);
  }

  fn enter_expr(&mut self, expr: &Expr) {
    // Names are seen as `SimpleName` nodes.
    if let Expr::Name(_) = expr {
      return;
    }
    let arity = expr.arguments().map(<[Expr]>::len);
    self.push(expr.id(), expr.kind(), expr.loc(), arity);
  }

  fn enter_type_expr(&mut self, ty: &TypeExpr) {
    self.push(ty.id(), ty.kind(), ty.loc(), None);
  }

  fn enter_type_decl_node(&mut self, node: &TypeDeclNode) {
    self.push(node.id, NodeKind::TypeDecl, node.loc, None);
  }

  fn enter_method_decl_node(&mut self, node: &MethodDeclNode) {
    self.push(node.id, NodeKind::MethodDecl, node.loc, None);
  }

  fn enter_single_var_decl_node(&mut self, node: &SingleVarDeclNode) {
    self.push(node.id, NodeKind::SingleVarDecl, node.loc, None);
  }

  fn enter_var_decl_fragment_node(&mut self, node: &VarDeclFragmentNode) {
    self.push(node.id, NodeKind::VarDeclFragment, node.loc, None);
  }

  fn enter_super_ctor_call_node(&mut self, node: &SuperCtorCallNode) {
    let arity = Some(node.stx.arguments.len());
    self.push(node.id, NodeKind::SuperCtorCall, node.loc, arity);
  }

  fn enter_ctor_call_node(&mut self, node: &CtorCallNode) {
    let arity = Some(node.stx.arguments.len());
    self.push(node.id, NodeKind::CtorCall, node.loc, arity);
  }
}

/// Every significant node under `root`, in pre-order.
pub fn significant_nodes<S: Drive>(root: &S) -> Vec<SignificantNode> {
  let mut collector = Collector::default();
  root.drive(&mut collector);
  collector.nodes
}
