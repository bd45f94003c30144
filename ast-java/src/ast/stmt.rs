use super::decl::SingleVarDecl;
use super::decl::VarDeclFragment;
use super::expr::Expr;
use super::node::Node;
use super::node::NodeId;
use super::type_expr::TypeExpr;
use derive_more::derive::{From, TryInto};
use derive_visitor::{Drive, DriveMut};

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut, From, TryInto)]
#[cfg_attr(feature = "serde", serde(tag = "$t"))]
pub enum Stmt {
  Block(Node<Block>),
  Expr(Node<ExprStmt>),
  LocalVar(Node<LocalVarStmt>),
  Return(Node<ReturnStmt>),
  If(Node<IfStmt>),
  While(Node<WhileStmt>),
  EnhancedFor(Node<EnhancedForStmt>),
  Labeled(Node<LabeledStmt>),
  Break(Node<BreakStmt>),
  Continue(Node<ContinueStmt>),
  Throw(Node<ThrowStmt>),
  Try(Node<TryStmt>),
  SuperCtorCall(Node<SuperCtorCall>),
  CtorCall(Node<CtorCall>),
}

impl Stmt {
  pub fn id(&self) -> NodeId {
    match self {
      Stmt::Block(n) => n.id,
      Stmt::Expr(n) => n.id,
      Stmt::LocalVar(n) => n.id,
      Stmt::Return(n) => n.id,
      Stmt::If(n) => n.id,
      Stmt::While(n) => n.id,
      Stmt::EnhancedFor(n) => n.id,
      Stmt::Labeled(n) => n.id,
      Stmt::Break(n) => n.id,
      Stmt::Continue(n) => n.id,
      Stmt::Throw(n) => n.id,
      Stmt::Try(n) => n.id,
      Stmt::SuperCtorCall(n) => n.id,
      Stmt::CtorCall(n) => n.id,
    }
  }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Default, Drive, DriveMut)]
pub struct Block {
  pub body: Vec<Stmt>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct ExprStmt {
  pub expr: Expr,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct LocalVarStmt {
  pub ty: TypeExpr,
  pub fragments: Vec<Node<VarDeclFragment>>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct ReturnStmt {
  pub value: Option<Expr>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct IfStmt {
  pub test: Expr,
  pub consequent: Stmt,
  pub alternate: Option<Stmt>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct WhileStmt {
  pub test: Expr,
  pub body: Stmt,
}

/// `for (T x : iterable) body`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct EnhancedForStmt {
  pub param: Node<SingleVarDecl>,
  pub iterable: Expr,
  pub body: Stmt,
}

/// Identifier naming a labeled statement, or referring to one from `break`/`continue`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct Label {
  #[drive(skip)]
  pub name: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct LabeledStmt {
  pub label: Node<Label>,
  pub body: Stmt,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct BreakStmt {
  pub label: Option<Node<Label>>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct ContinueStmt {
  pub label: Option<Node<Label>>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct ThrowStmt {
  pub value: Expr,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct TryStmt {
  pub body: Node<Block>,
  pub catches: Vec<Node<CatchClause>>,
  pub finally: Option<Node<Block>>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct CatchClause {
  pub param: Node<SingleVarDecl>,
  pub body: Node<Block>,
}

/// `super(args);` as the first statement of a constructor.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct SuperCtorCall {
  pub arguments: Vec<Expr>,
}

/// `this(args);` as the first statement of a constructor.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct CtorCall {
  pub arguments: Vec<Expr>,
}
