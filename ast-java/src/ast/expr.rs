use super::node::Node;
use super::node::NodeId;
use super::type_expr::TypeExpr;
use crate::loc::Loc;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut, From, TryInto)]
#[cfg_attr(feature = "serde", serde(tag = "$t"))]
pub enum Expr {
  Name(Node<SimpleName>),
  FieldAccess(Node<FieldAccessExpr>),
  Call(Node<CallExpr>),
  SuperCall(Node<SuperCallExpr>),
  New(Node<NewExpr>),
  ArrayCreation(Node<ArrayCreationExpr>),
  ArrayInit(Node<ArrayInitExpr>),
  ArrayAccess(Node<ArrayAccessExpr>),
  Assign(Node<AssignExpr>),
  Infix(Node<InfixExpr>),
  Prefix(Node<PrefixExpr>),
  Postfix(Node<PostfixExpr>),
  Cast(Node<CastExpr>),
  InstanceOf(Node<InstanceOfExpr>),
  Cond(Node<CondExpr>),
  Paren(Node<ParenExpr>),
  This(Node<ThisExpr>),
  TypeLiteral(Node<TypeLiteralExpr>),

  // Literals.
  LitBool(Node<LitBoolExpr>),
  LitChar(Node<LitCharExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitStr(Node<LitStrExpr>),
}

macro_rules! expr_node_field {
  ($self:ident, $n:ident => $e:expr) => {
    match $self {
      Expr::Name($n) => $e,
      Expr::FieldAccess($n) => $e,
      Expr::Call($n) => $e,
      Expr::SuperCall($n) => $e,
      Expr::New($n) => $e,
      Expr::ArrayCreation($n) => $e,
      Expr::ArrayInit($n) => $e,
      Expr::ArrayAccess($n) => $e,
      Expr::Assign($n) => $e,
      Expr::Infix($n) => $e,
      Expr::Prefix($n) => $e,
      Expr::Postfix($n) => $e,
      Expr::Cast($n) => $e,
      Expr::InstanceOf($n) => $e,
      Expr::Cond($n) => $e,
      Expr::Paren($n) => $e,
      Expr::This($n) => $e,
      Expr::TypeLiteral($n) => $e,
      Expr::LitBool($n) => $e,
      Expr::LitChar($n) => $e,
      Expr::LitNull($n) => $e,
      Expr::LitNum($n) => $e,
      Expr::LitStr($n) => $e,
    }
  };
}

impl Expr {
  pub fn id(&self) -> NodeId {
    expr_node_field!(self, n => n.id)
  }

  pub fn loc(&self) -> Loc {
    expr_node_field!(self, n => n.loc)
  }

  /// Argument list of an invocation-like expression.
  pub fn arguments(&self) -> Option<&[Expr]> {
    match self {
      Expr::Call(n) => Some(&n.stx.arguments),
      Expr::SuperCall(n) => Some(&n.stx.arguments),
      Expr::New(n) => Some(&n.stx.arguments),
      _ => None,
    }
  }
}

/// An identifier in expression, declaration or member-name position.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct SimpleName {
  #[drive(skip)]
  pub name: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct FieldAccessExpr {
  pub object: Expr,
  pub name: Node<SimpleName>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct CallExpr {
  pub receiver: Option<Expr>,
  pub name: Node<SimpleName>,
  pub arguments: Vec<Expr>,
}

/// `super.name(args)`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct SuperCallExpr {
  pub name: Node<SimpleName>,
  pub arguments: Vec<Expr>,
}

/// `new T(args)`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct NewExpr {
  pub ty: TypeExpr,
  pub arguments: Vec<Expr>,
}

/// `new T[n][]` or `new T[] { ... }`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct ArrayCreationExpr {
  pub ty: TypeExpr,
  pub dimensions: Vec<Expr>,
  pub initializer: Option<Node<ArrayInitExpr>>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct ArrayInitExpr {
  pub elements: Vec<Expr>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct ArrayAccessExpr {
  pub array: Expr,
  pub index: Expr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AssignOperator {
  Assign,
  AddAssign,
  SubAssign,
  MulAssign,
  DivAssign,
  RemAssign,
  BitAndAssign,
  BitOrAssign,
  BitXorAssign,
  ShlAssign,
  ShrAssign,
  UShrAssign,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct AssignExpr {
  #[drive(skip)]
  pub operator: AssignOperator,
  pub left: Expr,
  pub right: Expr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InfixOperator {
  Add,
  Sub,
  Mul,
  Div,
  Rem,
  Shl,
  Shr,
  UShr,
  Less,
  Greater,
  LessEq,
  GreaterEq,
  Eq,
  NotEq,
  BitAnd,
  BitOr,
  BitXor,
  And,
  Or,
}

/// `left op right op extended...`, left-associative.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct InfixExpr {
  #[drive(skip)]
  pub operator: InfixOperator,
  pub left: Expr,
  pub right: Expr,
  pub extended: Vec<Expr>,
}

impl InfixExpr {
  pub fn operands(&self) -> impl Iterator<Item = &Expr> {
    [&self.left, &self.right].into_iter().chain(self.extended.iter())
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PrefixOperator {
  Increment,
  Decrement,
  Plus,
  Minus,
  Complement,
  Not,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct PrefixExpr {
  #[drive(skip)]
  pub operator: PrefixOperator,
  pub operand: Expr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PostfixOperator {
  Increment,
  Decrement,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct PostfixExpr {
  #[drive(skip)]
  pub operator: PostfixOperator,
  pub operand: Expr,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct CastExpr {
  pub ty: TypeExpr,
  pub value: Expr,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct InstanceOfExpr {
  pub value: Expr,
  pub ty: TypeExpr,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct CondExpr {
  pub test: Expr,
  pub consequent: Expr,
  pub alternate: Expr,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct ParenExpr {
  pub value: Expr,
}

/// `this` or `Outer.this`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct ThisExpr {
  #[drive(skip)]
  pub qualifier: Option<String>,
}

/// `T.class`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct TypeLiteralExpr {
  pub ty: TypeExpr,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct LitCharExpr {
  #[drive(skip)]
  pub value: char,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct LitNullExpr {}

/// Numeric literal, kept as written (suffixes included) so no precision is lost.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub raw: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}
