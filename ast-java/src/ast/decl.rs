use super::expr::Expr;
use super::expr::SimpleName;
use super::modifiers::Modifiers;
use super::node::Node;
use super::stmt::Block;
use super::type_expr::TypeExpr;
use derive_more::derive::{From, TryInto};
use derive_visitor::{Drive, DriveMut};

/// One source file.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct CompilationUnit {
  /// Path of the source file relative to its source root, e.g. `com/example/Foo.java`.
  #[drive(skip)]
  pub path: String,
  #[drive(skip)]
  pub package: Option<String>,
  #[drive(skip)]
  pub imports: Vec<String>,
  pub types: Vec<Node<TypeDecl>>,
}

impl CompilationUnit {
  /// File name without directories or extension; the name the unit's primary type must have.
  pub fn main_type_name(&self) -> &str {
    let file = self.path.rsplit('/').next().unwrap_or(&self.path);
    file.strip_suffix(".java").unwrap_or(file)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TypeDeclKind {
  Class,
  Interface,
  Enum,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct TypeDecl {
  #[drive(skip)]
  pub kind: TypeDeclKind,
  #[drive(skip)]
  pub modifiers: Modifiers,
  pub name: Node<SimpleName>,
  pub superclass: Option<TypeExpr>,
  pub interfaces: Vec<TypeExpr>,
  pub members: Vec<Member>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut, From, TryInto)]
#[cfg_attr(feature = "serde", serde(tag = "$t"))]
pub enum Member {
  Field(Node<FieldDecl>),
  Method(Node<MethodDecl>),
  Type(Node<TypeDecl>),
  Initializer(Node<Initializer>),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct FieldDecl {
  #[drive(skip)]
  pub modifiers: Modifiers,
  pub ty: TypeExpr,
  pub fragments: Vec<Node<VarDeclFragment>>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct MethodDecl {
  #[drive(skip)]
  pub modifiers: Modifiers,
  #[drive(skip)]
  pub constructor: bool,
  // None for constructors.
  pub return_type: Option<TypeExpr>,
  pub name: Node<SimpleName>,
  pub params: Vec<Node<SingleVarDecl>>,
  pub body: Option<Node<Block>>,
}

impl MethodDecl {
  pub fn is_varargs(&self) -> bool {
    self.params.last().is_some_and(|p| p.stx.varargs)
  }
}

/// Method or catch parameter, or the variable of an enhanced `for`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct SingleVarDecl {
  #[drive(skip)]
  pub modifiers: Modifiers,
  #[drive(skip)]
  pub varargs: bool,
  pub ty: TypeExpr,
  pub name: Node<SimpleName>,
}

/// `name = initializer` within a field or local variable declaration.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct VarDeclFragment {
  pub name: Node<SimpleName>,
  pub initializer: Option<Expr>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct Initializer {
  #[drive(skip)]
  pub is_static: bool,
  pub body: Node<Block>,
}
