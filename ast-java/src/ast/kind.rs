use super::expr::Expr;
use super::type_expr::TypeExpr;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// Kinds of nodes that denote something the semantic model can resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
  SimpleName,
  Label,
  TypeDecl,
  MethodDecl,
  SingleVarDecl,
  VarDeclFragment,
  SuperCtorCall,
  CtorCall,
  FieldAccess,
  Call,
  SuperCall,
  New,
  ArrayCreation,
  ArrayInit,
  ArrayAccess,
  Assign,
  Infix,
  Prefix,
  Postfix,
  Cast,
  InstanceOf,
  Cond,
  Paren,
  This,
  TypeLiteral,
  Literal,
  PrimitiveType,
  SimpleType,
  ArrayType,
  ParameterizedType,
  WildcardType,
}

impl NodeKind {
  pub fn is_invocation(self) -> bool {
    matches!(
      self,
      NodeKind::Call | NodeKind::SuperCall | NodeKind::New | NodeKind::SuperCtorCall | NodeKind::CtorCall
    )
  }

  pub fn is_type(self) -> bool {
    matches!(
      self,
      NodeKind::PrimitiveType
        | NodeKind::SimpleType
        | NodeKind::ArrayType
        | NodeKind::ParameterizedType
        | NodeKind::WildcardType
    )
  }
}

impl Display for NodeKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    Debug::fmt(self, f)
  }
}

impl Expr {
  pub fn kind(&self) -> NodeKind {
    match self {
      Expr::Name(_) => NodeKind::SimpleName,
      Expr::FieldAccess(_) => NodeKind::FieldAccess,
      Expr::Call(_) => NodeKind::Call,
      Expr::SuperCall(_) => NodeKind::SuperCall,
      Expr::New(_) => NodeKind::New,
      Expr::ArrayCreation(_) => NodeKind::ArrayCreation,
      Expr::ArrayInit(_) => NodeKind::ArrayInit,
      Expr::ArrayAccess(_) => NodeKind::ArrayAccess,
      Expr::Assign(_) => NodeKind::Assign,
      Expr::Infix(_) => NodeKind::Infix,
      Expr::Prefix(_) => NodeKind::Prefix,
      Expr::Postfix(_) => NodeKind::Postfix,
      Expr::Cast(_) => NodeKind::Cast,
      Expr::InstanceOf(_) => NodeKind::InstanceOf,
      Expr::Cond(_) => NodeKind::Cond,
      Expr::Paren(_) => NodeKind::Paren,
      Expr::This(_) => NodeKind::This,
      Expr::TypeLiteral(_) => NodeKind::TypeLiteral,
      Expr::LitBool(_) | Expr::LitChar(_) | Expr::LitNull(_) | Expr::LitNum(_) | Expr::LitStr(_) => {
        NodeKind::Literal
      }
    }
  }
}

impl TypeExpr {
  pub fn kind(&self) -> NodeKind {
    match self {
      TypeExpr::Primitive(_) => NodeKind::PrimitiveType,
      TypeExpr::Simple(_) => NodeKind::SimpleType,
      TypeExpr::Array(_) => NodeKind::ArrayType,
      TypeExpr::Parameterized(_) => NodeKind::ParameterizedType,
      TypeExpr::Wildcard(_) => NodeKind::WildcardType,
    }
  }
}
