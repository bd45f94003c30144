use super::node::Node;
use super::node::NodeId;
use crate::loc::Loc;
use derive_visitor::Drive;
use derive_visitor::DriveMut;

/// A type as written in source.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
#[cfg_attr(feature = "serde", serde(tag = "$t"))]
pub enum TypeExpr {
  Primitive(Node<PrimitiveType>),
  Simple(Node<SimpleType>),
  Array(Node<ArrayType>),
  Parameterized(Node<ParameterizedType>),
  Wildcard(Node<WildcardType>),
}

impl TypeExpr {
  pub fn id(&self) -> NodeId {
    match self {
      TypeExpr::Primitive(n) => n.id,
      TypeExpr::Simple(n) => n.id,
      TypeExpr::Array(n) => n.id,
      TypeExpr::Parameterized(n) => n.id,
      TypeExpr::Wildcard(n) => n.id,
    }
  }

  pub fn loc(&self) -> Loc {
    match self {
      TypeExpr::Primitive(n) => n.loc,
      TypeExpr::Simple(n) => n.loc,
      TypeExpr::Array(n) => n.loc,
      TypeExpr::Parameterized(n) => n.loc,
      TypeExpr::Wildcard(n) => n.loc,
    }
  }
}

/// The nine primitive keywords, `void` included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PrimitiveKind {
  Boolean,
  Byte,
  Char,
  Short,
  Int,
  Long,
  Float,
  Double,
  Void,
}

impl PrimitiveKind {
  pub const ALL: [PrimitiveKind; 9] = [
    PrimitiveKind::Boolean,
    PrimitiveKind::Byte,
    PrimitiveKind::Char,
    PrimitiveKind::Short,
    PrimitiveKind::Int,
    PrimitiveKind::Long,
    PrimitiveKind::Float,
    PrimitiveKind::Double,
    PrimitiveKind::Void,
  ];

  pub fn keyword(self) -> &'static str {
    match self {
      PrimitiveKind::Boolean => "boolean",
      PrimitiveKind::Byte => "byte",
      PrimitiveKind::Char => "char",
      PrimitiveKind::Short => "short",
      PrimitiveKind::Int => "int",
      PrimitiveKind::Long => "long",
      PrimitiveKind::Float => "float",
      PrimitiveKind::Double => "double",
      PrimitiveKind::Void => "void",
    }
  }

  pub fn from_keyword(kw: &str) -> Option<PrimitiveKind> {
    PrimitiveKind::ALL.into_iter().find(|k| k.keyword() == kw)
  }

  /// JVM descriptor character, e.g. `I` for `int`.
  pub fn descriptor(self) -> char {
    match self {
      PrimitiveKind::Boolean => 'Z',
      PrimitiveKind::Byte => 'B',
      PrimitiveKind::Char => 'C',
      PrimitiveKind::Short => 'S',
      PrimitiveKind::Int => 'I',
      PrimitiveKind::Long => 'J',
      PrimitiveKind::Float => 'F',
      PrimitiveKind::Double => 'D',
      PrimitiveKind::Void => 'V',
    }
  }

  pub fn is_numeric(self) -> bool {
    !matches!(self, PrimitiveKind::Boolean | PrimitiveKind::Void)
  }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct PrimitiveType {
  #[drive(skip)]
  pub kind: PrimitiveKind,
}

/// A possibly qualified class or interface name, e.g. `java.util.List`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct SimpleType {
  #[drive(skip)]
  pub name: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct ArrayType {
  pub component: TypeExpr,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct ParameterizedType {
  pub base: TypeExpr,
  pub arguments: Vec<TypeExpr>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Drive, DriveMut)]
pub struct WildcardType {
  pub bound: Option<TypeExpr>,
  // `? extends` when true, `? super` otherwise. Meaningless without a bound.
  #[drive(skip)]
  pub upper: bool,
}
