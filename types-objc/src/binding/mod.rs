//! Handles to resolved declarations.
//!
//! A binding is a small `Copy` value naming an entry in one of two arenas: the
//! frontend's immutable [`SourceModel`](source::SourceModel), or the
//! translator's own [`SyntheticUniverse`](crate::synthetic::SyntheticUniverse).
//! Equality is identity within those arenas, so bindings are used directly as
//! keys of every side table.

pub mod java_lang;
pub mod source;

use derive_more::derive::{From, TryInto};
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

macro_rules! arena_id {
  ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
    $(
      $(#[$meta])*
      #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
      pub struct $name(pub(crate) u32);

      impl $name {
        pub fn raw(self) -> u32 {
          self.0
        }

        pub(crate) fn index(self) -> usize {
          self.0 as usize
        }
      }
    )*
  };
}

arena_id!(
  /// Type declared by, or derived from, the frontend.
  SourceTypeId,
  SourceMethodId,
  SourceVarId,
  /// Type invented for the target runtime.
  SyntheticTypeId,
  SyntheticMethodId,
  /// Compiler-introduced local or parameter.
  GeneratedVarId,
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TypeBinding {
  Source(SourceTypeId),
  Synthetic(SyntheticTypeId),
  /// Type of the `null` literal. No declaration exists for it anywhere.
  Null,
}

impl TypeBinding {
  pub fn is_synthetic(self) -> bool {
    matches!(self, TypeBinding::Synthetic(_))
  }

  pub fn is_null(self) -> bool {
    self == TypeBinding::Null
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MethodBinding {
  Source(SourceMethodId),
  Synthetic(SyntheticMethodId),
}

impl MethodBinding {
  pub fn is_synthetic(self) -> bool {
    matches!(self, MethodBinding::Synthetic(_))
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum VariableBinding {
  Source(SourceVarId),
  Generated(GeneratedVarId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, From, TryInto, Serialize)]
pub enum Binding {
  Type(TypeBinding),
  Method(MethodBinding),
  Variable(VariableBinding),
}

impl Binding {
  pub fn kind_name(&self) -> &'static str {
    match self {
      Binding::Type(_) => "type",
      Binding::Method(_) => "method",
      Binding::Variable(_) => "variable",
    }
  }

  pub fn as_type(self) -> Option<TypeBinding> {
    match self {
      Binding::Type(t) => Some(t),
      _ => None,
    }
  }

  pub fn as_method(self) -> Option<MethodBinding> {
    match self {
      Binding::Method(m) => Some(m),
      _ => None,
    }
  }

  pub fn as_variable(self) -> Option<VariableBinding> {
    match self {
      Binding::Variable(v) => Some(v),
      _ => None,
    }
  }
}

impl Display for Binding {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Binding::Type(t) => write!(f, "type {:?}", t),
      Binding::Method(m) => write!(f, "method {:?}", m),
      Binding::Variable(v) => write!(f, "variable {:?}", v),
    }
  }
}

/// Compile-time value of a constant variable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ConstantValue {
  Bool(bool),
  Char(char),
  Int(i64),
  Double(f64),
  Str(String),
}
