use std::cmp::{max, min};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Byte range of a node within its compilation unit.
///
/// Nodes created during translation have no source text; they carry
/// [`Loc::SYNTHETIC`] or the location of the node they were derived from.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub const SYNTHETIC: Loc = Loc(0, 0);

  pub fn is_synthetic(&self) -> bool {
    *self == Loc::SYNTHETIC
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Smallest range covering both locations.
  pub fn extend(self, other: Loc) -> Loc {
    if self.is_synthetic() {
      return other;
    }
    if other.is_synthetic() {
      return self;
    }
    Loc(min(self.0, other.0), max(self.1, other.1))
  }
}

impl Display for Loc {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if self.is_synthetic() {
      write!(f, "<synthetic>")
    } else {
      write!(f, "{}..{}", self.0, self.1)
    }
  }
}
