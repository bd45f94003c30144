use crate::loc::Loc;
use derive_visitor::{Drive, DriveMut, Event, Visitor, VisitorMut};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// Stable identity of a syntax node.
///
/// Ids are assigned once, when the node is created, and never reused within a
/// compilation unit. Semantic side tables key on them instead of on node
/// addresses, so they stay valid while trees are moved, cloned and rewritten.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
  pub fn raw(self) -> u32 {
    self.0
  }

  pub fn from_raw(raw: u32) -> NodeId {
    NodeId(raw)
  }
}

impl Debug for NodeId {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

impl Display for NodeId {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

// Visited as a leaf so that a visitor on `NodeId` observes every node of a tree in pre-order.
impl Drive for NodeId {
  fn drive<V: Visitor>(&self, visitor: &mut V) {
    visitor.visit(self, Event::Enter);
    visitor.visit(self, Event::Exit);
  }
}

impl DriveMut for NodeId {
  fn drive_mut<V: VisitorMut>(&mut self, visitor: &mut V) {
    visitor.visit(self, Event::Enter);
    visitor.visit(self, Event::Exit);
  }
}

/// Allocator of fresh node ids.
#[derive(Clone, Debug, Default)]
pub struct NodeIdGen {
  next: u32,
}

impl NodeIdGen {
  pub fn new() -> NodeIdGen {
    NodeIdGen::default()
  }

  /// Allocator whose ids never collide with any id in `root`.
  pub fn after<S: Drive + DriveMut>(root: &Node<S>) -> NodeIdGen {
    let mut max = MaxNodeId::default();
    root.drive(&mut max);
    NodeIdGen {
      next: max.max.map_or(0, |id| id.0 + 1),
    }
  }

  pub fn next_id(&mut self) -> NodeId {
    let id = NodeId(self.next);
    self.next += 1;
    id
  }

  /// Make sure later ids are above `id`.
  pub fn reserve_through(&mut self, id: NodeId) {
    self.next = self.next.max(id.0 + 1);
  }
}

#[derive(Default, Visitor)]
#[visitor(NodeId(enter))]
struct MaxNodeId {
  max: Option<NodeId>,
}

impl MaxNodeId {
  fn enter_node_id(&mut self, id: &NodeId) {
    self.max = Some(self.max.map_or(*id, |m| m.max(*id)));
  }
}

#[derive(Clone, Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  // Must stay the first driven field: visitors rely on seeing the id before any child.
  pub id: NodeId,
  #[drive(skip)]
  pub loc: Loc,
  pub stx: Box<S>,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(id: NodeId, loc: Loc, stx: S) -> Node<S> {
    Node {
      id,
      loc,
      stx: Box::new(stx),
    }
  }

  /// Maps the syntax, keeping the id and location.
  pub fn map_stx<T: Drive + DriveMut, F: FnOnce(S) -> T>(self, f: F) -> Node<T> {
    Node {
      id: self.id,
      loc: self.loc,
      stx: Box::new(f(*self.stx)),
    }
  }

  /// Creates a node with a new identity whose syntax is derived from this one, copying the location.
  pub fn derive_stx<T: Drive + DriveMut, F: FnOnce(&S) -> T>(&self, id: NodeId, f: F) -> Node<T> {
    Node {
      id,
      loc: self.loc,
      stx: Box::new(f(&self.stx)),
    }
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{:?} ", self.id)?;
    self.stx.fmt(f)
  }
}

#[cfg(feature = "serde")]
impl<S: serde::Serialize + Drive + DriveMut> serde::Serialize for Node<S> {
  fn serialize<Se: serde::Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    self.stx.serialize(serializer)
  }
}
