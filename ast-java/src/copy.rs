use crate::ast::node::Node;
use crate::ast::node::NodeId;
use crate::ast::node::NodeIdGen;
use derive_visitor::{Drive, DriveMut, Visitor, VisitorMut};

#[derive(Default, Visitor)]
#[visitor(NodeId(enter))]
struct CollectIds {
  ids: Vec<NodeId>,
}

impl CollectIds {
  fn enter_node_id(&mut self, id: &NodeId) {
    self.ids.push(*id);
  }
}

#[derive(VisitorMut)]
#[visitor(NodeId(enter))]
struct Renumber<'a> {
  originals: std::vec::IntoIter<NodeId>,
  ids: &'a mut NodeIdGen,
  on_match: &'a mut dyn FnMut(NodeId, NodeId),
}

impl Renumber<'_> {
  fn enter_node_id(&mut self, id: &mut NodeId) {
    // The clone has the same shape as the original, so ids line up one for one.
    if let Some(original) = self.originals.next() {
      *id = self.ids.next_id();
      (self.on_match)(original, *id);
    }
  }
}

/// Ids of every node in `root`, in pre-order.
pub fn node_ids<S: Drive + DriveMut>(root: &Node<S>) -> Vec<NodeId> {
  tree_ids(root)
}

/// Ids of every node in any drivable piece of syntax, in pre-order.
pub fn tree_ids<T: Drive>(root: &T) -> Vec<NodeId> {
  let mut collect = CollectIds::default();
  root.drive(&mut collect);
  collect.ids
}

/// Deep-copies a subtree, giving every node of the copy a fresh id from `ids`.
///
/// `on_match(original, copy)` is called once per corresponding pair of nodes,
/// parents before children.
pub fn copy_subtree<S, F>(node: &Node<S>, ids: &mut NodeIdGen, on_match: F) -> Node<S>
where
  S: Clone + Drive + DriveMut,
  F: FnMut(NodeId, NodeId),
{
  copy_tree(node, ids, on_match)
}

/// Like [`copy_subtree`], for syntax enums such as `Expr` whose root is a variant rather than a node.
pub fn copy_tree<T, F>(root: &T, ids: &mut NodeIdGen, mut on_match: F) -> T
where
  T: Clone + Drive + DriveMut,
  F: FnMut(NodeId, NodeId),
{
  let originals = tree_ids(root);
  let mut copy = root.clone();
  let mut renumber = Renumber {
    originals: originals.into_iter(),
    ids,
    on_match: &mut on_match,
  };
  copy.drive_mut(&mut renumber);
  copy
}
