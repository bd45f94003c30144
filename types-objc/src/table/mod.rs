//! The side table from syntax nodes to what they refer to.

pub mod significant;
pub mod verify;

use crate::binding::source::SourceModel;
use crate::binding::Binding;
use crate::error::TypesError;
use crate::error::TypesResult;
use ahash::HashMap;
use ahash::HashMapExt;
use ast_java::ast::node::NodeId;
use derive_visitor::Drive;
use significant::significant_nodes;
use tracing::debug;

pub use verify::verify;
pub use verify::VerifyIssue;

#[derive(Clone, Debug, Default)]
pub struct BindingTable {
  entries: HashMap<NodeId, Binding>,
}

impl BindingTable {
  pub fn new() -> BindingTable {
    BindingTable {
      entries: HashMap::new(),
    }
  }

  /// Resolves every significant node under `root` through the frontend.
  ///
  /// Fails on the first node the frontend cannot resolve.
  pub fn build<S: Drive>(root: &S, model: &SourceModel) -> TypesResult<BindingTable> {
    let mut table = BindingTable::new();
    for node in significant_nodes(root) {
      let binding = model
        .resolve_binding(node.id)
        .ok_or(TypesError::UnresolvedBinding {
          node: node.id,
          kind: node.kind,
          loc: node.loc,
        })?;
      table.insert(node.id, binding);
    }
    debug!(entries = table.len(), "built binding table");
    Ok(table)
  }

  pub fn get(&self, node: NodeId) -> Option<Binding> {
    self.entries.get(&node).copied()
  }

  /// Binds `node`, returning what it was bound to before.
  pub fn insert(&mut self, node: NodeId, binding: Binding) -> Option<Binding> {
    self.entries.insert(node, binding)
  }

  pub fn remove(&mut self, node: NodeId) -> Option<Binding> {
    self.entries.remove(&node)
  }

  pub fn contains(&self, node: NodeId) -> bool {
    self.entries.contains_key(&node)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (NodeId, Binding)> + '_ {
    self.entries.iter().map(|(n, b)| (*n, *b))
  }
}
