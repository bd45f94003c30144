//! Java syntax trees for the translator.
//!
//! Every node carries a [`NodeId`](ast::node::NodeId) that is unique within its
//! compilation unit. Semantic information never lives on the nodes: the
//! translator keeps it in side tables keyed by id, which keeps the tree a plain
//! value that can be cloned, moved and rewritten freely.
//!
//! Traversal uses [`derive_visitor`]; visiting `NodeId` enumerates every node in
//! pre-order, which is what [`copy::copy_subtree`] relies on to pair up the nodes
//! of an original subtree with those of its copy.

pub mod ast;
pub mod copy;
pub mod factory;
pub mod loc;
