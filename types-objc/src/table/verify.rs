use super::significant::significant_nodes;
use super::BindingTable;
use crate::binding::Binding;
use crate::error::TypesError;
use crate::error::TypesResult;
use crate::universe::Universe;
use ast_java::ast::kind::NodeKind;
use ast_java::ast::node::NodeId;
use derive_visitor::Drive;
use std::fmt;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// A way in which a binding table fails to describe a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyIssue {
  Unbound { node: NodeId, kind: NodeKind },
  NotAnInvocation { node: NodeId, kind: NodeKind, found: Binding },
  ArityMismatch { node: NodeId, expected: usize, found: usize },
}

impl VerifyIssue {
  pub fn node(&self) -> NodeId {
    match self {
      VerifyIssue::Unbound { node, .. }
      | VerifyIssue::NotAnInvocation { node, .. }
      | VerifyIssue::ArityMismatch { node, .. } => *node,
    }
  }
}

impl Display for VerifyIssue {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      VerifyIssue::Unbound { node, kind } => write!(f, "{kind} node {node} is unbound"),
      VerifyIssue::NotAnInvocation { node, kind, found } => {
        write!(f, "{kind} node {node} is bound to {found}, not a method")
      }
      VerifyIssue::ArityMismatch { node, expected, found } => write!(
        f,
        "call {node} passes {found} argument(s) to a method taking {expected}"
      ),
    }
  }
}

/// Checks that every significant node under `root` is bound, and that each
/// invocation passes as many arguments as its method takes.
///
/// Variadic and synthetic methods are exempt from the arity check. The table is
/// never modified.
pub fn verify<S: Drive>(root: &S, table: &BindingTable, universe: &Universe) -> TypesResult<()> {
  let mut issues = Vec::new();
  let nodes = significant_nodes(root);
  for node in &nodes {
    let Some(binding) = table.get(node.id) else {
      issues.push(VerifyIssue::Unbound {
        node: node.id,
        kind: node.kind,
      });
      continue;
    };
    let Some(arity) = node.arity else {
      continue;
    };
    let Binding::Method(method) = binding else {
      issues.push(VerifyIssue::NotAnInvocation {
        node: node.id,
        kind: node.kind,
        found: binding,
      });
      continue;
    };
    if method.is_synthetic() || universe.is_varargs(method) {
      continue;
    }
    let expected = universe.parameter_types(method).len();
    if expected != arity {
      issues.push(VerifyIssue::ArityMismatch {
        node: node.id,
        expected,
        found: arity,
      });
    }
  }
  debug!(nodes = nodes.len(), issues = issues.len(), "verified binding table");
  if issues.is_empty() {
    Ok(())
  } else {
    Err(TypesError::Verification(issues))
  }
}
