use crate::binding::Binding;
use crate::synthetic::descriptor::DescriptorError;
use crate::table::verify::VerifyIssue;
use ast_java::ast::kind::NodeKind;
use ast_java::ast::node::NodeId;
use ast_java::loc::Loc;
use itertools::Itertools;

/// Failures that abort translation of the current unit.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypesError {
  /// The frontend could not say what a significant node refers to.
  #[error("no binding for {kind} node {node} at {loc}")]
  UnresolvedBinding { node: NodeId, kind: NodeKind, loc: Loc },

  /// A bootstrap type the registry depends on was not declared by the frontend.
  #[error("well-known type {0} is not declared")]
  MissingWellKnownType(String),

  #[error("malformed method descriptor `{descriptor}`: {source}")]
  MalformedDescriptor {
    descriptor: String,
    source: DescriptorError,
  },

  /// A descriptor names an owner class the runtime does not have.
  #[error("method descriptor `{descriptor}` names unknown runtime type {owner}")]
  UnknownRuntimeType { descriptor: String, owner: String },

  #[error("binding table verification failed: {}", .0.iter().join("; "))]
  Verification(Vec<VerifyIssue>),

  /// A node that must have been registered was never bound.
  #[error("node {0} has no binding")]
  UnboundNode(NodeId),

  #[error("node {node} is bound to a {}, expected a {expected}", .found.kind_name())]
  UnexpectedBinding {
    node: NodeId,
    expected: &'static str,
    found: Binding,
  },

  /// A queued replacement no longer fits where the original node sits.
  #[error("substitution for node {node} expected a {expected} but the replacement is a {found}")]
  SubstitutionMismatch {
    node: NodeId,
    expected: &'static str,
    found: &'static str,
  },

  /// A queued replacement targets a node that is not an expression, statement or type slot,
  /// such as a declaration name or the root of a typed node copy.
  #[error("node {node} sits where no {found} can take its place")]
  UnsplicableSubstitution { node: NodeId, found: &'static str },
}

pub type TypesResult<T> = Result<T, TypesError>;
