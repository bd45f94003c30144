//! Deep copies of syntax that keep the binding table total.
//!
//! Passes copy subtrees whenever generated code needs the same expression
//! twice. The frontend's copier only clones syntax and hands out fresh ids;
//! [`Types::copy_subtree`] pairs every original node with its copy so the copy
//! inherits each binding, and splices in replacements that earlier passes
//! queued with [`Types::substitute`].

use crate::binding::Binding;
use crate::error::TypesError;
use crate::error::TypesResult;
use crate::registry::Types;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use ast_java::ast::expr::Expr;
use ast_java::ast::node::Node;
use ast_java::ast::node::NodeId;
use ast_java::ast::stmt::Stmt;
use ast_java::ast::type_expr::ArrayType;
use ast_java::ast::type_expr::TypeExpr;
use ast_java::copy;
use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use derive_visitor::Visitor;
use derive_visitor::VisitorMut;
use std::mem;
use tracing::trace;

type ArrayTypeNode = Node<ArrayType>;

/// Syntax queued to take the place of a node the next time it is copied.
#[derive(Clone, Debug, From)]
pub enum Replacement {
  Expr(Expr),
  Stmt(Stmt),
  Type(TypeExpr),
}

impl Replacement {
  pub fn id(&self) -> NodeId {
    match self {
      Replacement::Expr(e) => e.id(),
      Replacement::Stmt(s) => s.id(),
      Replacement::Type(t) => t.id(),
    }
  }

  pub fn kind_name(&self) -> &'static str {
    match self {
      Replacement::Expr(_) => "expression",
      Replacement::Stmt(_) => "statement",
      Replacement::Type(_) => "type",
    }
  }
}

/// Told about every replacement spliced into a copy, e.g. to move symbol
/// information from the original node to its replacement.
pub trait SubstitutionListener {
  fn substituted(&mut self, original: NodeId, replacement: NodeId);
}

impl SubstitutionListener for () {
  fn substituted(&mut self, _original: NodeId, _replacement: NodeId) {}
}

#[derive(Default, Visitor)]
#[visitor(NodeId(enter))]
struct Ids {
  ids: Vec<NodeId>,
}

impl Ids {
  fn enter_node_id(&mut self, id: &NodeId) {
    self.ids.push(*id);
  }
}

fn ids_of<S: Drive>(node: &S) -> Vec<NodeId> {
  let mut ids = Ids::default();
  node.drive(&mut ids);
  ids.ids
}

/// Syntax a [`Replacement`] can take the place of.
pub trait Splice: Clone + Drive + DriveMut + Into<Replacement> {
  const KIND: &'static str;

  fn slot_id(&self) -> NodeId;

  fn from_replacement(replacement: Replacement) -> Result<Self, Replacement>;
}

impl Splice for Expr {
  const KIND: &'static str = "expression";

  fn slot_id(&self) -> NodeId {
    self.id()
  }

  fn from_replacement(replacement: Replacement) -> Result<Self, Replacement> {
    match replacement {
      Replacement::Expr(e) => Ok(e),
      other => Err(other),
    }
  }
}

impl Splice for Stmt {
  const KIND: &'static str = "statement";

  fn slot_id(&self) -> NodeId {
    self.id()
  }

  fn from_replacement(replacement: Replacement) -> Result<Self, Replacement> {
    match replacement {
      Replacement::Stmt(s) => Ok(s),
      other => Err(other),
    }
  }
}

impl Splice for TypeExpr {
  const KIND: &'static str = "type";

  fn slot_id(&self) -> NodeId {
    self.id()
  }

  fn from_replacement(replacement: Replacement) -> Result<Self, Replacement> {
    match replacement {
      Replacement::Type(t) => Ok(t),
      other => Err(other),
    }
  }
}

type Plan = HashMap<NodeId, (NodeId, Replacement)>;

/// Decides, before anything is spliced, which queued replacements go into the copy.
#[derive(Visitor)]
#[visitor(Expr(enter, exit), Stmt(enter, exit), TypeExpr(enter, exit), NodeId(enter))]
struct Planner<'p> {
  // Keyed by copy id.
  plan: &'p Plan,
  // Replaced slots enclosing the current node.
  depth: usize,
  replaced: Vec<bool>,
  classified: HashSet<NodeId>,
  spliced: HashSet<NodeId>,
  error: Option<TypesError>,
}

impl<'p> Planner<'p> {
  fn new(plan: &'p Plan) -> Planner<'p> {
    Planner {
      plan,
      depth: 0,
      replaced: Vec::new(),
      classified: HashSet::new(),
      spliced: HashSet::new(),
      error: None,
    }
  }

  fn enter_slot(&mut self, id: NodeId, expected: &'static str) {
    let mut replaced = false;
    if let Some((original, replacement)) = self.plan.get(&id) {
      self.classified.insert(id);
      // Inside a replaced slot the entry goes away with its enclosing replacement.
      if self.depth == 0 {
        if replacement.kind_name() == expected {
          self.spliced.insert(id);
          replaced = true;
        } else {
          self.error.get_or_insert(TypesError::SubstitutionMismatch {
            node: *original,
            expected,
            found: replacement.kind_name(),
          });
        }
      }
    }
    self.depth += usize::from(replaced);
    self.replaced.push(replaced);
  }

  fn exit_slot(&mut self) {
    if self.replaced.pop() == Some(true) {
      self.depth -= 1;
    }
  }

  fn enter_expr(&mut self, expr: &Expr) {
    self.enter_slot(expr.id(), Expr::KIND);
  }

  fn exit_expr(&mut self, _expr: &Expr) {
    self.exit_slot();
  }

  fn enter_stmt(&mut self, stmt: &Stmt) {
    self.enter_slot(stmt.id(), Stmt::KIND);
  }

  fn exit_stmt(&mut self, _stmt: &Stmt) {
    self.exit_slot();
  }

  fn enter_type_expr(&mut self, ty: &TypeExpr) {
    self.enter_slot(ty.id(), TypeExpr::KIND);
  }

  fn exit_type_expr(&mut self, _ty: &TypeExpr) {
    self.exit_slot();
  }

  fn enter_node_id(&mut self, id: &NodeId) {
    if self.depth > 0 || self.classified.contains(id) {
      return;
    }
    if let Some((original, replacement)) = self.plan.get(id) {
      self.error.get_or_insert(TypesError::UnsplicableSubstitution {
        node: *original,
        found: replacement.kind_name(),
      });
    }
  }
}

#[derive(VisitorMut)]
#[visitor(Expr(enter), Stmt(enter), TypeExpr(enter))]
struct Splicer {
  // Only replacements the planner accepted.
  plan: Plan,
  applied: Vec<(NodeId, NodeId)>,
  discarded: Vec<NodeId>,
}

impl Splicer {
  fn splice<T: Splice>(&mut self, slot: &mut T) {
    let Some((original, replacement)) = self.plan.remove(&slot.slot_id()) else {
      return;
    };
    let Ok(new) = T::from_replacement(replacement) else {
      return;
    };
    let new_id = new.slot_id();
    let old = mem::replace(slot, new);
    self.discarded.extend(ids_of(&old));
    self.applied.push((original, new_id));
  }

  fn enter_expr(&mut self, expr: &mut Expr) {
    self.splice(expr);
  }

  fn enter_stmt(&mut self, stmt: &mut Stmt) {
    self.splice(stmt);
  }

  fn enter_type_expr(&mut self, ty: &mut TypeExpr) {
    self.splice(ty);
  }
}

/// Pulls spliced replacements back out of a copy that is being abandoned.
#[derive(Visitor)]
#[visitor(Expr(enter), Stmt(enter), TypeExpr(enter))]
struct Reclaim {
  // Replacement id to the original it stood in for.
  wanted: HashMap<NodeId, NodeId>,
  found: Vec<(NodeId, Replacement)>,
}

impl Reclaim {
  fn take<T: Splice>(&mut self, slot: &T) {
    if let Some(original) = self.wanted.remove(&slot.slot_id()) {
      self.found.push((original, slot.clone().into()));
    }
  }

  fn enter_expr(&mut self, expr: &Expr) {
    self.take(expr);
  }

  fn enter_stmt(&mut self, stmt: &Stmt) {
    self.take(stmt);
  }

  fn enter_type_expr(&mut self, ty: &TypeExpr) {
    self.take(ty);
  }
}

#[derive(Default, Visitor)]
#[visitor(ArrayTypeNode(enter))]
struct ArrayComponents {
  pairs: Vec<(NodeId, NodeId)>,
}

impl ArrayComponents {
  fn enter_array_type_node(&mut self, node: &ArrayTypeNode) {
    self.pairs.push((node.id, node.stx.component.id()));
  }
}

impl<'f> Types<'f> {
  /// Copies `node`, binding every node of the copy like its original.
  ///
  /// Queued substitutions for nodes in the subtree are spliced into the copy
  /// and consumed. A substitution for a node that ends up inside another
  /// replaced node stays queued. `listener` hears about each splice.
  ///
  /// `node` itself has no slot to splice into; copy a substituted root with
  /// [`Types::copy_expr`], [`Types::copy_stmt`] or [`Types::copy_type`]. On
  /// error the queue and the table are left as they were.
  pub fn copy_subtree<S>(&mut self, node: &Node<S>, listener: &mut dyn SubstitutionListener) -> TypesResult<Node<S>>
  where
    S: Clone + Drive + DriveMut,
  {
    if let Some(replacement) = self.get_node(node.id) {
      return Err(TypesError::UnsplicableSubstitution {
        node: node.id,
        found: replacement.kind_name(),
      });
    }
    self.copy_tree(node, listener)
  }

  /// Copies an expression; an expression queued in place of `expr` itself is returned instead.
  pub fn copy_expr(&mut self, expr: &Expr, listener: &mut dyn SubstitutionListener) -> TypesResult<Expr> {
    self.copy_slot(expr, listener)
  }

  pub fn copy_stmt(&mut self, stmt: &Stmt, listener: &mut dyn SubstitutionListener) -> TypesResult<Stmt> {
    self.copy_slot(stmt, listener)
  }

  pub fn copy_type(&mut self, ty: &TypeExpr, listener: &mut dyn SubstitutionListener) -> TypesResult<TypeExpr> {
    self.copy_slot(ty, listener)
  }

  fn copy_slot<T: Splice>(&mut self, root: &T, listener: &mut dyn SubstitutionListener) -> TypesResult<T> {
    let id = root.slot_id();
    let Some(replacement) = self.take_substitution(id) else {
      return self.copy_tree(root, listener);
    };
    let new = match T::from_replacement(replacement) {
      Ok(new) => new,
      Err(replacement) => {
        let found = replacement.kind_name();
        self.substitute(id, replacement);
        return Err(TypesError::SubstitutionMismatch {
          node: id,
          expected: T::KIND,
          found,
        });
      }
    };
    if self.options().verify_bindings {
      if let Err(err) = self.verify_node(&new) {
        self.substitute(id, new.into());
        return Err(err);
      }
    }
    trace!(original = %id, replacement = %new.slot_id(), "substituted copied root");
    listener.substituted(id, new.slot_id());
    Ok(new)
  }

  fn copy_tree<T>(&mut self, root: &T, listener: &mut dyn SubstitutionListener) -> TypesResult<T>
  where
    T: Clone + Drive + DriveMut,
  {
    let mut pairs = Vec::new();
    let mut copy = copy::copy_tree(root, self.factory().ids(), |original, copy| pairs.push((original, copy)));

    let mut bound = Vec::new();
    let mut plan = Plan::new();
    for &(original, new) in &pairs {
      if let Some(binding) = self.table().get(original) {
        self.add_binding(new, binding);
        bound.push(new);
      }
      if let Some(replacement) = self.take_substitution(original) {
        plan.insert(new, (original, replacement));
      }
    }

    let mut planner = Planner::new(&plan);
    copy.drive(&mut planner);
    let Planner { spliced, error, .. } = planner;
    if let Some(err) = error {
      self.abandon_copy(plan.into_values(), &bound);
      return Err(err);
    }

    let (accepted, nested): (Plan, Plan) = plan.into_iter().partition(|(new, _)| spliced.contains(new));
    let mut splicer = Splicer {
      plan: accepted,
      applied: Vec::new(),
      discarded: Vec::new(),
    };
    copy.drive_mut(&mut splicer);
    for (original, replacement) in nested.into_values() {
      self.substitute(original, replacement);
    }
    for id in &splicer.discarded {
      self.table_mut().remove(*id);
    }
    bound.extend(self.bind_array_components(&copy));

    if self.options().verify_bindings {
      if let Err(err) = self.verify_node(&copy) {
        let mut reclaim = Reclaim {
          wanted: splicer.applied.iter().map(|&(original, new)| (new, original)).collect(),
          found: Vec::new(),
        };
        copy.drive(&mut reclaim);
        self.abandon_copy(reclaim.found, &bound);
        return Err(err);
      }
    }

    for (original, replacement) in splicer.applied {
      trace!(%original, %replacement, "substituted node in copy");
      listener.substituted(original, replacement);
    }
    Ok(copy)
  }

  /// Requeues `taken` substitutions and unbinds the copy's nodes.
  fn abandon_copy(&mut self, taken: impl IntoIterator<Item = (NodeId, Replacement)>, bound: &[NodeId]) {
    for (original, replacement) in taken {
      self.substitute(original, replacement);
    }
    for id in bound {
      self.table_mut().remove(*id);
    }
  }

  /// Component nodes of array types take the component of the array's binding when they have none.
  fn bind_array_components<S: Drive>(&mut self, root: &S) -> Vec<NodeId> {
    let mut arrays = ArrayComponents::default();
    root.drive(&mut arrays);
    let mut bound = Vec::new();
    for (array, component) in arrays.pairs {
      if self.table().contains(component) {
        continue;
      }
      let element = self
        .table()
        .get(array)
        .and_then(Binding::as_type)
        .and_then(|ty| self.universe().component_type(ty));
      if let Some(element) = element {
        self.add_binding(component, element);
        bound.push(component);
      }
    }
    bound
  }
}
