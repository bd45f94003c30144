use crate::ast::decl::*;
use crate::ast::expr::*;
use crate::ast::modifiers::Modifiers;
use crate::ast::node::Node;
use crate::ast::node::NodeIdGen;
use crate::ast::stmt::*;
use crate::ast::type_expr::*;
use crate::loc::Loc;
use derive_visitor::{Drive, DriveMut};

/// Builds syntax with fresh node ids.
///
/// Every node gets the factory's current location, which starts out as
/// [`Loc::SYNTHETIC`] and can be changed with [`AstFactory::set_loc`].
#[derive(Debug, Default)]
pub struct AstFactory {
  ids: NodeIdGen,
  loc: Loc,
}

impl AstFactory {
  pub fn new() -> AstFactory {
    AstFactory::default()
  }

  pub fn with_ids(ids: NodeIdGen) -> AstFactory {
    AstFactory {
      ids,
      loc: Loc::SYNTHETIC,
    }
  }

  pub fn ids(&mut self) -> &mut NodeIdGen {
    &mut self.ids
  }

  pub fn set_loc(&mut self, loc: Loc) -> &mut Self {
    self.loc = loc;
    self
  }

  pub fn node<S: Drive + DriveMut>(&mut self, stx: S) -> Node<S> {
    Node::new(self.ids.next_id(), self.loc, stx)
  }

  // Names and expressions.

  pub fn name(&mut self, name: &str) -> Node<SimpleName> {
    self.node(SimpleName {
      name: name.to_string(),
    })
  }

  pub fn name_expr(&mut self, name: &str) -> Expr {
    Expr::Name(self.name(name))
  }

  pub fn field_access(&mut self, object: Expr, name: &str) -> Expr {
    let name = self.name(name);
    Expr::FieldAccess(self.node(FieldAccessExpr { object, name }))
  }

  pub fn call(&mut self, receiver: Option<Expr>, name: &str, arguments: Vec<Expr>) -> Expr {
    let name = self.name(name);
    Expr::Call(self.node(CallExpr {
      receiver,
      name,
      arguments,
    }))
  }

  pub fn super_call(&mut self, name: &str, arguments: Vec<Expr>) -> Expr {
    let name = self.name(name);
    Expr::SuperCall(self.node(SuperCallExpr { name, arguments }))
  }

  pub fn new_instance(&mut self, ty: TypeExpr, arguments: Vec<Expr>) -> Expr {
    Expr::New(self.node(NewExpr { ty, arguments }))
  }

  pub fn array_creation(
    &mut self,
    ty: TypeExpr,
    dimensions: Vec<Expr>,
    initializer: Option<Node<ArrayInitExpr>>,
  ) -> Expr {
    Expr::ArrayCreation(self.node(ArrayCreationExpr {
      ty,
      dimensions,
      initializer,
    }))
  }

  pub fn array_init(&mut self, elements: Vec<Expr>) -> Node<ArrayInitExpr> {
    self.node(ArrayInitExpr { elements })
  }

  pub fn array_access(&mut self, array: Expr, index: Expr) -> Expr {
    Expr::ArrayAccess(self.node(ArrayAccessExpr { array, index }))
  }

  pub fn assign(&mut self, left: Expr, right: Expr) -> Expr {
    self.compound_assign(AssignOperator::Assign, left, right)
  }

  pub fn compound_assign(&mut self, operator: AssignOperator, left: Expr, right: Expr) -> Expr {
    Expr::Assign(self.node(AssignExpr { operator, left, right }))
  }

  pub fn infix(&mut self, operator: InfixOperator, left: Expr, right: Expr) -> Expr {
    Expr::Infix(self.node(InfixExpr {
      operator,
      left,
      right,
      extended: Vec::new(),
    }))
  }

  pub fn prefix(&mut self, operator: PrefixOperator, operand: Expr) -> Expr {
    Expr::Prefix(self.node(PrefixExpr { operator, operand }))
  }

  pub fn cast(&mut self, ty: TypeExpr, value: Expr) -> Expr {
    Expr::Cast(self.node(CastExpr { ty, value }))
  }

  pub fn instance_of(&mut self, value: Expr, ty: TypeExpr) -> Expr {
    Expr::InstanceOf(self.node(InstanceOfExpr { value, ty }))
  }

  pub fn cond(&mut self, test: Expr, consequent: Expr, alternate: Expr) -> Expr {
    Expr::Cond(self.node(CondExpr {
      test,
      consequent,
      alternate,
    }))
  }

  pub fn paren(&mut self, value: Expr) -> Expr {
    Expr::Paren(self.node(ParenExpr { value }))
  }

  pub fn this(&mut self) -> Expr {
    Expr::This(self.node(ThisExpr { qualifier: None }))
  }

  pub fn type_literal(&mut self, ty: TypeExpr) -> Expr {
    Expr::TypeLiteral(self.node(TypeLiteralExpr { ty }))
  }

  pub fn lit_bool(&mut self, value: bool) -> Expr {
    Expr::LitBool(self.node(LitBoolExpr { value }))
  }

  pub fn lit_char(&mut self, value: char) -> Expr {
    Expr::LitChar(self.node(LitCharExpr { value }))
  }

  pub fn lit_null(&mut self) -> Expr {
    Expr::LitNull(self.node(LitNullExpr {}))
  }

  pub fn lit_num(&mut self, raw: &str) -> Expr {
    Expr::LitNum(self.node(LitNumExpr {
      raw: raw.to_string(),
    }))
  }

  pub fn lit_str(&mut self, value: &str) -> Expr {
    Expr::LitStr(self.node(LitStrExpr {
      value: value.to_string(),
    }))
  }

  // Types.

  pub fn primitive_type(&mut self, kind: PrimitiveKind) -> TypeExpr {
    TypeExpr::Primitive(self.node(PrimitiveType { kind }))
  }

  pub fn simple_type(&mut self, name: &str) -> TypeExpr {
    TypeExpr::Simple(self.node(SimpleType {
      name: name.to_string(),
    }))
  }

  pub fn array_type(&mut self, component: TypeExpr) -> TypeExpr {
    TypeExpr::Array(self.node(ArrayType { component }))
  }

  pub fn parameterized_type(&mut self, base: TypeExpr, arguments: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::Parameterized(self.node(ParameterizedType { base, arguments }))
  }

  pub fn wildcard_type(&mut self, bound: Option<TypeExpr>, upper: bool) -> TypeExpr {
    TypeExpr::Wildcard(self.node(WildcardType { bound, upper }))
  }

  // Statements.

  pub fn block(&mut self, body: Vec<Stmt>) -> Node<Block> {
    self.node(Block { body })
  }

  pub fn expr_stmt(&mut self, expr: Expr) -> Stmt {
    Stmt::Expr(self.node(ExprStmt { expr }))
  }

  pub fn fragment(&mut self, name: &str, initializer: Option<Expr>) -> Node<VarDeclFragment> {
    let name = self.name(name);
    self.node(VarDeclFragment { name, initializer })
  }

  pub fn local_var(&mut self, ty: TypeExpr, fragments: Vec<Node<VarDeclFragment>>) -> Stmt {
    Stmt::LocalVar(self.node(LocalVarStmt { ty, fragments }))
  }

  pub fn return_stmt(&mut self, value: Option<Expr>) -> Stmt {
    Stmt::Return(self.node(ReturnStmt { value }))
  }

  pub fn if_stmt(&mut self, test: Expr, consequent: Stmt, alternate: Option<Stmt>) -> Stmt {
    Stmt::If(self.node(IfStmt {
      test,
      consequent,
      alternate,
    }))
  }

  pub fn while_stmt(&mut self, test: Expr, body: Stmt) -> Stmt {
    Stmt::While(self.node(WhileStmt { test, body }))
  }

  pub fn label(&mut self, name: &str) -> Node<Label> {
    self.node(Label {
      name: name.to_string(),
    })
  }

  pub fn labeled(&mut self, label: &str, body: Stmt) -> Stmt {
    let label = self.label(label);
    Stmt::Labeled(self.node(LabeledStmt { label, body }))
  }

  pub fn break_stmt(&mut self, label: Option<&str>) -> Stmt {
    let label = label.map(|l| self.label(l));
    Stmt::Break(self.node(BreakStmt { label }))
  }

  pub fn throw_stmt(&mut self, value: Expr) -> Stmt {
    Stmt::Throw(self.node(ThrowStmt { value }))
  }

  pub fn super_ctor_call(&mut self, arguments: Vec<Expr>) -> Stmt {
    Stmt::SuperCtorCall(self.node(SuperCtorCall { arguments }))
  }

  pub fn ctor_call(&mut self, arguments: Vec<Expr>) -> Stmt {
    Stmt::CtorCall(self.node(CtorCall { arguments }))
  }

  // Declarations.

  pub fn param(&mut self, ty: TypeExpr, name: &str, varargs: bool) -> Node<SingleVarDecl> {
    let name = self.name(name);
    self.node(SingleVarDecl {
      modifiers: Modifiers::empty(),
      varargs,
      ty,
      name,
    })
  }

  pub fn method(
    &mut self,
    modifiers: Modifiers,
    return_type: TypeExpr,
    name: &str,
    params: Vec<Node<SingleVarDecl>>,
    body: Option<Node<Block>>,
  ) -> Node<MethodDecl> {
    let name = self.name(name);
    self.node(MethodDecl {
      modifiers,
      constructor: false,
      return_type: Some(return_type),
      name,
      params,
      body,
    })
  }

  pub fn constructor(
    &mut self,
    modifiers: Modifiers,
    name: &str,
    params: Vec<Node<SingleVarDecl>>,
    body: Node<Block>,
  ) -> Node<MethodDecl> {
    let name = self.name(name);
    self.node(MethodDecl {
      modifiers,
      constructor: true,
      return_type: None,
      name,
      params,
      body: Some(body),
    })
  }

  pub fn field(&mut self, modifiers: Modifiers, ty: TypeExpr, fragments: Vec<Node<VarDeclFragment>>) -> Node<FieldDecl> {
    self.node(FieldDecl {
      modifiers,
      ty,
      fragments,
    })
  }

  pub fn type_decl(
    &mut self,
    kind: TypeDeclKind,
    modifiers: Modifiers,
    name: &str,
    superclass: Option<TypeExpr>,
    interfaces: Vec<TypeExpr>,
    members: Vec<Member>,
  ) -> Node<TypeDecl> {
    let name = self.name(name);
    self.node(TypeDecl {
      kind,
      modifiers,
      name,
      superclass,
      interfaces,
      members,
    })
  }

  pub fn compilation_unit(&mut self, path: &str, package: Option<&str>, types: Vec<Node<TypeDecl>>) -> Node<CompilationUnit> {
    self.node(CompilationUnit {
      path: path.to_string(),
      package: package.map(str::to_string),
      imports: Vec::new(),
      types,
    })
  }
}
