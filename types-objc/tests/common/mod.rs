#![allow(dead_code)]

use ast_java::ast::decl::CompilationUnit;
use ast_java::ast::decl::FieldDecl;
use ast_java::ast::decl::Member;
use ast_java::ast::decl::MethodDecl;
use ast_java::ast::decl::SingleVarDecl;
use ast_java::ast::decl::TypeDecl;
use ast_java::ast::decl::TypeDeclKind;
use ast_java::ast::expr::Expr;
use ast_java::ast::expr::InfixOperator;
use ast_java::ast::modifiers::Modifiers;
use ast_java::ast::node::Node;
use ast_java::ast::node::NodeId;
use ast_java::ast::stmt::Stmt;
use ast_java::ast::type_expr::PrimitiveKind;
use ast_java::ast::type_expr::TypeExpr;
use ast_java::factory::AstFactory;
use types_objc::binding::java_lang::JavaLang;
use types_objc::binding::source::MethodData;
use types_objc::binding::source::TypeData;
use types_objc::binding::source::TypeKind;
use types_objc::binding::source::VariableData;
use types_objc::Binding;
use types_objc::MethodBinding;
use types_objc::SourceModelBuilder;
use types_objc::TypeBinding;
use types_objc::VariableBinding;

/// Builds syntax and the frontend model side by side, resolving every
/// significant node as it is created.
pub struct Fixture {
  pub ast: AstFactory,
  pub model: SourceModelBuilder,
  pub jl: JavaLang,
}

impl Fixture {
  pub fn new() -> Fixture {
    let mut model = SourceModelBuilder::new();
    let jl = model.declare_java_lang();
    Fixture {
      ast: AstFactory::new(),
      model,
      jl,
    }
  }

  pub fn primitive(&self, kind: PrimitiveKind) -> TypeBinding {
    self.model.primitive(kind)
  }

  pub fn void(&self) -> TypeBinding {
    self.primitive(PrimitiveKind::Void)
  }

  pub fn bind(&mut self, node: NodeId, binding: impl Into<Binding>) {
    self.model.resolve(node, binding);
  }

  // Model.

  pub fn class(&mut self, package: &str, name: &str) -> TypeBinding {
    let path = format!("{}/{name}.java", package.replace('.', "/"));
    self.model.declare_type(
      TypeData::class(package, name)
        .with_superclass(self.jl.object)
        .with_source_path(&path),
    )
  }

  pub fn interface(&mut self, package: &str, name: &str) -> TypeBinding {
    let path = format!("{}/{name}.java", package.replace('.', "/"));
    self.model.declare_type(TypeData::interface(package, name).with_source_path(&path))
  }

  pub fn declare_method(&mut self, owner: TypeBinding, name: &str, params: Vec<TypeBinding>, ret: TypeBinding) -> MethodBinding {
    self.model.add_method(MethodData::new(name, owner, params, ret))
  }

  pub fn declare_constructor(&mut self, owner: TypeBinding, name: &str, params: Vec<TypeBinding>) -> MethodBinding {
    let void = self.void();
    self.model.add_method(MethodData::constructor(name, owner, params, void))
  }

  pub fn declare_field(&mut self, owner: TypeBinding, name: &str, ty: TypeBinding, modifiers: Modifiers) -> VariableBinding {
    self.model.add_variable(VariableData::field(name, ty, owner).with_modifiers(modifiers))
  }

  pub fn declare_local(&mut self, method: MethodBinding, name: &str, ty: TypeBinding) -> VariableBinding {
    self.model.add_variable(VariableData::local(name, ty, method))
  }

  pub fn declare_parameter(&mut self, method: MethodBinding, name: &str, ty: TypeBinding) -> VariableBinding {
    self.model.add_variable(VariableData::parameter(name, ty, method))
  }

  // Types.

  /// A type node spelling `ty`, with component nodes for arrays.
  pub fn type_node(&mut self, ty: TypeBinding) -> TypeExpr {
    let data = self.model.type_mut(ty).map(|d| (d.name.clone(), d.kind.clone()));
    let node = match data {
      Some((_, TypeKind::Primitive(kind))) => self.ast.primitive_type(kind),
      Some((_, TypeKind::Array { component })) => {
        let component = self.type_node(component);
        self.ast.array_type(component)
      }
      Some((name, _)) => self.ast.simple_type(&name),
      None => self.ast.simple_type("Unknown"),
    };
    self.bind(node.id(), ty);
    node
  }

  // Expressions.

  pub fn str_lit(&mut self, value: &str) -> Expr {
    let lit = self.ast.lit_str(value);
    self.bind(lit.id(), self.jl.string);
    lit
  }

  pub fn int_lit(&mut self, raw: &str) -> Expr {
    let lit = self.ast.lit_num(raw);
    self.bind(lit.id(), self.primitive(PrimitiveKind::Int));
    lit
  }

  pub fn bool_lit(&mut self, value: bool) -> Expr {
    let lit = self.ast.lit_bool(value);
    self.bind(lit.id(), self.primitive(PrimitiveKind::Boolean));
    lit
  }

  pub fn null_lit(&mut self) -> Expr {
    let lit = self.ast.lit_null();
    self.bind(lit.id(), TypeBinding::Null);
    lit
  }

  pub fn var_ref(&mut self, name: &str, var: VariableBinding) -> Expr {
    let expr = self.ast.name_expr(name);
    self.bind(expr.id(), var);
    expr
  }

  pub fn this(&mut self, class: TypeBinding) -> Expr {
    let expr = self.ast.this();
    self.bind(expr.id(), class);
    expr
  }

  pub fn field_access(&mut self, object: Expr, name: &str, field: VariableBinding) -> Expr {
    let expr = self.ast.field_access(object, name);
    if let Expr::FieldAccess(node) = &expr {
      self.bind(node.stx.name.id, field);
    }
    self.bind(expr.id(), field);
    expr
  }

  pub fn call(&mut self, receiver: Option<Expr>, method: MethodBinding, name: &str, arguments: Vec<Expr>) -> Expr {
    let expr = self.ast.call(receiver, name, arguments);
    if let Expr::Call(node) = &expr {
      self.bind(node.stx.name.id, method);
    }
    self.bind(expr.id(), method);
    expr
  }

  pub fn new_instance(&mut self, class: TypeBinding, constructor: MethodBinding, arguments: Vec<Expr>) -> Expr {
    let ty = self.type_node(class);
    let expr = self.ast.new_instance(ty, arguments);
    self.bind(expr.id(), constructor);
    expr
  }

  pub fn infix(&mut self, operator: InfixOperator, left: Expr, right: Expr, result: TypeBinding) -> Expr {
    let expr = self.ast.infix(operator, left, right);
    self.bind(expr.id(), result);
    expr
  }

  pub fn cast(&mut self, ty: TypeBinding, value: Expr) -> Expr {
    let ty_node = self.type_node(ty);
    let expr = self.ast.cast(ty_node, value);
    self.bind(expr.id(), ty);
    expr
  }

  pub fn instance_of(&mut self, value: Expr, ty: TypeBinding) -> Expr {
    let ty_node = self.type_node(ty);
    let expr = self.ast.instance_of(value, ty_node);
    self.bind(expr.id(), self.primitive(PrimitiveKind::Boolean));
    expr
  }

  pub fn type_literal(&mut self, ty: TypeBinding) -> Expr {
    let ty_node = self.type_node(ty);
    let expr = self.ast.type_literal(ty_node);
    self.bind(expr.id(), self.jl.class);
    expr
  }

  /// `new T[dimension]` for an array type `array`.
  pub fn array_creation(&mut self, array: TypeBinding, dimension: Expr) -> Expr {
    let ty_node = self.type_node(array);
    let expr = self.ast.array_creation(ty_node, vec![dimension], None);
    self.bind(expr.id(), array);
    expr
  }

  // Statements and declarations.

  pub fn expr_stmt(&mut self, expr: Expr) -> Stmt {
    self.ast.expr_stmt(expr)
  }

  pub fn local(&mut self, ty: TypeBinding, name: &str, var: VariableBinding, initializer: Option<Expr>) -> Stmt {
    let ty_node = self.type_node(ty);
    let fragment = self.ast.fragment(name, initializer);
    self.bind(fragment.id, var);
    self.bind(fragment.stx.name.id, var);
    self.ast.local_var(ty_node, vec![fragment])
  }

  pub fn labeled(&mut self, label: &str, body: Stmt) -> Stmt {
    let stmt = self.ast.labeled(label, body);
    if let Stmt::Labeled(node) = &stmt {
      self.bind(node.stx.label.id, self.void());
    }
    stmt
  }

  pub fn param(&mut self, ty: TypeBinding, name: &str, var: VariableBinding, varargs: bool) -> Node<SingleVarDecl> {
    let ty_node = self.type_node(ty);
    let param = self.ast.param(ty_node, name, varargs);
    self.bind(param.id, var);
    self.bind(param.stx.name.id, var);
    param
  }

  pub fn method_decl(
    &mut self,
    method: MethodBinding,
    name: &str,
    ret: TypeBinding,
    params: Vec<Node<SingleVarDecl>>,
    body: Vec<Stmt>,
  ) -> Node<MethodDecl> {
    let ret_node = self.type_node(ret);
    let body = self.ast.block(body);
    let decl = self.ast.method(Modifiers::PUBLIC, ret_node, name, params, Some(body));
    self.bind(decl.id, method);
    self.bind(decl.stx.name.id, method);
    decl
  }

  pub fn abstract_method_decl(&mut self, method: MethodBinding, name: &str, ret: TypeBinding) -> Node<MethodDecl> {
    let ret_node = self.type_node(ret);
    let decl = self.ast.method(Modifiers::PUBLIC | Modifiers::ABSTRACT, ret_node, name, vec![], None);
    self.bind(decl.id, method);
    self.bind(decl.stx.name.id, method);
    decl
  }

  pub fn field_decl(&mut self, ty: TypeBinding, name: &str, var: VariableBinding) -> Node<FieldDecl> {
    let ty_node = self.type_node(ty);
    let fragment = self.ast.fragment(name, None);
    self.bind(fragment.id, var);
    self.bind(fragment.stx.name.id, var);
    self.ast.field(Modifiers::PRIVATE, ty_node, vec![fragment])
  }

  pub fn type_decl(
    &mut self,
    kind: TypeDeclKind,
    ty: TypeBinding,
    name: &str,
    superclass: Option<TypeBinding>,
    interfaces: Vec<TypeBinding>,
    members: Vec<Member>,
  ) -> Node<TypeDecl> {
    let superclass = superclass.map(|s| self.type_node(s));
    let interfaces = interfaces.into_iter().map(|i| self.type_node(i)).collect();
    let decl = self
      .ast
      .type_decl(kind, Modifiers::PUBLIC, name, superclass, interfaces, members);
    self.bind(decl.id, ty);
    self.bind(decl.stx.name.id, ty);
    decl
  }

  pub fn class_decl(&mut self, ty: TypeBinding, name: &str, members: Vec<Member>) -> Node<TypeDecl> {
    self.type_decl(TypeDeclKind::Class, ty, name, None, vec![], members)
  }

  pub fn unit(&mut self, path: &str, package: &str, types: Vec<Node<TypeDecl>>) -> Node<CompilationUnit> {
    self.ast.compilation_unit(path, Some(package), types)
  }
}

impl Default for Fixture {
  fn default() -> Self {
    Fixture::new()
  }
}

impl Fixture {
  /// A method `owner` declares, by name.
  pub fn find_method(&mut self, owner: TypeBinding, name: &str) -> MethodBinding {
    let methods = self
      .model
      .type_mut(owner)
      .map(|d| d.declared_methods.clone())
      .unwrap_or_default();
    methods
      .into_iter()
      .find(|m| self.model.method_mut(*m).is_some_and(|d| d.name == name))
      .expect("method is declared")
  }
}
