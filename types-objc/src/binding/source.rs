use super::Binding;
use super::ConstantValue;
use super::MethodBinding;
use super::SourceMethodId;
use super::SourceTypeId;
use super::SourceVarId;
use super::TypeBinding;
use super::VariableBinding;
use ahash::HashMap;
use ahash::HashMapExt;
use ast_java::ast::modifiers::Modifiers;
use ast_java::ast::node::NodeId;
use ast_java::ast::type_expr::PrimitiveKind;

#[derive(Clone, Debug, PartialEq)]
pub enum TypeKind {
  Class,
  Interface,
  Enum,
  Annotation,
  Primitive(PrimitiveKind),
  Array { component: TypeBinding },
  TypeVariable { bounds: Vec<TypeBinding> },
  Wildcard { bound: Option<TypeBinding>, upper: bool },
  Capture { wildcard: TypeBinding },
  Parameterized { declaration: TypeBinding, arguments: Vec<TypeBinding> },
}

#[derive(Clone, Debug)]
pub struct TypeData {
  /// Simple name; empty for anonymous classes.
  pub name: String,
  pub qualified_name: String,
  pub package: Option<String>,
  pub modifiers: Modifiers,
  pub kind: TypeKind,
  pub superclass: Option<TypeBinding>,
  pub interfaces: Vec<TypeBinding>,
  pub declared_methods: Vec<MethodBinding>,
  pub declared_fields: Vec<VariableBinding>,
  pub declaring_class: Option<TypeBinding>,
  pub annotations: Vec<TypeBinding>,
  /// Path of the compilation unit declaring this type, if it came from source.
  pub source_path: Option<String>,
}

impl TypeData {
  fn declared(kind: TypeKind, package: &str, name: &str) -> TypeData {
    let package = (!package.is_empty()).then(|| package.to_string());
    let qualified_name = match &package {
      Some(p) => format!("{p}.{name}"),
      None => name.to_string(),
    };
    TypeData {
      name: name.to_string(),
      qualified_name,
      package,
      modifiers: Modifiers::PUBLIC,
      kind,
      superclass: None,
      interfaces: Vec::new(),
      declared_methods: Vec::new(),
      declared_fields: Vec::new(),
      declaring_class: None,
      annotations: Vec::new(),
      source_path: None,
    }
  }

  pub fn class(package: &str, name: &str) -> TypeData {
    TypeData::declared(TypeKind::Class, package, name)
  }

  pub fn interface(package: &str, name: &str) -> TypeData {
    let mut data = TypeData::declared(TypeKind::Interface, package, name);
    data.modifiers |= Modifiers::ABSTRACT;
    data
  }

  pub fn annotation(package: &str, name: &str) -> TypeData {
    TypeData::declared(TypeKind::Annotation, package, name)
  }

  pub fn with_modifiers(mut self, modifiers: Modifiers) -> TypeData {
    self.modifiers = modifiers;
    self
  }

  pub fn with_superclass(mut self, superclass: TypeBinding) -> TypeData {
    self.superclass = Some(superclass);
    self
  }

  pub fn with_interfaces(mut self, interfaces: Vec<TypeBinding>) -> TypeData {
    self.interfaces = interfaces;
    self
  }

  pub fn with_source_path(mut self, path: &str) -> TypeData {
    self.source_path = Some(path.to_string());
    self
  }

  fn derived(kind: TypeKind, name: String) -> TypeData {
    TypeData {
      qualified_name: name.clone(),
      name,
      package: None,
      modifiers: Modifiers::empty(),
      kind,
      superclass: None,
      interfaces: Vec::new(),
      declared_methods: Vec::new(),
      declared_fields: Vec::new(),
      declaring_class: None,
      annotations: Vec::new(),
      source_path: None,
    }
  }
}

#[derive(Clone, Debug)]
pub struct MethodData {
  pub name: String,
  pub modifiers: Modifiers,
  pub declaring_class: TypeBinding,
  pub parameter_types: Vec<TypeBinding>,
  pub return_type: TypeBinding,
  pub exception_types: Vec<TypeBinding>,
  pub varargs: bool,
  pub constructor: bool,
  /// Generic declaration this method was instantiated from.
  pub declaration: Option<MethodBinding>,
  pub annotations: Vec<TypeBinding>,
}

impl MethodData {
  pub fn new(name: &str, declaring_class: TypeBinding, parameter_types: Vec<TypeBinding>, return_type: TypeBinding) -> MethodData {
    MethodData {
      name: name.to_string(),
      modifiers: Modifiers::PUBLIC,
      declaring_class,
      parameter_types,
      return_type,
      exception_types: Vec::new(),
      varargs: false,
      constructor: false,
      declaration: None,
      annotations: Vec::new(),
    }
  }

  /// Constructors are named after their class and return `void`.
  pub fn constructor(class_name: &str, declaring_class: TypeBinding, parameter_types: Vec<TypeBinding>, void: TypeBinding) -> MethodData {
    MethodData {
      constructor: true,
      ..MethodData::new(class_name, declaring_class, parameter_types, void)
    }
  }

  pub fn with_modifiers(mut self, modifiers: Modifiers) -> MethodData {
    self.modifiers = modifiers;
    self
  }

  pub fn varargs(mut self) -> MethodData {
    self.varargs = true;
    self
  }
}

#[derive(Clone, Debug)]
pub struct VariableData {
  pub name: String,
  pub modifiers: Modifiers,
  pub ty: TypeBinding,
  pub declaring_class: Option<TypeBinding>,
  pub declaring_method: Option<MethodBinding>,
  pub field: bool,
  pub parameter: bool,
  pub constant: Option<ConstantValue>,
  /// Declaration this variable was instantiated from, e.g. a field of a generic type.
  pub declaration: Option<VariableBinding>,
  pub annotations: Vec<TypeBinding>,
}

impl VariableData {
  pub fn field(name: &str, ty: TypeBinding, declaring_class: TypeBinding) -> VariableData {
    VariableData {
      name: name.to_string(),
      modifiers: Modifiers::PRIVATE,
      ty,
      declaring_class: Some(declaring_class),
      declaring_method: None,
      field: true,
      parameter: false,
      constant: None,
      declaration: None,
      annotations: Vec::new(),
    }
  }

  pub fn local(name: &str, ty: TypeBinding, declaring_method: MethodBinding) -> VariableData {
    VariableData {
      name: name.to_string(),
      modifiers: Modifiers::empty(),
      ty,
      declaring_class: None,
      declaring_method: Some(declaring_method),
      field: false,
      parameter: false,
      constant: None,
      declaration: None,
      annotations: Vec::new(),
    }
  }

  pub fn parameter(name: &str, ty: TypeBinding, declaring_method: MethodBinding) -> VariableData {
    VariableData {
      parameter: true,
      ..VariableData::local(name, ty, declaring_method)
    }
  }

  pub fn with_modifiers(mut self, modifiers: Modifiers) -> VariableData {
    self.modifiers = modifiers;
    self
  }
}

/// The frontend's view of a compilation unit: every declaration it resolved,
/// and which declaration each syntax node refers to.
///
/// Immutable once built. Nothing here knows about the target runtime.
#[derive(Debug)]
pub struct SourceModel {
  types: Vec<TypeData>,
  methods: Vec<MethodData>,
  variables: Vec<VariableData>,
  resolutions: HashMap<NodeId, Binding>,
  well_known: HashMap<String, TypeBinding>,
}

impl SourceModel {
  /// The binding the frontend resolved for a node, if any.
  pub fn resolve_binding(&self, node: NodeId) -> Option<Binding> {
    self.resolutions.get(&node).copied()
  }

  /// Looks up a declared class, interface, enum or annotation by qualified name, or a primitive by keyword.
  pub fn resolve_well_known_type(&self, name: &str) -> Option<TypeBinding> {
    if let Some(kind) = PrimitiveKind::from_keyword(name) {
      return Some(self.primitive(kind));
    }
    self.well_known.get(name).copied()
  }

  pub fn primitive(&self, kind: PrimitiveKind) -> TypeBinding {
    // `SourceModelBuilder::new` declares the primitives first, in discriminant order.
    TypeBinding::Source(SourceTypeId(kind as u32))
  }

  pub fn type_data(&self, id: SourceTypeId) -> &TypeData {
    &self.types[id.index()]
  }

  pub fn method_data(&self, id: SourceMethodId) -> &MethodData {
    &self.methods[id.index()]
  }

  pub fn variable_data(&self, id: SourceVarId) -> &VariableData {
    &self.variables[id.index()]
  }

  pub fn type_count(&self) -> usize {
    self.types.len()
  }

  pub fn resolution_count(&self) -> usize {
    self.resolutions.len()
  }
}

/// Assembles a [`SourceModel`]. This is the interface a frontend populates.
#[derive(Debug)]
pub struct SourceModelBuilder {
  model: SourceModel,
  arrays: HashMap<TypeBinding, TypeBinding>,
  parameterized: HashMap<(TypeBinding, Vec<TypeBinding>), TypeBinding>,
}

impl Default for SourceModelBuilder {
  fn default() -> Self {
    SourceModelBuilder::new()
  }
}

impl SourceModelBuilder {
  pub fn new() -> SourceModelBuilder {
    let mut builder = SourceModelBuilder {
      model: SourceModel {
        types: Vec::new(),
        methods: Vec::new(),
        variables: Vec::new(),
        resolutions: HashMap::new(),
        well_known: HashMap::new(),
      },
      arrays: HashMap::new(),
      parameterized: HashMap::new(),
    };
    for kind in PrimitiveKind::ALL {
      builder.push_type(TypeData::derived(TypeKind::Primitive(kind), kind.keyword().to_string()));
    }
    builder
  }

  fn push_type(&mut self, data: TypeData) -> TypeBinding {
    let id = SourceTypeId(self.model.types.len() as u32);
    self.model.types.push(data);
    TypeBinding::Source(id)
  }

  pub fn primitive(&self, kind: PrimitiveKind) -> TypeBinding {
    self.model.primitive(kind)
  }

  pub fn well_known(&self, qualified_name: &str) -> Option<TypeBinding> {
    self.model.resolve_well_known_type(qualified_name)
  }

  /// Declares a class, interface, enum or annotation type.
  pub fn declare_type(&mut self, data: TypeData) -> TypeBinding {
    let qualified_name = data.qualified_name.clone();
    let binding = self.push_type(data);
    self.model.well_known.insert(qualified_name, binding);
    binding
  }

  /// Declares a member type of `outer`, e.g. `Map.Entry`.
  pub fn declare_nested_type(&mut self, outer: TypeBinding, mut data: TypeData) -> TypeBinding {
    if let Some(outer_data) = self.data(outer) {
      data.package = outer_data.package.clone();
      data.qualified_name = format!("{}.{}", outer_data.qualified_name, data.name);
      if data.source_path.is_none() {
        data.source_path = outer_data.source_path.clone();
      }
    }
    data.declaring_class = Some(outer);
    self.declare_type(data)
  }

  pub fn array_of(&mut self, component: TypeBinding) -> TypeBinding {
    if let Some(existing) = self.arrays.get(&component) {
      return *existing;
    }
    let name = format!("{}[]", self.qualified_name(component));
    let binding = self.push_type(TypeData::derived(TypeKind::Array { component }, name));
    self.arrays.insert(component, binding);
    binding
  }

  pub fn parameterized(&mut self, declaration: TypeBinding, arguments: Vec<TypeBinding>) -> TypeBinding {
    let key = (declaration, arguments.clone());
    if let Some(existing) = self.parameterized.get(&key) {
      return *existing;
    }
    let args = arguments
      .iter()
      .map(|a| self.qualified_name(*a))
      .collect::<Vec<_>>()
      .join(",");
    let mut data = TypeData::derived(
      TypeKind::Parameterized {
        declaration,
        arguments,
      },
      String::new(),
    );
    if let Some(decl) = self.data(declaration) {
      data.name = format!("{}<{}>", decl.name, args);
      data.qualified_name = format!("{}<{}>", decl.qualified_name, args);
      data.package = decl.package.clone();
      data.modifiers = decl.modifiers;
      data.declaring_class = decl.declaring_class;
    }
    let binding = self.push_type(data);
    self.parameterized.insert(key, binding);
    binding
  }

  pub fn type_variable(&mut self, name: &str, bounds: Vec<TypeBinding>) -> TypeBinding {
    self.push_type(TypeData::derived(TypeKind::TypeVariable { bounds }, name.to_string()))
  }

  pub fn wildcard(&mut self, bound: Option<TypeBinding>, upper: bool) -> TypeBinding {
    let name = match bound {
      None => "?".to_string(),
      Some(b) if upper => format!("? extends {}", self.qualified_name(b)),
      Some(b) => format!("? super {}", self.qualified_name(b)),
    };
    self.push_type(TypeData::derived(TypeKind::Wildcard { bound, upper }, name))
  }

  pub fn capture(&mut self, wildcard: TypeBinding) -> TypeBinding {
    let name = format!("capture-of {}", self.qualified_name(wildcard));
    self.push_type(TypeData::derived(TypeKind::Capture { wildcard }, name))
  }

  pub fn type_mut(&mut self, ty: TypeBinding) -> Option<&mut TypeData> {
    match ty {
      TypeBinding::Source(id) => self.model.types.get_mut(id.index()),
      _ => None,
    }
  }

  pub fn set_superclass(&mut self, ty: TypeBinding, superclass: TypeBinding) {
    if let Some(data) = self.type_mut(ty) {
      data.superclass = Some(superclass);
    }
  }

  pub fn add_interface(&mut self, ty: TypeBinding, interface: TypeBinding) {
    if let Some(data) = self.type_mut(ty) {
      data.interfaces.push(interface);
    }
  }

  /// Declares a method and records it as a member of its declaring class.
  pub fn add_method(&mut self, data: MethodData) -> MethodBinding {
    let owner = data.declaring_class;
    let binding = MethodBinding::Source(SourceMethodId(self.model.methods.len() as u32));
    self.model.methods.push(data);
    if let Some(owner) = self.type_mut(owner) {
      owner.declared_methods.push(binding);
    }
    binding
  }

  /// Declares a variable; fields are recorded as members of their declaring class.
  pub fn add_variable(&mut self, data: VariableData) -> VariableBinding {
    let owner = data.declaring_class.filter(|_| data.field);
    let binding = VariableBinding::Source(SourceVarId(self.model.variables.len() as u32));
    self.model.variables.push(data);
    if let Some(owner) = owner.and_then(|o| self.type_mut(o)) {
      owner.declared_fields.push(binding);
    }
    binding
  }

  pub fn method_mut(&mut self, method: MethodBinding) -> Option<&mut MethodData> {
    match method {
      MethodBinding::Source(id) => self.model.methods.get_mut(id.index()),
      MethodBinding::Synthetic(_) => None,
    }
  }

  pub fn variable_mut(&mut self, var: VariableBinding) -> Option<&mut VariableData> {
    match var {
      VariableBinding::Source(id) => self.model.variables.get_mut(id.index()),
      VariableBinding::Generated(_) => None,
    }
  }

  /// Adds an annotation to a type, method or variable.
  pub fn annotate(&mut self, target: Binding, annotation: TypeBinding) {
    let annotations = match target {
      Binding::Type(t) => self.type_mut(t).map(|d| &mut d.annotations),
      Binding::Method(m) => self.method_mut(m).map(|d| &mut d.annotations),
      Binding::Variable(v) => self.variable_mut(v).map(|d| &mut d.annotations),
    };
    if let Some(annotations) = annotations {
      annotations.push(annotation);
    }
  }

  /// Records what a syntax node refers to.
  pub fn resolve(&mut self, node: NodeId, binding: impl Into<Binding>) {
    self.model.resolutions.insert(node, binding.into());
  }

  pub fn finish(self) -> SourceModel {
    self.model
  }

  fn data(&self, ty: TypeBinding) -> Option<&TypeData> {
    match ty {
      TypeBinding::Source(id) => self.model.types.get(id.index()),
      _ => None,
    }
  }

  fn qualified_name(&self, ty: TypeBinding) -> String {
    match ty {
      TypeBinding::Null => "null".to_string(),
      _ => self.data(ty).map_or_else(String::new, |d| d.qualified_name.clone()),
    }
  }
}
