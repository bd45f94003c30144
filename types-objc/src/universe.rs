//! Structural queries over every binding, whichever arena it lives in.
//!
//! Source bindings answer from the frontend's model. Synthetic bindings answer
//! from their own data and forward to their delegate or original where they
//! stand in for a source declaration. The null type answers with fixed bottom
//! values (see [`NullType`]).

use crate::binding::java_lang;
use crate::binding::source::MethodData;
use crate::binding::source::SourceModel;
use crate::binding::source::TypeData;
use crate::binding::source::TypeKind;
use crate::binding::source::VariableData;
use crate::binding::Binding;
use crate::binding::ConstantValue;
use crate::binding::MethodBinding;
use crate::binding::TypeBinding;
use crate::binding::VariableBinding;
use crate::synthetic::ArrayOps;
use crate::synthetic::GeneratedVariable;
use crate::synthetic::SyntheticMethodData;
use crate::synthetic::SyntheticTypeData;
use crate::synthetic::SyntheticUniverse;
use crate::view::NullType;
use ahash::HashSet;
use ahash::HashSetExt;
use ast_java::ast::modifiers::Modifiers;
use ast_java::ast::type_expr::PrimitiveKind;

pub struct Universe<'f> {
  model: &'f SourceModel,
  synthetic: SyntheticUniverse,
  object: Option<TypeBinding>,
}

fn widens(from: PrimitiveKind, to: PrimitiveKind) -> bool {
  use PrimitiveKind::*;
  if from == to {
    return from != Void;
  }
  let targets: &[PrimitiveKind] = match from {
    Byte => &[Short, Int, Long, Float, Double],
    Short | Char => &[Int, Long, Float, Double],
    Int => &[Long, Float, Double],
    Long => &[Float, Double],
    Float => &[Double],
    _ => &[],
  };
  targets.contains(&to)
}

fn arrays_compatible(from: &ArrayOps, to: &ArrayOps) -> bool {
  match (from.primitive_element, to.primitive_element) {
    // Object arrays are interchangeable whatever their element type.
    (None, None) => true,
    (Some(a), Some(b)) => a == b || from.boxed_element == to.boxed_element,
    _ => false,
  }
}

impl<'f> Universe<'f> {
  pub fn new(model: &'f SourceModel) -> Universe<'f> {
    Universe {
      model,
      synthetic: SyntheticUniverse::new(),
      object: model.resolve_well_known_type(java_lang::OBJECT),
    }
  }

  pub fn model(&self) -> &'f SourceModel {
    self.model
  }

  pub fn synthetic(&self) -> &SyntheticUniverse {
    &self.synthetic
  }

  pub fn synthetic_mut(&mut self) -> &mut SyntheticUniverse {
    &mut self.synthetic
  }

  fn source(&self, ty: TypeBinding) -> Option<&'f TypeData> {
    match ty {
      TypeBinding::Source(id) => Some(self.model.type_data(id)),
      _ => None,
    }
  }

  fn synth(&self, ty: TypeBinding) -> Option<&SyntheticTypeData> {
    match ty {
      TypeBinding::Synthetic(id) => Some(self.synthetic.type_data(id)),
      _ => None,
    }
  }

  fn kind(&self, ty: TypeBinding) -> Option<&'f TypeKind> {
    self.source(ty).map(|d| &d.kind)
  }

  /// The binding structural queries should be answered from: the original of a renamed type,
  /// the generic declaration of a parameterized one.
  fn structural(&self, ty: TypeBinding) -> TypeBinding {
    match ty {
      TypeBinding::Synthetic(_) => match self.renamed_from(ty) {
        Some(original) => self.structural(original),
        None => ty,
      },
      _ => self.type_declaration(ty),
    }
  }

  // Types.

  pub fn type_name(&self, ty: TypeBinding) -> &str {
    match ty {
      TypeBinding::Source(id) => &self.model.type_data(id).name,
      TypeBinding::Synthetic(id) => &self.synthetic.type_data(id).name,
      TypeBinding::Null => NullType::NAME,
    }
  }

  pub fn qualified_name(&self, ty: TypeBinding) -> &str {
    match ty {
      TypeBinding::Source(id) => &self.model.type_data(id).qualified_name,
      TypeBinding::Synthetic(id) => &self.synthetic.type_data(id).name,
      TypeBinding::Null => NullType::NAME,
    }
  }

  pub fn package(&self, ty: TypeBinding) -> Option<&str> {
    match self.structural(ty) {
      TypeBinding::Source(id) => self.model.type_data(id).package.as_deref(),
      _ => None,
    }
  }

  pub fn modifiers(&self, ty: TypeBinding) -> Modifiers {
    let ty = self.structural(ty);
    if let Some(data) = self.source(ty) {
      return data.modifiers;
    }
    match self.synth(ty) {
      Some(data) if data.is_interface => Modifiers::PUBLIC | Modifiers::ABSTRACT,
      Some(_) => Modifiers::PUBLIC,
      None => Modifiers::empty(),
    }
  }

  pub fn primitive_kind(&self, ty: TypeBinding) -> Option<PrimitiveKind> {
    match self.kind(ty) {
      Some(TypeKind::Primitive(kind)) => Some(*kind),
      _ => None,
    }
  }

  pub fn is_primitive(&self, ty: TypeBinding) -> bool {
    self.primitive_kind(ty).is_some()
  }

  pub fn is_void(&self, ty: TypeBinding) -> bool {
    self.primitive_kind(ty) == Some(PrimitiveKind::Void)
  }

  pub fn is_array(&self, ty: TypeBinding) -> bool {
    match ty {
      TypeBinding::Source(_) => matches!(self.kind(ty), Some(TypeKind::Array { .. })),
      TypeBinding::Synthetic(_) => self.synth(self.structural(ty)).is_some_and(|d| d.is_array),
      TypeBinding::Null => false,
    }
  }

  pub fn is_interface(&self, ty: TypeBinding) -> bool {
    let ty = self.structural(ty);
    match self.kind(ty) {
      Some(kind) => matches!(kind, TypeKind::Interface | TypeKind::Annotation),
      None => self.synth(ty).is_some_and(|d| d.is_interface),
    }
  }

  pub fn is_enum(&self, ty: TypeBinding) -> bool {
    matches!(self.kind(self.structural(ty)), Some(TypeKind::Enum))
  }

  pub fn is_type_variable(&self, ty: TypeBinding) -> bool {
    matches!(self.kind(ty), Some(TypeKind::TypeVariable { .. }))
  }

  pub fn is_wildcard(&self, ty: TypeBinding) -> bool {
    matches!(self.kind(ty), Some(TypeKind::Wildcard { .. }))
  }

  pub fn is_capture(&self, ty: TypeBinding) -> bool {
    matches!(self.kind(ty), Some(TypeKind::Capture { .. }))
  }

  pub fn is_parameterized(&self, ty: TypeBinding) -> bool {
    matches!(self.kind(ty), Some(TypeKind::Parameterized { .. }))
  }

  pub fn is_anonymous(&self, ty: TypeBinding) -> bool {
    self.source(ty).is_some_and(|d| d.name.is_empty())
  }

  pub fn component_type(&self, ty: TypeBinding) -> Option<TypeBinding> {
    match self.kind(ty) {
      Some(TypeKind::Array { component }) => Some(*component),
      _ => self
        .array_ops(ty)
        .map(|ops| ops.primitive_element.unwrap_or(ops.boxed_element)),
    }
  }

  /// Innermost component of a possibly multi-dimensional array.
  pub fn element_type(&self, ty: TypeBinding) -> TypeBinding {
    let mut current = ty;
    while let Some(component) = self.component_type(current).filter(|_| self.is_array(current)) {
      if component == current {
        break;
      }
      current = component;
    }
    current
  }

  pub fn dimensions(&self, ty: TypeBinding) -> usize {
    let mut dims = 0;
    let mut current = ty;
    while let Some(TypeKind::Array { component }) = self.kind(current) {
      dims += 1;
      current = *component;
    }
    dims
  }

  /// Superclass as declared to the frontend, ignoring any hierarchy override.
  pub fn superclass_of(&self, ty: TypeBinding) -> Option<TypeBinding> {
    match self.kind(ty) {
      Some(TypeKind::Array { .. }) => return self.object,
      Some(TypeKind::Parameterized { declaration, .. }) => return self.superclass_of(*declaration),
      _ => {}
    }
    let ty = self.structural(ty);
    match ty {
      TypeBinding::Source(_) => self.source(ty).and_then(|d| d.superclass),
      TypeBinding::Synthetic(_) => self.synth(ty).and_then(|d| d.superclass),
      TypeBinding::Null => None,
    }
  }

  /// Interfaces as declared to the frontend, ignoring any hierarchy override.
  pub fn interfaces_of(&self, ty: TypeBinding) -> &[TypeBinding] {
    let ty = self.structural(ty);
    if let Some(data) = self.source(ty) {
      return &data.interfaces;
    }
    self.synth(ty).map_or(&[], |d| d.interfaces.as_slice())
  }

  pub fn declared_methods(&self, ty: TypeBinding) -> &[MethodBinding] {
    if let Some(data) = self.synth(ty).filter(|d| d.renamed_from.is_none()) {
      return &data.members;
    }
    self.source(self.structural(ty)).map_or(&[], |d| d.declared_methods.as_slice())
  }

  pub fn declared_fields(&self, ty: TypeBinding) -> &[VariableBinding] {
    self.source(self.structural(ty)).map_or(&[], |d| d.declared_fields.as_slice())
  }

  pub fn declaring_class_of(&self, ty: TypeBinding) -> Option<TypeBinding> {
    match ty {
      TypeBinding::Source(_) => self.source(ty).and_then(|d| d.declaring_class),
      TypeBinding::Synthetic(_) => self.synth(ty).and_then(|d| d.declaring_class),
      TypeBinding::Null => None,
    }
  }

  /// Generic declaration of a parameterized type; any other type is its own declaration.
  pub fn type_declaration(&self, ty: TypeBinding) -> TypeBinding {
    match self.kind(ty) {
      Some(TypeKind::Parameterized { declaration, .. }) => *declaration,
      _ => ty,
    }
  }

  pub fn erasure(&self, ty: TypeBinding) -> TypeBinding {
    let object = self.object.unwrap_or(ty);
    match self.kind(ty) {
      Some(TypeKind::Parameterized { declaration, .. }) => *declaration,
      Some(TypeKind::TypeVariable { bounds }) => bounds.first().map_or(object, |b| self.erasure(*b)),
      Some(TypeKind::Wildcard {
        bound: Some(bound),
        upper: true,
      }) => self.erasure(*bound),
      Some(TypeKind::Wildcard { .. }) => object,
      Some(TypeKind::Capture { wildcard }) => self.erasure(*wildcard),
      _ => ty,
    }
  }

  pub fn type_arguments(&self, ty: TypeBinding) -> &[TypeBinding] {
    match self.kind(ty) {
      Some(TypeKind::Parameterized { arguments, .. }) => arguments,
      _ => &[],
    }
  }

  pub fn type_bounds(&self, ty: TypeBinding) -> &[TypeBinding] {
    match self.kind(ty) {
      Some(TypeKind::TypeVariable { bounds }) => bounds,
      _ => &[],
    }
  }

  pub fn wildcard_bound(&self, ty: TypeBinding) -> Option<TypeBinding> {
    match self.kind(ty) {
      Some(TypeKind::Wildcard { bound, .. }) => *bound,
      _ => None,
    }
  }

  pub fn capture_wildcard(&self, ty: TypeBinding) -> Option<TypeBinding> {
    match self.kind(ty) {
      Some(TypeKind::Capture { wildcard }) => Some(*wildcard),
      _ => None,
    }
  }

  pub fn source_path(&self, ty: TypeBinding) -> Option<&str> {
    self.source(self.structural(ty)).and_then(|d| d.source_path.as_deref())
  }

  pub fn mapped_from(&self, ty: TypeBinding) -> Option<TypeBinding> {
    self.synth(ty).and_then(|d| d.mapped_from)
  }

  pub fn renamed_from(&self, ty: TypeBinding) -> Option<TypeBinding> {
    self.synth(ty).and_then(|d| d.renamed_from)
  }

  pub fn array_ops(&self, ty: TypeBinding) -> Option<&ArrayOps> {
    self.synth(ty).and_then(|d| d.array.as_ref())
  }

  pub fn header(&self, ty: TypeBinding) -> Option<&str> {
    self.synth(ty).and_then(|d| d.header.as_deref())
  }

  pub fn is_java_object(&self, ty: TypeBinding) -> bool {
    self.object == Some(ty)
  }

  /// Name as the JVM spells it, e.g. `java.util.Map$Entry`, `[I` or `[Ljava.lang.String;`.
  pub fn binary_name(&self, ty: TypeBinding) -> String {
    if ty.is_null() {
      return NullType::BINARY_NAME.to_string();
    }
    if let Some(kind) = self.primitive_kind(ty) {
      return kind.descriptor().to_string();
    }
    match self.kind(ty) {
      Some(TypeKind::Array { component }) => {
        let component = *component;
        if self.is_primitive(component) || self.is_array(component) {
          format!("[{}", self.binary_name(component))
        } else {
          format!("[L{};", self.binary_name(component))
        }
      }
      Some(TypeKind::Parameterized { declaration, .. }) => self.binary_name(*declaration),
      Some(TypeKind::TypeVariable { .. } | TypeKind::Wildcard { .. } | TypeKind::Capture { .. }) => {
        let erased = self.erasure(ty);
        if erased == ty {
          self.qualified_name(ty).to_string()
        } else {
          self.binary_name(erased)
        }
      }
      _ => match self.declaring_class_of(ty).filter(|_| !ty.is_synthetic()) {
        Some(outer) => format!("{}${}", self.binary_name(outer), self.type_name(ty)),
        None => self.qualified_name(ty).to_string(),
      },
    }
  }

  /// Field descriptor as in JVMS 4.3.2, e.g. `I` or `Ljava/lang/String;`.
  pub fn type_signature(&self, ty: TypeBinding) -> String {
    if let Some(kind) = self.primitive_kind(ty) {
      return kind.descriptor().to_string();
    }
    if let Some(TypeKind::Array { component }) = self.kind(ty) {
      return format!("[{}", self.type_signature(*component));
    }
    format!("L{};", self.binary_name(self.erasure(ty)).replace('.', "/"))
  }

  // Methods.

  fn source_method(&self, m: MethodBinding) -> Option<&'f MethodData> {
    match m {
      MethodBinding::Source(id) => Some(self.model.method_data(id)),
      MethodBinding::Synthetic(_) => None,
    }
  }

  fn synthetic_method(&self, m: MethodBinding) -> Option<&SyntheticMethodData> {
    match m {
      MethodBinding::Synthetic(id) => Some(self.synthetic.method_data(id)),
      MethodBinding::Source(_) => None,
    }
  }

  pub fn delegate(&self, m: MethodBinding) -> Option<MethodBinding> {
    self.synthetic_method(m).map(|d| d.delegate)
  }

  pub fn method_name(&self, m: MethodBinding) -> &str {
    match m {
      MethodBinding::Source(id) => &self.model.method_data(id).name,
      MethodBinding::Synthetic(id) => &self.synthetic.method_data(id).name,
    }
  }

  pub fn method_modifiers(&self, m: MethodBinding) -> Modifiers {
    match self.synthetic_method(m) {
      Some(data) => self.method_modifiers(data.delegate),
      None => self.source_method(m).map_or(Modifiers::empty(), |d| d.modifiers),
    }
  }

  pub fn method_declaring_class(&self, m: MethodBinding) -> TypeBinding {
    match self.synthetic_method(m) {
      Some(data) => data.owner,
      None => self.source_method(m).map_or(TypeBinding::Null, |d| d.declaring_class),
    }
  }

  pub fn parameter_types(&self, m: MethodBinding) -> &[TypeBinding] {
    match self.synthetic_method(m) {
      Some(data) => self.parameter_types(data.delegate),
      None => self.source_method(m).map_or(&[], |d| d.parameter_types.as_slice()),
    }
  }

  pub fn return_type(&self, m: MethodBinding) -> TypeBinding {
    match self.synthetic_method(m) {
      Some(data) => data.return_type.unwrap_or_else(|| self.return_type(data.delegate)),
      None => self.source_method(m).map_or(TypeBinding::Null, |d| d.return_type),
    }
  }

  pub fn exception_types(&self, m: MethodBinding) -> &[TypeBinding] {
    match self.synthetic_method(m) {
      Some(data) => self.exception_types(data.delegate),
      None => self.source_method(m).map_or(&[], |d| d.exception_types.as_slice()),
    }
  }

  pub fn is_varargs(&self, m: MethodBinding) -> bool {
    match self.synthetic_method(m) {
      Some(data) => data.varargs.unwrap_or_else(|| self.is_varargs(data.delegate)),
      None => self.source_method(m).is_some_and(|d| d.varargs),
    }
  }

  pub fn is_constructor(&self, m: MethodBinding) -> bool {
    match self.synthetic_method(m) {
      Some(data) => self.is_constructor(data.delegate),
      None => self.source_method(m).is_some_and(|d| d.constructor),
    }
  }

  /// Generic declaration of an instantiated method; any other method is its own declaration.
  pub fn method_declaration(&self, m: MethodBinding) -> MethodBinding {
    self.source_method(m).and_then(|d| d.declaration).unwrap_or(m)
  }

  /// Whether `m` overrides `other`, comparing parameter erasures.
  pub fn overrides(&self, m: MethodBinding, other: MethodBinding) -> bool {
    if m == other || self.is_constructor(m) || self.is_constructor(other) {
      return false;
    }
    if self.method_name(m) != self.method_name(other) {
      return false;
    }
    let other_mods = self.method_modifiers(other);
    if other_mods.is_private() || other_mods.is_static() || self.method_modifiers(m).is_static() {
      return false;
    }
    let (ours, theirs) = (self.parameter_types(m), self.parameter_types(other));
    if ours.len() != theirs.len() || ours.iter().zip(theirs).any(|(a, b)| self.erasure(*a) != self.erasure(*b)) {
      return false;
    }
    let (sub, sup) = (self.method_declaring_class(m), self.method_declaring_class(other));
    self.type_declaration(sub) != self.type_declaration(sup) && self.is_subtype(sub, sup)
  }

  // Variables.

  fn source_variable(&self, v: VariableBinding) -> Option<&'f VariableData> {
    match v {
      VariableBinding::Source(id) => Some(self.model.variable_data(id)),
      VariableBinding::Generated(_) => None,
    }
  }

  fn generated_variable(&self, v: VariableBinding) -> Option<&GeneratedVariable> {
    match v {
      VariableBinding::Generated(id) => Some(self.synthetic.variable(id)),
      VariableBinding::Source(_) => None,
    }
  }

  pub fn variable_name(&self, v: VariableBinding) -> &str {
    match v {
      VariableBinding::Source(id) => &self.model.variable_data(id).name,
      VariableBinding::Generated(id) => &self.synthetic.variable(id).name,
    }
  }

  pub fn variable_type(&self, v: VariableBinding) -> TypeBinding {
    match v {
      VariableBinding::Source(id) => self.model.variable_data(id).ty,
      VariableBinding::Generated(id) => self.synthetic.variable(id).ty,
    }
  }

  pub fn variable_modifiers(&self, v: VariableBinding) -> Modifiers {
    match v {
      VariableBinding::Source(id) => self.model.variable_data(id).modifiers,
      VariableBinding::Generated(id) => self.synthetic.variable(id).modifiers,
    }
  }

  pub fn is_field(&self, v: VariableBinding) -> bool {
    self.source_variable(v).is_some_and(|d| d.field)
  }

  pub fn is_parameter(&self, v: VariableBinding) -> bool {
    match self.generated_variable(v) {
      Some(var) => var.parameter,
      None => self.source_variable(v).is_some_and(|d| d.parameter),
    }
  }

  pub fn variable_declaring_class(&self, v: VariableBinding) -> Option<TypeBinding> {
    match self.generated_variable(v) {
      Some(var) => var.declaring_class,
      None => self.source_variable(v).and_then(|d| d.declaring_class),
    }
  }

  pub fn variable_declaring_method(&self, v: VariableBinding) -> Option<MethodBinding> {
    self.source_variable(v).and_then(|d| d.declaring_method)
  }

  pub fn constant_value(&self, v: VariableBinding) -> Option<&ConstantValue> {
    self.source_variable(v).and_then(|d| d.constant.as_ref())
  }

  /// The declaration every occurrence of this variable shares.
  pub fn variable_declaration(&self, v: VariableBinding) -> VariableBinding {
    self.source_variable(v).and_then(|d| d.declaration).unwrap_or(v)
  }

  pub fn annotations(&self, binding: Binding) -> &[TypeBinding] {
    match binding {
      Binding::Type(ty) => self.source(self.structural(ty)).map_or(&[], |d| d.annotations.as_slice()),
      Binding::Method(m) => match self.synthetic_method(m) {
        Some(data) => self.annotations(Binding::Method(data.delegate)),
        None => self.source_method(m).map_or(&[], |d| d.annotations.as_slice()),
      },
      Binding::Variable(v) => self.source_variable(v).map_or(&[], |d| d.annotations.as_slice()),
    }
  }

  // Compatibility.

  fn boxed(&self, kind: PrimitiveKind) -> Option<TypeBinding> {
    java_lang::wrapper_name(kind).and_then(|name| self.model.resolve_well_known_type(name))
  }

  fn unboxed(&self, ty: TypeBinding) -> Option<PrimitiveKind> {
    java_lang::unwrapped_kind(self.qualified_name(self.type_declaration(ty)))
  }

  /// Whether `from` is `to` or inherits from it, by erasure.
  pub fn is_subtype(&self, from: TypeBinding, to: TypeBinding) -> bool {
    if self.is_primitive(from) || self.is_primitive(to) {
      return from == to;
    }
    let target = self.erasure(to);
    if self.is_java_object(target) {
      return true;
    }
    let mut pending = vec![self.erasure(from)];
    let mut seen = HashSet::new();
    while let Some(ty) = pending.pop() {
      if ty == target {
        return true;
      }
      if !seen.insert(ty) {
        continue;
      }
      pending.extend(self.superclass_of(ty).map(|s| self.type_declaration(s)));
      pending.extend(self.interfaces_of(ty).iter().map(|i| self.type_declaration(*i)));
    }
    false
  }

  pub fn is_assignment_compatible(&self, from: TypeBinding, to: TypeBinding) -> bool {
    if from == to || from.is_null() {
      return true;
    }
    if to.is_null() {
      return false;
    }
    if from.is_synthetic() || to.is_synthetic() {
      return self.synthetic_compatible(from, to);
    }
    match (self.primitive_kind(from), self.primitive_kind(to)) {
      (Some(a), Some(b)) => widens(a, b),
      (Some(a), None) => self.boxed(a).is_some_and(|w| self.is_subtype(w, to)),
      (None, Some(b)) => self.unboxed(from).is_some_and(|a| widens(a, b)),
      (None, None) => self.reference_compatible(from, to),
    }
  }

  fn reference_compatible(&self, from: TypeBinding, to: TypeBinding) -> bool {
    if self.is_array(from) {
      if self.is_array(to) {
        return match (self.component_type(from), self.component_type(to)) {
          (Some(a), Some(b)) if self.is_primitive(a) || self.is_primitive(b) => a == b,
          (Some(a), Some(b)) => self.is_assignment_compatible(a, b),
          _ => false,
        };
      }
      return matches!(
        self.qualified_name(to),
        java_lang::OBJECT | java_lang::CLONEABLE | java_lang::SERIALIZABLE
      );
    }
    if self.is_type_variable(to) || self.is_wildcard(to) || self.is_capture(to) {
      return false;
    }
    if self.is_type_variable(from) {
      let bounds = self.type_bounds(from);
      if bounds.is_empty() {
        return self.is_java_object(self.erasure(to));
      }
      return bounds.iter().any(|b| self.is_assignment_compatible(*b, to));
    }
    self.is_subtype(from, to)
  }

  fn synthetic_compatible(&self, from: TypeBinding, to: TypeBinding) -> bool {
    if let (Some(a), Some(b)) = (self.array_ops(from), self.array_ops(to)) {
      return arrays_compatible(a, b);
    }
    if from.is_synthetic() {
      if let Some(original) = self.renamed_from(from) {
        return self.is_assignment_compatible(original, to);
      }
      let mut current = Some(from);
      while let Some(ty) = current {
        if ty == to || self.interfaces_of(ty).contains(&to) {
          return true;
        }
        current = self.superclass_of(ty).filter(|s| s.is_synthetic());
      }
      return self
        .mapped_from(from)
        .is_some_and(|source| self.is_assignment_compatible(source, to));
    }
    if let Some(original) = self.renamed_from(to) {
      return self.is_assignment_compatible(from, original);
    }
    self
      .mapped_from(to)
      .is_some_and(|source| self.is_assignment_compatible(from, source))
  }
}
