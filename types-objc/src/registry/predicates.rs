use super::Types;
use crate::binding::Binding;
use crate::binding::TypeBinding;
use crate::binding::VariableBinding;
use ast_java::ast::modifiers::Modifiers;
use ast_java::ast::type_expr::PrimitiveKind;
use tracing::warn;

impl<'f> Types<'f> {
  // Type classification.

  pub fn is_java_object_type(&self, ty: TypeBinding) -> bool {
    self.universe.type_declaration(ty) == self.java.object
  }

  pub fn is_java_string_type(&self, ty: TypeBinding) -> bool {
    self.universe.type_declaration(ty) == self.java.string
  }

  /// `java.lang.Number` and its subclasses.
  pub fn is_java_number_type(&self, ty: TypeBinding) -> bool {
    !self.universe.is_primitive(ty) && !ty.is_null() && self.universe.is_assignment_compatible(ty, self.java.number)
  }

  /// `float` and `double`, boxed or not.
  pub fn is_floating_point_type(&self, ty: TypeBinding) -> bool {
    let kind = self
      .universe
      .primitive_kind(ty)
      .or_else(|| self.primitive_type(ty).and_then(|p| self.universe.primitive_kind(p)));
    matches!(kind, Some(PrimitiveKind::Float | PrimitiveKind::Double))
  }

  pub fn is_boolean_type(&self, ty: TypeBinding) -> bool {
    ty == self.java.boolean || ty == self.java.boolean_wrapper
  }

  pub fn is_void_type(&self, ty: TypeBinding) -> bool {
    ty == self.java.void
  }

  pub fn is_java_void_type(&self, ty: TypeBinding) -> bool {
    ty == self.java.java_void
  }

  // Variables.

  pub fn is_static_variable(&self, var: VariableBinding) -> bool {
    self.universe.variable_modifiers(var).contains(Modifiers::STATIC)
  }

  /// `static final`, whatever the initializer.
  pub fn is_constant_variable(&self, var: VariableBinding) -> bool {
    self
      .universe
      .variable_modifiers(var)
      .contains(Modifiers::STATIC | Modifiers::FINAL)
  }

  /// A constant of primitive type with a compile-time value, which generated code inlines.
  pub fn is_primitive_constant(&self, var: VariableBinding) -> bool {
    self.is_constant_variable(var)
      && self.universe.is_primitive(self.universe.variable_type(var))
      && self.universe.constant_value(var).is_some()
  }

  // JUnit.

  /// Whether `ty` is a concrete JUnit 3 test class.
  ///
  /// Abstract classes and the framework's own types are never tests.
  pub fn is_junit_test(&self, ty: TypeBinding) -> bool {
    let u = &self.universe;
    if ty.is_null() || u.is_primitive(ty) || u.is_interface(ty) {
      return false;
    }
    if u.modifiers(ty).contains(Modifiers::ABSTRACT) {
      return false;
    }
    if u.package(ty) == Some(self.options.junit_framework_package.as_str()) {
      return false;
    }
    self.implements_junit_marker(ty)
  }

  fn implements_junit_marker(&self, ty: TypeBinding) -> bool {
    let ty = self.universe.type_declaration(ty);
    if self.universe.qualified_name(ty) == self.options.junit_test_marker {
      return true;
    }
    if self.interfaces(ty).iter().any(|i| self.implements_junit_marker(*i)) {
      return true;
    }
    self.superclass(ty).is_some_and(|s| self.implements_junit_marker(s))
  }

  // Annotations.

  pub fn has_annotation(&self, binding: Binding, qualified_name: &str) -> bool {
    self
      .universe
      .annotations(binding)
      .iter()
      .any(|a| self.universe.qualified_name(*a) == qualified_name)
  }

  pub fn has_any_annotation<S: AsRef<str>>(&self, binding: Binding, qualified_names: &[S]) -> bool {
    qualified_names.iter().any(|n| self.has_annotation(binding, n.as_ref()))
  }

  pub fn has_weak_annotation(&self, binding: Binding) -> bool {
    self.has_any_annotation(binding, &self.options.weak_annotations)
  }

  /// A variable annotated weak, or whose type is.
  pub fn is_weak_reference(&self, var: VariableBinding) -> bool {
    if self.has_weak_annotation(Binding::Variable(var)) {
      return true;
    }
    let ty = self.universe.variable_type(var);
    !ty.is_null() && self.has_weak_annotation(Binding::Type(ty))
  }

  /// Pools only make sense around methods that return nothing.
  pub fn has_autorelease_pool_annotation(&self, binding: Binding) -> bool {
    if !self.has_annotation(binding, &self.options.autorelease_pool_annotation) {
      return false;
    }
    if let Binding::Method(m) = binding {
      let ret = self.universe.return_type(m);
      if !self.universe.is_void(ret) {
        warn!(
          method = %self.universe.method_name(m),
          "ignoring @AutoreleasePool on a method that returns {}",
          self.universe.qualified_name(ret)
        );
        return false;
      }
    }
    true
  }
}
