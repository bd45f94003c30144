use serde::Deserialize;

/// Options controlling registry setup and the checks it performs.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TypesOptions {
  /// Check the binding table after it is built and after every subtree copy.
  pub verify_bindings: bool,
  /// Marker interface of JUnit 3 test classes.
  pub junit_test_marker: String,
  /// Package whose own types are never considered tests.
  pub junit_framework_package: String,
  /// Annotations that make a reference weak.
  pub weak_annotations: Vec<String>,
  /// Annotation that wraps a method body in an autorelease pool.
  pub autorelease_pool_annotation: String,
}

impl Default for TypesOptions {
  fn default() -> Self {
    Self {
      verify_bindings: true,
      junit_test_marker: "junit.framework.Test".to_string(),
      junit_framework_package: "junit.framework".to_string(),
      weak_annotations: vec![
        "com.google.j2objc.annotations.Weak".to_string(),
        "com.google.j2objc.annotations.WeakOuter".to_string(),
      ],
      autorelease_pool_annotation: "com.google.j2objc.annotations.AutoreleasePool".to_string(),
    }
  }
}
