use super::MappedMethod;
use super::Types;
use crate::binding::Binding;
use crate::binding::MethodBinding;
use crate::binding::TypeBinding;
use crate::error::TypesError;
use crate::error::TypesResult;
use crate::synthetic::descriptor::MethodDescriptor;
use ahash::HashSet;
use ahash::HashSetExt;
use ast_java::ast::node::NodeId;
use std::collections::VecDeque;
use tracing::trace;

/// Source methods with a runtime counterpart: declaring class, name, arity and
/// the runtime method's descriptor.
pub const BUILTIN_DESCRIPTORS: [(&str, &str, usize, &str); 8] = [
  ("java.lang.Object", "equals", 1, "NSObject isEqual:anObject(id)"),
  ("java.lang.Object", "hashCode", 0, "NSObject hash"),
  ("java.lang.Object", "toString", 0, "NSObject description"),
  ("java.lang.Object", "getClass", 0, "NSObject getClass"),
  ("java.lang.String", "length", 0, "NSString length"),
  ("java.lang.String", "charAt", 1, "NSString characterAtIndex:index(NSUInteger)"),
  ("java.lang.String", "isEmpty", 0, "NSString isEmpty"),
  ("java.lang.String", "format", 2, "NSString stringWithFormat:format(NSString *) ..."),
];

/// `longValue` returns a different type on `NSNumber`, so the wrappers' own
/// declarations answer to another selector.
pub const GLOBAL_RENAMES: [(&str, &str, &str); 6] = [
  ("java.lang.Byte", "longValue", "longLongValue"),
  ("java.lang.Double", "longValue", "longLongValue"),
  ("java.lang.Float", "longValue", "longLongValue"),
  ("java.lang.Integer", "longValue", "longLongValue"),
  ("java.lang.Long", "longValue", "longLongValue"),
  ("java.lang.Short", "longValue", "longLongValue"),
];

impl<'f> Types<'f> {
  pub(super) fn register_builtin_methods(&mut self) -> TypesResult<()> {
    for (class, name, arity, descriptor) in BUILTIN_DESCRIPTORS {
      let Some(owner) = self.universe.model().resolve_well_known_type(class) else {
        continue;
      };
      let method = self
        .universe
        .declared_methods(owner)
        .iter()
        .copied()
        .find(|m| self.universe.method_name(*m) == name && self.universe.parameter_types(*m).len() == arity);
      // Frontends may model only part of the JDK.
      if let Some(method) = method {
        self.add_mapped_ios_method(method, descriptor)?;
      }
    }
    Ok(())
  }

  /// Maps `method` onto the runtime method `descriptor` describes, e.g.
  /// `NSObject isEqual:anObject(id)`, returning the new synthetic method.
  pub fn add_mapped_ios_method(&mut self, method: MethodBinding, descriptor: &str) -> TypesResult<MethodBinding> {
    let parsed = MethodDescriptor::parse(descriptor).map_err(|source| TypesError::MalformedDescriptor {
      descriptor: descriptor.to_string(),
      source,
    })?;
    let owner = self
      .universe
      .synthetic()
      .resolve_by_name(&parsed.owner)
      .ok_or_else(|| TypesError::UnknownRuntimeType {
        descriptor: descriptor.to_string(),
        owner: parsed.owner.clone(),
      })?;
    let id = self
      .universe
      .synthetic_mut()
      .new_method(&parsed.name, method, owner, None, Some(parsed.is_varargs()));
    let binding = MethodBinding::Synthetic(id);
    trace!(method = %self.universe.method_name(method), selector = %parsed.selector(), "mapped method");
    self.mapped_methods.insert(method, MappedMethod {
      descriptor: parsed,
      binding,
    });
    Ok(binding)
  }

  pub fn get_mapped_method(&self, method: MethodBinding) -> Option<MethodBinding> {
    self.mapped_methods.get(&method).map(|m| m.binding)
  }

  pub fn get_method_descriptor(&self, method: MethodBinding) -> Option<&MethodDescriptor> {
    self.mapped_methods.get(&method).map(|m| &m.descriptor)
  }

  /// Synthetic methods are always mapped; source methods are when a runtime method stands in for them.
  pub fn is_mapped_method(&self, method: MethodBinding) -> bool {
    method.is_synthetic() || self.mapped_methods.contains_key(&method)
  }

  /// Applies [`GLOBAL_RENAMES`]. Applying it again changes nothing.
  pub fn apply_global_renamings(&mut self) {
    for (class, name, new_name) in GLOBAL_RENAMES {
      let Some(ty) = self.universe.model().resolve_well_known_type(class) else {
        continue;
      };
      let method = self
        .universe
        .declared_methods(ty)
        .iter()
        .copied()
        .find(|m| self.universe.method_name(*m) == name);
      if let Some(method) = method {
        trace!(class, from = name, to = new_name, "global rename");
        self.method_renames.insert(method, new_name.to_string());
      }
    }
  }

  pub fn rename_method(&mut self, method: MethodBinding, new_name: &str) {
    self.method_renames.insert(method, new_name.to_string());
  }

  /// Name generated code uses for `method`.
  pub fn method_name(&self, method: MethodBinding) -> &str {
    match self.method_renames.get(&method) {
      Some(name) => name,
      None => self.universe.method_name(method),
    }
  }

  /// Every rename, ordered by method.
  pub fn method_renames(&self) -> Vec<(MethodBinding, String)> {
    let mut renames: Vec<_> = self.method_renames.iter().map(|(m, n)| (*m, n.clone())).collect();
    renames.sort();
    renames
  }

  /// The most general declaration `method` overrides, or `method` itself.
  ///
  /// Superclasses are searched first, farthest ancestor winning. Failing that,
  /// the first overridden method among all interfaces of the class and its
  /// superclasses is taken. Synthetic methods are never candidates.
  pub fn get_original_method_binding(&self, method: MethodBinding) -> MethodBinding {
    let u = &self.universe;
    let method = u.method_declaration(method);
    let class = u.type_declaration(u.method_declaring_class(method));
    let overridden_in = |ty: TypeBinding| {
      u.declared_methods(ty)
        .iter()
        .copied()
        .find(|candidate| !candidate.is_synthetic() && u.overrides(method, *candidate))
    };

    let mut original = None;
    let mut seen = HashSet::new();
    let mut current = self.superclass(class);
    while let Some(ty) = current.map(|t| u.type_declaration(t)) {
      if !seen.insert(ty) {
        break;
      }
      if let Some(found) = overridden_in(ty) {
        original = Some(found);
      }
      current = self.superclass(ty);
    }
    if let Some(found) = original {
      return u.method_declaration(found);
    }

    for interface in self.all_interfaces(class) {
      if let Some(found) = overridden_in(interface) {
        return u.method_declaration(found);
      }
    }
    method
  }

  /// Interfaces of `class` and of every superclass, with their superinterfaces, breadth first.
  fn all_interfaces(&self, class: TypeBinding) -> Vec<TypeBinding> {
    let mut result = Vec::new();
    let mut seen = HashSet::new();
    let mut current = Some(class);
    while let Some(ty) = current {
      let mut queue: VecDeque<TypeBinding> = self.interfaces(ty).iter().copied().collect();
      while let Some(interface) = queue.pop_front() {
        let interface = self.universe.type_declaration(interface);
        if seen.insert(interface) {
          result.push(interface);
          queue.extend(self.interfaces(interface).iter().copied());
        }
      }
      current = self.superclass(ty).map(|s| self.universe.type_declaration(s)).filter(|s| *s != ty);
    }
    result
  }

  /// Binds `invocation` to `method` instead of what the frontend resolved.
  pub fn add_mapped_invocation(&mut self, invocation: NodeId, method: MethodBinding) {
    self.mapped_invocations.insert(invocation, method);
    self.table.insert(invocation, Binding::Method(method));
  }

  /// Method `invocation` calls: its mapping if one was added, else its own binding.
  pub fn resolve_invocation_binding(&self, invocation: NodeId) -> Option<MethodBinding> {
    self
      .mapped_invocations
      .get(&invocation)
      .copied()
      .or_else(|| self.table.get(invocation).and_then(|b| b.as_method()))
  }

  pub fn add_function(&mut self, method: MethodBinding) {
    self.functions.insert(method);
  }

  pub fn is_function(&self, method: MethodBinding) -> bool {
    self.functions.contains(&method) || self.functions.contains(&self.universe.method_declaration(method))
  }

  /// Binary name of a type; erased JLS 13.1 descriptor of a method; name of a variable.
  pub fn get_signature(&self, binding: Binding) -> String {
    let u = &self.universe;
    match binding {
      Binding::Type(ty) => u.binary_name(ty),
      Binding::Method(m) => {
        let params: String = u.parameter_types(m).iter().map(|p| u.type_signature(*p)).collect();
        let ret = u.return_type(m);
        format!("({params}){}", u.type_signature(ret))
      }
      Binding::Variable(v) => u.variable_name(v).to_string(),
    }
  }
}
