//! Names generated code uses for types and the files that declare them.

use crate::binding::TypeBinding;
use crate::universe::Universe;

/// Camel-cases a package, e.g. `java.util` to `JavaUtil`.
pub fn camel_case_package(package: &str) -> String {
  package
    .split('.')
    .filter(|s| !s.is_empty())
    .map(|segment| {
      let mut chars = segment.chars();
      match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
      }
    })
    .collect()
}

/// Name of `ty` in generated code: `java.util.Map.Entry` becomes `JavaUtilMap_Entry`.
///
/// Runtime types keep their own names. Primitives keep their keywords.
pub fn full_name(universe: &Universe<'_>, ty: TypeBinding) -> String {
  let ty = universe.erasure(universe.type_declaration(ty));
  if ty.is_synthetic() || ty.is_null() || universe.is_primitive(ty) {
    return universe.type_name(ty).to_string();
  }
  if universe.is_array(ty) {
    let element = universe.element_type(ty);
    return format!("{}Array", full_name(universe, element));
  }
  match universe.declaring_class_of(ty) {
    Some(outer) => format!("{}_{}", full_name(universe, outer), universe.type_name(ty)),
    None => {
      let package = universe.package(ty).map(camel_case_package).unwrap_or_default();
      format!("{package}{}", universe.type_name(ty))
    }
  }
}

/// Path, without extension, of the file generated code imports to see `ty`.
///
/// Source types use the path of the unit declaring them, falling back to the
/// outermost type's qualified name. Runtime types use their header, or their
/// own name when they have none.
pub fn import_file_name(universe: &Universe<'_>, ty: TypeBinding) -> String {
  let ty = universe.erasure(universe.type_declaration(ty));
  if let Some(original) = universe.renamed_from(ty) {
    return import_file_name(universe, original);
  }
  if ty.is_synthetic() {
    return universe.header(ty).unwrap_or(universe.type_name(ty)).to_string();
  }
  if let Some(path) = universe.source_path(ty) {
    return path.strip_suffix(".java").unwrap_or(path).to_string();
  }
  let mut outer = ty;
  while let Some(next) = universe.declaring_class_of(outer) {
    outer = next;
  }
  universe.qualified_name(outer).replace('.', "/")
}
