//! Bindings with no frontend origin.
//!
//! The target runtime has classes the source language never mentions (its root
//! object, its string class, one array class per primitive kind) and methods
//! whose names differ from the source methods they stand in for. Those are
//! created here, once per translation unit, and resolved by name afterwards.

pub mod descriptor;

use crate::binding::GeneratedVarId;
use crate::binding::MethodBinding;
use crate::binding::SyntheticMethodId;
use crate::binding::SyntheticTypeId;
use crate::binding::TypeBinding;
use ahash::HashMap;
use ast_java::ast::modifiers::Modifiers;
use tracing::trace;

/// Runtime operations of a native array class, and its element types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayOps {
  /// Constructs an array from a native buffer, e.g. `arrayWithInts`.
  pub ctor_op: String,
  /// Indexed element access, e.g. `intAtIndex`.
  pub access_op: String,
  /// Bulk copy into a native buffer, e.g. `getInts`.
  pub copy_op: String,
  pub boxed_element: TypeBinding,
  /// `None` for the object array.
  pub primitive_element: Option<TypeBinding>,
}

#[derive(Clone, Debug)]
pub struct SyntheticTypeData {
  pub name: String,
  pub declaring_class: Option<TypeBinding>,
  pub superclass: Option<TypeBinding>,
  pub interfaces: Vec<TypeBinding>,
  pub is_interface: bool,
  pub is_array: bool,
  /// Source type this one replaces; consulted by assignment compatibility.
  pub mapped_from: Option<TypeBinding>,
  pub members: Vec<MethodBinding>,
  pub array: Option<ArrayOps>,
  /// Source type this is a renamed view of. Every query but the name and declaring class forwards to it.
  pub renamed_from: Option<TypeBinding>,
  /// Header declaring the type, or `None` for types the runtime's base framework always provides.
  pub header: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SyntheticMethodData {
  pub name: String,
  pub delegate: MethodBinding,
  pub owner: TypeBinding,
  pub return_type: Option<TypeBinding>,
  pub varargs: Option<bool>,
}

/// A compiler-introduced local or parameter.
///
/// Two generated variables with equal fields are the same variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeneratedVariable {
  pub name: String,
  pub modifiers: Modifiers,
  pub ty: TypeBinding,
  pub parameter: bool,
  pub declaring_class: Option<TypeBinding>,
  /// Declaring method, by name.
  pub declaring_method: Option<String>,
}

#[derive(Debug, Default)]
pub struct SyntheticUniverse {
  types: Vec<SyntheticTypeData>,
  methods: Vec<SyntheticMethodData>,
  variables: Vec<GeneratedVariable>,
  types_by_name: HashMap<String, SyntheticTypeId>,
  methods_by_name: HashMap<String, Vec<SyntheticMethodId>>,
  variable_ids: HashMap<GeneratedVariable, GeneratedVarId>,
}

impl SyntheticUniverse {
  pub fn new() -> SyntheticUniverse {
    SyntheticUniverse::default()
  }

  fn push_type(&mut self, data: SyntheticTypeData) -> SyntheticTypeId {
    let id = SyntheticTypeId(self.types.len() as u32);
    trace!(name = %data.name, "synthetic type");
    self.types_by_name.insert(data.name.clone(), id);
    self.types.push(data);
    id
  }

  /// Creates a type with no source backing and registers it for resolution by name.
  pub fn new_type(&mut self, name: &str, superclass: Option<TypeBinding>, is_interface: bool, is_array: bool) -> SyntheticTypeId {
    self.push_type(SyntheticTypeData {
      name: name.to_string(),
      declaring_class: None,
      superclass,
      interfaces: Vec::new(),
      is_interface,
      is_array,
      mapped_from: None,
      members: Vec::new(),
      array: None,
      renamed_from: None,
      header: None,
    })
  }

  pub fn new_array_type(&mut self, name: &str, superclass: Option<TypeBinding>, ops: ArrayOps) -> SyntheticTypeId {
    let id = self.new_type(name, superclass, false, true);
    let data = &mut self.types[id.index()];
    data.array = Some(ops);
    data.header = Some(name.to_string());
    id
  }

  /// Creates a view of `original` under a different name and declaring class.
  pub fn new_renamed_type(&mut self, name: &str, declaring_class: Option<TypeBinding>, original: TypeBinding) -> SyntheticTypeId {
    let id = self.new_type(name, None, false, false);
    let data = &mut self.types[id.index()];
    data.declaring_class = declaring_class;
    data.renamed_from = Some(original);
    id
  }

  /// Creates a method that answers to `name` but otherwise behaves like `delegate`.
  ///
  /// The method is registered by name and, when its owner is synthetic, added to
  /// the owner's members.
  pub fn new_method(
    &mut self,
    name: &str,
    delegate: MethodBinding,
    owner: TypeBinding,
    return_type: Option<TypeBinding>,
    varargs: Option<bool>,
  ) -> SyntheticMethodId {
    let id = SyntheticMethodId(self.methods.len() as u32);
    self.methods.push(SyntheticMethodData {
      name: name.to_string(),
      delegate,
      owner,
      return_type,
      varargs,
    });
    self.methods_by_name.entry(name.to_string()).or_default().push(id);
    if let TypeBinding::Synthetic(owner) = owner {
      self.types[owner.index()].members.push(MethodBinding::Synthetic(id));
    }
    id
  }

  /// Interns a generated variable; equal variables get the same id.
  pub fn new_variable(&mut self, var: GeneratedVariable) -> GeneratedVarId {
    if let Some(id) = self.variable_ids.get(&var) {
      return *id;
    }
    let id = GeneratedVarId(self.variables.len() as u32);
    self.variables.push(var.clone());
    self.variable_ids.insert(var, id);
    id
  }

  pub fn set_mapped_from(&mut self, ty: SyntheticTypeId, mapped_from: TypeBinding) {
    self.types[ty.index()].mapped_from = Some(mapped_from);
  }

  pub fn set_header(&mut self, ty: SyntheticTypeId, header: &str) {
    self.types[ty.index()].header = Some(header.to_string());
  }

  pub fn add_interface(&mut self, ty: SyntheticTypeId, interface: TypeBinding) {
    self.types[ty.index()].interfaces.push(interface);
  }

  pub fn resolve_type(&self, name: &str) -> Option<SyntheticTypeId> {
    self.types_by_name.get(name).copied()
  }

  pub fn resolve_by_name(&self, name: &str) -> Option<TypeBinding> {
    self.resolve_type(name).map(TypeBinding::Synthetic)
  }

  /// Synthetic methods registered on `ty`, in creation order.
  pub fn members(&self, ty: SyntheticTypeId) -> &[MethodBinding] {
    &self.types[ty.index()].members
  }

  pub fn resolve_methods(&self, name: &str) -> &[SyntheticMethodId] {
    self.methods_by_name.get(name).map_or(&[], |m| m.as_slice())
  }

  pub fn type_data(&self, id: SyntheticTypeId) -> &SyntheticTypeData {
    &self.types[id.index()]
  }

  pub fn method_data(&self, id: SyntheticMethodId) -> &SyntheticMethodData {
    &self.methods[id.index()]
  }

  pub fn variable(&self, id: GeneratedVarId) -> &GeneratedVariable {
    &self.variables[id.index()]
  }

  pub fn type_count(&self) -> usize {
    self.types.len()
  }

  pub fn method_count(&self) -> usize {
    self.methods.len()
  }
}
