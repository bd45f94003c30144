mod common;

use ast_java::ast::decl::CompilationUnit;
use ast_java::ast::decl::Member;
use ast_java::ast::decl::TypeDeclKind;
use ast_java::ast::expr::InfixOperator;
use ast_java::ast::modifiers::Modifiers;
use ast_java::ast::node::Node;
use ast_java::ast::type_expr::PrimitiveKind;
use ast_java::ast::type_expr::TypeExpr;
use ast_java::factory::AstFactory;
use common::Fixture;
use types_objc::binding::source::MethodData;
use types_objc::binding::source::TypeData;
use types_objc::binding::source::VariableData;
use types_objc::binding::ConstantValue;
use types_objc::synthetic::GeneratedVariable;
use types_objc::table::significant::significant_nodes;
use types_objc::Binding;
use types_objc::SourceModelBuilder;
use types_objc::TypeView;
use types_objc::TypeBinding;
use types_objc::Types;
use types_objc::TypesError;
use types_objc::TypesOptions;
use types_objc::VariableBinding;

/// A class `com.example.Main` with nothing in it.
fn empty_main(fx: &mut Fixture) -> (TypeBinding, Node<CompilationUnit>) {
  let main = fx.class("com.example", "Main");
  let decl = fx.class_decl(main, "Main", vec![]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  (main, unit)
}

#[test]
fn every_significant_node_is_bound_after_initialization() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let int = fx.primitive(PrimitiveKind::Int);
  let main = fx.class("com.example", "Main");
  let run = fx.declare_method(main, "run", vec![int], void);
  let count = fx.declare_parameter(run, "count", int);
  let total = fx.declare_local(run, "total", int);
  let hash_code = fx.find_method(fx.jl.object, "hashCode");

  let param = fx.param(int, "count", count, false);
  let receiver = fx.this(main);
  let call = fx.call(Some(receiver), hash_code, "hashCode", vec![]);
  let count_ref = fx.var_ref("count", count);
  let sum = fx.infix(InfixOperator::Add, call, count_ref, int);
  let local = fx.local(int, "total", total, Some(sum));
  let labeled = fx.labeled("outer", local);
  let run_decl = fx.method_decl(run, "run", void, vec![param], vec![labeled]);
  let decl = fx.class_decl(main, "Main", vec![Member::from(run_decl)]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let types = Types::initialize(&unit, &model).unwrap();

  let significant = significant_nodes(&unit);
  assert!(!significant.is_empty());
  for node in &significant {
    assert!(types.table().contains(node.id), "{:?} node {} is unbound", node.kind, node.id);
  }
  types.cleanup();
}

#[test]
fn missing_bootstrap_type_fails_initialization() {
  let model = SourceModelBuilder::new().finish();
  let unit = AstFactory::new().compilation_unit("Empty.java", None, vec![]);
  match Types::initialize(&unit, &model) {
    Err(TypesError::MissingWellKnownType(name)) => assert_eq!(name, "java.lang.Object"),
    Err(other) => panic!("expected a missing well-known type, got {other}"),
    Ok(_) => panic!("expected a missing well-known type"),
  }
}

#[test]
fn lookups_report_unbound_and_mismatched_nodes() {
  let mut fx = Fixture::new();
  let main = fx.class("com.example", "Main");
  let decl = fx.class_decl(main, "Main", vec![]);
  let decl_id = decl.id;
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let mut types = Types::initialize(&unit, &model).unwrap();

  assert_eq!(types.get_type_binding(decl_id).unwrap(), main);
  match types.get_method_binding(decl_id) {
    Err(TypesError::UnexpectedBinding { node, expected, found }) => {
      assert_eq!(node, decl_id);
      assert_eq!(expected, "method");
      assert_eq!(found, Binding::Type(main));
    }
    other => panic!("expected an unexpected binding, got {other:?}"),
  }
  assert!(matches!(
    types.get_variable_binding(decl_id),
    Err(TypesError::UnexpectedBinding { expected: "variable", .. })
  ));

  let fresh = types.factory().lit_null().id();
  assert!(matches!(types.get_binding(fresh), Err(TypesError::UnboundNode(n)) if n == fresh));
  types.add_binding(fresh, TypeBinding::Null);
  assert_eq!(types.get_type_binding(fresh).unwrap(), TypeBinding::Null);
}

#[test]
fn type_of_a_node_follows_what_it_denotes() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let int = fx.primitive(PrimitiveKind::Int);
  let main = fx.class("com.example", "Main");
  let point = fx.class("com.example", "Point");
  let point_ctor = fx.declare_constructor(point, "Point", vec![]);
  let run = fx.declare_method(main, "run", vec![], void);
  let size = fx.declare_method(main, "size", vec![], int);
  let label = fx.declare_local(run, "label", fx.jl.string);

  let call = fx.call(None, size, "size", vec![]);
  let call_id = call.id();
  let created = fx.new_instance(point, point_ctor, vec![]);
  let created_id = created.id();
  let label_ref = fx.var_ref("label", label);
  let label_id = label_ref.id();
  let body = vec![fx.expr_stmt(call), fx.expr_stmt(created), fx.expr_stmt(label_ref)];
  let run_decl = fx.method_decl(run, "run", void, vec![], body);
  let decl = fx.class_decl(main, "Main", vec![Member::from(run_decl)]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let types = Types::initialize(&unit, &model).unwrap();

  assert_eq!(types.get_type_binding(call_id).unwrap(), int);
  assert_eq!(types.get_type_binding(created_id).unwrap(), point);
  assert_eq!(types.get_type_binding(label_id).unwrap(), fx.jl.string);
  assert_eq!(types.get_method_binding(call_id).unwrap(), size);
  assert_eq!(types.get_variable_binding(label_id).unwrap(), label);
}

#[test]
fn source_types_map_to_their_runtime_classes() {
  let mut fx = Fixture::new();
  let int = fx.primitive(PrimitiveKind::Int);
  let ints = fx.model.array_of(int);
  let strings = fx.model.array_of(fx.jl.string);
  let class_of_string = fx.model.parameterized(fx.jl.class, vec![fx.jl.string]);
  let (main, unit) = empty_main(&mut fx);
  let model = fx.model.finish();
  let types = Types::initialize(&unit, &model).unwrap();
  let jl = fx.jl;

  assert_eq!(types.map_type(jl.object), types.ns_object());
  assert_eq!(types.map_type(jl.string), types.ns_string());
  assert_eq!(types.map_type(jl.number), types.ns_number());
  assert_eq!(types.map_type(jl.cloneable), types.runtime_types().ns_copying);
  assert_eq!(types.map_type(jl.class), types.ios_class());
  assert_eq!(types.map_type(class_of_string), types.ios_class());
  assert_eq!(types.map_type(ints), types.resolve_ios_type("IOSIntArray").unwrap());
  assert_eq!(types.map_type(strings), types.object_array());
  assert_eq!(types.map_type(main), main);
  assert_eq!(types.map_type(int), int);
  assert_eq!(types.map_type(TypeBinding::Null), TypeBinding::Null);
  assert_eq!(types.map_type(types.ns_string()), types.ns_string());

  assert_eq!(types.map_type_name("java.lang.String"), Some(types.ns_string()));
  assert_eq!(types.map_type_name("com.example.Main"), Some(main));
  assert_eq!(types.map_type_name("com.example.Missing"), None);
  assert!(types.has_ios_equivalent(jl.object));
  assert!(types.has_ios_equivalent(ints));
  assert!(!types.has_ios_equivalent(main));
}

#[test]
fn runtime_spellings_of_names_and_arrays() {
  let mut fx = Fixture::new();
  let int = fx.primitive(PrimitiveKind::Int);
  let long = fx.primitive(PrimitiveKind::Long);
  let boolean = fx.primitive(PrimitiveKind::Boolean);
  let void = fx.void();
  let (_, unit) = empty_main(&mut fx);
  let model = fx.model.finish();
  let types = Types::initialize(&unit, &model).unwrap();

  assert_eq!(types.wrapper_type(int), Some(fx.jl.integer));
  assert_eq!(types.primitive_type(fx.jl.long), Some(long));
  assert_eq!(types.primitive_type(fx.jl.string), None);
  assert_eq!(types.primitive_type_name(long), Some("long long"));
  assert_eq!(types.primitive_type_name(boolean), Some("BOOL"));
  assert_eq!(types.primitive_type_name(void), None);
  assert_eq!(types.primitive_type_name(fx.jl.string), None);

  assert!(types.is_ios_type("JavaLangObject"));
  assert!(types.is_ios_type("NSString"));
  assert!(!types.is_ios_type("ComExampleMain"));
  assert_eq!(types.map_simple_type_name("JavaLangCloneable"), "NSCopying");
  assert_eq!(types.map_simple_type_name("ComExampleMain"), "ComExampleMain");

  let int_array = types.resolve_ios_type("IOSIntArray").unwrap();
  assert_eq!(types.resolve_array_type(int), int_array);
  assert_eq!(types.resolve_array_type(fx.jl.string), types.object_array());
  assert_eq!(
    types.resolve_array_type_name("double"),
    types.resolve_ios_type("IOSDoubleArray")
  );
  assert_eq!(types.resolve_array_type_name("String"), None);
  assert_eq!(types.ios_array_component_type(int_array), int);
  assert_eq!(types.ios_array_component_type(types.object_array()), types.ns_object());
}

#[test]
fn synthesized_nodes_are_bound() {
  let mut fx = Fixture::new();
  let int = fx.primitive(PrimitiveKind::Int);
  let ints = fx.model.array_of(int);
  let (main, unit) = empty_main(&mut fx);
  let model = fx.model.finish();
  let mut types = Types::initialize(&unit, &model).unwrap();

  let ty = types.make_type(ints);
  let TypeExpr::Array(array) = &ty else {
    panic!("expected an array type, got {ty:?}");
  };
  assert_eq!(types.table().get(array.id), Some(Binding::Type(ints)));
  assert!(matches!(array.stx.component, TypeExpr::Primitive(_)));
  assert_eq!(types.table().get(array.stx.component.id()), Some(Binding::Type(int)));

  let ios = types.make_ios_type(fx.jl.string).unwrap();
  let TypeExpr::Simple(simple) = &ios else {
    panic!("expected a simple type, got {ios:?}");
  };
  assert_eq!(simple.stx.name, "NSString");
  assert_eq!(types.table().get(simple.id), Some(Binding::Type(types.ns_string())));
  assert!(types.make_ios_type(main).is_none());

  let null = types.new_null_literal();
  assert_eq!(types.table().get(null.id()), Some(Binding::Type(TypeBinding::Null)));
  let yes = types.new_boolean_literal(true);
  assert_eq!(types.table().get(yes.id()), Some(Binding::Type(types.java_types().boolean)));
  // Factory ids never collide with the unit's.
  assert!(ast_java::copy::node_ids(&unit).iter().all(|id| *id != yes.id()));
}

#[test]
fn builtin_methods_map_onto_runtime_selectors() {
  let mut fx = Fixture::new();
  let equals = fx.find_method(fx.jl.object, "equals");
  let format = fx.find_method(fx.jl.string, "format");
  let clone = fx.find_method(fx.jl.object, "clone");
  let (_, unit) = empty_main(&mut fx);
  let model = fx.model.finish();
  let mut types = Types::initialize(&unit, &model).unwrap();

  let mapped = types.get_mapped_method(equals).unwrap();
  assert!(mapped.is_synthetic());
  assert_eq!(types.universe().method_name(mapped), "isEqual");
  assert_eq!(types.universe().method_declaring_class(mapped), types.ns_object());
  assert_eq!(types.universe().delegate(mapped), Some(equals));
  let descriptor = types.get_method_descriptor(equals).unwrap();
  assert_eq!(descriptor.selector(), "isEqual:");
  assert_eq!(descriptor.owner, "NSObject");
  assert!(types.is_mapped_method(equals));
  assert!(types.is_mapped_method(mapped));

  assert!(types.get_method_descriptor(format).unwrap().is_varargs());
  assert!(!types.is_mapped_method(clone));

  assert!(matches!(
    types.add_mapped_ios_method(clone, "NSObject"),
    Err(TypesError::MalformedDescriptor { .. })
  ));
  match types.add_mapped_ios_method(clone, "NSCloner copy") {
    Err(TypesError::UnknownRuntimeType { owner, .. }) => assert_eq!(owner, "NSCloner"),
    other => panic!("expected an unknown runtime type, got {other:?}"),
  }
  let copy = types.add_mapped_ios_method(clone, "NSObject copy").unwrap();
  assert_eq!(types.get_mapped_method(clone), Some(copy));
}

#[test]
fn global_renames_are_idempotent_and_shared_by_registries() {
  let mut fx = Fixture::new();
  let integer_long_value = fx.find_method(fx.jl.integer, "longValue");
  let number_long_value = fx.find_method(fx.jl.number, "longValue");
  let (_, unit) = empty_main(&mut fx);
  let model = fx.model.finish();
  let mut first = Types::initialize(&unit, &model).unwrap();
  let second = Types::initialize(&unit, &model).unwrap();

  assert_eq!(first.method_name(integer_long_value), "longLongValue");
  assert_eq!(first.method_name(number_long_value), "longValue");
  let renames = first.method_renames();
  assert_eq!(renames.len(), 6);

  first.apply_global_renamings();
  first.apply_global_renamings();
  assert_eq!(first.method_renames(), renames);
  assert_eq!(second.method_renames(), renames);

  first.rename_method(number_long_value, "numberLongValue");
  assert_eq!(first.method_name(number_long_value), "numberLongValue");
  assert_eq!(second.method_name(number_long_value), "longValue");
}

#[test]
fn invocations_resolve_through_their_mapping() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let int = fx.primitive(PrimitiveKind::Int);
  let main = fx.class("com.example", "Main");
  let run = fx.declare_method(main, "run", vec![], void);
  let size = fx.declare_method(main, "size", vec![], int);
  let count = fx.declare_method(main, "count", vec![], int);

  let call = fx.call(None, size, "size", vec![]);
  let call_id = call.id();
  let stmt = fx.expr_stmt(call);
  let run_decl = fx.method_decl(run, "run", void, vec![], vec![stmt]);
  let decl = fx.class_decl(main, "Main", vec![Member::from(run_decl)]);
  let decl_id = decl.id;
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let mut types = Types::initialize(&unit, &model).unwrap();

  assert_eq!(types.resolve_invocation_binding(call_id), Some(size));
  assert_eq!(types.resolve_invocation_binding(decl_id), None);
  types.add_mapped_invocation(call_id, count);
  assert_eq!(types.resolve_invocation_binding(call_id), Some(count));
  assert_eq!(types.get_method_binding(call_id).unwrap(), count);
}

#[test]
fn variable_tables_answer_for_every_instantiation() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let string = fx.jl.string;
  let main = fx.class("com.example", "Main");
  let run = fx.declare_method(main, "run", vec![], void);
  let value = fx.declare_field(main, "value", fx.jl.object, Modifiers::PRIVATE);
  // `value` as seen through an instantiation of a generic `Main`.
  let instantiated = fx.model.add_variable(VariableData::field("value", string, main));
  fx.model.variable_mut(instantiated).unwrap().declaration = Some(value);
  let other = fx.declare_field(main, "other", string, Modifiers::PRIVATE);

  let value_ref = fx.var_ref("value", value);
  let value_ref_id = value_ref.id();
  let stmt = fx.expr_stmt(value_ref);
  let run_decl = fx.method_decl(run, "run", void, vec![], vec![stmt]);
  let decl = fx.class_decl(main, "Main", vec![Member::from(run_decl)]);
  let decl_id = decl.id;
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let mut types = Types::initialize(&unit, &model).unwrap();

  types.add_variable_cast(instantiated, string);
  assert!(types.variable_has_cast(value));
  assert_eq!(types.get_cast_for_variable(value), Some(string));
  assert_eq!(types.get_cast_for_variable(other), None);

  types.add_releaseable_fields([instantiated]);
  assert!(types.is_releaseable_field(value));
  assert!(!types.is_releaseable_field(other));

  types.add_mapped_variable(value_ref_id, other).unwrap();
  assert_eq!(types.get_mapped_variable(value), other);
  assert!(types.is_mapped_variable(value));
  assert_eq!(types.get_mapped_variable(other), other);
  assert!(matches!(
    types.add_mapped_variable(decl_id, other),
    Err(TypesError::UnexpectedBinding { expected: "variable", .. })
  ));
}

#[test]
fn functions_are_recognized_through_their_declaration() {
  let mut fx = Fixture::new();
  let int = fx.primitive(PrimitiveKind::Int);
  let main = fx.class("com.example", "Main");
  let identity = fx.declare_method(main, "identity", vec![fx.jl.object], fx.jl.object);
  let instantiated = fx.model.add_method(MethodData::new("identity", main, vec![fx.jl.string], fx.jl.string));
  fx.model.method_mut(instantiated).unwrap().declaration = Some(identity);
  let other = fx.declare_method(main, "other", vec![], int);
  let decl = fx.class_decl(main, "Main", vec![]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let mut types = Types::initialize(&unit, &model).unwrap();

  types.add_function(identity);
  assert!(types.is_function(identity));
  assert!(types.is_function(instantiated));
  assert!(!types.is_function(other));
}

#[test]
fn renamed_types_are_looked_up_by_original() {
  let mut fx = Fixture::new();
  let widget = fx.class("com.example.ui", "Widget");
  let (main, unit) = empty_main(&mut fx);
  let model = fx.model.finish();
  let mut types = Types::initialize(&unit, &model).unwrap();

  let renamed = types.rename_type_binding("MainWidget", Some(main), widget);
  assert!(renamed.is_synthetic());
  assert_eq!(types.get_renamed_binding(widget), renamed);
  assert_eq!(types.get_renamed_binding(main), main);
  assert_eq!(types.universe().type_name(renamed), "MainWidget");
  assert_eq!(types.universe().renamed_from(renamed), Some(widget));
}

#[test]
fn signatures_use_jvm_descriptors() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let int = fx.primitive(PrimitiveKind::Int);
  let ints = fx.model.array_of(int);
  let main = fx.class("com.example", "Main");
  let put = fx.declare_method(main, "put", vec![int, fx.jl.string], void);
  let fill = fx.declare_method(main, "fill", vec![ints], ints);
  let count = fx.declare_field(main, "count", int, Modifiers::PRIVATE);
  let decl = fx.class_decl(main, "Main", vec![]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let types = Types::initialize(&unit, &model).unwrap();

  assert_eq!(types.get_signature(Binding::Method(put)), "(ILjava/lang/String;)V");
  assert_eq!(types.get_signature(Binding::Method(fill)), "([I)[I");
  assert_eq!(types.get_signature(Binding::Type(fx.jl.string)), "java.lang.String");
  assert_eq!(types.get_signature(Binding::Type(ints)), "[I");
  assert_eq!(types.get_signature(Binding::Variable(count)), "count");
}

#[test]
fn classification_predicates() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let int = fx.primitive(PrimitiveKind::Int);
  let double = fx.primitive(PrimitiveKind::Double);
  let boolean = fx.primitive(PrimitiveKind::Boolean);
  let double_wrapper = fx.model.well_known("java.lang.Double").unwrap();
  let main = fx.class("com.example", "Main");
  let constant = PublicStaticFinal::field(&mut fx, main, "LIMIT", int);
  fx.model.variable_mut(constant).unwrap().constant = Some(ConstantValue::Int(42));
  let string = fx.jl.string;
  let greeting = PublicStaticFinal::field(&mut fx, main, "GREETING", string);
  fx.model.variable_mut(greeting).unwrap().constant = Some(ConstantValue::Str("hi".to_string()));
  let counter = fx.declare_field(main, "counter", int, Modifiers::STATIC);
  let decl = fx.class_decl(main, "Main", vec![]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let types = Types::initialize(&unit, &model).unwrap();
  let jl = fx.jl;

  assert!(types.is_java_object_type(jl.object));
  assert!(!types.is_java_object_type(main));
  assert!(types.is_java_string_type(jl.string));
  assert!(types.is_java_number_type(jl.integer));
  assert!(types.is_java_number_type(jl.number));
  assert!(!types.is_java_number_type(jl.string));
  assert!(!types.is_java_number_type(int));
  assert!(types.is_floating_point_type(double));
  assert!(types.is_floating_point_type(double_wrapper));
  assert!(!types.is_floating_point_type(int));
  assert!(types.is_boolean_type(boolean));
  assert!(types.is_boolean_type(jl.boolean));
  assert!(types.is_void_type(void));
  assert!(!types.is_void_type(jl.void));
  assert!(types.is_java_void_type(jl.void));

  assert_eq!(types.universe().constant_value(constant), Some(&ConstantValue::Int(42)));
  assert!(types.is_constant_variable(constant));
  assert!(types.is_primitive_constant(constant));
  assert!(types.is_constant_variable(greeting));
  assert!(!types.is_primitive_constant(greeting));
  assert!(types.is_static_variable(counter));
  assert!(!types.is_constant_variable(counter));
}

struct PublicStaticFinal;

impl PublicStaticFinal {
  fn field(fx: &mut Fixture, owner: TypeBinding, name: &str, ty: TypeBinding) -> VariableBinding {
    fx.declare_field(owner, name, ty, Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL)
  }
}

#[test]
fn junit_tests_are_concrete_non_framework_implementors() {
  let mut fx = Fixture::new();
  let test = fx.interface("junit.framework", "Test");
  let test_case = fx.class("junit.framework", "TestCase");
  fx.model.add_interface(test_case, test);
  let my_test = fx.class("com.example", "MyTest");
  fx.model.set_superclass(my_test, test_case);
  let abstract_test = fx.model.declare_type(
    TypeData::class("com.example", "AbstractTest")
      .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
      .with_superclass(test_case),
  );
  let suite = fx.interface("com.example", "Suite");
  fx.model.add_interface(suite, test);
  let (main, unit) = empty_main(&mut fx);
  let model = fx.model.finish();
  let types = Types::initialize(&unit, &model).unwrap();

  assert!(types.is_junit_test(my_test));
  assert!(!types.is_junit_test(abstract_test));
  assert!(!types.is_junit_test(test_case));
  assert!(!types.is_junit_test(suite));
  assert!(!types.is_junit_test(main));
  assert!(!types.is_junit_test(TypeBinding::Null));
}

#[test]
fn annotations_mark_weak_references_and_pools() {
  let mut fx = Fixture::new();
  let int = fx.primitive(PrimitiveKind::Int);
  let void = fx.void();
  let weak = fx.model.declare_type(TypeData::annotation("com.google.j2objc.annotations", "Weak"));
  let weak_outer = fx.model.declare_type(TypeData::annotation("com.google.j2objc.annotations", "WeakOuter"));
  let pool = fx.model.declare_type(TypeData::annotation("com.google.j2objc.annotations", "AutoreleasePool"));
  let main = fx.class("com.example", "Main");
  let outer = fx.class("com.example", "Outer");
  fx.model.annotate(Binding::Type(outer), weak_outer);

  let delegate = fx.declare_field(main, "delegate", fx.jl.object, Modifiers::PRIVATE);
  fx.model.annotate(Binding::Variable(delegate), weak);
  let parent = fx.declare_field(main, "parent", outer, Modifiers::PRIVATE);
  let strong = fx.declare_field(main, "strong", fx.jl.object, Modifiers::PRIVATE);
  let drain = fx.declare_method(main, "drain", vec![], void);
  fx.model.annotate(Binding::Method(drain), pool);
  let compute = fx.declare_method(main, "compute", vec![], int);
  fx.model.annotate(Binding::Method(compute), pool);
  let plain = fx.declare_method(main, "plain", vec![], void);

  let decl = fx.class_decl(main, "Main", vec![]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let types = Types::initialize(&unit, &model).unwrap();

  assert!(types.has_weak_annotation(Binding::Variable(delegate)));
  assert!(types.is_weak_reference(delegate));
  assert!(types.is_weak_reference(parent));
  assert!(!types.is_weak_reference(strong));
  assert!(types.has_annotation(Binding::Type(outer), "com.google.j2objc.annotations.WeakOuter"));

  assert!(types.has_autorelease_pool_annotation(Binding::Method(drain)));
  assert!(!types.has_autorelease_pool_annotation(Binding::Method(compute)));
  assert!(!types.has_autorelease_pool_annotation(Binding::Method(plain)));
}

#[test]
fn recorded_hierarchy_replaces_the_frontends() {
  let mut fx = Fixture::new();
  let base = fx.class("com.example", "Base");
  let shape = fx.interface("com.example", "Shape");
  let main = fx.class("com.example", "Main");
  let helper = fx.class("com.example", "Helper");
  fx.model.set_superclass(helper, base);

  let main_decl = fx.type_decl(TypeDeclKind::Class, main, "Main", Some(base), vec![shape], vec![]);
  // `Helper` is written without `extends`.
  let helper_decl = fx.class_decl(helper, "Helper", vec![]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![main_decl, helper_decl]);
  let model = fx.model.finish();
  let mut types = Types::initialize(&unit, &model).unwrap();

  assert!(types.hierarchy_override(main).is_none());
  assert_eq!(types.superclass(main), Some(fx.jl.object));

  assert_eq!(types.record_hierarchy_override(&unit.stx.types[0]).unwrap(), main);
  assert_eq!(types.superclass(main), Some(base));
  assert_eq!(types.interfaces(main), &[shape]);
  assert_eq!(types.universe().superclass_of(main), Some(fx.jl.object));
  assert!(types.universe().interfaces_of(main).is_empty());

  let view = types.view(main);
  assert_eq!(view.superclass(), Some(base));
  assert_eq!(view.interfaces(), &[shape]);
  assert_eq!(view.qualified_name(), "com.example.Main");
  assert!(!view.is_null_type());
  drop(view);

  types.record_hierarchy_override(&unit.stx.types[1]).unwrap();
  assert_eq!(types.superclass(helper), Some(fx.jl.object));

  assert!(types.view(TypeBinding::Null).is_null_type());
  assert!(types.null_type().is_null_type());
}

#[test]
fn type_declarations_are_found_by_generic_declaration() {
  let mut fx = Fixture::new();
  let main = fx.class("com.example", "Main");
  let helper = fx.class("com.example", "Helper");
  let other = fx.class("com.example", "Other");
  let helper_of_string = fx.model.parameterized(helper, vec![fx.jl.string]);
  let main_decl = fx.class_decl(main, "Main", vec![]);
  let helper_decl = fx.class_decl(helper, "Helper", vec![]);
  let helper_id = helper_decl.id;
  let unit = fx.unit("com/example/Main.java", "com.example", vec![main_decl, helper_decl]);
  let model = fx.model.finish();
  let types = Types::initialize(&unit, &model).unwrap();

  let decls = &unit.stx.types;
  assert_eq!(types.get_type_declaration(helper, decls).map(|d| d.id), Some(helper_id));
  assert_eq!(types.get_type_declaration(helper_of_string, decls).map(|d| d.id), Some(helper_id));
  assert!(types.get_type_declaration(other, decls).is_none());
}

#[test]
fn equal_generated_variables_share_a_binding() {
  let mut fx = Fixture::new();
  let int = fx.primitive(PrimitiveKind::Int);
  let (main, unit) = empty_main(&mut fx);
  let model = fx.model.finish();
  let mut types = Types::initialize(&unit, &model).unwrap();

  let temp = GeneratedVariable {
    name: "temp".to_string(),
    modifiers: Modifiers::empty(),
    ty: int,
    parameter: false,
    declaring_class: Some(main),
    declaring_method: Some("run".to_string()),
  };
  let first = types.new_generated_variable(temp.clone());
  let again = types.new_generated_variable(temp.clone());
  let other = types.new_generated_variable(GeneratedVariable {
    name: "temp2".to_string(),
    ..temp
  });
  assert_eq!(first, again);
  assert_ne!(first, other);
  assert_eq!(types.universe().variable_name(first), "temp");
  assert_eq!(types.universe().variable_type(other), int);
}

#[test]
fn options_can_turn_verification_off() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let int = fx.primitive(PrimitiveKind::Int);
  let main = fx.class("com.example", "Main");
  let run = fx.declare_method(main, "run", vec![], void);
  let max = fx.declare_method(main, "max", vec![int, int], int);

  let one = fx.int_lit("1");
  let call = fx.call(None, max, "max", vec![one]);
  let stmt = fx.expr_stmt(call);
  let run_decl = fx.method_decl(run, "run", void, vec![], vec![stmt]);
  let decl = fx.class_decl(main, "Main", vec![Member::from(run_decl)]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();

  assert!(matches!(
    Types::initialize(&unit, &model),
    Err(TypesError::Verification(_))
  ));
  let options: TypesOptions = serde_json::from_value(serde_json::json!({ "verify_bindings": false })).unwrap();
  let types = Types::initialize_with_options(&unit, &model, options).unwrap();
  assert!(!types.options().verify_bindings);
  assert_eq!(types.options().junit_test_marker, "junit.framework.Test");
  types.cleanup();
}

#[test]
fn autorelease_pools_are_recorded_per_block() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let main = fx.class("com.example", "Main");
  let run = fx.declare_method(main, "run", vec![], void);
  let run_decl = fx.method_decl(run, "run", void, vec![], vec![]);
  let body_id = run_decl.stx.body.as_ref().unwrap().id;
  let decl = fx.class_decl(main, "Main", vec![Member::from(run_decl)]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let mut types = Types::initialize(&unit, &model).unwrap();

  assert!(!types.has_autorelease_pool(body_id));
  types.add_autorelease_pool(body_id);
  assert!(types.has_autorelease_pool(body_id));
}
