mod common;

use ast_java::ast::decl::Member;
use ast_java::ast::decl::TypeDeclKind;
use ast_java::ast::type_expr::PrimitiveKind;
use common::Fixture;
use types_objc::binding::source::MethodData;
use types_objc::table;
use types_objc::table::VerifyIssue;
use types_objc::Import;
use types_objc::ImportCollector;
use types_objc::Types;
use types_objc::TypesError;

#[test]
fn interface_declaration_is_the_original_of_an_implementation() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let runnable = fx.interface("java.lang", "Runnable");
  let runnable_run = fx.declare_method(runnable, "run", vec![], void);
  let task = fx.class("com.example", "Task");
  fx.model.add_interface(task, runnable);
  let task_run = fx.declare_method(task, "run", vec![], void);

  let run_decl = fx.method_decl(task_run, "run", void, vec![], vec![]);
  let decl = fx.type_decl(
    TypeDeclKind::Class,
    task,
    "Task",
    None,
    vec![runnable],
    vec![Member::from(run_decl)],
  );
  let unit = fx.unit("com/example/Task.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let mut types = Types::initialize(&unit, &model).unwrap();

  assert_eq!(types.get_original_method_binding(task_run), runnable_run);

  // A runtime stand-in for `run` now sits on the runtime root, which a
  // pruning pass made the superclass of `Task`.
  let mapped = types.add_mapped_ios_method(task_run, "NSObject run").unwrap();
  let ns_object = types.ns_object();
  types.set_hierarchy_override(task, Some(ns_object), vec![runnable]);
  assert!(types.universe().declared_methods(ns_object).contains(&mapped));

  let original = types.get_original_method_binding(task_run);
  assert_eq!(original, runnable_run);
  assert_ne!(original, mapped);
  assert_eq!(types.get_original_method_binding(runnable_run), runnable_run);
}

#[test]
fn farthest_superclass_declaration_wins() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let runnable = fx.interface("java.lang", "Runnable");
  fx.declare_method(runnable, "run", vec![], void);
  let base = fx.class("com.example", "Base");
  fx.model.add_interface(base, runnable);
  let base_run = fx.declare_method(base, "run", vec![], void);
  let middle = fx.class("com.example", "Middle");
  fx.model.set_superclass(middle, base);
  let middle_run = fx.declare_method(middle, "run", vec![], void);
  let leaf = fx.class("com.example", "Leaf");
  fx.model.set_superclass(leaf, middle);
  let leaf_run = fx.declare_method(leaf, "run", vec![], void);

  let decl = fx.class_decl(leaf, "Leaf", vec![]);
  let unit = fx.unit("com/example/Leaf.java", "com.example", vec![decl]);
  let model = fx.model.finish();
  let types = Types::initialize(&unit, &model).unwrap();

  assert_eq!(types.get_original_method_binding(leaf_run), base_run);
  assert_eq!(types.get_original_method_binding(middle_run), base_run);
}

#[test]
fn varargs_call_passes_verification_and_needs_the_object_array() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let format = fx.find_method(fx.jl.string, "format");
  let main = fx.class("com.example", "Main");
  let run = fx.declare_method(main, "run", vec![], void);

  let arguments = vec![fx.str_lit("%s and %s"), fx.str_lit("a"), fx.str_lit("b")];
  let call = fx.call(None, format, "format", arguments);
  let stmt = fx.expr_stmt(call);
  let run_decl = fx.method_decl(run, "run", void, vec![], vec![stmt]);
  let decl = fx.class_decl(main, "Main", vec![Member::from(run_decl)]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();

  let types = Types::initialize(&unit, &model).unwrap();
  table::verify(&unit, types.table(), types.universe()).unwrap();

  let object_array = Import::new(&types, types.object_array());
  assert_eq!(object_array.type_name, "IOSObjectArray");
  assert_eq!(object_array.import_file_name, "IOSObjectArray");

  let implementation = ImportCollector::collect_implementation(&types, &unit);
  assert!(implementation.imports().contains(&object_array));
  // No array appears in any signature.
  let header = ImportCollector::collect_header(&types, &unit);
  assert!(!header.imports().contains(&object_array));
}

#[test]
fn fixed_arity_mismatch_fails_initialization() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let int = fx.primitive(PrimitiveKind::Int);
  let main = fx.class("com.example", "Main");
  let run = fx.declare_method(main, "run", vec![], void);
  let max = fx
    .model
    .add_method(MethodData::new("max", main, vec![int, int], int));

  let arguments = vec![fx.int_lit("1"), fx.int_lit("2"), fx.int_lit("3")];
  let call = fx.call(None, max, "max", arguments);
  let call_id = call.id();
  let stmt = fx.expr_stmt(call);
  let run_decl = fx.method_decl(run, "run", void, vec![], vec![stmt]);
  let decl = fx.class_decl(main, "Main", vec![Member::from(run_decl)]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();

  match Types::initialize(&unit, &model) {
    Err(TypesError::Verification(issues)) => assert_eq!(issues, vec![VerifyIssue::ArityMismatch {
      node: call_id,
      expected: 2,
      found: 3,
    }]),
    Err(other) => panic!("expected a verification failure, got {other}"),
    Ok(_) => panic!("expected a verification failure"),
  }
}

#[test]
fn unresolved_node_aborts_the_unit() {
  let mut fx = Fixture::new();
  let void = fx.void();
  let main = fx.class("com.example", "Main");
  let run = fx.declare_method(main, "run", vec![], void);
  // Built straight from the factory, so the frontend never resolved it.
  let orphan = fx.ast.lit_str("orphan");
  let orphan_id = orphan.id();
  let stmt = fx.expr_stmt(orphan);
  let run_decl = fx.method_decl(run, "run", void, vec![], vec![stmt]);
  let decl = fx.class_decl(main, "Main", vec![Member::from(run_decl)]);
  let unit = fx.unit("com/example/Main.java", "com.example", vec![decl]);
  let model = fx.model.finish();

  match Types::initialize(&unit, &model) {
    Err(TypesError::UnresolvedBinding { node, .. }) => assert_eq!(node, orphan_id),
    Err(other) => panic!("expected an unresolved binding, got {other}"),
    Ok(_) => panic!("expected an unresolved binding"),
  }
}
