use typeify_core::{
    DeclarationTable, Kind, Level, Script, TypeifyErrorExt, ast::DeclarationKind, collect_declarations,
    generate_ast_from_source,
};

fn collect(src: &str) -> DeclarationTable {
    let script = Script::from_source("c.js", src);
    let ast = generate_ast_from_source(&script).expect("failed to parse sample");
    collect_declarations(&ast, &script)
}

#[test]
fn duplicate_variables_keep_the_first_declaration() {
    let table = collect("var a = 1;\nlet b;\nvar a = \"later\";\n");
    let names: Vec<&str> = table.variables().iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);

    let a = table.lookup_variable("a").unwrap();
    assert_eq!(a.kind, DeclarationKind::Var);
    assert_eq!(a.ty, Kind::Number);
    assert_eq!(a.value.as_deref(), Some("1"));

    let b = table.lookup_variable("b").unwrap();
    assert_eq!(b.ty, Kind::Any);
    assert_eq!(b.value, None);
}

#[test]
fn literal_values_are_copied_verbatim() {
    let table = collect("const neg = -1.5;\nlet s = 'it\\'s';\nlet t = `x`;\nlet o = { a: 1, 'b-c': [true] };\n");
    let value = |name: &str| table.lookup_variable(name).and_then(|v| v.value.clone());
    assert_eq!(value("neg").as_deref(), Some("-1.5"));
    assert_eq!(value("s").as_deref(), Some("'it\\'s'"));
    assert_eq!(value("t").as_deref(), Some("`x`"));
    assert_eq!(value("o").as_deref(), Some("{ a: 1, 'b-c': [true] }"));
    assert_eq!(
        table.lookup_variable("o").unwrap().ty.to_string(),
        "{ a: number; \"b-c\": boolean[] }"
    );
}

#[test]
fn return_nested_in_a_branch_gives_void() {
    let table = collect("function g(a) { if (a) { return 1; } }\nfunction h() { log(); return 'x'; return 1; }\n");
    let functions = table.functions();
    assert_eq!(functions.len(), 2);
    assert_eq!(functions[0].return_type, Kind::Void);
    assert_eq!(functions[1].return_type, Kind::String);
}

#[test]
fn functions_are_recorded_per_occurrence_in_traversal_order() {
    let src = "function f() { function inner(x) { return x * 2; } }\nfunction f() { return null; }\n";
    let table = collect(src);
    let names: Vec<&str> = table.functions().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["f", "inner", "f"]);
    assert_eq!(table.functions()[1].return_type, Kind::Number);
    assert_eq!(table.functions()[2].return_type, Kind::Null);
}

#[test]
fn nested_scopes_are_walked() {
    let table = collect("function f() { let inner = true; }\nif (x) { var flag = 'y'; }\nfor (let i = 0; i < 3; i++) {}\n");
    let names: Vec<&str> = table.variables().iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["inner", "flag", "i"]);
}

#[test]
fn parameters_are_any_with_rest_and_patterns() {
    let src = "function p(a, b = 2, { c, d }, ...rest) { return a; }";
    let table = collect(src);
    let params: Vec<String> = table.functions()[0].parameters.iter().map(|p| p.to_string()).collect();
    assert_eq!(params, vec!["a: any", "b: any", "{ c, d }: any", "...rest: any[]"]);
}

#[test]
fn content_range_spans_the_body_statements() {
    let src = "function add(a, b) {\n  const s = a + b;\n  return s;\n}\n";
    let script = Script::from_source("r.js", src);
    let ast = generate_ast_from_source(&script).unwrap();
    let table = collect_declarations(&ast, &script);
    let function = &table.functions()[0];
    assert_eq!(function.body_text(src), Some("const s = a + b;\n  return s;"));
}

#[test]
fn empty_body_is_void_without_a_range() {
    let table = collect("function noop() {}\n");
    let noop = &table.functions()[0];
    assert_eq!(noop.return_type, Kind::Void);
    assert_eq!(noop.content_range, None);
    assert_eq!(table.diagnostics().len(), 1);
    assert_eq!(table.diagnostics()[0].level(), Level::Info);
}

#[test]
fn anonymous_default_export_gets_a_placeholder_name() {
    let table = collect("export default function () { return 1; }\n");
    assert_eq!(table.functions()[0].name, "anonymous");
}

#[test]
fn structural_surprises_become_warnings() {
    let src = "const { a, b } = obj;\nlet mixed = [1, 'two'];\nconst now = Date.now();\n";
    let table = collect(src);

    let names: Vec<&str> = table.variables().iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["mixed", "now"]);
    assert_eq!(table.lookup_variable("mixed").unwrap().ty.to_string(), "number[]");
    assert_eq!(table.lookup_variable("now").unwrap().value, None);

    let warnings: Vec<String> = table
        .diagnostics()
        .iter()
        .filter(|d| d.level() == Level::Warning)
        .map(|d| d.message())
        .collect();
    assert_eq!(warnings.len(), 3, "{:?}", warnings);
    assert!(warnings[0].contains("destructured"));
    assert!(warnings[1].contains("mixed"));
    assert!(warnings[2].contains("now"));
    assert_eq!(table.diagnostics()[0].location().unwrap().line, 1);
}

#[test]
fn constant_loop_bindings_warn_about_the_missing_value() {
    let table = collect("const ks = [1];\nfor (const k of ks) {}\n");
    let k = table.lookup_variable("k").unwrap();
    assert_eq!(k.kind, DeclarationKind::Const);
    assert_eq!(k.value, None);

    let warnings: Vec<_> = table
        .diagnostics()
        .iter()
        .filter(|d| d.level() == Level::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message().contains("'k' has no initializer"));
    assert_eq!(warnings[0].location().unwrap().line, 2);
}

#[test]
fn accessor_pairs_type_as_a_single_key() {
    let table = collect("const o = { get y() { return 1; }, set y(v) {}, z: 2 };\n");
    assert_eq!(table.lookup_variable("o").unwrap().ty.to_string(), "{ y: any; z: number }");
}

#[test]
fn trailing_comments_stay_out_of_values() {
    let table = collect("let a = 1 // one\nlet b = [2, 3] /* pair */\nexport default 4\n");
    assert_eq!(table.lookup_variable("a").unwrap().value.as_deref(), Some("1"));
    assert_eq!(table.lookup_variable("b").unwrap().value.as_deref(), Some("[2, 3]"));
}
