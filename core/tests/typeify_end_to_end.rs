use std::fs;

use typeify_core::{
    FormatterConfig, FormatterError, Mode, Script, TypeifyErrorExt, TypeifyOptions, ast::MAX_NESTING_DEPTH, dump_ast,
    typeify, typeify_script,
};

fn typed(src: &str) -> String {
    let script = Script::from_source("input.js", src);
    let (text, _) = typeify_script(&script, None).expect("typeify failed");
    text
}

#[test]
fn constant_with_literal_value() {
    assert_eq!(
        typed("const x = 5;"),
        "// Generated by typeify from input.js\nconst x: number = 5;\n"
    );
}

#[test]
fn array_typed_from_first_element() {
    assert_eq!(
        typed("let arr = [1,2,3];"),
        "// Generated by typeify from input.js\nlet arr: number[] = [1,2,3];\n"
    );
}

#[test]
fn function_body_is_copied_byte_for_byte() {
    assert_eq!(
        typed("function add(a, b) { return a + b; }"),
        "// Generated by typeify from input.js\n\nfunction add(a: any, b: any): number {\nreturn a + b;\n}\n"
    );
}

#[test]
fn mixed_program_keeps_variables_before_functions() {
    let src = "\
let count = 0;
function inc() {
  count = count + 1;
}
const label = 'n';
function noop() {}
";
    let expected = "\
// Generated by typeify from input.js
let count: number = 0;
const label: string = 'n';

function inc(): void {
count = count + 1;
}

function noop(): void {}
";
    assert_eq!(typed(src), expected);
}

#[test]
fn nesting_past_the_limit_is_a_syntax_error() {
    let src = format!("{}let z = 1;{}", "f(function () { ".repeat(200), " });".repeat(200));
    let script = Script::from_source("deep.js", &src);
    let err = typeify_script(&script, None).unwrap_err();
    assert!(err.message().starts_with("Nesting too deep at deep.js:1:"), "{}", err.message());
    assert_eq!(err.location().unwrap().file, "deep.js");
    assert!(dump_ast(&script).is_err());
}

#[test]
fn nesting_below_the_limit_still_parses() {
    let depth = MAX_NESTING_DEPTH - 1;
    let parens = format!("let p = {}1{};", "(".repeat(depth), ")".repeat(depth));
    assert!(typed(&parens).contains("let p: number = 1;"));

    let arrays = format!("let a = {}1{};", "[".repeat(depth), "]".repeat(depth));
    let (text, table) = typeify_script(&Script::from_source("a.js", &arrays), None).unwrap();
    assert!(text.contains(&format!("let a: number{} = ", "[]".repeat(depth))));
    assert_eq!(table.variables().len(), 1);

    let callbacks = format!("{}let z = 1;{}", "f(function () { ".repeat(100), " });".repeat(100));
    assert!(typed(&callbacks).contains("let z: number = 1;"));
}

#[test]
fn empty_input_writes_only_the_header() {
    assert_eq!(typed("  \n// nothing here\n"), "// Generated by typeify from input.js\n");
}

#[test]
fn run_writes_output_and_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog.js");
    let output = dir.path().join("prog.ts");
    fs::write(&input, "var a = true;\nfunction f(x) { return [x]; }\n").unwrap();

    let options = TypeifyOptions::new(&input, &output).with_formatter(None);
    let summary = typeify(&options).unwrap();
    assert_eq!(summary.variable_count(), 1);
    assert_eq!(summary.function_count(), 1);
    assert_eq!(summary.output, output);

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("// Generated by typeify from prog.js\n"));
    assert!(written.contains("var a: boolean = true;\n"));
    assert!(written.contains("function f(x: any): any[] {\nreturn [x];\n}\n"));
}

#[test]
fn dump_mode_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog.js");
    let output = dir.path().join("prog.json");
    fs::write(&input, "let a = 1;\n").unwrap();

    let options = TypeifyOptions::new(&input, &output).with_mode(Mode::DumpAst);
    typeify(&options).unwrap();

    let tree: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(tree["type"], "Program");
    assert_eq!(tree["body"][0]["declarations"][0]["id"]["name"], "a");
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let options = TypeifyOptions::new(dir.path().join("absent.js"), dir.path().join("out.ts"));
    let err = typeify(&options).unwrap_err();
    assert_eq!(err.issuer(), "typeify.script");
    assert!(!dir.path().join("out.ts").exists());
}

#[test]
fn unavailable_formatter_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog.js");
    let output = dir.path().join("prog.ts");
    fs::write(&input, "let a = 1;\n").unwrap();

    let options = TypeifyOptions::new(&input, &output)
        .with_formatter(Some(FormatterConfig::for_program("typeify-missing-formatter-xyz")));
    let err = typeify(&options).unwrap_err();
    let expected = FormatterError::Unavailable {
        program: String::new(),
        reason: String::new(),
    };
    assert_eq!(err.issuer(), expected.issuer());
    assert!(!output.exists());
}

#[test]
fn parse_errors_abort_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.js");
    let output = dir.path().join("bad.ts");
    fs::write(&input, "function (").unwrap();

    let options = TypeifyOptions::new(&input, &output).with_formatter(None);
    let err = typeify(&options).unwrap_err();
    assert_eq!(err.location().unwrap().file, "bad.js");
    assert!(!output.exists());
}

#[test]
fn unwritable_output_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog.js");
    fs::write(&input, "let a = 1;\n").unwrap();

    let output = dir.path().join("missing-dir").join("prog.ts");
    let options = TypeifyOptions::new(&input, &output).with_formatter(None);
    let err = typeify(&options).unwrap_err();
    assert_eq!(err.issuer(), "typeify.driver.write_output");
}

#[cfg(unix)]
#[test]
fn external_formatter_output_is_written() {
    let Ok(_) = which::which("cat") else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog.js");
    let output = dir.path().join("prog.ts");
    fs::write(&input, "let a = 'x';\n").unwrap();

    let options = TypeifyOptions::new(&input, &output).with_formatter(Some(FormatterConfig::for_program("cat")));
    typeify(&options).unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "// Generated by typeify from prog.js\nlet a: string = 'x';\n"
    );
}
