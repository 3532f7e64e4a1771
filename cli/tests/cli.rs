use std::fs;

use assert_cmd::Command;

fn typeify() -> Command {
    Command::cargo_bin("typeify").unwrap()
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn writes_typed_source_without_formatting() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.js");
    let output = dir.path().join("sample.ts");
    fs::write(&input, "const x = 5;\nfunction add(a, b) { return a + b; }\n").unwrap();

    let out = typeify().arg(&input).arg(&output).arg("--no-format").output().unwrap();
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));

    let stdout = stdout_of(&out);
    assert!(stdout.contains(&format!("Output written to {}", output.display())));
    assert!(stdout.contains("Discovered 1 variables and 1 functions."));

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "// Generated by typeify from sample.js\nconst x: number = 5;\n\nfunction add(a: any, b: any): number {\nreturn a + b;\n}\n"
    );
}

#[test]
fn missing_arguments_print_usage_and_fail() {
    let out = typeify().arg("only-input.js").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr_of(&out).contains("usage: typeify <INPUT> <OUTPUT> [--no-format]"));
}

#[test]
fn help_exits_cleanly() {
    let out = typeify().arg("--help").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout_of(&out).contains("--no-format"));
}

#[test]
fn unreadable_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = typeify()
        .arg(dir.path().join("absent.js"))
        .arg(dir.path().join("out.ts"))
        .arg("--no-format")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr_of(&out).contains("TYPEIFY | ERROR"));
    assert!(!dir.path().join("out.ts").exists());
}

#[test]
fn unknown_formatter_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.js");
    let output = dir.path().join("sample.ts");
    fs::write(&input, "let a = 1;\n").unwrap();

    let out = typeify()
        .arg(&input)
        .arg(&output)
        .args(["--formatter", "typeify-missing-formatter-xyz"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr_of(&out).contains("typeify-missing-formatter-xyz"));
    assert!(!output.exists());
}

#[test]
fn syntax_errors_fail_with_a_location() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.js");
    fs::write(&input, "let = ;\n").unwrap();

    let out = typeify()
        .arg(&input)
        .arg(dir.path().join("broken.ts"))
        .arg("--no-format")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr_of(&out).contains("broken.js:1:"));
}

#[test]
fn deeply_nested_input_fails_with_a_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("deep.js");
    let output = dir.path().join("deep.ts");
    let src = format!("{}let z = 1;{}", "f(function () { ".repeat(200), " });".repeat(200));
    fs::write(&input, src).unwrap();

    let out = typeify().arg(&input).arg(&output).arg("--no-format").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = stderr_of(&out);
    assert!(stderr.contains("TYPEIFY | ERROR | deep.js:1:"), "{}", stderr);
    assert!(stderr.contains("Nesting too deep"));
    assert!(!output.exists());
}

#[test]
fn dump_ast_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.js");
    let output = dir.path().join("sample.json");
    fs::write(&input, "let a = [1];\n").unwrap();

    let out = typeify().arg(&input).arg(&output).arg("--dump-ast").output().unwrap();
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));

    let json = fs::read_to_string(&output).unwrap();
    assert!(json.contains("\"type\": \"Program\""));
    assert!(json.contains("\"type\": \"ArrayExpression\""));
}

#[test]
fn list_prints_declarations_and_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.js");
    let output = dir.path().join("sample.ts");
    fs::write(&input, "let names = ['a'];\nconst now = Date.now();\nfunction f(...xs) { return xs; }\n").unwrap();

    let out = typeify()
        .arg(&input)
        .arg(&output)
        .args(["--no-format", "--list"])
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));

    let stdout = stdout_of(&out);
    assert!(stdout.contains("Declarations"));
    assert!(stdout.contains("names"));
    assert!(stdout.contains("string[]"));
    assert!(stdout.contains("(...xs: any[]) => any"));
    assert!(stdout.contains("Diagnostics"));
    assert!(stdout.contains("Discovered 2 variables and 1 functions."));
}
