use std::{
    fs,
    io::Write,
    path::PathBuf,
    process::{Command, Output, Stdio},
};

use pretty_assertions::assert_eq;

fn program_file(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("mikroc-{}-{name}.mc", std::process::id()));
    fs::write(&path, source).unwrap();
    path
}

fn mikroc(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mikroc")).args(args)
                                                               .env_remove("RUST_LOG")
                                                               .stdin(Stdio::piped())
                                                               .stdout(Stdio::piped())
                                                               .stderr(Stdio::piped())
                                                               .spawn()
                                                               .unwrap();
    let mut pipe = child.stdin.take().unwrap();
    if !stdin.is_empty() {
        pipe.write_all(stdin.as_bytes()).unwrap();
    }
    drop(pipe);
    child.wait_with_output().unwrap()
}

fn run_program(name: &str, source: &str, stdin: &str) -> Output {
    let path = program_file(name, source);
    let output = mikroc(&[path.to_str().unwrap()], stdin);
    fs::remove_file(path).unwrap();
    output
}

#[test]
fn runs_a_program() {
    let output = run_program("print", "{ x = 5; print(x); }", "");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "5");
    assert!(output.stderr.is_empty());
}

#[test]
fn reads_standard_input() {
    let output = run_program("scan", "scan(n); print(\"%d\\n\", n * n);", "12\n");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "144\n");
}

#[test]
fn missing_file_exits_with_failure() {
    let output = mikroc(&["/nonexistent/dir/program.mc"], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("program.mc"));
}

#[test]
fn no_file_exits_with_failure() {
    let output = mikroc(&[], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn division_by_zero_aborts() {
    let output = run_program("divide", "{ print(1); x = 0; y = 10/x; print(2); }", "");

    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1");
    assert!(String::from_utf8_lossy(&output.stderr).contains("\nDivision by zero"));
}

#[test]
fn syntax_errors_are_reported_and_the_rest_runs() {
    let output = run_program("recover", "print(1);\nx = ;\nprint(2);", "");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "12");
    assert_eq!(String::from_utf8_lossy(&output.stderr),
               "2.5 Syntax error: unexpected ';', expected an expression.\n");
}

#[test]
fn unfinished_program_is_a_parse_error() {
    let output = run_program("unfinished", "print(1);\nwhile (1) {", "");

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).ends_with("\nParse error.\n"));
}

#[test]
fn check_mode_does_not_run() {
    let path = program_file("check", "print(1);");
    let output = mikroc(&["--check", path.to_str().unwrap()], "");
    fs::remove_file(path).unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}
