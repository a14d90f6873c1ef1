//! Integration tests for the csvcalc binary

use std::io::Write;
use std::process::{Command, Stdio};

fn run(args: &[&str], input: &str) -> (String, String, i32) {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(input.as_bytes()).expect("Failed to write table");

    let output = Command::new(env!("CARGO_BIN_EXE_csvcalc"))
        // Tests must not depend on the caller's RUST_LOG.
        .env_remove("RUST_LOG")
        .args(args)
        .arg(file.path())
        .output()
        .expect("Failed to execute csvcalc");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_prints_evaluated_grid() {
    let (stdout, _, code) = run(&[], ",A,B,C\n1,3,=A1*2,=B1+1\n");
    assert_eq!(stdout, ",A,B,C\n1,3,6,7\n");
    assert_eq!(code, 0);
}

#[test]
fn test_failing_cell_does_not_abort_grid() {
    let (stdout, _, code) = run(&[], ",A,B,C\n1,=B1,=A1,=2+3*4\n");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("1,#ERR: loop at cell"));
    assert!(lines[1].ends_with(",14"));
    assert_eq!(code, 0);
}

#[test]
fn test_single_cells() {
    let (stdout, _, code) = run(&["-c", "C1", "--cell", "A1"], ",A,B,C\n1,10,=A1-3,=B1-2\n");
    assert_eq!(stdout, "C1=5\nA1=10\n");
    assert_eq!(code, 0);
}

#[test]
fn test_single_cell_error_exit_code() {
    let (stdout, _, code) = run(&["-c", "A1", "-c", "B1"], ",A,B\n1,=5/0,2\n");
    assert!(stdout.starts_with("A1=#ERR: division by zero"));
    assert!(stdout.ends_with("B1=2\n"));
    assert_eq!(code, 1);
}

#[test]
fn test_invalid_cell_argument_is_rejected() {
    let (_, stderr, code) = run(&["-c", "1A"], ",A\n1,1\n");
    assert!(stderr.contains("Invalid cell address"));
    assert_ne!(code, 0);
}

#[test]
fn test_raw_mode() {
    let (stdout, _, code) = run(&["--raw"], ",A,B\n1, 3 ,= A1 * 2\n");
    assert_eq!(stdout, ",A,B\n1,3,=A1*2\n");
    assert_eq!(code, 0);
}

#[test]
fn test_custom_delimiter() {
    let (stdout, _, code) = run(&["-d", ";"], ";A;B\n1;4;=A1/8\n");
    assert_eq!(stdout, ";A;B\n1;4;0.5\n");
    assert_eq!(code, 0);
}

#[test]
fn test_json_output() {
    let (stdout, _, code) = run(&["--format", "json"], ",A\n1,=1+1\n");
    assert!(stdout.contains("\"columns\""));
    assert!(stdout.contains("\"value\": \"2\""));
    assert_eq!(code, 0);
}

#[test]
fn test_malformed_table_exit_code() {
    let (stdout, stderr, code) = run(&[], ",A\nx,1\n");
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("Error loading table: malformed table at line 2"));
    assert_eq!(code, 1);
}

#[test]
fn test_reads_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_csvcalc"))
        .env_remove("RUST_LOG")
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to execute csvcalc");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b",A\n1,=6/4\n")
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for csvcalc");
    assert_eq!(String::from_utf8_lossy(&output.stdout), ",A\n1,1.5\n");
    assert!(output.status.success());
}
