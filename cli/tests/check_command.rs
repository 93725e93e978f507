//! End-to-end tests for the `check` subcommand.
//!
//! A shell script stands in for clang-format so the tests control the
//! replacement stream exactly.

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::process::Command;

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fmtcheck"))
}

/// Write an executable script that consumes stdin and runs `body`.
fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt as _;
    let path = dir.join("fake-format.sh");
    std::fs::write(&path, format!("#!/bin/sh\ncat >/dev/null\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[test]
fn check_prints_diagnostics_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "echo \"<replacement offset='3' length='2'> </replacement>\"",
    );
    let source = dir.path().join("main.cpp");
    std::fs::write(&source, "int  main(){}\n").unwrap();

    let output = Command::new(binary())
        .args(["--executable", tool.to_str().unwrap(), "check"])
        .arg(&source)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("main.cpp:1:4: warning: [fmtcheck] Remove spacing."));
}

#[test]
fn check_clean_file_succeeds_silently() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), ":");
    let source = dir.path().join("main.cpp");
    std::fs::write(&source, "int main() {}\n").unwrap();

    let output = Command::new(binary())
        .args(["--executable", tool.to_str().unwrap(), "check"])
        .arg(&source)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn check_fix_rewrites_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "echo \"<replacement offset='3' length='2'> </replacement>\"\n\
         echo \"<replacement offset='11' length='0'> </replacement>\"",
    );
    let source = dir.path().join("main.cpp");
    std::fs::write(&source, "int  main(){}\n").unwrap();

    let output = Command::new(binary())
        .args(["--executable", tool.to_str().unwrap(), "check", "--fix"])
        .arg(&source)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(&source).unwrap(),
        "int main() {}\n"
    );
}

#[test]
fn failing_tool_reports_error_without_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), "echo \"bad style file\" >&2; exit 1");
    let source = dir.path().join("main.cpp");
    std::fs::write(&source, "int main() {}\n").unwrap();

    let output = Command::new(binary())
        .args(["--executable", tool.to_str().unwrap(), "check"])
        .arg(&source)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("bad style file"));
    assert!(output.stdout.is_empty());
}

#[test]
fn config_file_sets_the_executable() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), ":");
    let config = dir.path().join("fmtcheck.toml");
    std::fs::write(
        &config,
        format!("executable = \"{}\"\n", tool.display()),
    )
    .unwrap();
    let source = dir.path().join("main.cpp");
    std::fs::write(&source, "int main() {}\n").unwrap();

    let output = Command::new(binary())
        .args(["--config", config.to_str().unwrap(), "check"])
        .arg(&source)
        .output()
        .unwrap();

    assert!(output.status.success());
}
