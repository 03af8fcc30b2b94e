//! Capability proxying specs: the CLI must create the managed child, wait
//! for its socket, and render what the child returns.

use serial_test::serial;

use super::prelude::*;

#[test]
#[serial]
fn outline_renders_structural_symbols_only() {
    let runtime = Runtime::new();
    let file = runtime.python_project();

    let assert = runtime.lspc().arg("outline").arg(&file).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    // The fake child reports one function and one variable; the variable is
    // filtered without --all.
    assert!(stdout.contains("function alpha"), "outline output: {stdout}");
    assert!(!stdout.contains("beta"), "outline output: {stdout}");

    let all = runtime.lspc().arg("outline").arg(&file).arg("--all").assert().success();
    let all_out = String::from_utf8_lossy(&all.get_output().stdout);
    assert!(all_out.contains("beta"), "outline --all output: {all_out}");
}

#[test]
#[serial]
fn doc_renders_hover_contents() {
    let runtime = Runtime::new();
    let file = runtime.python_project();

    let assert = runtime
        .lspc()
        .arg("doc")
        .arg("--locate")
        .arg(format!("{}:1", file.display()))
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("fake python docs"), "doc output: {stdout}");
}

#[test]
#[serial]
fn locate_check_fails_when_target_is_missing() {
    let runtime = Runtime::new();
    let file = runtime.python_project();

    // The fake child resolves no locate targets.
    runtime
        .lspc()
        .arg("locate")
        .arg(format!("{}:1", file.display()))
        .arg("--check")
        .assert()
        .failure()
        .stderr(predicates::str::contains("not found"));

    // Without --check the parsed locate itself is echoed.
    runtime
        .lspc()
        .arg("locate")
        .arg(format!("{}:1", file.display()))
        .assert()
        .success()
        .stdout(predicates::str::contains(":1"));
}

#[test]
#[serial]
fn bad_locate_string_is_a_usage_error() {
    let runtime = Runtime::new();

    runtime
        .lspc()
        .arg("locate")
        .arg("no-line-number")
        .assert()
        .failure()
        .stderr(predicates::str::contains("Invalid locate string"));
}
