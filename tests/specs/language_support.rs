//! Basic usability for each supported language: start a server for the
//! project, see it listed under the right language token, stop it cleanly.

use serial_test::serial;

use super::prelude::*;

fn start_list_stop(runtime: &Runtime, file: &std::path::Path, token: &str) {
    runtime.lspc().args(["server", "start"]).arg(file).assert().success();

    let list = runtime.lspc().args(["server", "list"]).assert().success();
    let list_out = String::from_utf8_lossy(&list.get_output().stdout).to_lowercase();
    assert!(list_out.contains(token), "{token} server not listed: {list_out}");

    runtime.lspc().args(["server", "stop"]).arg(file).assert().success();
    assert!(wait_for(5_000, || {
        let list = runtime.lspc().args(["server", "list"]).assert().success();
        String::from_utf8_lossy(&list.get_output().stdout).contains("No servers running.")
    }));
}

#[test]
#[serial]
fn python_project_round_trip() {
    let runtime = Runtime::new();
    let file = runtime.python_project();
    start_list_stop(&runtime, &file, "python");
}

#[test]
#[serial]
fn go_project_round_trip() {
    let runtime = Runtime::new();
    let file = runtime.go_project();
    start_list_stop(&runtime, &file, "go");
}

#[test]
#[serial]
fn rust_project_round_trip() {
    let runtime = Runtime::new();
    let file = runtime.rust_project();
    start_list_stop(&runtime, &file, "rust");
}

#[test]
#[serial]
fn distinct_languages_run_side_by_side() {
    let runtime = Runtime::new();
    let python = runtime.python_project();
    let go = runtime.go_project();
    let rust = runtime.rust_project();

    for file in [&python, &go, &rust] {
        runtime.lspc().args(["server", "start"]).arg(file).assert().success();
    }

    let list = runtime.lspc().args(["server", "list"]).assert().success();
    let list_out = String::from_utf8_lossy(&list.get_output().stdout).to_lowercase();
    assert_eq!(list_out.trim().lines().count(), 3, "three supervisors: {list_out}");
    for token in ["python", "go", "rust"] {
        assert!(list_out.contains(token), "{token} missing from: {list_out}");
    }

    // Teardown of one leaves the other two intact.
    runtime.lspc().args(["server", "stop"]).arg(&go).assert().success();
    assert!(wait_for(5_000, || {
        let list = runtime.lspc().args(["server", "list"]).assert().success();
        String::from_utf8_lossy(&list.get_output().stdout).trim().lines().count() == 2
    }));

    let list = runtime.lspc().args(["server", "list"]).assert().success();
    let list_out = String::from_utf8_lossy(&list.get_output().stdout).to_lowercase();
    assert!(list_out.contains("python") && list_out.contains("rust"));
}
