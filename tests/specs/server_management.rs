//! Server lifecycle specs: cold start, reuse, resolver miss, idle teardown,
//! stop idempotence, crash recovery.

use serial_test::serial;

use super::prelude::*;

#[test]
#[serial]
fn cold_start_reports_success_and_lists_server() {
    let runtime = Runtime::new();
    let file = runtime.python_project();

    let output = runtime
        .lspc()
        .args(["server", "start"])
        .arg(&file)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8_lossy(&output);
    assert!(stdout.contains("Success"), "start output: {stdout}");
    assert!(
        stdout.contains(&runtime.path().join("py-proj").display().to_string()),
        "start output should name the project root: {stdout}"
    );

    let list = runtime.lspc().args(["server", "list"]).assert().success();
    let list_out = String::from_utf8_lossy(&list.get_output().stdout).to_lowercase();
    assert!(list_out.contains("python"), "list output: {list_out}");
    assert_eq!(list_out.lines().count(), 1, "exactly one supervisor: {list_out}");
}

#[test]
#[serial]
fn second_start_reuses_the_same_server() {
    let runtime = Runtime::new();
    let file = runtime.python_project();

    runtime.lspc().args(["server", "start"]).arg(&file).assert().success();
    runtime.lspc().args(["server", "start"]).arg(&file).assert().success();

    let list = runtime.lspc().args(["server", "list"]).assert().success();
    let list_out = String::from_utf8_lossy(&list.get_output().stdout);
    assert_eq!(list_out.trim().lines().count(), 1, "reuse must not add entries: {list_out}");

    // One child process, one socket, one pid file.
    assert!(wait_for(5_000, || runtime.client_pids().len() == 1));
}

#[test]
#[serial]
fn resolver_miss_fails_and_leaves_list_unchanged() {
    let runtime = Runtime::new();
    let file = runtime.python_project();
    let bogus = runtime.path().join("does-not-exist");

    let assert =
        runtime.lspc().args(["server", "start"]).arg(&file).arg("--project").arg(&bogus).assert();
    let output = assert.failure().get_output().stderr.clone();
    let stderr = String::from_utf8_lossy(&output).to_lowercase();
    assert!(stderr.contains("no lsp client found"), "stderr: {stderr}");

    let list = runtime.lspc().args(["server", "list"]).assert().success();
    let list_out = String::from_utf8_lossy(&list.get_output().stdout);
    assert!(list_out.contains("No servers running."), "list output: {list_out}");
}

#[test]
#[serial]
fn stop_after_start_and_stop_again_warns() {
    let runtime = Runtime::new();
    let file = runtime.python_project();

    runtime.lspc().args(["server", "start"]).arg(&file).assert().success();
    runtime
        .lspc()
        .args(["server", "stop"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicates::str::contains("Success: Stopped server"));

    // The supervisor needs a moment to reap the child and vacate the registry.
    assert!(wait_for(5_000, || {
        let list = runtime.lspc().args(["server", "list"]).assert().success();
        String::from_utf8_lossy(&list.get_output().stdout).contains("No servers running.")
    }));

    runtime
        .lspc()
        .args(["server", "stop"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicates::str::contains("Warning: No server running"));
}

#[test]
#[serial]
fn start_after_stop_spawns_a_fresh_child() {
    let runtime = Runtime::new();
    let file = runtime.python_project();

    runtime.lspc().args(["server", "start"]).arg(&file).assert().success();
    assert!(wait_for(5_000, || runtime.client_pids().len() == 1));
    let first_pids = runtime.client_pids();

    runtime.lspc().args(["server", "stop"]).arg(&file).assert().success();
    assert!(wait_for(5_000, || {
        let list = runtime.lspc().args(["server", "list"]).assert().success();
        String::from_utf8_lossy(&list.get_output().stdout).contains("No servers running.")
    }));

    runtime.lspc().args(["server", "start"]).arg(&file).assert().success();
    // The fresh child rewrites the pid file once it is up.
    assert!(
        wait_for(5_000, || runtime
            .client_pids()
            .first()
            .is_some_and(|pid| *pid != first_pids[0])),
        "fresh child expected after stop"
    );
}

#[test]
#[serial]
fn idle_window_elapsing_empties_the_list() {
    let runtime = Runtime::with_idle_ms(2_000);
    let file = runtime.python_project();

    runtime.lspc().args(["server", "start"]).arg(&file).assert().success();

    assert!(
        wait_for(10_000, || {
            let list = runtime.lspc().args(["server", "list"]).assert().success();
            String::from_utf8_lossy(&list.get_output().stdout).contains("No servers running.")
        }),
        "supervisor should be torn down after the idle window\nmanager log:\n{}",
        runtime.manager_log()
    );
}

#[test]
#[serial]
fn killed_child_vanishes_and_restart_recovers() {
    let runtime = Runtime::new();
    let file = runtime.python_project();

    runtime.lspc().args(["server", "start"]).arg(&file).assert().success();
    assert!(wait_for(5_000, || runtime.client_pids().len() == 1));
    let pids = runtime.client_pids();

    // Simulate a crash.
    std::process::Command::new("kill")
        .args(["-9", &pids[0].to_string()])
        .status()
        .expect("kill child");

    assert!(
        wait_for(10_000, || {
            let list = runtime.lspc().args(["server", "list"]).assert().success();
            String::from_utf8_lossy(&list.get_output().stdout).contains("No servers running.")
        }),
        "crashed child should vacate the registry\nmanager log:\n{}",
        runtime.manager_log()
    );

    runtime.lspc().args(["server", "start"]).arg(&file).assert().success();
    assert!(
        wait_for(5_000, || runtime.client_pids().first().is_some_and(|pid| *pid != pids[0])),
        "a new child process should replace the killed one"
    );
}
