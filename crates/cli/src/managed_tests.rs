// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use super::{absolutize, create_locate, wait_socket};

#[tokio::test]
async fn wait_socket_succeeds_on_live_socket() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("live.sock");
    let _listener = std::os::unix::net::UnixListener::bind(&socket).unwrap();

    wait_socket(&socket, Duration::from_secs(1)).await.unwrap();
}

#[tokio::test]
async fn wait_socket_times_out_on_absent_socket() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("absent.sock");

    let err = wait_socket(&socket, Duration::from_millis(250)).await.unwrap_err();
    assert_eq!(err.path, socket);
}

#[tokio::test]
async fn wait_socket_picks_up_late_binding() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("late.sock");

    let bind_path = socket.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let listener = std::os::unix::net::UnixListener::bind(&bind_path).unwrap();
        // Keep it alive long enough for the poll to land.
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(listener);
    });

    wait_socket(&socket, Duration::from_secs(5)).await.unwrap();
}

#[test]
fn absolutize_keeps_absolute_paths() {
    let path = std::path::Path::new("/already/absolute");
    assert_eq!(absolutize(path), path);
}

#[test]
fn absolutize_anchors_relative_paths_at_cwd() {
    let out = absolutize(std::path::Path::new("some/file.rs"));
    assert!(out.is_absolute());
    assert!(out.ends_with("some/file.rs"));
}

#[test]
fn create_locate_rejects_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = format!("{}/ghost.py:3", dir.path().display());

    let err = create_locate(&input).unwrap_err();
    assert!(err.to_string().contains("File not found"));
}

#[test]
fn create_locate_absolutizes_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.py");
    std::fs::write(&file, "x = 1\n").unwrap();

    let locate = create_locate(&format!("{}:1", file.display())).unwrap();
    assert!(locate.file_path.is_absolute());
    assert_eq!(locate.file_path, file);
}

#[test]
fn create_locate_surfaces_grammar_errors() {
    let err = create_locate("nocolon").unwrap_err();
    assert!(err.to_string().contains("Invalid locate string"));
}
