// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake language-server child used by the end-to-end specs.
//!
//! Binds the Unix socket the manager hands it and answers canned JSON on
//! the capability endpoints, standing in for a real LSP wrapper. Writes
//! `<uds>.pid` so crash-recovery specs can kill it from outside.

use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

#[tokio::main]
async fn main() {
    let mut uds = None;
    let mut language = String::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--uds" => uds = args.next(),
            "--language" => language = args.next().unwrap_or_default(),
            "--project" => {
                args.next();
            }
            _ => {}
        }
    }
    let Some(uds) = uds else {
        eprintln!("lspc-fake-server: missing --uds");
        std::process::exit(2);
    };

    let _ = std::fs::write(format!("{uds}.pid"), std::process::id().to_string());

    let app = Router::new()
        .route(
            "/capability/outline",
            post(|| async {
                Json(json!({
                    "items": [
                        { "name": "alpha", "kind": "Function", "start_line": 1, "end_line": 4, "depth": 0 },
                        { "name": "beta", "kind": "Variable", "start_line": 2, "end_line": 2, "depth": 1 },
                    ]
                }))
            }),
        )
        .route(
            "/capability/hover",
            post(move || async move {
                Json(json!({ "contents": format!("fake {language} docs"), "symbol": "alpha" }))
            }),
        )
        .route("/capability/locate", post(|| async { Json(json!({ "target": null })) }))
        .fallback(|| async { Json(json!({})) });

    let listener = match tokio::net::UnixListener::bind(&uds) {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("lspc-fake-server: failed to bind {uds}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("lspc-fake-server: {e}");
        std::process::exit(1);
    }
}
