// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal typed HTTP/1.1 client over Unix domain sockets.
//!
//! Each request opens a fresh connection (handshake + one exchange); the
//! manager and child sockets are both acquired per-request with bounded
//! connect retries, so races with a freshly-started daemon settle quickly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::client::conn::http1;
use hyper::{header, Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::net::UnixStream;

use lspc_api::ApiErrorBody;

use crate::env;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to connect to {path}: {source}")]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] hyper::Error),

    #[error("Invalid request: {0}")]
    Request(#[from] hyper::http::Error),

    /// Non-2xx response; `message` is the server's error body.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// HTTP client bound to one Unix socket.
pub struct HttpClient {
    socket_path: PathBuf,
}

impl HttpClient {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self { socket_path: socket_path.into() }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, HttpError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<R: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<R, HttpError> {
        let body = serde_json::to_vec(body).map_err(HttpError::Encode)?;
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn delete<R: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<R, HttpError> {
        let body = serde_json::to_vec(body).map_err(HttpError::Encode)?;
        self.request(Method::DELETE, path, Some(body)).await
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<R, HttpError> {
        let timeout = env::http_timeout();
        let (status, bytes) = tokio::time::timeout(timeout, self.exchange(method, path, body))
            .await
            .map_err(|_| HttpError::Timeout(timeout))??;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&bytes)
                .map(|b| b.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(HttpError::Status { status, message });
        }

        serde_json::from_slice(&bytes).map_err(HttpError::Decode)
    }

    async fn exchange(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Bytes), HttpError> {
        let stream = self.connect_with_retry().await?;
        let io = TokioIo::new(stream);
        let (mut sender, conn) = http1::handshake(io).await?;
        tokio::spawn(async move {
            let _ = conn.await;
        });

        let builder = Request::builder().method(method).uri(path).header(header::HOST, "localhost");
        let request = match body {
            Some(bytes) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Full::new(Bytes::from(bytes)))?,
            None => builder.body(Full::new(Bytes::new()))?,
        };

        let response = sender.send_request(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        Ok((status, bytes))
    }

    async fn connect_with_retry(&self) -> Result<UnixStream, HttpError> {
        let mut last = None;
        for attempt in 0..env::connect_retries() {
            if attempt > 0 {
                tokio::time::sleep(env::poll_interval()).await;
            }
            match UnixStream::connect(&self.socket_path).await {
                Ok(stream) => return Ok(stream),
                Err(e) => last = Some(e),
            }
        }
        Err(HttpError::Connect {
            path: self.socket_path.clone(),
            source: last.unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "no connect attempts made")
            }),
        })
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
