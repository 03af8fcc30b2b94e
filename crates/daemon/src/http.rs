// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP control plane served over the manager's Unix socket.
//!
//! Three routes, JSON bodies, REST status codes: `POST /create` (201),
//! `DELETE /delete` (200, `info: null` on miss), `GET /list` (200).
//! Handler errors never take the daemon down; they map to 4xx/5xx.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use tracing::{error, warn};

use lspc_api::{
    ApiErrorBody, CreateClientRequest, CreateClientResponse, DeleteClientRequest,
    DeleteClientResponse, ManagedClientInfo,
};

use crate::registry::{ManagerCtx, RegistryError};

/// Build the control-plane router.
pub fn router(ctx: Arc<ManagerCtx>) -> Router {
    Router::new()
        .route("/create", post(create_client))
        .route("/delete", delete(delete_client))
        .route("/list", get(list_clients))
        .with_state(ctx)
}

/// Error envelope for non-2xx responses.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        let status = match &e {
            RegistryError::NoMatch(_) => StatusCode::NOT_FOUND,
            RegistryError::Spawn(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError { status, message: e.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, "{}", self.message);
        } else {
            warn!(status = %self.status, "{}", self.message);
        }
        (self.status, Json(ApiErrorBody { error: self.message })).into_response()
    }
}

async fn create_client(
    State(ctx): State<Arc<ManagerCtx>>,
    Json(req): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<CreateClientResponse>), ApiError> {
    let resp = ctx.create_client(&req.path, req.project_path.as_deref())?;
    Ok((StatusCode::CREATED, Json(resp)))
}

async fn delete_client(
    State(ctx): State<Arc<ManagerCtx>>,
    Json(req): Json<DeleteClientRequest>,
) -> Json<DeleteClientResponse> {
    Json(DeleteClientResponse { info: ctx.delete_client(&req.path, req.project_path.as_deref()) })
}

async fn list_clients(State(ctx): State<Arc<ManagerCtx>>) -> Json<Vec<ManagedClientInfo>> {
    Json(ctx.list_clients())
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
