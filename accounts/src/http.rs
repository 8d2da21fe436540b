//! HTTP surface: REST handlers over the account manager.
//!
//! Every handler converts `ManagerError` to a status + JSON body at its
//! own boundary; no error crosses a request.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::manager::{AccountManager, ManagerError};
use crate::protocol::{
    AccountParams, ImportPaymentStatusParams, ImportPaymentStatusResult, InteractionParams,
};

type Manager = Arc<AccountManager>;

pub fn router(manager: Manager) -> Router {
    Router::new()
        .route("/api/contracts", get(list_accounts).post(create_account))
        .route(
            "/api/contracts/import-payment-status",
            post(import_payment_status),
        )
        .route(
            "/api/contracts/:id",
            get(get_account).put(replace_account).delete(delete_account),
        )
        .route(
            "/api/contracts/:id/history",
            get(list_history).post(append_history),
        )
        .route(
            "/api/contracts/:contract_id/history/:history_id",
            axum::routing::delete(delete_history),
        )
        .route("/api/contracts/:id/mark-read", post(mark_read))
        .route("/api/stats", get(account_stats))
        .with_state(manager)
}

/// Serve until the shutdown channel fires.
pub async fn serve(
    manager: Manager,
    listener: tokio::net::TcpListener,
    mut shutdown_rx: tokio::sync::watch::Receiver<bool>,
) -> std::io::Result<()> {
    axum::serve(listener, router(manager))
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await
}

fn error_response(err: &ManagerError) -> Response {
    let status = match err {
        ManagerError::AccountNotFound | ManagerError::RecordNotFound => StatusCode::NOT_FOUND,
        ManagerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::warn!("request failed: {err}");
    }
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

async fn list_accounts(State(manager): State<Manager>) -> Response {
    match manager.list() {
        Ok(accounts) => Json(accounts).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn get_account(State(manager): State<Manager>, Path(id): Path<String>) -> Response {
    match manager.get(&id) {
        Ok(account) => Json(account).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn create_account(
    State(manager): State<Manager>,
    Json(params): Json<AccountParams>,
) -> Response {
    match manager.create(params) {
        Ok(account) => Json(account).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn replace_account(
    State(manager): State<Manager>,
    Path(id): Path<String>,
    Json(params): Json<AccountParams>,
) -> Response {
    match manager.replace(&id, params) {
        Ok(account) => Json(account).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn delete_account(State(manager): State<Manager>, Path(id): Path<String>) -> Response {
    match manager.delete(&id) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn import_payment_status(
    State(manager): State<Manager>,
    Json(params): Json<ImportPaymentStatusParams>,
) -> Response {
    match manager.import_payment_status(params) {
        Ok(updated) => Json(ImportPaymentStatusResult { updated }).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn list_history(State(manager): State<Manager>, Path(id): Path<String>) -> Response {
    match manager.list_history(&id) {
        Ok(records) => Json(records).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn append_history(
    State(manager): State<Manager>,
    Path(id): Path<String>,
    Json(params): Json<InteractionParams>,
) -> Response {
    match manager.append_history(&id, params) {
        Ok(record) => Json(record).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn delete_history(
    State(manager): State<Manager>,
    Path((contract_id, history_id)): Path<(String, String)>,
) -> Response {
    match manager.delete_history(&contract_id, &history_id) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn mark_read(State(manager): State<Manager>, Path(id): Path<String>) -> Response {
    match manager.mark_read(&id) {
        Ok(account) => Json(account).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn account_stats(State(manager): State<Manager>) -> Response {
    match manager.stats() {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => error_response(&err),
    }
}
