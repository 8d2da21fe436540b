//! HTTP surface: REST handlers over the contract manager.
//!
//! Every handler converts `ManagerError` to a status + JSON body at its
//! own boundary; no error crosses a request.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::manager::{ContractManager, ManagerError};
use crate::protocol::{
    ContractListQuery, HealthResult, LoginParams, StatsQuery, UpdateStatusParams,
};

type Manager = Arc<ContractManager>;

pub fn router(manager: Manager) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/contracts", get(list_contracts).post(create_contract))
        .route("/api/contracts/stats/by-phase", get(stats_by_phase))
        .route(
            "/api/contracts/:id",
            get(get_contract).put(update_contract),
        )
        .route("/api/contracts/:id/update-status", post(update_status))
        .route("/health", get(health))
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
        ManagerError::ContractNotFound => StatusCode::NOT_FOUND,
        ManagerError::LoginFailed => StatusCode::UNAUTHORIZED,
        ManagerError::Storage(_) | ManagerError::InvalidRecord(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status.is_server_error() {
        tracing::warn!("request failed: {err}");
    }
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

async fn login(State(manager): State<Manager>, Json(params): Json<LoginParams>) -> Response {
    match manager.login(&params) {
        Ok(user) => Json(json!({ "success": true, "user": user })).into_response(),
        Err(err @ ManagerError::LoginFailed) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": err.to_string() })),
        )
            .into_response(),
        Err(err) => error_response(&err),
    }
}

async fn list_contracts(
    State(manager): State<Manager>,
    Query(query): Query<ContractListQuery>,
) -> Response {
    Json(manager.list(query.agency_code.as_deref(), query.phase)).into_response()
}

async fn get_contract(State(manager): State<Manager>, Path(id): Path<String>) -> Response {
    match manager.get(&id) {
        Ok(contract) => Json(contract).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn create_contract(
    State(manager): State<Manager>,
    Json(fields): Json<serde_json::Map<String, serde_json::Value>>,
) -> Response {
    match manager.create(fields) {
        Ok(contract) => Json(contract).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn update_contract(
    State(manager): State<Manager>,
    Path(id): Path<String>,
    Json(fields): Json<serde_json::Map<String, serde_json::Value>>,
) -> Response {
    match manager.update(&id, fields) {
        Ok(contract) => Json(contract).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn update_status(
    State(manager): State<Manager>,
    Path(id): Path<String>,
    Json(params): Json<UpdateStatusParams>,
) -> Response {
    match manager.update_status(&id, params) {
        Ok(contract) => Json(contract).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn stats_by_phase(
    State(manager): State<Manager>,
    Query(query): Query<StatsQuery>,
) -> Response {
    Json(manager.stats_by_phase(query.agency_code.as_deref())).into_response()
}

/// Static capability report.
async fn health() -> Json<HealthResult> {
    Json(HealthResult {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
        database: "File-based storage".to_string(),
        features: vec![
            "コールセンター4フェーズ管理".to_string(),
            "取次店別データ分離".to_string(),
            "再コール管理（5分刻み）".to_string(),
            "自動フェーズ遷移".to_string(),
            "ファイル保存方式".to_string(),
        ],
    })
}
