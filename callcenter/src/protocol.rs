//! API request/response types for the call-center service.

use serde::{Deserialize, Serialize};

use crate::phase::Phase;

// ─────────────────────────────────────────────────────────────────────────────
// POST /api/login
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}

/// The user payload returned on a successful login. The plaintext
/// password never leaves the users file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: String,
    pub name: String,
    pub role: crate::models::Role,
    pub agency_code: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /api/contracts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractListQuery {
    #[serde(default)]
    pub agency_code: Option<String>,
    #[serde(default)]
    pub phase: Option<Phase>,
}

// ─────────────────────────────────────────────────────────────────────────────
// POST /api/contracts/:id/update-status
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusParams {
    /// Explicit phase override; consulted only when `status` matches no
    /// transition label.
    #[serde(default)]
    pub phase: Option<Phase>,
    pub status: String,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub recall_date_time: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /api/contracts/stats/by-phase
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    #[serde(default)]
    pub agency_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseStats {
    pub entry: usize,
    pub preconfirm: usize,
    pub handling: usize,
    pub postconfirm: usize,
    pub completed: usize,
    pub total: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /health
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct HealthResult {
    pub status: String,
    pub message: String,
    pub database: String,
    pub features: Vec<String>,
}
