//! Stored record types.
//!
//! The on-disk JSON shape is also the wire shape, so these double as API
//! payloads. Field names are camelCase to match the persisted files.

use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// A tracked contract. Clients may attach arbitrary extra fields at
/// creation/update time; those round-trip through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub phase: Phase,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall_date_time: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Contract {
    /// Equality lookup on a client-supplied field (e.g. `agencyCode`).
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_json::Value::as_str)
    }
}

/// One audit-log entry. Appended on creation and on every status update;
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: String,
    pub action: String,
    pub phase: Phase,
    pub status: String,
    pub operator: String,
    pub memo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall_date_time: Option<String>,
}

/// A login account. Seeded once at first boot; no endpoint mutates users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    pub agency_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Agency,
}
