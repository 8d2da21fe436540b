//! `ContractManager` — orchestrates contract intake, status updates and
//! aggregation.
//!
//! Every operation is a full read-modify-write cycle against the backing
//! file: load the whole collection, mutate in memory, write the whole
//! collection back. No state is cached across requests.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use desk_store::StoreError;
use serde_json::Value;

use crate::models::{Contract, HistoryEntry};
use crate::persistence::{ContractStore, UserStore};
use crate::phase::{self, Phase};
use crate::protocol::{LoginParams, LoginUser, PhaseStats, UpdateStatusParams};
use crate::stats;

/// Status label assigned to newly registered contracts.
pub const INITIAL_STATUS: &str = "エントリ待ち";

/// Error type for manager operations. Messages are the wire messages.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("契約が見つかりません")]
    ContractNotFound,

    #[error("ログイン失敗")]
    LoginFailed,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("invalid record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}

pub struct ContractManager {
    contracts: ContractStore,
    users: UserStore,
}

/// Current instant as RFC 3339 UTC with millisecond precision.
///
/// Fixed-width, so lexicographic order on these strings is time order.
fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl ContractManager {
    /// Open both stores, seeding them on first boot.
    pub fn new(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            contracts: ContractStore::new(data_dir)?,
            users: UserStore::new(data_dir)?,
        })
    }

    /// Linear credential scan over the users file.
    pub fn login(&self, params: &LoginParams) -> Result<LoginUser, ManagerError> {
        self.users
            .load()
            .iter()
            .find(|u| u.id == params.username && u.password == params.password)
            .map(|u| LoginUser {
                id: u.id.clone(),
                name: u.name.clone(),
                role: u.role,
                agency_code: u.agency_code.clone(),
            })
            .ok_or(ManagerError::LoginFailed)
    }

    /// List contracts, optionally filtered by agency code and phase,
    /// newest first.
    pub fn list(&self, agency_code: Option<&str>, phase: Option<Phase>) -> Vec<Contract> {
        let mut contracts = self.contracts.load();
        if let Some(code) = agency_code {
            contracts.retain(|c| c.extra_str("agencyCode") == Some(code));
        }
        if let Some(p) = phase {
            contracts.retain(|c| c.phase == p);
        }
        contracts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        contracts
    }

    pub fn get(&self, id: &str) -> Result<Contract, ManagerError> {
        self.contracts
            .load()
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(ManagerError::ContractNotFound)
    }

    /// Register a new contract.
    ///
    /// The id is derived from the creation timestamp (`CNT{epoch_millis}`).
    /// Arbitrary client-supplied fields are retained; server-owned fields
    /// always win over client-supplied ones.
    pub fn create(
        &self,
        mut fields: serde_json::Map<String, Value>,
    ) -> Result<Contract, ManagerError> {
        let mut contracts = self.contracts.load();
        let now = now_iso();
        let operator = fields
            .get("operator")
            .and_then(Value::as_str)
            .unwrap_or("system")
            .to_string();
        let recall_date_time = fields
            .remove("recallDateTime")
            .and_then(|v| v.as_str().map(str::to_string));
        for key in ["id", "phase", "status", "createdAt", "updatedAt", "history"] {
            fields.remove(key);
        }

        let contract = Contract {
            id: format!("CNT{}", Utc::now().timestamp_millis()),
            phase: Phase::Entry,
            status: INITIAL_STATUS.to_string(),
            created_at: now.clone(),
            updated_at: now.clone(),
            history: vec![HistoryEntry {
                timestamp: now,
                action: "新規登録".to_string(),
                phase: Phase::Entry,
                status: INITIAL_STATUS.to_string(),
                operator,
                memo: "契約情報を登録しました".to_string(),
                recall_date_time: None,
            }],
            recall_date_time,
            extra: fields,
        };

        contracts.push(contract.clone());
        self.contracts.save(&contracts)?;
        Ok(contract)
    }

    /// Shallow-merge `fields` over an existing record and refresh
    /// `updatedAt`. Fields the caller omits are preserved; `id` is
    /// server-owned and cannot be overwritten.
    pub fn update(
        &self,
        id: &str,
        mut fields: serde_json::Map<String, Value>,
    ) -> Result<Contract, ManagerError> {
        fields.remove("id");
        let mut contracts = self.contracts.load();
        let index = contracts
            .iter()
            .position(|c| c.id == id)
            .ok_or(ManagerError::ContractNotFound)?;

        let mut value = serde_json::to_value(&contracts[index])?;
        if let Some(record) = value.as_object_mut() {
            for (key, field) in fields {
                record.insert(key, field);
            }
            record.insert("updatedAt".to_string(), Value::String(now_iso()));
        }
        let updated: Contract = serde_json::from_value(value)?;

        contracts[index] = updated.clone();
        self.contracts.save(&contracts)?;
        Ok(updated)
    }

    /// Apply a status update: resolve the next phase from the label
    /// table, append a history snapshot, and store any recall timestamp.
    pub fn update_status(
        &self,
        id: &str,
        params: UpdateStatusParams,
    ) -> Result<Contract, ManagerError> {
        let mut contracts = self.contracts.load();
        let contract = contracts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ManagerError::ContractNotFound)?;

        let new_phase = phase::next_phase(contract.phase, params.phase, &params.status);
        let now = now_iso();

        let mut memo = params.memo.unwrap_or_default();
        if let Some(recall) = &params.recall_date_time {
            memo.push_str(&format!(" 📅 再コール予定: {recall}"));
        }

        contract.history.push(HistoryEntry {
            timestamp: now.clone(),
            action: params.status.clone(),
            phase: new_phase,
            status: params.status.clone(),
            operator: params.operator.unwrap_or_else(|| "system".to_string()),
            memo,
            recall_date_time: params.recall_date_time.clone(),
        });

        contract.phase = new_phase;
        contract.status = params.status;
        contract.updated_at = now;
        if params.recall_date_time.is_some() {
            contract.recall_date_time = params.recall_date_time;
        }

        let updated = contract.clone();
        self.contracts.save(&contracts)?;
        Ok(updated)
    }

    /// Per-phase counts, optionally scoped to one agency.
    pub fn stats_by_phase(&self, agency_code: Option<&str>) -> PhaseStats {
        let mut contracts = self.contracts.load();
        if let Some(code) = agency_code {
            contracts.retain(|c| c.extra_str("agencyCode") == Some(code));
        }
        stats::phase_counts(&contracts)
    }
}
