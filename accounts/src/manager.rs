//! `AccountManager` — orchestrates account CRUD, payment-status import
//! and interaction history.
//!
//! Every operation is a full read-modify-write cycle against the backing
//! file. Storage failures (including malformed JSON) surface as request
//! errors here, unlike the call-center service.

use std::path::Path;

use chrono::{TimeDelta, Utc};
use desk_store::StoreError;

use crate::models::{Account, InteractionRecord, LAST_VIEWED_SENTINEL};
use crate::persistence::{AccountStore, HistoryStore};
use crate::protocol::{
    AccountParams, AccountStats, AccountWithUnread, ImportPaymentStatusParams, InteractionParams,
    DEFAULT_PAYMENT_STATUS,
};
use crate::stats;

/// Fixed id prefix; the 4-digit suffix is derived from the collection.
pub const ID_PREFIX: &str = "AC-2025-";

/// Error type for manager operations. Messages are the wire messages.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("契約が見つかりません")]
    AccountNotFound,

    #[error("対応履歴が見つかりません")]
    RecordNotFound,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

pub struct AccountManager {
    accounts: AccountStore,
    history: HistoryStore,
}

/// Current instant in local civil time at a fixed UTC+9 offset (no DST),
/// formatted zero-padded fixed-width so string order is time order.
fn now_local() -> String {
    (Utc::now() + TimeDelta::hours(9))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Derive the next id from the last element's numeric suffix.
///
/// Not a persisted counter: deleting the tail account makes its suffix
/// reusable on the next create.
fn next_account_id(accounts: &[Account]) -> String {
    let last_suffix = accounts
        .last()
        .and_then(|a| a.id.rsplit('-').next())
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0);
    format!("{ID_PREFIX}{:04}", last_suffix + 1)
}

fn account_from_params(id: String, params: AccountParams) -> Account {
    Account {
        id,
        company_name: params.company_name,
        contact_name: params.contact_name,
        email: params.email,
        phone: params.phone,
        plan: params.plan,
        monthly_fee: params.monthly_fee,
        contract_date: params.contract_date,
        billing_start_date: params.billing_start_date,
        status: params.status,
        payment_status: params
            .payment_status
            .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
        payment_method: params.payment_method,
        last_history_viewed: params
            .last_history_viewed
            .unwrap_or_else(|| LAST_VIEWED_SENTINEL.to_string()),
    }
}

impl AccountManager {
    /// Open both stores, seeding them on first boot.
    pub fn new(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            accounts: AccountStore::new(data_dir)?,
            history: HistoryStore::new(data_dir)?,
        })
    }

    /// All accounts, each with its computed unread counter.
    pub fn list(&self) -> Result<Vec<AccountWithUnread>, ManagerError> {
        let accounts = self.accounts.load()?;
        let history = self.history.load()?;
        Ok(accounts
            .into_iter()
            .map(|account| {
                let unread_history_count = stats::unread_count(&account, &history);
                AccountWithUnread {
                    account,
                    unread_history_count,
                }
            })
            .collect())
    }

    pub fn get(&self, id: &str) -> Result<Account, ManagerError> {
        self.accounts
            .load()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(ManagerError::AccountNotFound)
    }

    /// Register a new account with a server-assigned sequential id.
    pub fn create(&self, params: AccountParams) -> Result<Account, ManagerError> {
        let mut accounts = self.accounts.load()?;
        let account = account_from_params(next_account_id(&accounts), params);
        accounts.push(account.clone());
        self.accounts.save(&accounts)?;
        Ok(account)
    }

    /// Replace the record wholesale, keeping only the id. Fields the
    /// caller omits fall back to defaults, not to the previous record.
    pub fn replace(&self, id: &str, params: AccountParams) -> Result<Account, ManagerError> {
        let mut accounts = self.accounts.load()?;
        let index = accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or(ManagerError::AccountNotFound)?;

        let account = account_from_params(id.to_string(), params);
        accounts[index] = account.clone();
        self.accounts.save(&accounts)?;
        Ok(account)
    }

    pub fn delete(&self, id: &str) -> Result<(), ManagerError> {
        let mut accounts = self.accounts.load()?;
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        if accounts.len() == before {
            return Err(ManagerError::AccountNotFound);
        }
        self.accounts.save(&accounts)?;
        Ok(())
    }

    /// Bulk payment-status update keyed by an id list. Unknown ids are
    /// skipped; returns the number of records touched.
    pub fn import_payment_status(
        &self,
        params: ImportPaymentStatusParams,
    ) -> Result<usize, ManagerError> {
        let mut accounts = self.accounts.load()?;
        let mut updated = 0;
        for account in &mut accounts {
            if params.ids.iter().any(|id| *id == account.id) {
                account.payment_status = params.payment_status.clone();
                updated += 1;
            }
        }
        self.accounts.save(&accounts)?;
        Ok(updated)
    }

    /// Interaction records for one account, in insertion order.
    pub fn list_history(&self, account_id: &str) -> Result<Vec<InteractionRecord>, ManagerError> {
        self.get(account_id)?;
        let history = self.history.load()?;
        Ok(history
            .into_iter()
            .filter(|h| h.account_id == account_id)
            .collect())
    }

    /// Append an interaction record stamped with the current local time.
    pub fn append_history(
        &self,
        account_id: &str,
        params: InteractionParams,
    ) -> Result<InteractionRecord, ManagerError> {
        self.get(account_id)?;
        let mut history = self.history.load()?;
        let record = InteractionRecord {
            id: format!("HIS{}", Utc::now().timestamp_millis()),
            account_id: account_id.to_string(),
            author: params.author.unwrap_or_else(|| "system".to_string()),
            content: params.content,
            created_at: now_local(),
        };
        history.push(record.clone());
        self.history.save(&history)?;
        Ok(record)
    }

    pub fn delete_history(&self, account_id: &str, history_id: &str) -> Result<(), ManagerError> {
        let mut history = self.history.load()?;
        let before = history.len();
        history.retain(|h| !(h.id == history_id && h.account_id == account_id));
        if history.len() == before {
            return Err(ManagerError::RecordNotFound);
        }
        self.history.save(&history)?;
        Ok(())
    }

    /// Move the account's last-viewed marker to now.
    pub fn mark_read(&self, id: &str) -> Result<Account, ManagerError> {
        let mut accounts = self.accounts.load()?;
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(ManagerError::AccountNotFound)?;
        account.last_history_viewed = now_local();
        let updated = account.clone();
        self.accounts.save(&accounts)?;
        Ok(updated)
    }

    pub fn stats(&self) -> Result<AccountStats, ManagerError> {
        let accounts = self.accounts.load()?;
        Ok(stats::account_stats(&accounts))
    }
}
