//! API request/response types for the accounts service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Account;

/// Payment status assigned when the caller omits one.
pub const DEFAULT_PAYMENT_STATUS: &str = "未払い";

/// Account body for create and replace. Replace is a full replacement:
/// fields the caller omits fall back to these defaults, not to the
/// previous record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountParams {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub plan: String,
    pub monthly_fee: i64,
    pub contract_date: String,
    pub billing_start_date: String,
    pub status: String,
    pub payment_status: Option<String>,
    pub payment_method: String,
    pub last_history_viewed: Option<String>,
}

/// List payload: the account plus its computed unread counter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithUnread {
    #[serde(flatten)]
    pub account: Account,
    pub unread_history_count: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// POST /api/contracts/import-payment-status
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPaymentStatusParams {
    pub ids: Vec<String>,
    pub payment_status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportPaymentStatusResult {
    pub updated: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// POST /api/contracts/:id/history
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionParams {
    #[serde(default)]
    pub author: Option<String>,
    pub content: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /api/stats
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_payment_status: BTreeMap<String, usize>,
    /// Sum of `monthlyFee` over active accounts, in yen.
    pub monthly_revenue: i64,
}
