//! Stored record types.
//!
//! The on-disk JSON shape is also the wire shape. Timestamps are local
//! civil time at a fixed UTC+9 offset, formatted `%Y-%m-%d %H:%M:%S`;
//! the format is zero-padded and fixed-width, so lexicographic string
//! comparison is time order.

use serde::{Deserialize, Serialize};

/// Far-past marker for accounts that never viewed their history.
pub const LAST_VIEWED_SENTINEL: &str = "1970-01-01 00:00:00";

fn last_viewed_sentinel() -> String {
    LAST_VIEWED_SENTINEL.to_string()
}

/// A customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub plan: String,
    /// Monthly fee in yen.
    pub monthly_fee: i64,
    pub contract_date: String,
    pub billing_start_date: String,
    /// Free text; `"有効"` counts as active for revenue aggregation.
    pub status: String,
    pub payment_status: String,
    pub payment_method: String,
    #[serde(default = "last_viewed_sentinel")]
    pub last_history_viewed: String,
}

/// One interaction-history record. Append-only, independently deletable
/// by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub id: String,
    pub account_id: String,
    pub author: String,
    pub content: String,
    pub created_at: String,
}
