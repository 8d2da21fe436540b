//! Aggregation over the account collection and the unread-history
//! counter.
//!
//! Both are pure functions recomputed from scratch on every call.

use std::collections::BTreeMap;

use crate::models::{Account, InteractionRecord};
use crate::protocol::AccountStats;

/// Account status that counts toward monthly revenue.
pub const ACTIVE_STATUS: &str = "有効";

/// Partition accounts by status and payment status; sum the monthly fee
/// over active accounts.
pub fn account_stats(accounts: &[Account]) -> AccountStats {
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_payment_status: BTreeMap<String, usize> = BTreeMap::new();
    for account in accounts {
        *by_status.entry(account.status.clone()).or_default() += 1;
        *by_payment_status
            .entry(account.payment_status.clone())
            .or_default() += 1;
    }

    let monthly_revenue = accounts
        .iter()
        .filter(|a| a.status == ACTIVE_STATUS)
        .map(|a| a.monthly_fee)
        .sum();

    AccountStats {
        total: accounts.len(),
        by_status,
        by_payment_status,
        monthly_revenue,
    }
}

/// Count interaction records newer than the account's last-viewed marker.
///
/// Strict string comparison; the fixed-width zero-padded timestamp format
/// makes lexicographic order equal to time order.
pub fn unread_count(account: &Account, history: &[InteractionRecord]) -> usize {
    history
        .iter()
        .filter(|h| {
            h.account_id == account.id
                && h.created_at.as_str() > account.last_history_viewed.as_str()
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LAST_VIEWED_SENTINEL;
    use pretty_assertions::assert_eq;

    fn account(id: &str, status: &str, payment_status: &str, fee: i64) -> Account {
        Account {
            id: id.to_string(),
            company_name: String::new(),
            contact_name: String::new(),
            email: String::new(),
            phone: String::new(),
            plan: String::new(),
            monthly_fee: fee,
            contract_date: String::new(),
            billing_start_date: String::new(),
            status: status.to_string(),
            payment_status: payment_status.to_string(),
            payment_method: String::new(),
            last_history_viewed: LAST_VIEWED_SENTINEL.to_string(),
        }
    }

    fn record(account_id: &str, created_at: &str) -> InteractionRecord {
        InteractionRecord {
            id: format!("HIS-{account_id}-{created_at}"),
            account_id: account_id.to_string(),
            author: "担当".to_string(),
            content: "連絡".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn stats_partition_sums_to_total() {
        let accounts = vec![
            account("AC-2025-0001", "有効", "支払済", 29800),
            account("AC-2025-0002", "有効", "未払い", 49800),
            account("AC-2025-0003", "保留中", "未払い", 9800),
            account("AC-2025-0004", "中断", "延滞", 29800),
        ];

        let stats = account_stats(&accounts);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_status.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_payment_status.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_status["有効"], 2);
        assert_eq!(stats.by_payment_status["未払い"], 2);
    }

    #[test]
    fn revenue_sums_active_accounts_only() {
        let accounts = vec![
            account("AC-2025-0001", "有効", "支払済", 29800),
            account("AC-2025-0002", "有効", "未払い", 49800),
            account("AC-2025-0003", "中断", "支払済", 9800),
        ];
        assert_eq!(account_stats(&accounts).monthly_revenue, 79600);
    }

    #[test]
    fn unread_counts_strictly_newer_records_for_one_account() {
        let mut acct = account("AC-2025-0001", "有効", "支払済", 29800);
        acct.last_history_viewed = "2025-08-30 12:00:00".to_string();

        let history = vec![
            record("AC-2025-0001", "2025-08-30 11:59:59"), // older
            record("AC-2025-0001", "2025-08-30 12:00:00"), // equal: not unread
            record("AC-2025-0001", "2025-08-30 12:00:01"), // newer
            record("AC-2025-0002", "2025-08-30 13:00:00"), // other account
        ];

        assert_eq!(unread_count(&acct, &history), 1);
    }

    #[test]
    fn sentinel_marker_counts_everything() {
        let acct = account("AC-2025-0001", "有効", "支払済", 29800);
        let history = vec![
            record("AC-2025-0001", "2025-08-30 09:00:00"),
            record("AC-2025-0001", "2025-08-30 10:00:00"),
        ];
        assert_eq!(unread_count(&acct, &history), 2);
    }
}
