//! Typed repositories over the flat-file store, plus first-boot seeding.
//!
//! ## Layout
//!
//! ```text
//! {data_dir}/
//!   accounts.json   [Account]            (seeded with five sample accounts)
//!   history.json    [InteractionRecord]  (seeded empty)
//! ```
//!
//! Unlike the call-center service, a malformed file here surfaces as a
//! storage error on the request rather than an empty collection.

use std::path::Path;

use desk_store::{JsonFile, StoreError};

use crate::models::{Account, InteractionRecord, LAST_VIEWED_SENTINEL};

pub const ACCOUNTS_FILE: &str = "accounts.json";
pub const HISTORY_FILE: &str = "history.json";

pub struct AccountStore {
    file: JsonFile,
}

impl AccountStore {
    /// Open the store, seeding the sample accounts on first boot.
    pub fn new(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir)?;
        let file = JsonFile::new(data_dir.join(ACCOUNTS_FILE));
        if !file.exists() {
            let accounts = file.load_or_init(seed_accounts)?;
            tracing::info!("{ACCOUNTS_FILE} initialized ({} accounts)", accounts.len());
        }
        Ok(Self { file })
    }

    pub fn load(&self) -> Result<Vec<Account>, StoreError> {
        self.file.load()
    }

    pub fn save(&self, accounts: &[Account]) -> Result<(), StoreError> {
        self.file.save(accounts)
    }
}

pub struct HistoryStore {
    file: JsonFile,
}

impl HistoryStore {
    pub fn new(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir)?;
        let file = JsonFile::new(data_dir.join(HISTORY_FILE));
        if !file.exists() {
            file.load_or_init(Vec::<InteractionRecord>::new)?;
            tracing::info!("{HISTORY_FILE} initialized");
        }
        Ok(Self { file })
    }

    pub fn load(&self) -> Result<Vec<InteractionRecord>, StoreError> {
        self.file.load()
    }

    pub fn save(&self, records: &[InteractionRecord]) -> Result<(), StoreError> {
        self.file.save(records)
    }
}

fn sample(
    id: &str,
    company_name: &str,
    contact_name: &str,
    email: &str,
    phone: &str,
    plan: &str,
    monthly_fee: i64,
    contract_date: &str,
    billing_start_date: &str,
    status: &str,
    payment_status: &str,
    payment_method: &str,
) -> Account {
    Account {
        id: id.to_string(),
        company_name: company_name.to_string(),
        contact_name: contact_name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        plan: plan.to_string(),
        monthly_fee,
        contract_date: contract_date.to_string(),
        billing_start_date: billing_start_date.to_string(),
        status: status.to_string(),
        payment_status: payment_status.to_string(),
        payment_method: payment_method.to_string(),
        last_history_viewed: LAST_VIEWED_SENTINEL.to_string(),
    }
}

/// The five sample accounts created at first boot.
pub fn seed_accounts() -> Vec<Account> {
    vec![
        sample(
            "AC-2025-0001",
            "株式会社山田商事",
            "山田太郎",
            "yamada@yamada-shoji.co.jp",
            "03-1234-5678",
            "スタンダード",
            29800,
            "2025-01-15",
            "2025-02-01",
            "有効",
            "支払済",
            "銀行振込",
        ),
        sample(
            "AC-2025-0002",
            "佐藤工業株式会社",
            "佐藤次郎",
            "sato@sato-kogyo.co.jp",
            "06-2345-6789",
            "プレミアム",
            49800,
            "2025-02-10",
            "2025-03-01",
            "有効",
            "未払い",
            "クレジットカード",
        ),
        sample(
            "AC-2025-0003",
            "鈴木電機株式会社",
            "鈴木三郎",
            "suzuki@suzuki-denki.co.jp",
            "052-345-6789",
            "ベーシック",
            9800,
            "2025-03-05",
            "2025-04-01",
            "保留中",
            "未払い",
            "銀行振込",
        ),
        sample(
            "AC-2025-0004",
            "有限会社田中製作所",
            "田中四郎",
            "tanaka@tanaka-seisakusho.co.jp",
            "011-456-7890",
            "スタンダード",
            29800,
            "2025-04-20",
            "2025-05-01",
            "有効",
            "延滞",
            "口座振替",
        ),
        sample(
            "AC-2025-0005",
            "高橋物産株式会社",
            "高橋五郎",
            "takahashi@takahashi-bussan.co.jp",
            "092-567-8901",
            "プレミアム",
            49800,
            "2025-05-12",
            "2025-06-01",
            "中断",
            "支払済",
            "クレジットカード",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_boot_seeds_five_accounts() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = AccountStore::new(tmp.path()).unwrap();
        let accounts = store.load().unwrap();
        assert_eq!(accounts.len(), 5);
        assert_eq!(accounts[0].id, "AC-2025-0001");
        assert_eq!(accounts[4].id, "AC-2025-0005");
        assert!(accounts
            .iter()
            .all(|a| a.last_history_viewed == LAST_VIEWED_SENTINEL));
    }

    #[test]
    fn malformed_accounts_file_is_a_storage_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = AccountStore::new(tmp.path()).unwrap();
        std::fs::write(tmp.path().join(ACCOUNTS_FILE), "{oops").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Serde(_))));
    }

    #[test]
    fn history_seeds_empty_and_roundtrips() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = HistoryStore::new(tmp.path()).unwrap();
        assert!(store.load().unwrap().is_empty());

        let record = InteractionRecord {
            id: "HIS1".to_string(),
            account_id: "AC-2025-0001".to_string(),
            author: "担当A".to_string(),
            content: "初回連絡".to_string(),
            created_at: "2025-08-30 10:00:00".to_string(),
        };
        store.save(&[record.clone()]).unwrap();
        assert_eq!(store.load().unwrap(), vec![record]);
    }
}
