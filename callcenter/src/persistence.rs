//! Typed repositories over the flat-file store, plus first-boot seeding.
//!
//! ## Layout
//!
//! ```text
//! {data_dir}/
//!   contracts.json   [Contract]  (seeded empty)
//!   users.json       [User]      (seeded with four fixed accounts)
//! ```

use std::path::Path;

use desk_store::{JsonFile, StoreError};

use crate::models::{Contract, Role, User};

pub const CONTRACTS_FILE: &str = "contracts.json";
pub const USERS_FILE: &str = "users.json";

/// Repository for the contract collection.
///
/// Read failures (missing or malformed file) degrade to an empty
/// collection rather than failing the request.
pub struct ContractStore {
    file: JsonFile,
}

impl ContractStore {
    /// Open the store, materializing an empty collection on first boot.
    pub fn new(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir)?;
        let file = JsonFile::new(data_dir.join(CONTRACTS_FILE));
        if !file.exists() {
            file.load_or_init(Vec::<Contract>::new)?;
            tracing::info!("{CONTRACTS_FILE} initialized");
        }
        Ok(Self { file })
    }

    pub fn load(&self) -> Vec<Contract> {
        self.file.load_or_default()
    }

    pub fn save(&self, contracts: &[Contract]) -> Result<(), StoreError> {
        self.file.save(contracts)
    }
}

/// Repository for the static login accounts.
pub struct UserStore {
    file: JsonFile,
}

impl UserStore {
    /// Open the store, seeding the fixed accounts on first boot.
    pub fn new(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir)?;
        let file = JsonFile::new(data_dir.join(USERS_FILE));
        if !file.exists() {
            let users = file.load_or_init(seed_users)?;
            tracing::info!("{USERS_FILE} initialized ({} accounts)", users.len());
        }
        Ok(Self { file })
    }

    pub fn load(&self) -> Vec<User> {
        self.file.load_or_default()
    }
}

/// The four accounts created at first boot. No endpoint mutates them.
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: "admin".to_string(),
            password: "AiComp@2025!Admin".to_string(),
            role: Role::Admin,
            name: "管理者".to_string(),
            agency_code: None,
        },
        User {
            id: "staff".to_string(),
            password: "AiComp@2025!Staff".to_string(),
            role: Role::Staff,
            name: "スタッフ".to_string(),
            agency_code: None,
        },
        User {
            id: "agency_a".to_string(),
            password: "AgencyA@2025!".to_string(),
            role: Role::Agency,
            name: "A代理店".to_string(),
            agency_code: Some("AIC00001".to_string()),
        },
        User {
            id: "agency_b".to_string(),
            password: "AgencyB@2025!".to_string(),
            role: Role::Agency,
            name: "B代理店".to_string(),
            agency_code: Some("AIC00002".to_string()),
        },
    ]
}
