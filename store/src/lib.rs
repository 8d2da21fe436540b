//! Flat-file JSON persistence shared by the desk services.
//!
//! Each collection is one JSON document at a fixed path. Every read loads
//! the whole file; every write replaces the whole file via a `.tmp`
//! sibling and a rename. There is no file locking: concurrent writers
//! race on the read-modify-write cycle and the later save wins.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors from the flat-file store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("file not found: {path}")]
    NotFound { path: String },
}

/// Handle to a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Atomically write `data` via a `.tmp` sibling.
    fn atomic_write(&self, data: &[u8]) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read and parse the document. Missing file is `NotFound`; malformed
    /// content surfaces as `Serde`.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound {
                path: self.path.display().to_string(),
            });
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Read the document, materializing `init()` on first access.
    ///
    /// Create-if-absent, not create-or-merge: an existing file is loaded
    /// as-is and the initializer is never consulted.
    pub fn load_or_init<T>(&self, init: impl FnOnce() -> T) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        if self.path.exists() {
            return self.load();
        }
        let value = init();
        self.save(&value)?;
        Ok(value)
    }

    /// Read the document, degrading any failure to `T::default()`.
    ///
    /// Matches the call sites that treat an unreadable collection as
    /// empty rather than failing the request.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self) -> T {
        self.load().unwrap_or_default()
    }

    /// Serialize `value` as pretty JSON and replace the file wholesale.
    pub fn save<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(value)?;
        self.atomic_write(json.as_bytes())
    }
}
