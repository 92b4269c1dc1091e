//! JSON file backend.
//!
//! The whole store is one JSON object (`{"key": "value", ...}`) in
//! `<data_dir>/local_storage.json`. Every operation reads the file afresh,
//! and every change rewrites it through a temporary file and a rename, so a
//! crash mid-write leaves the previous contents in place.
//!
//! Re-reading before each read-modify-write means several handles on one
//! directory (the storefront and the CLI, say) see and keep each other's
//! writes. Two processes writing in the same instant can still race; the
//! lock here only serializes handles within one process.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::{KeyValueStore, StoreError};

/// File name inside the data directory.
pub const FILE_NAME: &str = "local_storage.json";

/// Key-value store persisted as a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (or create) the store in `data_dir`.
    ///
    /// A file that exists but is not a JSON object of strings is logged and
    /// treated as empty; it is replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created or the
    /// file cannot be read.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;

        let store = Self {
            path: data_dir.join(FILE_NAME),
            lock: Mutex::new(()),
        };
        let keys = store.load()?.len();

        tracing::debug!(path = %store.path.display(), keys, "Opened local store");
        Ok(store)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "Local store file is corrupt, treating as empty");
                BTreeMap::new()
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.load()?;
        if values.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&values)
    }
}
