//! Persistent local store.
//!
//! The storefront keeps all durable state in a small key-value store, one
//! string value per key, modelled on a browser's local storage:
//!
//! - `insura_users_v1` - JSON array of registered users
//! - `insura_session_v1` - email of the logged-in user (plain string)
//! - `insura_history_v1` - JSON array of invoices, newest first
//!
//! [`LocalStorage`] wraps a [`KeyValueStore`] backend and adds JSON helpers
//! plus a write lock. Repositories borrow it the same way they would borrow a
//! connection pool:
//!
//! ```rust,ignore
//! let users = UserRepository::new(state.storage());
//! let user = users.find_by_email("demo@insura.com");
//! ```
//!
//! Values that cannot be read or decoded are treated as empty and logged;
//! write failures are returned as [`StoreError`].

pub mod file;
pub mod history;
pub mod memory;
pub mod session;
pub mod users;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::JsonFileStore;
pub use history::HistoryRepository;
pub use memory::MemoryStore;
pub use session::SessionRepository;
pub use users::{DEMO_USER_EMAIL, UserRepository, seed_demo_user};

/// Storage keys.
pub mod keys {
    /// Registered users.
    pub const USERS: &str = "insura_users_v1";

    /// Logged-in user's email.
    pub const SESSION: &str = "insura_session_v1";

    /// Purchase history, newest first.
    pub const HISTORY: &str = "insura_history_v1";
}

/// Errors from the local store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A unique key already exists.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// A string key-value store with local-storage semantics.
///
/// Implementations must be safe to share between request handlers.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Shared handle to the local store.
///
/// Cheap to clone; all clones see the same backend and share one write lock.
#[derive(Clone)]
pub struct LocalStorage {
    backend: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorage").finish_non_exhaustive()
    }
}

impl LocalStorage {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// An empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Get a raw value, logging and hiding read failures.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read local store");
                None
            }
        }
    }

    /// Store a raw value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.backend.set(key, value)
    }

    /// Remove a value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.backend.remove(key)
    }

    /// Read a JSON collection, falling back to the default when the value is
    /// missing or cannot be decoded.
    #[must_use]
    pub fn read_json<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.get_raw(key) else {
            return T::default();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Corrupt value in local store, treating as empty");
            T::default()
        })
    }

    /// Encode `value` as JSON and store it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or writing fails.
    pub fn write_json<T>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    /// Serialize read-modify-write sequences.
    ///
    /// Hold the guard for the whole sequence and never across an `.await`.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
