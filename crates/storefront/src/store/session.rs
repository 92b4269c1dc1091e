//! The persisted login session (`insura_session_v1`).
//!
//! One value per store: the email of whoever logged in last. It is global to
//! the data directory, the way a browser profile's local storage is.

use super::{LocalStorage, StoreError, keys};

/// Repository for the logged-in email.
pub struct SessionRepository<'a> {
    storage: &'a LocalStorage,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(storage: &'a LocalStorage) -> Self {
        Self { storage }
    }

    /// Email of the logged-in user, if any.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.storage
            .get_raw(keys::SESSION)
            .filter(|email| !email.is_empty())
    }

    /// Record `email` as logged in, replacing any previous session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set(&self, email: &str) -> Result<(), StoreError> {
        self.storage.set_raw(keys::SESSION, email)
    }

    /// Log out. Clearing an empty session is fine.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(keys::SESSION)
    }
}
