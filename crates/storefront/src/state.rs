//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::store::{JsonFileStore, LocalStorage, StoreError, seed_demo_user};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the local store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storage: LocalStorage,
}

impl AppState {
    /// Create application state over an already opened store.
    ///
    /// Seeds the demo user when `config.seed_demo_user` is set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if seeding fails.
    pub fn new(config: StorefrontConfig, storage: LocalStorage) -> Result<Self, StoreError> {
        if config.seed_demo_user && seed_demo_user(&storage)? {
            tracing::info!("Seeded demo user");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { config, storage }),
        })
    }

    /// Open the JSON file store in the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be opened or seeded.
    pub fn open(config: StorefrontConfig) -> Result<Self, StoreError> {
        let store = JsonFileStore::open(&config.data_dir)?;
        tracing::info!(path = %store.path().display(), "Local store opened");
        Self::new(config, LocalStorage::new(store))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the local store.
    #[must_use]
    pub fn storage(&self) -> &LocalStorage {
        &self.inner.storage
    }
}
