//! Commands that read or seed the local store.
//!
//! These open the same `local_storage.json` the storefront uses. The file is
//! re-read before every write, so a running storefront keeps what `seed`
//! adds, but avoid seeding while a visitor is signing up or paying: two
//! processes writing in the same instant can still lose one write.
//!
//! # Usage
//!
//! ```bash
//! insura-cli seed
//! insura-cli --data-dir ./data users list
//! insura-cli history list
//! ```

use std::path::Path;

use insura_core::Rupiah;
use insura_storefront::store::{
    HistoryRepository, JsonFileStore, LocalStorage, StoreError, UserRepository, seed_demo_user,
};
use tracing::info;

fn open(data_dir: &Path) -> Result<LocalStorage, StoreError> {
    let store = JsonFileStore::open(data_dir)?;
    info!(path = %store.path().display(), "Opened local store");
    Ok(LocalStorage::new(store))
}

/// Seed the demo account.
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be opened or written.
pub fn seed(data_dir: &Path) -> Result<(), StoreError> {
    let storage = open(data_dir)?;

    if seed_demo_user(&storage)? {
        info!("Demo user created: demo@insura.com / password123");
    } else {
        info!("Demo user already registered");
    }

    Ok(())
}

/// Print every registered user.
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be opened.
pub fn list_users(data_dir: &Path) -> Result<(), StoreError> {
    let storage = open(data_dir)?;
    let users = UserRepository::new(&storage).list();

    info!("Registered users: {}", users.len());
    for user in &users {
        info!("  {} | {} | {}", user.email, user.name, user.phone);
    }

    Ok(())
}

/// Print every paid invoice, newest first.
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be opened.
pub fn list_history(data_dir: &Path) -> Result<(), StoreError> {
    let storage = open(data_dir)?;
    let records = HistoryRepository::new(&storage).list();

    info!("Invoices: {}", records.len());
    for record in &records {
        info!(
            "  {} | {} | {} | {} | {} | {}",
            record.id,
            record.product,
            record.product_type.label(),
            record.date.to_rfc3339(),
            Rupiah::from_whole(record.price),
            record.status
        );
    }

    Ok(())
}
