//! Purchase history (`insura_history_v1`), newest first.

use insura_core::InvoiceId;
use insura_core::purchase::HistoryRecord;

use super::{LocalStorage, StoreError, keys};

/// Repository for paid invoices.
pub struct HistoryRepository<'a> {
    storage: &'a LocalStorage,
}

impl<'a> HistoryRepository<'a> {
    /// Create a new history repository.
    #[must_use]
    pub const fn new(storage: &'a LocalStorage) -> Self {
        Self { storage }
    }

    /// All invoices, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<HistoryRecord> {
        self.storage.read_json(keys::HISTORY)
    }

    /// Build a record from the newest existing invoice ID and prepend it.
    ///
    /// The store stays locked while `build` runs, so IDs handed to it are
    /// never stale.
    ///
    /// # Errors
    ///
    /// Returns whatever `build` returns, or a `StoreError` (converted into
    /// `E`) if the history cannot be written. Nothing is written on error.
    pub fn prepend_with<E, F>(&self, build: F) -> Result<HistoryRecord, E>
    where
        F: FnOnce(Option<InvoiceId>) -> Result<HistoryRecord, E>,
        E: From<StoreError>,
    {
        let _guard = self.storage.lock();

        let mut records = self.list();
        let newest = records.iter().map(|r| r.id).max();
        let record = build(newest)?;

        records.insert(0, record.clone());
        self.storage.write_json(keys::HISTORY, &records)?;

        tracing::info!(
            invoice_id = %record.id,
            product = %record.product,
            price = record.price,
            "Invoice recorded"
        );
        Ok(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use insura_core::{InvoiceStatus, ProductType};

    use super::*;

    fn record(id: InvoiceId, product: &str) -> HistoryRecord {
        HistoryRecord {
            id,
            product: product.to_string(),
            product_type: ProductType::Car,
            date: Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap(),
            price: 6_000_000,
            status: InvoiceStatus::Paid,
        }
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let storage = LocalStorage::in_memory();
        let history = HistoryRepository::new(&storage);

        history
            .prepend_with::<StoreError, _>(|newest| {
                assert_eq!(newest, None);
                Ok(record(InvoiceId::from_millis(10), "Comfy Auto 1"))
            })
            .unwrap();
        history
            .prepend_with::<StoreError, _>(|newest| {
                assert_eq!(newest, Some(InvoiceId::from_millis(10)));
                Ok(record(InvoiceId::from_millis(11), "Comfy Auto 2"))
            })
            .unwrap();

        let list = history.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].product, "Comfy Auto 2");
        assert_eq!(list[1].product, "Comfy Auto 1");
    }

    #[test]
    fn test_failed_build_writes_nothing() {
        let storage = LocalStorage::in_memory();
        let history = HistoryRepository::new(&storage);

        let result = history.prepend_with(|_| {
            Err(StoreError::Conflict("nope".to_string()))
        });
        assert!(result.is_err());
        assert!(history.list().is_empty());
        assert_eq!(storage.get_raw(keys::HISTORY), None);
    }

    #[test]
    fn test_stored_shape() {
        let storage = LocalStorage::in_memory();
        HistoryRepository::new(&storage)
            .prepend_with::<StoreError, _>(|_| {
                Ok(record(InvoiceId::from_millis(1_760_000_000_000), "Comfy Auto 1"))
            })
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&storage.get_raw(keys::HISTORY).unwrap()).unwrap();
        assert_eq!(raw[0]["id"], "INV1760000000000");
        assert_eq!(raw[0]["type"], "car");
        assert_eq!(raw[0]["price"], 6_000_000);
        assert_eq!(raw[0]["status"], "Paid");
    }
}
