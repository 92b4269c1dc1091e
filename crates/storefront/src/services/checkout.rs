//! Checkout and payment.
//!
//! The purchase draft lives in the visitor's tower-sessions session under
//! [`session_keys::CURRENT_PURCHASE`]; paid invoices go to the local store.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tower_sessions::Session;

use insura_core::purchase::{
    CheckoutSummary, DraftStage, HistoryRecord, PurchaseDraft, PurchaseError,
};

use crate::models::session_keys;
use crate::store::{HistoryRepository, LocalStorage, SessionRepository, StoreError};

/// Errors from checkout and payment.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nobody is logged in.
    #[error("You must log in to check out.")]
    NotLoggedIn,

    /// Checkout was requested before any premium was calculated.
    #[error("Calculate the premium first.")]
    NoDraft,

    /// Payment was requested with no checked-out draft in the session.
    #[error("No active purchase.")]
    NoActivePurchase,

    /// The draft could not be turned into an invoice.
    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    /// Local store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Session store error.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Checkout service.
pub struct CheckoutService<'a> {
    session: SessionRepository<'a>,
    history: HistoryRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(storage: &'a LocalStorage) -> Self {
        Self {
            session: SessionRepository::new(storage),
            history: HistoryRepository::new(storage),
        }
    }

    /// Move a draft to the checked-out stage and summarize it.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotLoggedIn` without a login session and
    /// `CheckoutError::NoDraft` without a draft.
    pub fn check_out(
        &self,
        draft: Option<PurchaseDraft>,
    ) -> Result<(PurchaseDraft, CheckoutSummary), CheckoutError> {
        if self.session.current().is_none() {
            return Err(CheckoutError::NotLoggedIn);
        }
        let mut draft = draft.ok_or(CheckoutError::NoDraft)?;
        let summary = draft.check_out();
        Ok((draft, summary))
    }

    /// Pay for a checked-out draft: record the invoice at the top of the
    /// history.
    ///
    /// The login is checked when the draft is checked out, so paying only
    /// needs a draft that got that far.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NoActivePurchase` without a draft or with one
    /// still in the `Drafted` stage. Nothing is written to the history on
    /// any error.
    pub fn pay(
        &self,
        draft: Option<PurchaseDraft>,
        paid_at: DateTime<Utc>,
    ) -> Result<HistoryRecord, CheckoutError> {
        let draft = active_purchase(draft).ok_or(CheckoutError::NoActivePurchase)?;
        self.history
            .prepend_with(|newest| Ok(draft.into_invoice(paid_at, newest)?))
    }
}

/// Keep a draft only once it has been checked out.
#[must_use]
pub fn active_purchase(draft: Option<PurchaseDraft>) -> Option<PurchaseDraft> {
    draft.filter(|draft| draft.stage == DraftStage::CheckedOut)
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the purchase draft from the session.
///
/// A draft that cannot be decoded is treated as absent.
pub async fn load_draft(session: &Session) -> Option<PurchaseDraft> {
    match session
        .get::<PurchaseDraft>(session_keys::CURRENT_PURCHASE)
        .await
    {
        Ok(draft) => draft,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable purchase draft in session");
            None
        }
    }
}

/// Store the purchase draft in the session, replacing any previous one.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_draft(
    session: &Session,
    draft: &PurchaseDraft,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_PURCHASE, draft).await
}

/// Remove the purchase draft from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_draft(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<PurchaseDraft>(session_keys::CURRENT_PURCHASE)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use insura_core::catalog;
    use insura_core::purchase::Quote;
    use insura_core::quote::{LifeQuoteInput, quote_life};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    fn life_draft() -> PurchaseDraft {
        let input = LifeQuoteInput {
            name: "Andi".to_string(),
            date_of_birth: "1981-06-15".to_string(),
            coverage: Decimal::from(100_000_000),
        };
        let quote = quote_life(&input, now()).unwrap();
        PurchaseDraft::new(catalog::find("life-1").unwrap(), Quote::Life(quote)).unwrap()
    }

    fn checked_out_draft() -> PurchaseDraft {
        let mut draft = life_draft();
        draft.check_out();
        draft
    }

    #[test]
    fn test_check_out_requires_login() {
        let storage = LocalStorage::in_memory();
        let checkout = CheckoutService::new(&storage);
        assert!(matches!(
            checkout.check_out(Some(life_draft())).unwrap_err(),
            CheckoutError::NotLoggedIn
        ));
    }

    #[test]
    fn test_check_out_requires_draft() {
        let storage = LocalStorage::in_memory();
        SessionRepository::new(&storage).set("demo@insura.com").unwrap();
        let checkout = CheckoutService::new(&storage);
        assert!(matches!(
            checkout.check_out(None).unwrap_err(),
            CheckoutError::NoDraft
        ));
    }

    #[test]
    fn test_check_out_summarizes() {
        let storage = LocalStorage::in_memory();
        SessionRepository::new(&storage).set("demo@insura.com").unwrap();
        let checkout = CheckoutService::new(&storage);

        let (draft, summary) = checkout.check_out(Some(life_draft())).unwrap();
        assert_eq!(draft.stage, DraftStage::CheckedOut);
        assert!(summary.to_string().contains("Premium per month: Rp 3.333.333"));
    }

    #[test]
    fn test_pay_records_invoice() {
        let storage = LocalStorage::in_memory();
        let checkout = CheckoutService::new(&storage);

        let record = checkout.pay(Some(checked_out_draft()), now()).unwrap();
        assert_eq!(record.price, 40_000_000);
        assert_eq!(record.product, "LifeGuard 1");

        let history = HistoryRepository::new(&storage).list();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], record);
    }

    #[test]
    fn test_pay_without_draft_writes_nothing() {
        let storage = LocalStorage::in_memory();
        let checkout = CheckoutService::new(&storage);

        assert!(matches!(
            checkout.pay(None, now()).unwrap_err(),
            CheckoutError::NoActivePurchase
        ));
        assert!(HistoryRepository::new(&storage).list().is_empty());
    }

    #[test]
    fn test_pay_rejects_draft_not_checked_out() {
        let storage = LocalStorage::in_memory();
        let checkout = CheckoutService::new(&storage);

        assert!(matches!(
            checkout.pay(Some(life_draft()), now()).unwrap_err(),
            CheckoutError::NoActivePurchase
        ));
        assert!(HistoryRepository::new(&storage).list().is_empty());
    }

    #[test]
    fn test_active_purchase_keeps_only_checked_out() {
        assert!(active_purchase(None).is_none());
        assert!(active_purchase(Some(life_draft())).is_none());
        assert!(active_purchase(Some(checked_out_draft())).is_some());
    }

    #[test]
    fn test_same_millisecond_payments_get_distinct_ids() {
        let storage = LocalStorage::in_memory();
        let checkout = CheckoutService::new(&storage);

        let first = checkout.pay(Some(checked_out_draft()), now()).unwrap();
        let second = checkout.pay(Some(checked_out_draft()), now()).unwrap();
        assert!(second.id > first.id);

        let history = HistoryRepository::new(&storage).list();
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].id, first.id);
    }
}
