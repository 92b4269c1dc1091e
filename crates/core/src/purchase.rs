//! Purchase drafts, checkout summaries, and invoice records.
//!
//! A visitor holds at most one [`PurchaseDraft`]: the quote they most
//! recently computed, tied to the product they computed it for. Checking out
//! moves the draft to [`DraftStage::CheckedOut`] and produces a
//! [`CheckoutSummary`]; paying turns it into a [`HistoryRecord`].
//!
//! ```text
//! NoDraft --quote--> Drafted --checkout--> CheckedOut --pay--> NoDraft
//!            ^          |  ^                   |
//!            +--quote---+  +------quote--------+
//! ```

use core::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::quote::{CarQuote, HealthQuote, LifeQuote};
use crate::types::{InvoiceId, InvoiceStatus, ProductId, ProductType, Rupiah};

/// Errors raised while building drafts or invoices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// The quote belongs to a different product line than the product.
    #[error("a {quote} quote cannot be used for a {product} product")]
    ProductMismatch {
        product: ProductType,
        quote: ProductType,
    },

    /// The annualized price does not fit in a whole-rupiah integer.
    #[error("amount is too large to invoice")]
    AmountOutOfRange,
}

/// A computed quote for one of the three product lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Quote {
    Car(CarQuote),
    Health(HealthQuote),
    Life(LifeQuote),
}

impl Quote {
    /// Product line this quote was computed for.
    #[must_use]
    pub const fn product_type(&self) -> ProductType {
        match self {
            Self::Car(_) => ProductType::Car,
            Self::Health(_) => ProductType::Health,
            Self::Life(_) => ProductType::Life,
        }
    }

    /// Derived age: vehicle age for car quotes, policyholder age otherwise.
    #[must_use]
    pub const fn age(&self) -> i32 {
        match self {
            Self::Car(q) => q.age,
            Self::Health(q) => q.age,
            Self::Life(q) => q.age,
        }
    }

    /// The quoted premium: per year for car and health, per month for life.
    #[must_use]
    pub const fn premium(&self) -> Rupiah {
        match self {
            Self::Car(q) => q.annual_premium,
            Self::Health(q) => q.annual_premium,
            Self::Life(q) => q.monthly_premium,
        }
    }

    /// Price charged at payment, in whole rupiah per year.
    ///
    /// Car and health premiums are rounded as-is; the life premium is
    /// multiplied by twelve before rounding.
    ///
    /// # Errors
    ///
    /// Returns `PurchaseError::AmountOutOfRange` if the amount overflows `i64`.
    pub fn annualized_price(&self) -> Result<i64, PurchaseError> {
        let yearly = match self {
            Self::Car(q) => q.annual_premium,
            Self::Health(q) => q.annual_premium,
            Self::Life(q) => Rupiah::new(
                q.monthly_premium
                    .amount()
                    .checked_mul(Decimal::from(12))
                    .ok_or(PurchaseError::AmountOutOfRange)?,
            ),
        };
        yearly.to_whole().ok_or(PurchaseError::AmountOutOfRange)
    }

    /// One-line result shown under the calculator.
    #[must_use]
    pub fn result_message(&self) -> String {
        match self {
            Self::Car(q) => format!(
                "Car age: {} years. Premium per year: {}.",
                q.age,
                q.annual_premium.display_whole()
            ),
            Self::Health(q) => format!(
                "Age: {} years. Premium per year: {}.",
                q.age,
                q.annual_premium.display_whole()
            ),
            Self::Life(q) => format!(
                "Age: {} years. Premium per month: {} (m={}%).",
                q.age,
                q.monthly_premium.display_whole(),
                q.multiplier_percent
            ),
        }
    }
}

/// How far a draft has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStage {
    #[default]
    Drafted,
    CheckedOut,
}

/// The purchase a visitor is currently configuring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseDraft {
    pub product_id: ProductId,
    pub product_title: String,
    pub quote: Quote,
    pub stage: DraftStage,
}

impl PurchaseDraft {
    /// Start a draft for `product` from a freshly computed quote.
    ///
    /// # Errors
    ///
    /// Returns `PurchaseError::ProductMismatch` if the quote is for another
    /// product line.
    pub fn new(product: &Product, quote: Quote) -> Result<Self, PurchaseError> {
        if quote.product_type() != product.product_type {
            return Err(PurchaseError::ProductMismatch {
                product: product.product_type,
                quote: quote.product_type(),
            });
        }

        Ok(Self {
            product_id: product.id.clone(),
            product_title: product.title.clone(),
            quote,
            stage: DraftStage::Drafted,
        })
    }

    /// Product line of the draft.
    #[must_use]
    pub const fn product_type(&self) -> ProductType {
        self.quote.product_type()
    }

    /// Move to the checked-out stage and describe what is being bought.
    pub fn check_out(&mut self) -> CheckoutSummary {
        self.stage = DraftStage::CheckedOut;
        self.summary()
    }

    /// Describe what is being bought, specific to the product line.
    #[must_use]
    pub fn summary(&self) -> CheckoutSummary {
        let mut lines = vec![SummaryLine::new("Product", &self.product_title)];
        match &self.quote {
            Quote::Car(q) => {
                let make = [q.brand.as_str(), q.model.as_str()]
                    .into_iter()
                    .find(|s| !s.is_empty())
                    .unwrap_or("-");
                lines.push(SummaryLine::new("Brand/Model", make));
                lines.push(SummaryLine::new("Year", q.manufacture_year));
                lines.push(SummaryLine::new("Car price", q.declared_price));
                lines.push(SummaryLine::new(
                    "Premium per year",
                    q.annual_premium.display_whole(),
                ));
            }
            Quote::Health(q) => {
                lines.push(SummaryLine::new("Name", &q.name));
                lines.push(SummaryLine::new("Age", q.age));
                lines.push(SummaryLine::new(
                    "Premium per year",
                    q.annual_premium.display_whole(),
                ));
            }
            Quote::Life(q) => {
                lines.push(SummaryLine::new("Name", &q.name));
                lines.push(SummaryLine::new("Coverage", q.coverage));
                lines.push(SummaryLine::new(
                    "Premium per month",
                    q.monthly_premium.display_whole(),
                ));
            }
        }
        CheckoutSummary { lines }
    }

    /// Turn the draft into a paid invoice.
    ///
    /// `newest` is the most recent invoice ID already in history, used to keep
    /// IDs strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns `PurchaseError::AmountOutOfRange` if the price cannot be
    /// annualized into an integer.
    pub fn into_invoice(
        self,
        paid_at: DateTime<Utc>,
        newest: Option<InvoiceId>,
    ) -> Result<HistoryRecord, PurchaseError> {
        let price = self.quote.annualized_price()?;

        Ok(HistoryRecord {
            id: InvoiceId::next(paid_at.timestamp_millis(), newest),
            product: self.product_title,
            product_type: self.quote.product_type(),
            date: paid_at,
            price,
            status: InvoiceStatus::Paid,
        })
    }
}

/// A labelled line of the checkout summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

impl SummaryLine {
    fn new(label: &'static str, value: impl fmt::Display) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

/// Textual checkout summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub lines: Vec<SummaryLine>,
}

impl fmt::Display for CheckoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}: {}", line.label, line.value)?;
        }
        Ok(())
    }
}

/// A completed (simulated) payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: InvoiceId,
    /// Product title at the time of payment.
    pub product: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub date: DateTime<Utc>,
    /// Annualized price in whole rupiah.
    pub price: i64,
    pub status: InvoiceStatus,
}
