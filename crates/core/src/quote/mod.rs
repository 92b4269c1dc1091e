//! Premium calculators.
//!
//! Each product line has a pure calculator taking a typed input form and
//! returning either a quote (derived age plus premium) or a [`QuoteError`]
//! describing the first validation rule that failed.
//!
//! - [`car`] - annual premium from vehicle age and declared price
//! - [`health`] - annual premium from age bracket and risk flags
//! - [`life`] - monthly premium from age bracket and coverage
//!
//! Calculators never read the clock; callers pass the current year or
//! instant so results are reproducible.

pub mod car;
pub mod health;
pub mod life;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

pub use car::{CarQuote, CarQuoteInput, PhotoSlot, quote_car};
pub use health::{HealthQuote, HealthQuoteInput, RiskFlags, quote_health};
pub use life::{LifeQuote, LifeQuoteInput, quote_life};

/// Date format accepted for dates of birth (HTML `<input type="date">`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failures reported back to the quote form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// A required field is empty, or a required number is zero.
    #[error("All fields are required.")]
    MissingFields,

    /// One or more of the six vehicle photos was not uploaded.
    #[error("All photos must be uploaded.")]
    MissingPhotos(Vec<PhotoSlot>),

    /// The date of birth could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A risk flag was something other than 0 or 1.
    #[error("{flag} must be 0 or 1.")]
    InvalidRiskFlag {
        /// Which flag was invalid.
        flag: &'static str,
    },

    /// A monetary amount was negative.
    #[error("{field} must be a positive amount.")]
    NonPositiveAmount {
        /// Which field was invalid.
        field: &'static str,
    },

    /// The manufacture year lies after the current year.
    #[error("Manufacture year {year} cannot be in the future.")]
    FutureManufactureYear {
        /// The year entered on the form.
        year: i32,
    },
}

/// Parse a `YYYY-MM-DD` date of birth.
///
/// # Errors
///
/// Returns `QuoteError::InvalidDate` if the input is not a valid calendar date.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate, QuoteError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| QuoteError::InvalidDate(value.trim().to_string()))
}

/// Age in whole years from a date of birth.
///
/// This reproduces the storefront's established formula rather than
/// calendar arithmetic: the birth date is taken as UTC midnight, the elapsed
/// milliseconds until `now` are reinterpreted as an instant measured from the
/// Unix epoch, and the age is `|year(instant) - 1970|`. Results can differ
/// from a calendar age by a day around birthdays because leap days between
/// 1970 and the elapsed span do not line up with the real ones.
///
/// A birth date in the future yields a small positive age, not a negative one.
#[must_use]
pub fn age_from_birth_date(birth: NaiveDate, now: DateTime<Utc>) -> i32 {
    let birth_millis = birth.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    let elapsed = now.timestamp_millis().saturating_sub(birth_millis);
    DateTime::<Utc>::from_timestamp_millis(elapsed).map_or(0, |instant| (instant.year() - 1970).abs())
}

/// Trim a text field, returning `None` if nothing is left.
pub(crate) fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
