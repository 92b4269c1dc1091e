//! Rupiah amounts using decimal arithmetic.
//!
//! Premiums are computed exactly with [`Decimal`] and only rounded when they
//! are displayed or annualized into an invoice. Display follows the `id-ID`
//! locale: `.` groups thousands, `,` separates decimals, at most three
//! fraction digits.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A rupiah amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rupiah(Decimal);

impl Rupiah {
    /// Wrap an exact decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from whole rupiah.
    #[must_use]
    pub fn from_whole(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// The exact amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Round to whole rupiah, halves away from zero.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self(round_half_away(self.0, 0))
    }

    /// Round to whole rupiah and convert to an integer.
    ///
    /// Returns `None` if the amount does not fit in an `i64`.
    #[must_use]
    pub fn to_whole(&self) -> Option<i64> {
        self.rounded().0.to_i64()
    }

    /// Format for display rounded to whole rupiah, e.g. `Rp 6.000.000`.
    #[must_use]
    pub fn display_whole(&self) -> String {
        self.rounded().to_string()
    }
}

impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rp {}", format_number(self.0))
    }
}

impl From<Decimal> for Rupiah {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a number the way the `id-ID` locale does, without currency.
///
/// ```
/// use rust_decimal::Decimal;
/// use insura_core::types::price::format_number;
///
/// assert_eq!(format_number(Decimal::from(150_000_000)), "150.000.000");
/// assert_eq!(format_number(Decimal::new(33_333_333_333, 4)), "3.333.333,333");
/// ```
#[must_use]
pub fn format_number(value: Decimal) -> String {
    let rounded = round_half_away(value, 3).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + text.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}
