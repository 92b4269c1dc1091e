//! Life insurance premium calculator.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{QuoteError, age_from_birth_date, parse_birth_date, required};
use crate::types::Rupiah;

/// Life quote form. A zero coverage counts as missing.
#[derive(Debug, Clone, Default)]
pub struct LifeQuoteInput {
    pub name: String,
    pub date_of_birth: String,
    pub coverage: Decimal,
}

/// A computed life quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeQuote {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub coverage: Rupiah,
    pub age: i32,
    /// Yearly cost as a percentage of coverage.
    pub multiplier_percent: u32,
    /// Unrounded premium per month.
    pub monthly_premium: Rupiah,
}

/// Yearly cost of cover as a percentage of the coverage amount.
#[must_use]
pub const fn multiplier_percent(age: i32) -> u32 {
    if age <= 30 {
        20
    } else if age <= 50 {
        40
    } else {
        100
    }
}

/// Monthly premium for a person of `age` with the given coverage.
#[must_use]
pub fn monthly_premium(age: i32, coverage: Decimal) -> Decimal {
    let rate = Decimal::from(multiplier_percent(age)) / Decimal::ONE_HUNDRED;
    rate * coverage / Decimal::from(12)
}

/// Validate a life quote form and compute the monthly premium.
///
/// # Errors
///
/// Returns `QuoteError::MissingFields` if name or date of birth is blank or
/// coverage is zero, `QuoteError::NonPositiveAmount` for negative coverage,
/// and `QuoteError::InvalidDate` if the date cannot be parsed.
pub fn quote_life(input: &LifeQuoteInput, now: DateTime<Utc>) -> Result<LifeQuote, QuoteError> {
    let (Some(name), Some(dob)) = (required(&input.name), required(&input.date_of_birth)) else {
        return Err(QuoteError::MissingFields);
    };
    if input.coverage.is_zero() {
        return Err(QuoteError::MissingFields);
    }
    if input.coverage.is_sign_negative() {
        return Err(QuoteError::NonPositiveAmount { field: "Coverage" });
    }

    let date_of_birth = parse_birth_date(&dob)?;
    let age = age_from_birth_date(date_of_birth, now);

    Ok(LifeQuote {
        name,
        date_of_birth,
        coverage: Rupiah::new(input.coverage),
        age,
        multiplier_percent: multiplier_percent(age),
        monthly_premium: Rupiah::new(monthly_premium(age, input.coverage)),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn twelfth_of(rate: Decimal, coverage: Decimal) -> Decimal {
        (rate * coverage / Decimal::from(12)).round_dp(10)
    }

    #[test]
    fn test_brackets() {
        let coverage = Decimal::from(240_000_000);
        for age in [0, 18, 30] {
            assert_eq!(
                monthly_premium(age, coverage).round_dp(10),
                twelfth_of(Decimal::new(20, 2), coverage)
            );
        }
        for age in [31, 45, 50] {
            assert_eq!(
                monthly_premium(age, coverage).round_dp(10),
                twelfth_of(Decimal::new(40, 2), coverage)
            );
        }
        for age in [51, 80] {
            assert_eq!(
                monthly_premium(age, coverage).round_dp(10),
                twelfth_of(Decimal::ONE, coverage)
            );
        }
    }

    #[test]
    fn test_example_forty_five() {
        let monthly = monthly_premium(45, Decimal::from(100_000_000));
        assert_eq!(monthly.round_dp(2), Decimal::new(333_333_333, 2));
    }

    #[test]
    fn test_quote_from_form() {
        let input = LifeQuoteInput {
            name: "Andi".to_string(),
            date_of_birth: "1981-06-15".to_string(),
            coverage: Decimal::from(100_000_000),
        };
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let quote = quote_life(&input, now).unwrap();
        assert_eq!(quote.age, 45);
        assert_eq!(quote.multiplier_percent, 40);
        assert_eq!(quote.monthly_premium.display_whole(), "Rp 3.333.333");
    }

    #[test]
    fn test_zero_coverage_is_missing() {
        let input = LifeQuoteInput {
            name: "Andi".to_string(),
            date_of_birth: "1981-06-15".to_string(),
            coverage: Decimal::ZERO,
        };
        assert_eq!(quote_life(&input, Utc::now()), Err(QuoteError::MissingFields));
    }

    #[test]
    fn test_negative_coverage() {
        let input = LifeQuoteInput {
            name: "Andi".to_string(),
            date_of_birth: "1981-06-15".to_string(),
            coverage: Decimal::from(-1),
        };
        assert_eq!(
            quote_life(&input, Utc::now()),
            Err(QuoteError::NonPositiveAmount { field: "Coverage" })
        );
    }
}
