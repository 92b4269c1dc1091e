//! Health insurance premium calculator.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{QuoteError, age_from_birth_date, parse_birth_date, required};
use crate::types::Rupiah;

/// Base annual premium before age and risk loadings.
pub const BASE_PREMIUM: i64 = 2_000_000;

/// Health quote form.
///
/// Risk flags are taken as submitted (`0` or `1`) and validated by
/// [`quote_health`].
#[derive(Debug, Clone, Default)]
pub struct HealthQuoteInput {
    pub name: String,
    pub date_of_birth: String,
    pub occupation: String,
    pub smoker: u8,
    pub hypertension: u8,
    pub diabetes: u8,
}

/// Independent, additive risk loadings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskFlags {
    pub smoker: bool,
    pub hypertension: bool,
    pub diabetes: bool,
}

/// A computed health quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthQuote {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub occupation: String,
    pub risks: RiskFlags,
    pub age: i32,
    /// Unrounded premium per year.
    pub annual_premium: Rupiah,
}

/// Age loading as a fraction of the base premium.
#[must_use]
pub fn age_multiplier(age: i32) -> Decimal {
    match age {
        i32::MIN..=20 => Decimal::new(10, 2),
        21..=35 => Decimal::new(20, 2),
        36..=50 => Decimal::new(25, 2),
        _ => Decimal::new(40, 2),
    }
}

/// Annual premium for a person of `age` with the given risk flags.
#[must_use]
pub fn annual_premium(age: i32, risks: RiskFlags) -> Decimal {
    let base = Decimal::from(BASE_PREMIUM);
    let loading = |flag: bool, rate: Decimal| if flag { rate * base } else { Decimal::ZERO };

    base + age_multiplier(age) * base
        + loading(risks.smoker, Decimal::new(5, 1))
        + loading(risks.hypertension, Decimal::new(4, 1))
        + loading(risks.diabetes, Decimal::new(5, 1))
}

fn flag(value: u8, name: &'static str) -> Result<bool, QuoteError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(QuoteError::InvalidRiskFlag { flag: name }),
    }
}

/// Validate a health quote form and compute the annual premium.
///
/// # Errors
///
/// Returns `QuoteError::MissingFields` if name, date of birth, or occupation
/// is blank, `QuoteError::InvalidDate` if the date cannot be parsed, and
/// `QuoteError::InvalidRiskFlag` if a flag is not 0 or 1.
pub fn quote_health(input: &HealthQuoteInput, now: DateTime<Utc>) -> Result<HealthQuote, QuoteError> {
    let (Some(name), Some(dob), Some(occupation)) = (
        required(&input.name),
        required(&input.date_of_birth),
        required(&input.occupation),
    ) else {
        return Err(QuoteError::MissingFields);
    };

    let date_of_birth = parse_birth_date(&dob)?;
    let risks = RiskFlags {
        smoker: flag(input.smoker, "Smoker")?,
        hypertension: flag(input.hypertension, "Hypertension")?,
        diabetes: flag(input.diabetes, "Diabetes")?,
    };

    let age = age_from_birth_date(date_of_birth, now);

    Ok(HealthQuote {
        name,
        date_of_birth,
        occupation,
        risks,
        age,
        annual_premium: Rupiah::new(annual_premium(age, risks)),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn all_flag_combinations() -> impl Iterator<Item = RiskFlags> {
        (0..8u8).map(|bits| RiskFlags {
            smoker: bits & 1 != 0,
            hypertension: bits & 2 != 0,
            diabetes: bits & 4 != 0,
        })
    }

    #[test]
    fn test_age_brackets() {
        assert_eq!(age_multiplier(0), Decimal::new(10, 2));
        assert_eq!(age_multiplier(20), Decimal::new(10, 2));
        assert_eq!(age_multiplier(21), Decimal::new(20, 2));
        assert_eq!(age_multiplier(35), Decimal::new(20, 2));
        assert_eq!(age_multiplier(36), Decimal::new(25, 2));
        assert_eq!(age_multiplier(50), Decimal::new(25, 2));
        assert_eq!(age_multiplier(51), Decimal::new(40, 2));
    }

    #[test]
    fn test_example_young_smoker() {
        let risks = RiskFlags {
            smoker: true,
            ..RiskFlags::default()
        };
        assert_eq!(annual_premium(28, risks), Decimal::from(3_400_000));
    }

    #[test]
    fn test_all_flags_add_up() {
        let risks = RiskFlags {
            smoker: true,
            hypertension: true,
            diabetes: true,
        };
        // 2,000,000 + 0.40 + 0.5 + 0.4 + 0.5 of base
        assert_eq!(annual_premium(60, risks), Decimal::from(5_600_000));
    }

    #[test]
    fn test_premium_monotone_in_each_flag() {
        for age in [18, 28, 40, 70] {
            for risks in all_flag_combinations() {
                let base = annual_premium(age, risks);
                for raised in [
                    RiskFlags { smoker: true, ..risks },
                    RiskFlags { hypertension: true, ..risks },
                    RiskFlags { diabetes: true, ..risks },
                ] {
                    assert!(annual_premium(age, raised) >= base);
                }
            }
        }
    }

    #[test]
    fn test_quote_from_form() {
        let input = HealthQuoteInput {
            name: " Siti ".to_string(),
            date_of_birth: "1998-01-01".to_string(),
            occupation: "Engineer".to_string(),
            smoker: 1,
            hypertension: 0,
            diabetes: 0,
        };
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let quote = quote_health(&input, now).unwrap();
        assert_eq!(quote.name, "Siti");
        assert_eq!(quote.age, 28);
        assert!(quote.risks.smoker);
        assert_eq!(quote.annual_premium, Rupiah::from_whole(3_400_000));
    }

    #[test]
    fn test_missing_fields() {
        let input = HealthQuoteInput {
            name: "Siti".to_string(),
            date_of_birth: "1998-01-01".to_string(),
            ..HealthQuoteInput::default()
        };
        assert_eq!(
            quote_health(&input, Utc::now()),
            Err(QuoteError::MissingFields)
        );
    }

    #[test]
    fn test_invalid_flag() {
        let input = HealthQuoteInput {
            name: "Siti".to_string(),
            date_of_birth: "1998-01-01".to_string(),
            occupation: "Engineer".to_string(),
            diabetes: 2,
            ..HealthQuoteInput::default()
        };
        assert_eq!(
            quote_health(&input, Utc::now()),
            Err(QuoteError::InvalidRiskFlag { flag: "Diabetes" })
        );
    }

    #[test]
    fn test_invalid_date() {
        let input = HealthQuoteInput {
            name: "Siti".to_string(),
            date_of_birth: "yesterday".to_string(),
            occupation: "Engineer".to_string(),
            ..HealthQuoteInput::default()
        };
        assert!(matches!(
            quote_health(&input, Utc::now()),
            Err(QuoteError::InvalidDate(_))
        ));
    }
}
