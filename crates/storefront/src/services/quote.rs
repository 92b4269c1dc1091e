//! Turning submitted quote forms into purchase drafts.
//!
//! Browsers submit every field as text. Numbers that are blank or cannot be
//! read become zero, which the calculators report as a missing field; risk
//! flags that are neither `0` nor `1` are passed through so the health
//! calculator can reject them.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use insura_core::Product;
use insura_core::purchase::{PurchaseDraft, PurchaseError, Quote};
use insura_core::quote::{
    CarQuoteInput, HealthQuoteInput, LifeQuoteInput, QuoteError, quote_car, quote_health,
    quote_life,
};

/// A parsed quote form for one of the product lines.
#[derive(Debug, Clone)]
pub enum QuoteInput {
    Car(CarQuoteInput),
    Health(HealthQuoteInput),
    Life(LifeQuoteInput),
}

/// Errors from a quote calculation.
#[derive(Debug, Error)]
pub enum CalculateError {
    /// The form failed validation; shown to the visitor.
    #[error(transparent)]
    Invalid(#[from] QuoteError),

    /// The form does not belong to the product.
    #[error(transparent)]
    Purchase(#[from] PurchaseError),
}

/// Run the calculator for `product` and start a new draft from the result.
///
/// # Errors
///
/// Returns `CalculateError::Invalid` for validation failures and
/// `CalculateError::Purchase` if the form is for another product line.
pub fn calculate(
    product: &Product,
    input: &QuoteInput,
    now: DateTime<Utc>,
) -> Result<PurchaseDraft, CalculateError> {
    let quote = match input {
        QuoteInput::Car(car) => Quote::Car(quote_car(car, now.year())?),
        QuoteInput::Health(health) => Quote::Health(quote_health(health, now)?),
        QuoteInput::Life(life) => Quote::Life(quote_life(life, now)?),
    };

    tracing::info!(
        product_id = %product.id,
        age = quote.age(),
        premium = %quote.premium(),
        "Premium calculated"
    );

    Ok(PurchaseDraft::new(product, quote)?)
}

/// Read an amount; blank or unreadable input is zero.
///
/// Accepts plain decimals (`150000000`, `150000000.50`) as sent by number
/// inputs.
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Read a year; blank or unreadable input is zero.
#[must_use]
pub fn parse_year(raw: &str) -> i32 {
    raw.trim().parse::<i32>().unwrap_or(0)
}

/// Read a 0/1 risk flag. Blank is `0`; anything unreadable is passed on as
/// an invalid flag value.
#[must_use]
pub fn parse_flag(raw: &str) -> u8 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    raw.parse::<u8>().unwrap_or(u8::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use insura_core::catalog;
    use insura_core::quote::PhotoSlot;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 150000000 "), Decimal::from(150_000_000));
        assert_eq!(parse_amount("12.5"), Decimal::new(125, 1));
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("-5"), Decimal::from(-5));
    }

    #[test]
    fn test_parse_year_and_flag() {
        assert_eq!(parse_year("2022"), 2022);
        assert_eq!(parse_year("twenty"), 0);
        assert_eq!(parse_flag(""), 0);
        assert_eq!(parse_flag("1"), 1);
        assert_eq!(parse_flag("yes"), u8::MAX);
    }

    #[test]
    fn test_calculate_car_uses_current_year() {
        let input = QuoteInput::Car(CarQuoteInput {
            brand: "Toyota".to_string(),
            model: "Avanza".to_string(),
            manufacture_year: 2022,
            declared_price: Decimal::from(150_000_000),
            plate: "B 1234 XYZ".to_string(),
            engine_number: "ENG".to_string(),
            chassis_number: "CHS".to_string(),
            owner_name: "Budi".to_string(),
            photos: PhotoSlot::ALL.into_iter().collect(),
        });

        let draft = calculate(catalog::find("car-2").unwrap(), &input, now()).unwrap();
        assert_eq!(draft.product_title, "Comfy Auto 2");
        assert_eq!(draft.quote.age(), 4);
        assert_eq!(draft.quote.annualized_price().unwrap(), 6_000_000);
    }

    #[test]
    fn test_calculate_rejects_other_product_line() {
        let input = QuoteInput::Life(LifeQuoteInput {
            name: "Andi".to_string(),
            date_of_birth: "1981-06-15".to_string(),
            coverage: Decimal::from(100_000_000),
        });
        let err = calculate(catalog::find("health-1").unwrap(), &input, now()).unwrap_err();
        assert!(matches!(err, CalculateError::Purchase(_)));
    }

    #[test]
    fn test_calculate_reports_validation_error() {
        let input = QuoteInput::Health(HealthQuoteInput::default());
        let err = calculate(catalog::find("health-1").unwrap(), &input, now()).unwrap_err();
        assert!(matches!(err, CalculateError::Invalid(QuoteError::MissingFields)));
        assert_eq!(err.to_string(), "All fields are required.");
    }
}
