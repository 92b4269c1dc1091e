//! Car insurance premium calculator.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{QuoteError, required};
use crate::types::Rupiah;

/// Declared price below which mid-age cars get the higher 4% rate.
const MID_AGE_PRICE_THRESHOLD: i64 = 200_000_000;

/// One of the six photos required for a car quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoSlot {
    Front,
    Back,
    Left,
    Right,
    Dashboard,
    EngineBay,
}

impl PhotoSlot {
    /// Every required photo, in form order.
    pub const ALL: [Self; 6] = [
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Dashboard,
        Self::EngineBay,
    ];

    /// Form field name carrying this photo.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Front => "photo_front",
            Self::Back => "photo_back",
            Self::Left => "photo_left",
            Self::Right => "photo_right",
            Self::Dashboard => "photo_dashboard",
            Self::EngineBay => "photo_engine_bay",
        }
    }

    /// Look up a slot by its form field name.
    #[must_use]
    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.field_name() == name)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Back => "Back",
            Self::Left => "Left side",
            Self::Right => "Right side",
            Self::Dashboard => "Dashboard",
            Self::EngineBay => "Engine bay",
        }
    }
}

/// Car quote form.
///
/// Numbers that were left blank or could not be read should be passed as
/// zero; zero counts as missing.
#[derive(Debug, Clone, Default)]
pub struct CarQuoteInput {
    pub brand: String,
    pub model: String,
    pub manufacture_year: i32,
    pub declared_price: Decimal,
    pub plate: String,
    pub engine_number: String,
    pub chassis_number: String,
    pub owner_name: String,
    /// Photos that were actually uploaded. Only presence matters.
    pub photos: BTreeSet<PhotoSlot>,
}

/// A computed car quote, with the trimmed inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarQuote {
    pub brand: String,
    pub model: String,
    pub manufacture_year: i32,
    pub declared_price: Rupiah,
    pub plate: String,
    pub engine_number: String,
    pub chassis_number: String,
    pub owner_name: String,
    pub photos: Vec<PhotoSlot>,
    /// Vehicle age in years.
    pub age: i32,
    /// Unrounded premium per year.
    pub annual_premium: Rupiah,
}

/// Annual premium rate for a car of `age` years with a declared `price`.
///
/// Returns `None` for a negative age.
#[must_use]
pub fn premium_rate(age: i32, price: Decimal) -> Option<Decimal> {
    match age {
        0..=3 => Some(Decimal::new(25, 3)),
        4..=5 if price < Decimal::from(MID_AGE_PRICE_THRESHOLD) => Some(Decimal::new(4, 2)),
        4..=5 => Some(Decimal::new(3, 2)),
        6.. => Some(Decimal::new(5, 2)),
        _ => None,
    }
}

/// Annual premium for a car of `age` years with a declared `price`.
///
/// Returns `None` for a negative age.
#[must_use]
pub fn annual_premium(age: i32, price: Decimal) -> Option<Decimal> {
    premium_rate(age, price).map(|rate| rate * price)
}

/// Validate a car quote form and compute the annual premium.
///
/// Rules are checked in order and the first failure is returned: all text
/// fields, year, and price present; all six photos present; price not
/// negative; manufacture year not after `current_year`.
///
/// # Errors
///
/// Returns the `QuoteError` for the first rule that fails.
pub fn quote_car(input: &CarQuoteInput, current_year: i32) -> Result<CarQuote, QuoteError> {
    let (
        Some(brand),
        Some(model),
        Some(plate),
        Some(engine_number),
        Some(chassis_number),
        Some(owner_name),
    ) = (
        required(&input.brand),
        required(&input.model),
        required(&input.plate),
        required(&input.engine_number),
        required(&input.chassis_number),
        required(&input.owner_name),
    )
    else {
        return Err(QuoteError::MissingFields);
    };
    if input.manufacture_year == 0 || input.declared_price.is_zero() {
        return Err(QuoteError::MissingFields);
    }

    let missing: Vec<PhotoSlot> = PhotoSlot::ALL
        .into_iter()
        .filter(|slot| !input.photos.contains(slot))
        .collect();
    if !missing.is_empty() {
        return Err(QuoteError::MissingPhotos(missing));
    }

    if input.declared_price.is_sign_negative() {
        return Err(QuoteError::NonPositiveAmount {
            field: "Car price",
        });
    }

    let age = current_year - input.manufacture_year;
    let premium = annual_premium(age, input.declared_price).ok_or(
        QuoteError::FutureManufactureYear {
            year: input.manufacture_year,
        },
    )?;

    Ok(CarQuote {
        brand,
        model,
        manufacture_year: input.manufacture_year,
        declared_price: Rupiah::new(input.declared_price),
        plate,
        engine_number,
        chassis_number,
        owner_name,
        photos: PhotoSlot::ALL.to_vec(),
        age,
        annual_premium: Rupiah::new(premium),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn complete_input(year: i32, price: i64) -> CarQuoteInput {
        CarQuoteInput {
            brand: "Toyota".to_string(),
            model: "Avanza".to_string(),
            manufacture_year: year,
            declared_price: Decimal::from(price),
            plate: "B 1234 XYZ".to_string(),
            engine_number: "ENG-001".to_string(),
            chassis_number: "CHS-001".to_string(),
            owner_name: "Budi Santoso".to_string(),
            photos: PhotoSlot::ALL.into_iter().collect(),
        }
    }

    #[test]
    fn test_young_cars_pay_two_and_a_half_percent() {
        let price = Decimal::from(350_000_000);
        for age in 0..=3 {
            assert_eq!(
                annual_premium(age, price).unwrap(),
                Decimal::new(25, 3) * price
            );
        }
    }

    #[test]
    fn test_mid_age_rate_depends_on_price() {
        let cheap = Decimal::from(199_999_999);
        let pricey = Decimal::from(200_000_000);
        for age in 4..=5 {
            assert_eq!(annual_premium(age, cheap).unwrap(), Decimal::new(4, 2) * cheap);
            assert_eq!(annual_premium(age, pricey).unwrap(), Decimal::new(3, 2) * pricey);
        }
    }

    #[test]
    fn test_old_cars_pay_five_percent() {
        let price = Decimal::from(80_000_000);
        for age in [6, 10, 40] {
            assert_eq!(annual_premium(age, price).unwrap(), Decimal::new(5, 2) * price);
        }
    }

    #[test]
    fn test_negative_age_has_no_rate() {
        assert_eq!(annual_premium(-1, Decimal::from(100)), None);
    }

    #[test]
    fn test_example_four_year_old_car() {
        let quote = quote_car(&complete_input(2022, 150_000_000), 2026).unwrap();
        assert_eq!(quote.age, 4);
        assert_eq!(quote.annual_premium, Rupiah::from_whole(6_000_000));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut input = complete_input(2024, 100_000_000);
        input.brand = "  Honda  ".to_string();
        let quote = quote_car(&input, 2026).unwrap();
        assert_eq!(quote.brand, "Honda");
    }

    #[test]
    fn test_missing_text_field() {
        let mut input = complete_input(2024, 100_000_000);
        input.chassis_number = "   ".to_string();
        assert_eq!(quote_car(&input, 2026), Err(QuoteError::MissingFields));
    }

    #[test]
    fn test_zero_year_or_price_counts_as_missing() {
        assert_eq!(
            quote_car(&complete_input(0, 100_000_000), 2026),
            Err(QuoteError::MissingFields)
        );
        assert_eq!(
            quote_car(&complete_input(2024, 0), 2026),
            Err(QuoteError::MissingFields)
        );
    }

    #[test]
    fn test_missing_photos_are_listed() {
        let mut input = complete_input(2024, 100_000_000);
        input.photos.remove(&PhotoSlot::Dashboard);
        input.photos.remove(&PhotoSlot::Front);
        assert_eq!(
            quote_car(&input, 2026),
            Err(QuoteError::MissingPhotos(vec![
                PhotoSlot::Front,
                PhotoSlot::Dashboard
            ]))
        );
    }

    #[test]
    fn test_missing_fields_reported_before_photos() {
        let mut input = complete_input(2024, 100_000_000);
        input.owner_name.clear();
        input.photos.clear();
        assert_eq!(quote_car(&input, 2026), Err(QuoteError::MissingFields));
    }

    #[test]
    fn test_future_manufacture_year_rejected() {
        assert_eq!(
            quote_car(&complete_input(2027, 100_000_000), 2026),
            Err(QuoteError::FutureManufactureYear { year: 2027 })
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        assert_eq!(
            quote_car(&complete_input(2024, -5), 2026),
            Err(QuoteError::NonPositiveAmount {
                field: "Car price"
            })
        );
    }

    #[test]
    fn test_photo_field_names_round_trip() {
        for slot in PhotoSlot::ALL {
            assert_eq!(PhotoSlot::from_field_name(slot.field_name()), Some(slot));
        }
        assert_eq!(PhotoSlot::from_field_name("photo_roof"), None);
    }
}
