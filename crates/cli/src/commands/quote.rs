//! Premium quotes from the command line.
//!
//! Runs the same calculators as the storefront forms. Nothing is written to
//! the store. Car quotes skip the photo upload check since there is nothing
//! to upload from a terminal.

use chrono::{Datelike, Utc};
use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

use insura_core::purchase::Quote;
use insura_core::quote::{
    CarQuoteInput, HealthQuoteInput, LifeQuoteInput, PhotoSlot, QuoteError, quote_car,
    quote_health, quote_life,
};

/// Arguments for a car quote.
#[derive(Debug, Args)]
pub struct CarArgs {
    /// Car brand
    #[arg(long)]
    pub brand: String,
    /// Car model
    #[arg(long)]
    pub model: String,
    /// Manufacture year
    #[arg(long)]
    pub year: i32,
    /// Declared car price in rupiah
    #[arg(long)]
    pub price: Decimal,
    /// Licence plate
    #[arg(long, default_value = "-")]
    pub plate: String,
    /// Engine number
    #[arg(long, default_value = "-")]
    pub engine_number: String,
    /// Chassis number
    #[arg(long, default_value = "-")]
    pub chassis_number: String,
    /// Registered owner
    #[arg(long, default_value = "-")]
    pub owner_name: String,
}

/// Arguments for a health quote.
#[derive(Debug, Args)]
pub struct HealthArgs {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub dob: String,
    /// Full name
    #[arg(long, default_value = "Applicant")]
    pub name: String,
    /// Occupation
    #[arg(long, default_value = "-")]
    pub occupation: String,
    /// Applicant smokes
    #[arg(long)]
    pub smoker: bool,
    /// Applicant has hypertension
    #[arg(long)]
    pub hypertension: bool,
    /// Applicant has diabetes
    #[arg(long)]
    pub diabetes: bool,
}

/// Arguments for a life quote.
#[derive(Debug, Args)]
pub struct LifeArgs {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub dob: String,
    /// Coverage amount in rupiah
    #[arg(long)]
    pub coverage: Decimal,
    /// Full name
    #[arg(long, default_value = "Applicant")]
    pub name: String,
}

fn report(quote: &Quote) {
    info!("{}", quote.result_message());
}

/// Quote car insurance for the current year.
///
/// # Errors
///
/// Returns `QuoteError` if the arguments fail validation.
pub fn car(args: &CarArgs) -> Result<(), QuoteError> {
    let input = CarQuoteInput {
        brand: args.brand.clone(),
        model: args.model.clone(),
        manufacture_year: args.year,
        declared_price: args.price,
        plate: args.plate.clone(),
        engine_number: args.engine_number.clone(),
        chassis_number: args.chassis_number.clone(),
        owner_name: args.owner_name.clone(),
        photos: PhotoSlot::ALL.into_iter().collect(),
    };

    report(&Quote::Car(quote_car(&input, Utc::now().year())?));
    Ok(())
}

/// Quote health insurance as of now.
///
/// # Errors
///
/// Returns `QuoteError` if the arguments fail validation.
pub fn health(args: &HealthArgs) -> Result<(), QuoteError> {
    let input = HealthQuoteInput {
        name: args.name.clone(),
        date_of_birth: args.dob.clone(),
        occupation: args.occupation.clone(),
        smoker: u8::from(args.smoker),
        hypertension: u8::from(args.hypertension),
        diabetes: u8::from(args.diabetes),
    };

    report(&Quote::Health(quote_health(&input, Utc::now())?));
    Ok(())
}

/// Quote life insurance as of now.
///
/// # Errors
///
/// Returns `QuoteError` if the arguments fail validation.
pub fn life(args: &LifeArgs) -> Result<(), QuoteError> {
    let input = LifeQuoteInput {
        name: args.name.clone(),
        date_of_birth: args.dob.clone(),
        coverage: args.coverage,
    };

    report(&Quote::Life(quote_life(&input, Utc::now())?));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_quote_skips_photo_check() {
        let args = CarArgs {
            brand: "Toyota".to_string(),
            model: "Avanza".to_string(),
            year: Utc::now().year() - 1,
            price: Decimal::from(150_000_000),
            plate: "-".to_string(),
            engine_number: "-".to_string(),
            chassis_number: "-".to_string(),
            owner_name: "-".to_string(),
        };
        assert!(car(&args).is_ok());
    }

    #[test]
    fn test_life_quote_rejects_negative_coverage() {
        let args = LifeArgs {
            dob: "1980-01-01".to_string(),
            coverage: Decimal::from(-5),
            name: "Applicant".to_string(),
        };
        assert!(matches!(
            life(&args),
            Err(QuoteError::NonPositiveAmount { .. })
        ));
    }

    #[test]
    fn test_health_quote_rejects_bad_date() {
        let args = HealthArgs {
            dob: "01/01/1990".to_string(),
            name: "Applicant".to_string(),
            occupation: "-".to_string(),
            smoker: false,
            hypertension: false,
            diabetes: false,
        };
        assert!(matches!(health(&args), Err(QuoteError::InvalidDate(_))));
    }
}
