//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a whole-rupiah amount the way the catalog shows prices.
///
/// Usage in templates: `{{ record.price|rupiah }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn rupiah(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let text = value.to_string();
    Ok(text.parse::<rust_decimal::Decimal>().map_or(text, |amount| {
        insura_core::Rupiah::new(amount).to_string()
    }))
}
