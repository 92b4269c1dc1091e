//! Newtype IDs for type-safe entity references.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Catalog product identifier, e.g. `car-1` or `life-3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Invoice identifier, `INV` followed by a Unix timestamp in milliseconds.
///
/// Invoice IDs are strictly increasing in issue order: [`InvoiceId::next`]
/// never returns an ID at or below the newest one already issued, even if
/// two payments land in the same millisecond or the clock steps backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvoiceId(i64);

impl InvoiceId {
    const PREFIX: &'static str = "INV";

    /// Create an invoice ID from a millisecond timestamp.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Get the millisecond value behind this ID.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Issue the next ID at `now_millis`, staying above `newest`.
    #[must_use]
    pub fn next(now_millis: i64, newest: Option<Self>) -> Self {
        match newest {
            Some(prev) if prev.0 >= now_millis => Self(prev.0.saturating_add(1)),
            _ => Self(now_millis),
        }
    }

    /// Parse an ID of the form `INV<digits>`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        s.strip_prefix(Self::PREFIX)?.parse().ok().map(Self)
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl Serialize for InvoiceId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InvoiceId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid invoice id: {s}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_id_display_and_parse() {
        let id = InvoiceId::from_millis(1_760_000_000_123);
        assert_eq!(id.to_string(), "INV1760000000123");
        assert_eq!(InvoiceId::parse("INV1760000000123"), Some(id));
        assert_eq!(InvoiceId::parse("1760000000123"), None);
        assert_eq!(InvoiceId::parse("INVabc"), None);
    }

    #[test]
    fn test_invoice_id_next_uses_clock() {
        let prev = InvoiceId::from_millis(100);
        assert_eq!(InvoiceId::next(250, Some(prev)).as_millis(), 250);
        assert_eq!(InvoiceId::next(250, None).as_millis(), 250);
    }

    #[test]
    fn test_invoice_id_next_stays_unique_within_same_millisecond() {
        let prev = InvoiceId::from_millis(500);
        assert_eq!(InvoiceId::next(500, Some(prev)).as_millis(), 501);
        // Clock went backwards
        assert_eq!(InvoiceId::next(400, Some(prev)).as_millis(), 501);
    }

    #[test]
    fn test_invoice_id_serde() {
        let id = InvoiceId::from_millis(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"INV42\"");
        let back: InvoiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<InvoiceId>("\"X42\"").is_err());
    }

    #[test]
    fn test_product_id_display() {
        assert_eq!(ProductId::new("car-1").to_string(), "car-1");
    }
}
