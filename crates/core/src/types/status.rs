//! Enumerations shared across the storefront.

use serde::{Deserialize, Serialize};

/// Insurance product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Car,
    Health,
    Life,
}

impl ProductType {
    /// All product lines in catalog order.
    pub const ALL: [Self; 3] = [Self::Car, Self::Health, Self::Life];

    /// Lowercase identifier, as used in product IDs and URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Health => "health",
            Self::Life => "life",
        }
    }

    /// Human-readable product line name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Car => "Car Insurance",
            Self::Health => "Health Insurance",
            Self::Life => "Life Insurance",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(Self::Car),
            "health" => Ok(Self::Health),
            "life" => Ok(Self::Life),
            _ => Err(format!("invalid product type: {s}")),
        }
    }
}

/// Invoice payment status.
///
/// Simulated payments always succeed, so `Paid` is the only status issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InvoiceStatus {
    #[default]
    Paid,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => write!(f, "Paid"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_round_trips_through_str() {
        for ty in ProductType::ALL {
            assert_eq!(ty.as_str().parse::<ProductType>().unwrap(), ty);
        }
        assert!("boat".parse::<ProductType>().is_err());
    }

    #[test]
    fn test_product_type_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProductType::Health).unwrap(),
            "\"health\""
        );
    }

    #[test]
    fn test_invoice_status_serializes_as_paid() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Paid).unwrap(),
            "\"Paid\""
        );
    }
}
