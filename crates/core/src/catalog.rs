//! The static product catalog.
//!
//! Three products per line, seeded once and never modified at runtime.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::types::{ProductId, ProductType, Rupiah};

/// Number of products offered per product line.
const PRODUCTS_PER_TYPE: i64 = 3;

/// Benefits listed on every product.
const BENEFITS: [&str; 3] = ["Basic protection", "Fast claim process", "24/7 service"];

static CATALOG: LazyLock<Vec<Product>> = LazyLock::new(seed);

/// An insurance product offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub title: String,
    /// Reference ("starting from") price shown in the catalog.
    pub price: Rupiah,
    pub description: String,
    pub benefits: Vec<String>,
}

/// Catalog listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFilter {
    #[default]
    All,
    Only(ProductType),
}

impl CatalogFilter {
    /// Parse a filter from a query value; unknown values mean `All`.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse::<ProductType>().ok())
            .map_or(Self::All, Self::Only)
    }

    fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(ty) => product.product_type == ty,
        }
    }
}

/// All products, grouped car, health, life.
#[must_use]
pub fn products() -> &'static [Product] {
    &CATALOG
}

/// Products matching a filter, in catalog order.
pub fn list(filter: CatalogFilter) -> impl Iterator<Item = &'static Product> {
    CATALOG.iter().filter(move |p| filter.matches(p))
}

/// Look up a product by ID.
#[must_use]
pub fn find(id: &str) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.id.as_str() == id)
}

fn seed() -> Vec<Product> {
    ProductType::ALL
        .into_iter()
        .flat_map(|ty| (1..=PRODUCTS_PER_TYPE).map(move |n| seed_product(ty, n)))
        .collect()
}

fn seed_product(product_type: ProductType, n: i64) -> Product {
    let (title, base_price, description) = match product_type {
        ProductType::Car => (
            "Comfy Auto",
            100_000_000,
            "All-risk cover for private vehicles.",
        ),
        ProductType::Health => ("HealthCare", 500_000, "Health and life protection product."),
        ProductType::Life => ("LifeGuard", 1_500_000, "Health and life protection product."),
    };

    Product {
        id: ProductId::new(format!("{product_type}-{n}")),
        product_type,
        title: format!("{title} {n}"),
        price: Rupiah::from_whole(base_price * (n + 1)),
        description: description.to_string(),
        benefits: BENEFITS.iter().map(ToString::to_string).collect(),
    }
}
