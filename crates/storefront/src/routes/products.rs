//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Path;
use tracing::instrument;

use insura_core::{Product, ProductType, catalog};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;

/// Number of illustration photos on the detail page.
const DETAIL_PHOTOS: usize = 3;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub product_type: ProductType,
    /// Uppercase tag shown on catalog cards, e.g. `CAR`.
    pub tag: String,
    pub type_label: &'static str,
    pub title: String,
    pub price: String,
    pub description: String,
    pub benefits: Vec<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            product_type: product.product_type,
            tag: product.product_type.as_str().to_uppercase(),
            type_label: product.product_type.label(),
            title: product.title.clone(),
            price: product.price.display_whole(),
            description: product.description.clone(),
            benefits: product.benefits.clone(),
        }
    }
}

impl ProductView {
    /// Illustration photo URLs, seeded by product ID so they are stable.
    #[must_use]
    pub fn photos(&self) -> Vec<String> {
        (0..DETAIL_PHOTOS)
            .map(|i| format!("https://picsum.photos/seed/{}{i}/400/300", self.id))
            .collect()
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub current_user: Option<CurrentUser>,
    pub product: ProductView,
}

/// Look up a catalog product or fail with 404.
///
/// # Errors
///
/// Returns `AppError::NotFound` for unknown IDs.
pub fn find_product(id: &str) -> Result<&'static Product> {
    catalog::find(id).ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Display product detail page.
#[instrument(skip(current_user))]
pub async fn show(
    OptionalAuth(current_user): OptionalAuth,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let product = find_product(&id)?;

    Ok(ProductShowTemplate {
        current_user,
        product: ProductView::from(product),
    })
}
