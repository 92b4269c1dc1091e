//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use serde::Deserialize;

use insura_core::ProductType;
use insura_core::catalog::{self, CatalogFilter};

use super::products::ProductView;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;

/// Catalog filter query.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(rename = "type")]
    pub product_type: Option<String>,
}

/// A filter tab above the catalog.
pub struct FilterTab {
    pub value: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub current_user: Option<CurrentUser>,
    pub tabs: Vec<FilterTab>,
    pub products: Vec<ProductView>,
}

fn tabs(filter: CatalogFilter) -> Vec<FilterTab> {
    let all = FilterTab {
        value: "all",
        label: "All",
        active: filter == CatalogFilter::All,
    };
    std::iter::once(all)
        .chain(ProductType::ALL.into_iter().map(|ty| FilterTab {
            value: ty.as_str(),
            label: ty.label(),
            active: filter == CatalogFilter::Only(ty),
        }))
        .collect()
}

/// Display the home page with the (optionally filtered) catalog.
pub async fn home(
    OptionalAuth(current_user): OptionalAuth,
    Query(query): Query<CatalogQuery>,
) -> HomeTemplate {
    let filter = CatalogFilter::from_query(query.product_type.as_deref());

    HomeTemplate {
        current_user,
        tabs: tabs(filter),
        products: catalog::list(filter).map(ProductView::from).collect(),
    }
}
