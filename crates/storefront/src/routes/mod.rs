//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog (?type=car|health|life|all)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product detail
//!
//! # Purchase (requires login to open the form)
//! GET  /buy/{id}               - Quote form for the product's line
//! POST /buy/{id}/quote         - Calculate premium (car: multipart with photos)
//! POST /buy/{id}/checkout      - Proceed to checkout
//!
//! # Checkout
//! GET  /checkout               - Checkout summary
//! POST /checkout/pay           - Simulated payment
//!
//! # History
//! GET  /history                - Paid invoices, newest first
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/signup            - Signup page
//! POST /auth/signup            - Signup action
//! POST /auth/logout            - Logout action
//! ```

pub mod auth;
pub mod checkout;
pub mod history;
pub mod home;
pub mod products;
pub mod purchase;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use serde::Deserialize;

use crate::state::AppState;

/// Upload limit for the car quote form (six photos).
const QUOTE_BODY_LIMIT: usize = 32 * 1024 * 1024;

// =============================================================================
// Notices
// =============================================================================

/// Query parameters carrying a notice code across a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl MessageQuery {
    /// Message for the `error` code, if it is a known one.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.as_deref().and_then(notice).map(String::from)
    }

    /// Message for the `success` code, if it is a known one.
    #[must_use]
    pub fn success_message(&self) -> Option<String> {
        self.success.as_deref().and_then(notice).map(String::from)
    }
}

/// Map a notice code to the text shown to the visitor.
fn notice(code: &str) -> Option<&'static str> {
    match code {
        "login_to_buy" => Some("You must log in to buy."),
        "login_to_checkout" => Some("You must log in to check out."),
        "registered" => Some("Registration successful. Please log in."),
        "paid" => Some("Payment successful. You have been redirected to your history."),
        _ => None,
    }
}

// =============================================================================
// Routers
// =============================================================================

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the purchase routes router.
pub fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(purchase::show))
        .route(
            "/{id}/quote",
            post(purchase::quote).layer(DefaultBodyLimit::max(QUOTE_BODY_LIMIT)),
        )
        .route("/{id}/checkout", post(purchase::proceed))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/pay", post(checkout::pay))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products/{id}", get(products::show))
        .nest("/buy", purchase_routes())
        .nest("/checkout", checkout_routes())
        .route("/history", get(history::index))
        .nest("/auth", auth_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_notices() {
        let query = MessageQuery {
            error: Some("login_to_buy".to_string()),
            success: Some("registered".to_string()),
        };
        assert_eq!(query.error_message().as_deref(), Some("You must log in to buy."));
        assert_eq!(
            query.success_message().as_deref(),
            Some("Registration successful. Please log in.")
        );
    }

    #[test]
    fn test_unknown_notice_is_dropped() {
        let query = MessageQuery {
            error: Some("<script>".to_string()),
            success: None,
        };
        assert_eq!(query.error_message(), None);
        assert_eq!(query.success_message(), None);
    }
}
