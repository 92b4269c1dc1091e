//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use insura_core::purchase::CheckoutSummary;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::services::checkout::{
    CheckoutError, CheckoutService, active_purchase, clear_draft, load_draft,
};
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub current_user: Option<CurrentUser>,
    pub summary: Option<CheckoutSummary>,
    pub error: Option<String>,
}

/// Display the checkout summary for the current draft.
///
/// A draft that never went through "proceed to checkout" shows the empty
/// state, same as no draft at all.
#[instrument(skip(current_user, session))]
pub async fn show(OptionalAuth(current_user): OptionalAuth, session: Session) -> CheckoutTemplate {
    let draft = active_purchase(load_draft(&session).await);

    let error = draft
        .is_none()
        .then(|| CheckoutError::NoActivePurchase.to_string());

    CheckoutTemplate {
        current_user,
        summary: draft.map(|draft| draft.summary()),
        error,
    }
}

/// Simulate payment: record the invoice and move on to the history.
#[instrument(skip(state, current_user, session))]
pub async fn pay(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
) -> Result<Response> {
    let checkout = CheckoutService::new(state.storage());

    match checkout.pay(load_draft(&session).await, Utc::now()) {
        Ok(record) => {
            clear_draft(&session).await?;
            add_breadcrumb("checkout", "Payment recorded", &[("invoice_id", &record.id.to_string())]);
            Ok(Redirect::to("/history?success=paid").into_response())
        }
        Err(e @ CheckoutError::NoActivePurchase) => {
            tracing::info!("Payment attempted without a purchase");
            let page = CheckoutTemplate {
                current_user,
                summary: None,
                error: Some(e.to_string()),
            };
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
