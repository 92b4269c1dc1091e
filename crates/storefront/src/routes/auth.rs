//! Authentication route handlers.
//!
//! Signup and login errors are rendered inline on the form; successful
//! actions redirect.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use super::MessageQuery;
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::services::auth::{AuthService, SignupRequest};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub name: String,
    pub phone: String,
}

impl From<SignupForm> for SignupRequest {
    fn from(form: SignupForm) -> Self {
        Self {
            email: form.email,
            password: form.password,
            password_confirm: form.password_confirm,
            name: form.name,
            phone: form.phone,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub email: String,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub current_user: Option<CurrentUser>,
    pub error: Option<String>,
    pub email: String,
    pub name: String,
    pub phone: String,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(current_user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> LoginTemplate {
    LoginTemplate {
        current_user,
        error: query.error_message(),
        success: query.success_message(),
        email: String::new(),
    }
}

/// Handle login form submission.
#[instrument(skip(state, form), fields(email = %form.email.trim()))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.storage());

    match auth.login(&form.email, &form.password) {
        Ok(user) => {
            set_sentry_user(&user.email);
            Ok(Redirect::to("/").into_response())
        }
        Err(e) if e.is_user_error() => {
            tracing::info!(error = %e, "Login rejected");
            Ok(LoginTemplate {
                current_user: auth.current_user(),
                error: Some(e.to_string()),
                success: None,
                email: form.email.trim().to_string(),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle logout.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<Redirect, AppError> {
    AuthService::new(state.storage()).logout()?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(OptionalAuth(current_user): OptionalAuth) -> SignupTemplate {
    SignupTemplate {
        current_user,
        error: None,
        email: String::new(),
        name: String::new(),
        phone: String::new(),
    }
}

/// Handle signup form submission.
#[instrument(skip(state, form), fields(email = %form.email.trim()))]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.storage());
    let email = form.email.trim().to_string();
    let name = form.name.trim().to_string();
    let phone = form.phone.trim().to_string();

    match auth.signup(&form.into()) {
        Ok(_) => Ok(Redirect::to("/auth/login?success=registered").into_response()),
        Err(e) if e.is_user_error() => {
            tracing::info!(error = %e, "Signup rejected");
            Ok(SignupTemplate {
                current_user: auth.current_user(),
                error: Some(e.to_string()),
                email,
                name,
                phone,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}
