//! Authentication extractors.
//!
//! The login session is read from the local store (`insura_session_v1`),
//! not from the visitor's cookie session, so it is shared by everyone using
//! the same data directory.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in, redirects to the login page with a notice.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Rejection returned when a logged-in user is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// Redirect to login, explaining that buying needs an account.
    LoginToBuy,
    /// Redirect to login, explaining that checkout needs an account.
    LoginToCheckout,
}

impl AuthRejection {
    fn for_path(path: &str) -> Self {
        if path.starts_with("/checkout") || path.ends_with("/checkout") {
            Self::LoginToCheckout
        } else {
            Self::LoginToBuy
        }
    }

    /// Login URL carrying the notice code.
    #[must_use]
    pub const fn login_url(self) -> &'static str {
        match self {
            Self::LoginToBuy => "/auth/login?error=login_to_buy",
            Self::LoginToCheckout => "/auth/login?error=login_to_checkout",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to(self.login_url()).into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        AuthService::new(state.storage())
            .current_user()
            .map(Self)
            .ok_or_else(|| AuthRejection::for_path(parts.uri.path()))
    }
}

/// Extractor that optionally gets the logged-in user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is
/// logged in. Every page uses it to render the auth box.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        Ok(Self(AuthService::new(state.storage()).current_user()))
    }
}
