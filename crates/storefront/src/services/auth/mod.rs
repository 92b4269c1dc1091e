//! Authentication service.
//!
//! Signup, login, and logout against the registered users in the local
//! store. The logged-in email is stored under `insura_session_v1`.

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use regex::Regex;

use insura_core::Email;

use crate::models::{CurrentUser, User};
use crate::store::{LocalStorage, SessionRepository, StoreError, UserRepository};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Allowed full-name length, in characters.
const NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=32;

/// Indonesian mobile number: `08` followed by 8 to 14 digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^08\d{8,14}$").expect("Invalid regex"));

/// Signup form fields, as submitted.
#[derive(Debug, Clone, Default)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub name: String,
    pub phone: String,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    session: SessionRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(storage: &'a LocalStorage) -> Self {
        Self {
            users: UserRepository::new(storage),
            session: SessionRepository::new(storage),
        }
    }

    /// Register a new user.
    ///
    /// Email, name, and phone are trimmed; passwords are taken as entered.
    /// Rules are checked in order and the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the `AuthError` for the first rule that fails, or
    /// `AuthError::Store` if the user cannot be saved.
    pub fn signup(&self, request: &SignupRequest) -> Result<User, AuthError> {
        let email = request.email.trim();
        let name = request.name.trim();
        let phone = request.phone.trim();

        if email.is_empty() || request.password.is_empty() || name.is_empty() || phone.is_empty()
        {
            return Err(AuthError::MissingSignupFields);
        }

        let email = Email::parse(email)?;
        validate_password(&request.password)?;
        if request.password != request.password_confirm {
            return Err(AuthError::PasswordMismatch);
        }
        validate_name(name)?;
        validate_phone(phone)?;

        let user = User {
            email: email.into_inner(),
            password: request.password.clone(),
            name: name.to_string(),
            phone: phone.to_string(),
        };

        self.users.create(user).map_err(|e| match e {
            StoreError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Store(other),
        })
    }

    /// Log in with email and password and record the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank,
    /// `AuthError::InvalidCredentials` if no user matches both exactly, or
    /// `AuthError::Store` if the session cannot be saved.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self
            .users
            .find_by_credentials(email, password)
            .ok_or(AuthError::InvalidCredentials)?;

        self.session.set(&user.email)?;
        tracing::info!(email = %user.email, "User logged in");
        Ok(user)
    }

    /// Clear the session, whether or not anyone is logged in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the session cannot be cleared.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.clear()?;
        tracing::info!("User logged out");
        Ok(())
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        let email = self.session.current()?;
        Some(
            self.users
                .find_by_email(&email)
                .map_or_else(|| CurrentUser::email_only(email), CurrentUser::from),
        )
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Validate a trimmed full name.
fn validate_name(name: &str) -> Result<(), AuthError> {
    if !NAME_LENGTH.contains(&name.chars().count()) || name.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::InvalidName);
    }
    Ok(())
}

/// Validate a trimmed phone number.
fn validate_phone(phone: &str) -> Result<(), AuthError> {
    if !PHONE_RE.is_match(phone) {
        return Err(AuthError::InvalidPhone);
    }
    Ok(())
}
