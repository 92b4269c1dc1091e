//! Authentication error types.
//!
//! Display strings are shown to the visitor as-is on the signup and login
//! forms.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during signup and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required signup field is blank.
    #[error("Email, password, name, and phone number are required.")]
    MissingSignupFields,

    /// Invalid email format.
    #[error("Invalid email format.")]
    InvalidEmail(#[from] insura_core::EmailError),

    /// Password too short.
    #[error("Password must be at least {min} characters.")]
    WeakPassword { min: usize },

    /// Password and confirmation differ.
    #[error("Password and confirmation do not match.")]
    PasswordMismatch,

    /// Name too short, too long, or contains a digit.
    #[error("Full name must be 3-32 characters and must not contain digits.")]
    InvalidName,

    /// Phone number not in the `08...` format.
    #[error("Phone number must start with 08 and be 10-16 digits long.")]
    InvalidPhone,

    /// User already exists.
    #[error("Email is already registered.")]
    UserAlreadyExists,

    /// Email or password left blank on login.
    #[error("Email and password are required.")]
    MissingCredentials,

    /// Invalid credentials (wrong password or user not found).
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Local store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Whether this is a validation failure to show on the form, as opposed
    /// to a server-side failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
