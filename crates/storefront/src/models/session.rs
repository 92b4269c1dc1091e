//! Session-related types.

use serde::{Deserialize, Serialize};

use super::User;

/// The logged-in user, as shown in the auth box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub email: String,
    /// Display name, if the user record still exists.
    pub name: Option<String>,
}

impl CurrentUser {
    /// Session holder with no matching user record.
    #[must_use]
    pub const fn email_only(email: String) -> Self {
        Self { email, name: None }
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            name: Some(user.name),
        }
    }
}

/// Keys in the per-visitor tower-sessions store.
pub mod keys {
    /// Key for the purchase draft being configured.
    pub const CURRENT_PURCHASE: &str = "insura_current_purchase";
}
