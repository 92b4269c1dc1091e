//! Registered user record.

use serde::{Deserialize, Serialize};

/// A registered storefront user, as stored under `insura_users_v1`.
///
/// The email is the unique key and is matched exactly (case-sensitive).
/// Passwords are stored as entered; this is a demo store with no real
/// accounts behind it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("phone", &self.phone)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let user = User {
            email: "demo@insura.com".to_string(),
            password: "password123".to_string(),
            name: "Demo User".to_string(),
            phone: "081234567890".to_string(),
        };
        let debug_output = format!("{user:?}");
        assert!(debug_output.contains("demo@insura.com"));
        assert!(!debug_output.contains("password123"));
    }
}
