//! User repository over the `insura_users_v1` collection.

use super::{LocalStorage, StoreError, keys};
use crate::models::User;

/// Email of the built-in demo account.
pub const DEMO_USER_EMAIL: &str = "demo@insura.com";

/// Repository for registered users.
pub struct UserRepository<'a> {
    storage: &'a LocalStorage,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(storage: &'a LocalStorage) -> Self {
        Self { storage }
    }

    /// All registered users in signup order.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.storage.read_json(keys::USERS)
    }

    /// Find a user by exact email.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.list().into_iter().find(|u| u.email == email)
    }

    /// Find a user whose email and password both match exactly.
    #[must_use]
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Option<User> {
        self.list()
            .into_iter()
            .find(|u| u.email == email && u.password == password)
    }

    /// Append a new user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the email is already registered, or
    /// another `StoreError` if the store cannot be written.
    pub fn create(&self, user: User) -> Result<User, StoreError> {
        let _guard = self.storage.lock();

        let mut users = self.list();
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "email already registered: {}",
                user.email
            )));
        }

        users.push(user.clone());
        self.storage.write_json(keys::USERS, &users)?;

        tracing::info!(email = %user.email, total = users.len(), "User registered");
        Ok(user)
    }
}

/// Seed the demo account if it is not registered yet.
///
/// Returns `true` if the account was created.
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be written.
pub fn seed_demo_user(storage: &LocalStorage) -> Result<bool, StoreError> {
    let demo = User {
        email: DEMO_USER_EMAIL.to_string(),
        password: "password123".to_string(),
        name: "Demo User".to_string(),
        phone: "081234567890".to_string(),
    };

    match UserRepository::new(storage).create(demo) {
        Ok(_) => Ok(true),
        Err(StoreError::Conflict(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User {
            email: email.to_string(),
            password: "secret-pass".to_string(),
            name: "Test User".to_string(),
            phone: "0812345678".to_string(),
        }
    }

    #[test]
    fn test_create_and_find() {
        let storage = LocalStorage::in_memory();
        let repo = UserRepository::new(&storage);
        repo.create(user("a@b.co")).unwrap();

        assert!(repo.find_by_email("a@b.co").is_some());
        assert!(repo.find_by_email("A@b.co").is_none());
        assert!(repo.find_by_credentials("a@b.co", "secret-pass").is_some());
        assert!(repo.find_by_credentials("a@b.co", "wrong").is_none());
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let storage = LocalStorage::in_memory();
        let repo = UserRepository::new(&storage);
        repo.create(user("a@b.co")).unwrap();

        let err = repo.create(user("a@b.co")).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(repo.list().len(), 1);
    }

    #[test]
    fn test_seed_demo_user_is_idempotent() {
        let storage = LocalStorage::in_memory();
        assert!(seed_demo_user(&storage).unwrap());
        assert!(!seed_demo_user(&storage).unwrap());

        let repo = UserRepository::new(&storage);
        assert_eq!(repo.list().len(), 1);
        let demo = repo
            .find_by_credentials(DEMO_USER_EMAIL, "password123")
            .unwrap();
        assert_eq!(demo.name, "Demo User");
        assert_eq!(demo.phone, "081234567890");
    }

    #[test]
    fn test_corrupt_users_read_as_empty() {
        let storage = LocalStorage::in_memory();
        storage.set_raw(keys::USERS, "not-json").unwrap();
        let repo = UserRepository::new(&storage);
        assert!(repo.list().is_empty());

        // Writing replaces the corrupt value
        repo.create(user("a@b.co")).unwrap();
        assert_eq!(repo.list().len(), 1);
    }
}
