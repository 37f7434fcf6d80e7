//! # Users
//!
//! Registration and login. Users live in the `users` collection of the
//! same document store as the catalog.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{self, PasswordPolicy};
use super::errors::{AuthError, AuthResult};
use crate::store::{Document, DocumentStore};

/// User record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub name: String,

    /// Login identifier, unique, stored lowercased
    pub email: String,

    /// Argon2id hash, never the plaintext
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        crypto::verify_password(password, &self.password_hash)
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> Uuid {
        self.id
    }

    // Users own themselves; nothing in the catalog mutates a user on
    // another user's behalf.
    fn owner_id(&self) -> Uuid {
        self.id
    }
}

/// Registration and login over an injected store handle.
pub struct UserService<S: DocumentStore> {
    store: Arc<S>,
    policy: PasswordPolicy,
}

impl<S: DocumentStore> UserService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            policy: PasswordPolicy::default(),
        }
    }

    pub fn with_policy(store: Arc<S>, policy: PasswordPolicy) -> Self {
        Self { store, policy }
    }

    /// Register a new user.
    pub fn register(&self, name: &str, email: &str, password: &str) -> AuthResult<User> {
        self.policy.validate(password)?;

        let email = normalize_email(email);
        let existing: Vec<User> = self.store.find(|u: &User| u.email == email)?;
        if !existing.is_empty() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email,
            password_hash: crypto::hash_password(password)?,
            created_at: Utc::now(),
        };
        self.store.save(&user)?;
        Ok(user)
    }

    /// Authenticate by email and password.
    ///
    /// Failure is always `InvalidCredentials`, whether the email is
    /// unknown or the password is wrong.
    pub fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        let email = normalize_email(email);
        let user = self
            .store
            .find(|u: &User| u.email == email)?
            .into_iter()
            .next()
            .ok_or(AuthError::InvalidCredentials)?;

        if user.verify_password(password)? {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub fn get(&self, user_id: Uuid) -> AuthResult<User> {
        self.store
            .find_by_id(user_id)?
            .ok_or(AuthError::UserNotFound)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> UserService<MemoryStore> {
        UserService::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_register_and_login() {
        let users = service();
        let user = users
            .register("Ada", "ada@example.com", "analytical1842")
            .unwrap();
        assert_eq!(user.name, "Ada");
        assert_ne!(user.password_hash, "analytical1842");

        let logged_in = users.login("ada@example.com", "analytical1842").unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[test]
    fn test_email_is_normalized() {
        let users = service();
        users
            .register("Ada", "  Ada@Example.COM ", "analytical1842")
            .unwrap();
        assert!(users.login("ada@example.com", "analytical1842").is_ok());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let users = service();
        users
            .register("Ada", "ada@example.com", "analytical1842")
            .unwrap();

        let result = users.register("Imposter", "ada@example.com", "different99");
        assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
    }

    #[test]
    fn test_wrong_password_is_generic_failure() {
        let users = service();
        users
            .register("Ada", "ada@example.com", "analytical1842")
            .unwrap();

        let wrong_password = users.login("ada@example.com", "nope-nope");
        let unknown_email = users.login("ghost@example.com", "analytical1842");
        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_weak_password_rejected() {
        let users = service();
        let result = users.register("Ada", "ada@example.com", "tiny");
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }
}
