//! # Sessions
//!
//! Opaque bearer tokens backing the authentication gate. The raw token is
//! handed to the client once at login; only its hash is stored. Logout
//! revokes immediately.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{constant_time_str_eq, generate_token, hash_token};
use super::errors::{AuthError, AuthResult};
use crate::store::{Document, DocumentStore};

/// Session record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,

    /// User this session belongs to
    pub user_id: Uuid,

    /// SHA-256 of the bearer token
    pub token_hash: String,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,

    /// Set on logout
    pub revoked: bool,
}

impl Document for Session {
    const COLLECTION: &'static str = "sessions";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Token lifetime
    pub ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::days(30),
        }
    }
}

/// Creates, validates, and revokes sessions.
pub struct SessionManager<S: DocumentStore> {
    store: Arc<S>,
    config: SessionConfig,
}

impl<S: DocumentStore> SessionManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, SessionConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    /// Open a session for a user.
    ///
    /// Returns the raw token to give to the client; it cannot be
    /// recovered later.
    pub fn open(&self, user_id: Uuid) -> AuthResult<(Session, String)> {
        let token = generate_token();
        let now = Utc::now();

        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            token_hash: hash_token(&token),
            created_at: now,
            expires_at: now + self.config.ttl,
            revoked: false,
        };
        self.store.save(&session)?;
        Ok((session, token))
    }

    /// The authentication gate: resolve a bearer token to a caller id.
    pub fn authenticate(&self, token: &str) -> AuthResult<Uuid> {
        let session = self.lookup(token)?;
        if session.revoked || session.expires_at < Utc::now() {
            return Err(AuthError::SessionInvalid);
        }
        Ok(session.user_id)
    }

    /// Revoke the session behind a token. Idempotent for valid tokens.
    pub fn revoke(&self, token: &str) -> AuthResult<()> {
        let mut session = self.lookup(token)?;
        session.revoked = true;
        self.store.save(&session)?;
        Ok(())
    }

    fn lookup(&self, token: &str) -> AuthResult<Session> {
        let token_hash = hash_token(token);
        self.store
            .find(|s: &Session| constant_time_str_eq(&s.token_hash, &token_hash))?
            .into_iter()
            .next()
            .ok_or(AuthError::SessionInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn manager() -> SessionManager<MemoryStore> {
        SessionManager::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_open_then_authenticate() {
        let sessions = manager();
        let user_id = Uuid::new_v4();

        let (_, token) = sessions.open(user_id).unwrap();
        assert_eq!(sessions.authenticate(&token).unwrap(), user_id);
    }

    #[test]
    fn test_unknown_token_rejected() {
        let sessions = manager();
        let result = sessions.authenticate("not-a-token");
        assert!(matches!(result, Err(AuthError::SessionInvalid)));
    }

    #[test]
    fn test_revoked_token_rejected() {
        let sessions = manager();
        let (_, token) = sessions.open(Uuid::new_v4()).unwrap();

        sessions.revoke(&token).unwrap();
        let result = sessions.authenticate(&token);
        assert!(matches!(result, Err(AuthError::SessionInvalid)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let sessions = SessionManager::with_config(
            Arc::new(MemoryStore::new()),
            SessionConfig {
                ttl: Duration::seconds(-1),
            },
        );
        let (_, token) = sessions.open(Uuid::new_v4()).unwrap();

        let result = sessions.authenticate(&token);
        assert!(matches!(result, Err(AuthError::SessionInvalid)));
    }

    #[test]
    fn test_raw_token_is_not_stored() {
        let sessions = manager();
        let (session, token) = sessions.open(Uuid::new_v4()).unwrap();
        assert_ne!(session.token_hash, token);
    }
}
