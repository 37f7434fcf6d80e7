//! # Auth Errors
//!
//! Error types for registration, login, and sessions.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Login failed (generic - don't leak whether the email exists)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("Email already registered")]
    EmailAlreadyExists,

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// Request carried no usable bearer token
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Session not found, expired, or revoked
    #[error("Session expired or invalid")]
    SessionInvalid,

    /// No user with the given id
    #[error("User not found")]
    UserNotFound,

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Underlying persistence failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::WeakPassword(_) => 400,
            AuthError::InvalidCredentials => 401,
            AuthError::AuthenticationRequired => 401,
            AuthError::SessionInvalid => 401,
            AuthError::UserNotFound => 404,
            AuthError::EmailAlreadyExists => 409,
            AuthError::HashingFailed => 500,
            AuthError::Store(_) => 500,
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::EmailAlreadyExists.status_code(), 409);
        assert_eq!(AuthError::HashingFailed.status_code(), 500);
    }

    #[test]
    fn test_login_failure_message_is_generic() {
        // The message must not reveal whether the email or the password
        // was wrong.
        let message = AuthError::InvalidCredentials.to_string();
        assert!(!message.to_lowercase().contains("email"));
        assert!(!message.to_lowercase().contains("password"));
    }
}
