//! Store error type.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Generic, unclassified persistence failure.
///
/// The services do not inspect the cause; they surface it to the HTTP layer
/// as a server error, distinct from `NotFound`.
#[derive(Debug, Clone, Error)]
#[error("Store error: {0}")]
pub struct StoreError(String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
