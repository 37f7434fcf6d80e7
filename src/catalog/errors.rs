//! # Catalog Errors
//!
//! Error taxonomy for the Author and Book services.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors the Author and Book services can return.
///
/// Services never retry: no operation here is safe to retry blindly under
/// the unique-constraint semantics. Turning a variant into a user-facing
/// message is the HTTP layer's job.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// A required field is missing or malformed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// An author with this name already exists
    #[error("An author with this name already exists")]
    DuplicateName,

    /// A book with this title already exists
    #[error("A book with this title already exists")]
    DuplicateTitle,

    /// No record with the given id
    #[error("Record not found")]
    NotFound,

    /// Caller is not the record's owner
    #[error("Only the record's owner may modify it")]
    NotOwner,

    /// Author still referenced by at least one book
    #[error("This author still has books")]
    HasDependentBooks,

    /// Underlying persistence failure, surfaced distinctly from `NotFound`
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::ValidationFailed(_) => 400,
            CatalogError::NotOwner => 403,
            CatalogError::NotFound => 404,
            CatalogError::DuplicateName => 409,
            CatalogError::DuplicateTitle => 409,
            CatalogError::HasDependentBooks => 409,
            CatalogError::Store(_) => 500,
        }
    }

    /// Returns whether this error was caused by the client
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
