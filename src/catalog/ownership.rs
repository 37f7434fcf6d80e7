//! # Ownership Guard
//!
//! A record may only be mutated or deleted by the user that created it.
//! The check is a strict, typed identifier comparison and is applied
//! identically to authors and books.

use uuid::Uuid;

use super::errors::{CatalogError, CatalogResult};

/// Allow the mutation only when the caller owns the record.
///
/// `NotOwner` must short-circuit the calling service before any mutation
/// is attempted.
pub fn authorize(owner_id: Uuid, caller_id: Uuid) -> CatalogResult<()> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(CatalogError::NotOwner)
    }
}
