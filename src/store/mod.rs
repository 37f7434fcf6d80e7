//! # Document Store
//!
//! Persistence adapter for the catalog. Records are documents grouped into
//! named collections; the store knows nothing about catalog semantics
//! (uniqueness and referential checks live in the services).

mod errors;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

/// A record kind that can be persisted.
///
/// Each implementor names its collection and exposes its identifier and the
/// identity of the user that created it.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Collection the documents of this kind live in.
    const COLLECTION: &'static str;

    /// Unique identifier of this document.
    fn id(&self) -> Uuid;

    /// The user that created this document.
    fn owner_id(&self) -> Uuid;
}

/// Store operations available to the services.
///
/// Services hold an explicit handle (`Arc<S>`) injected at construction;
/// there is no process-wide connection.
pub trait DocumentStore: Send + Sync {
    /// Look up a single document by id.
    fn find_by_id<D: Document>(&self, id: Uuid) -> StoreResult<Option<D>>;

    /// Return every document of the collection matching the predicate.
    fn find<D, P>(&self, predicate: P) -> StoreResult<Vec<D>>
    where
        D: Document,
        P: Fn(&D) -> bool;

    /// Insert the document, or replace the stored one with the same id.
    fn save<D: Document>(&self, document: &D) -> StoreResult<()>;

    /// Remove the document with the given id.
    fn remove<D: Document>(&self, id: Uuid) -> StoreResult<()>;
}
