//! In-process document store.
//!
//! Documents are held as JSON values grouped by collection name, behind a
//! single `RwLock`. Insertion order is preserved. There are no transactions
//! and no cross-request ordering: concurrent writers are last-write-wins.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use uuid::Uuid;

use super::{Document, DocumentStore, StoreError, StoreResult};

/// In-memory `DocumentStore` implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<&'static str, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn decode<D: Document>(value: &Value) -> StoreResult<D> {
        serde_json::from_value(value.clone())
            .map_err(|e| StoreError::new(format!("corrupt document in {}: {}", D::COLLECTION, e)))
    }

    fn encode<D: Document>(document: &D) -> StoreResult<Value> {
        serde_json::to_value(document)
            .map_err(|e| StoreError::new(format!("cannot serialize into {}: {}", D::COLLECTION, e)))
    }
}

impl DocumentStore for MemoryStore {
    fn find_by_id<D: Document>(&self, id: Uuid) -> StoreResult<Option<D>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::new("lock poisoned"))?;

        let Some(values) = collections.get(D::COLLECTION) else {
            return Ok(None);
        };

        for value in values {
            let document: D = Self::decode(value)?;
            if document.id() == id {
                return Ok(Some(document));
            }
        }
        Ok(None)
    }

    fn find<D, P>(&self, predicate: P) -> StoreResult<Vec<D>>
    where
        D: Document,
        P: Fn(&D) -> bool,
    {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::new("lock poisoned"))?;

        let Some(values) = collections.get(D::COLLECTION) else {
            return Ok(Vec::new());
        };

        let mut matches = Vec::new();
        for value in values {
            let document: D = Self::decode(value)?;
            if predicate(&document) {
                matches.push(document);
            }
        }
        Ok(matches)
    }

    fn save<D: Document>(&self, document: &D) -> StoreResult<()> {
        let encoded = Self::encode(document)?;

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::new("lock poisoned"))?;

        let values = collections.entry(D::COLLECTION).or_default();
        for value in values.iter_mut() {
            let stored: D = Self::decode(value)?;
            if stored.id() == document.id() {
                *value = encoded;
                return Ok(());
            }
        }
        values.push(encoded);
        Ok(())
    }

    fn remove<D: Document>(&self, id: Uuid) -> StoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::new("lock poisoned"))?;

        let values = collections.entry(D::COLLECTION).or_default();
        let mut index = None;
        for (i, value) in values.iter().enumerate() {
            let stored: D = Self::decode(value)?;
            if stored.id() == id {
                index = Some(i);
                break;
            }
        }

        match index {
            Some(i) => {
                values.remove(i);
                Ok(())
            }
            None => Err(StoreError::new(format!(
                "no document with id {} in {}",
                id,
                D::COLLECTION
            ))),
        }
    }
}
