//! # Author Service
//!
//! Uniqueness of author names and the referential check that keeps an
//! author alive while books still reference them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::book::Book;
use super::errors::{CatalogError, CatalogResult};
use super::ownership;
use crate::store::{Document, DocumentStore};

/// Author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,

    /// Display name, globally unique
    pub name: String,

    /// The user that created this author
    pub owner_id: Uuid,
}

impl Document for Author {
    const COLLECTION: &'static str = "authors";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Author operations over an injected store handle.
pub struct AuthorService<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> AuthorService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create an author owned by the caller.
    pub fn create(&self, name: &str, owner_id: Uuid) -> CatalogResult<Author> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::ValidationFailed(
                "author name must not be blank".to_string(),
            ));
        }
        if self.name_exists(name)? {
            return Err(CatalogError::DuplicateName);
        }

        let author = Author {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner_id,
        };
        self.store.save(&author)?;
        Ok(author)
    }

    /// Rename an author. Only the owner may rename.
    pub fn rename(&self, author_id: Uuid, new_name: &str, caller_id: Uuid) -> CatalogResult<Author> {
        let mut author: Author = self
            .store
            .find_by_id(author_id)?
            .ok_or(CatalogError::NotFound)?;
        ownership::authorize(author.owner_id, caller_id)?;

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(CatalogError::ValidationFailed(
                "author name must not be blank".to_string(),
            ));
        }
        if new_name != author.name && self.name_exists(new_name)? {
            return Err(CatalogError::DuplicateName);
        }

        author.name = new_name.to_string();
        self.store.save(&author)?;
        Ok(author)
    }

    /// Delete an author. Fails while any book references them.
    ///
    /// The dependent-book check and the delete are two separate store
    /// calls; a book created in between is not prevented.
    pub fn delete(&self, author_id: Uuid, caller_id: Uuid) -> CatalogResult<()> {
        let author: Author = self
            .store
            .find_by_id(author_id)?
            .ok_or(CatalogError::NotFound)?;
        ownership::authorize(author.owner_id, caller_id)?;

        let dependents: Vec<Book> = self.store.find(|b: &Book| b.author_id == author_id)?;
        if !dependents.is_empty() {
            return Err(CatalogError::HasDependentBooks);
        }

        self.store.remove::<Author>(author.id)?;
        Ok(())
    }

    pub fn get(&self, author_id: Uuid) -> CatalogResult<Author> {
        self.store
            .find_by_id(author_id)?
            .ok_or(CatalogError::NotFound)
    }

    /// List authors, optionally narrowed by a case-insensitive substring
    /// match on the name.
    pub fn list(&self, name_filter: Option<&str>) -> CatalogResult<Vec<Author>> {
        match name_filter {
            Some(filter) if !filter.trim().is_empty() => {
                let needle = filter.trim().to_lowercase();
                let matches = self
                    .store
                    .find(|a: &Author| a.name.to_lowercase().contains(&needle))?;
                Ok(matches)
            }
            _ => Ok(self.store.find(|_: &Author| true)?),
        }
    }

    // Exact, case-sensitive match: "A. Smith" and "a. smith" may coexist.
    fn name_exists(&self, name: &str) -> CatalogResult<bool> {
        let existing: Vec<Author> = self.store.find(|a: &Author| a.name == name)?;
        Ok(!existing.is_empty())
    }
}
