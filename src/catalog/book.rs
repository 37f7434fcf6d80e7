//! # Book Service
//!
//! Title uniqueness, cover handling, filtered listing, and ownership-checked
//! updates. A book's `author_id` is advisory: it is not validated against
//! the author collection on write.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cover::{self, CoverPayload};
use super::errors::{CatalogError, CatalogResult};
use super::ownership;
use crate::store::{Document, DocumentStore};

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,

    /// Title, globally unique
    pub title: String,

    pub description: Option<String>,

    pub publish_date: NaiveDate,

    pub page_count: u32,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// Inline cover bytes
    pub cover_image: Vec<u8>,

    /// MIME type of the stored cover
    pub cover_image_type: String,

    /// Referenced author; validity is advisory, unchecked on write
    pub author_id: Uuid,

    /// The user that created this book
    pub owner_id: Uuid,
}

impl Book {
    /// Derived read-only view of the cover as a data URI, recomputed from
    /// the stored fields on every call.
    pub fn cover_data_uri(&self) -> String {
        cover::data_uri(&self.cover_image, &self.cover_image_type)
    }
}

impl Document for Book {
    const COLLECTION: &'static str = "books";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Caller-supplied fields for create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub description: Option<String>,
    pub publish_date: NaiveDate,
    pub page_count: u32,
    pub author_id: Uuid,
}

/// Listing filters. Each supplied filter narrows independently (logical
/// AND); absent filters are no-ops.
#[derive(Debug, Clone, Default)]
pub struct BookQuery {
    /// Case-insensitive substring match on the title
    pub title: Option<String>,

    /// Inclusive lower bound on the publish date
    pub published_after: Option<NaiveDate>,

    /// Inclusive upper bound on the publish date
    pub published_before: Option<NaiveDate>,
}

impl BookQuery {
    fn matches(&self, book: &Book) -> bool {
        if let Some(title) = &self.title {
            if !book.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }
        if let Some(after) = self.published_after {
            if book.publish_date < after {
                return false;
            }
        }
        if let Some(before) = self.published_before {
            if book.publish_date > before {
                return false;
            }
        }
        true
    }
}

/// Book operations over an injected store handle.
pub struct BookService<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> BookService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a book owned by the caller.
    ///
    /// A cover payload whose declared type is outside the allowed image set
    /// decodes to nothing; since a cover is required, creation then fails
    /// validation. The decode miss itself never raises.
    pub fn create(
        &self,
        draft: BookDraft,
        cover_payload: Option<&CoverPayload>,
        owner_id: Uuid,
    ) -> CatalogResult<Book> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(CatalogError::ValidationFailed(
                "book title must not be blank".to_string(),
            ));
        }
        if self.title_exists(title)? {
            return Err(CatalogError::DuplicateTitle);
        }

        let cover = cover_payload.and_then(cover::decode).ok_or_else(|| {
            CatalogError::ValidationFailed("a cover image is required".to_string())
        })?;

        let book = Book {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: draft.description,
            publish_date: draft.publish_date,
            page_count: draft.page_count,
            created_at: Utc::now(),
            cover_image: cover.bytes,
            cover_image_type: cover.mime_type,
            author_id: draft.author_id,
            owner_id,
        };
        self.store.save(&book)?;
        Ok(book)
    }

    /// Update a book. Only the owner may update.
    ///
    /// The cover is replaced only when a non-empty payload is supplied and
    /// decodes to an allowed type; otherwise the stored cover is kept.
    pub fn update(
        &self,
        book_id: Uuid,
        draft: BookDraft,
        cover_payload: Option<&CoverPayload>,
        caller_id: Uuid,
    ) -> CatalogResult<Book> {
        let mut book: Book = self
            .store
            .find_by_id(book_id)?
            .ok_or(CatalogError::NotFound)?;
        ownership::authorize(book.owner_id, caller_id)?;

        let title = draft.title.trim();
        if title.is_empty() {
            return Err(CatalogError::ValidationFailed(
                "book title must not be blank".to_string(),
            ));
        }
        if title != book.title && self.title_exists(title)? {
            return Err(CatalogError::DuplicateTitle);
        }

        book.title = title.to_string();
        book.description = draft.description;
        book.publish_date = draft.publish_date;
        book.page_count = draft.page_count;
        book.author_id = draft.author_id;

        if let Some(payload) = cover_payload {
            if !payload.data.is_empty() {
                if let Some(cover) = cover::decode(payload) {
                    book.cover_image = cover.bytes;
                    book.cover_image_type = cover.mime_type;
                }
            }
        }

        self.store.save(&book)?;
        Ok(book)
    }

    /// Delete a book. Only the owner may delete.
    pub fn delete(&self, book_id: Uuid, caller_id: Uuid) -> CatalogResult<()> {
        let book: Book = self
            .store
            .find_by_id(book_id)?
            .ok_or(CatalogError::NotFound)?;
        ownership::authorize(book.owner_id, caller_id)?;
        self.store.remove::<Book>(book.id)?;
        Ok(())
    }

    pub fn get(&self, book_id: Uuid) -> CatalogResult<Book> {
        self.store
            .find_by_id(book_id)?
            .ok_or(CatalogError::NotFound)
    }

    /// List books matching every supplied filter.
    pub fn list(&self, query: &BookQuery) -> CatalogResult<Vec<Book>> {
        Ok(self.store.find(|b: &Book| query.matches(b))?)
    }

    /// Newest books first, up to `limit`.
    pub fn recent(&self, limit: usize) -> CatalogResult<Vec<Book>> {
        let mut books: Vec<Book> = self.store.find(|_: &Book| true)?;
        books.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        books.truncate(limit);
        Ok(books)
    }

    /// Books referencing the given author, up to `limit`.
    pub fn by_author(&self, author_id: Uuid, limit: usize) -> CatalogResult<Vec<Book>> {
        let mut books: Vec<Book> = self.store.find(|b: &Book| b.author_id == author_id)?;
        books.truncate(limit);
        Ok(books)
    }

    fn title_exists(&self, title: &str) -> CatalogResult<bool> {
        let existing: Vec<Book> = self.store.find(|b: &Book| b.title == title)?;
        Ok(!existing.is_empty())
    }
}
