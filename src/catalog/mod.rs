//! # Catalog
//!
//! Author and Book services: input validation, uniqueness, ownership
//! enforcement, and the referential check that blocks deleting an author
//! who still has books.

pub mod author;
pub mod book;
pub mod cover;
mod errors;
pub mod ownership;

pub use author::{Author, AuthorService};
pub use book::{Book, BookDraft, BookQuery, BookService};
pub use cover::{CoverImage, CoverPayload};
pub use errors::{CatalogError, CatalogResult};
