//! Catalog Invariant Tests
//!
//! - Author names and book titles are globally unique
//! - An author cannot be deleted while books reference them
//! - Listing filters narrow independently and combine with AND
//! - Covers round-trip to data URIs

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use libris::catalog::{
    AuthorService, BookDraft, BookQuery, BookService, CatalogError, CoverPayload,
};
use libris::store::MemoryStore;
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup() -> (AuthorService<MemoryStore>, BookService<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (
        AuthorService::new(store.clone()),
        BookService::new(store),
    )
}

fn png_payload() -> CoverPayload {
    CoverPayload {
        mime_type: "image/png".to_string(),
        data: BASE64.encode(b"\x89PNG\r\n\x1a\n\x00tiny"),
    }
}

fn draft(title: &str, publish_date: &str, author_id: Uuid) -> BookDraft {
    BookDraft {
        title: title.to_string(),
        description: None,
        publish_date: publish_date.parse().unwrap(),
        page_count: 300,
        author_id,
    }
}

// =============================================================================
// Uniqueness
// =============================================================================

/// Second author with the exact same name fails.
#[test]
fn test_duplicate_author_name() {
    let (authors, _) = setup();
    authors.create("A. Smith", Uuid::new_v4()).unwrap();

    let second = authors.create("A. Smith", Uuid::new_v4());
    assert!(matches!(second, Err(CatalogError::DuplicateName)));
}

/// Second book with the same title fails, regardless of owner.
#[test]
fn test_duplicate_book_title() {
    let (_, books) = setup();
    books
        .create(
            draft("Title X", "1999-01-01", Uuid::new_v4()),
            Some(&png_payload()),
            Uuid::new_v4(),
        )
        .unwrap();

    let second = books.create(
        draft("Title X", "2010-01-01", Uuid::new_v4()),
        Some(&png_payload()),
        Uuid::new_v4(),
    );
    assert!(matches!(second, Err(CatalogError::DuplicateTitle)));
}

// =============================================================================
// Referential Integrity
// =============================================================================

/// Deleting an author with no books succeeds.
#[test]
fn test_delete_author_without_books() {
    let (authors, _) = setup();
    let owner = Uuid::new_v4();
    let author = authors.create("Loner", owner).unwrap();

    authors.delete(author.id, owner).unwrap();
    assert!(matches!(authors.get(author.id), Err(CatalogError::NotFound)));
}

/// Deleting an author with a dependent book fails and mutates nothing.
#[test]
fn test_delete_author_with_dependent_book_blocked() {
    let (authors, books) = setup();
    let owner = Uuid::new_v4();
    let author = authors.create("Prolific", owner).unwrap();
    books
        .create(
            draft("Their Book", "2001-01-01", author.id),
            Some(&png_payload()),
            owner,
        )
        .unwrap();

    let result = authors.delete(author.id, owner);
    assert!(matches!(result, Err(CatalogError::HasDependentBooks)));

    // The author record still exists afterward.
    assert_eq!(authors.get(author.id).unwrap().name, "Prolific");
}

/// Once the dependent book is gone, the delete goes through.
#[test]
fn test_delete_author_after_dependent_book_removed() {
    let (authors, books) = setup();
    let owner = Uuid::new_v4();
    let author = authors.create("Freed", owner).unwrap();
    let book = books
        .create(
            draft("Last Copy", "2001-01-01", author.id),
            Some(&png_payload()),
            owner,
        )
        .unwrap();

    assert!(authors.delete(author.id, owner).is_err());
    books.delete(book.id, owner).unwrap();
    assert!(authors.delete(author.id, owner).is_ok());
}

// =============================================================================
// Listing Filters
// =============================================================================

/// Title filter is a case-insensitive substring match.
#[test]
fn test_title_filter_case_insensitive() {
    let (_, books) = setup();
    let owner = Uuid::new_v4();
    for title in ["Dune", "DUNE MESSIAH", "Hyperion"] {
        books
            .create(
                draft(title, "1980-01-01", Uuid::new_v4()),
                Some(&png_payload()),
                owner,
            )
            .unwrap();
    }

    let query = BookQuery {
        title: Some("dune".to_string()),
        ..Default::default()
    };
    let matched = books.list(&query).unwrap();
    assert_eq!(matched.len(), 2);
}

/// Filters combine with AND; absent filters are no-ops.
#[test]
fn test_filters_combine() {
    let (_, books) = setup();
    let owner = Uuid::new_v4();
    books
        .create(
            draft("Dune", "1965-08-01", Uuid::new_v4()),
            Some(&png_payload()),
            owner,
        )
        .unwrap();
    books
        .create(
            draft("Dune Anniversary", "2005-08-02", Uuid::new_v4()),
            Some(&png_payload()),
            owner,
        )
        .unwrap();

    let unfiltered = books.list(&BookQuery::default()).unwrap();
    assert_eq!(unfiltered.len(), 2);

    let query = BookQuery {
        title: Some("dune".to_string()),
        published_after: Some("2000-01-01".parse().unwrap()),
        published_before: None,
    };
    let matched = books.list(&query).unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].title, "Dune Anniversary");
}

// =============================================================================
// End to End
// =============================================================================

/// Create author, create book with a PNG cover, read it back as a data URI.
#[test]
fn test_author_book_cover_round_trip() {
    let (authors, books) = setup();
    let owner = Uuid::new_v4();

    let author = authors.create("A. Smith", owner).unwrap();
    let book = books
        .create(
            draft("Title X", "1999-01-01", author.id),
            Some(&png_payload()),
            owner,
        )
        .unwrap();

    let fetched = books.get(book.id).unwrap();
    let uri = fetched.cover_data_uri();
    assert!(uri.starts_with("data:image/png;base64,"));

    let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
    assert_eq!(
        BASE64.decode(payload).unwrap(),
        b"\x89PNG\r\n\x1a\n\x00tiny"
    );
}
