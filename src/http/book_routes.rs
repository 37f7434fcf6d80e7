//! Book HTTP Routes
//!
//! Listing and detail are public; create, update, and delete require an
//! authenticated owner. Covers travel as `{type, data}` payloads inbound
//! and as data URIs outbound.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{authenticate, catalog_error, ApiError, AppState, ErrorResponse};
use crate::catalog::{Book, BookDraft, BookQuery, CoverPayload};

/// Book routes with shared state
pub fn book_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route(
            "/:id",
            get(show_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    /// Case-insensitive substring match on the title
    pub title: Option<String>,

    /// Inclusive lower bound on the publish date, `YYYY-MM-DD`
    pub published_after: Option<String>,

    /// Inclusive upper bound on the publish date, `YYYY-MM-DD`
    pub published_before: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub description: Option<String>,
    pub publish_date: NaiveDate,
    pub page_count: u32,
    pub author_id: Uuid,
    pub cover: Option<CoverPayload>,
}

impl BookRequest {
    fn draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            publish_date: self.publish_date,
            page_count: self.page_count,
            author_id: self.author_id,
        }
    }
}

/// Compact listing entry (no cover bytes)
#[derive(Debug, Serialize)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub publish_date: NaiveDate,
    pub author_id: Uuid,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            publish_date: book.publish_date,
            author_id: book.author_id,
        }
    }
}

/// Full book view; the cover is the derived data-URI string
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub publish_date: NaiveDate,
    pub page_count: u32,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub owner_id: Uuid,
    pub cover_data_uri: String,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            description: book.description.clone(),
            publish_date: book.publish_date,
            page_count: book.page_count,
            created_at: book.created_at,
            author_id: book.author_id,
            owner_id: book.owner_id,
            cover_data_uri: book.cover_data_uri(),
        }
    }
}

// Empty query params are treated as absent, bad dates as client errors.
fn parse_date(field: &str, value: &Option<String>) -> Result<Option<NaiveDate>, ApiError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("{} must be a YYYY-MM-DD date", field),
                    code: 400,
                }),
            )
        }),
    }
}

// ==================
// Handlers
// ==================

/// List books matching every supplied filter
async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<Vec<BookSummary>>, ApiError> {
    let filters = BookQuery {
        title: query.title.clone().filter(|t| !t.trim().is_empty()),
        published_after: parse_date("published_after", &query.published_after)?,
        published_before: parse_date("published_before", &query.published_before)?,
    };
    let books = state.books.list(&filters).map_err(catalog_error)?;
    Ok(Json(books.iter().map(BookSummary::from).collect()))
}

/// Create a book owned by the caller
async fn create_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let caller_id = authenticate(&state, &headers)?;
    let book = state
        .books
        .create(request.draft(), request.cover.as_ref(), caller_id)
        .map_err(catalog_error)?;
    Ok((StatusCode::CREATED, Json(BookResponse::from(&book))))
}

/// Book detail, cover included as a data URI
async fn show_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state.books.get(id).map_err(catalog_error)?;
    Ok(Json(BookResponse::from(&book)))
}

/// Update a book (owner only)
async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(request): Json<BookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let caller_id = authenticate(&state, &headers)?;
    let book = state
        .books
        .update(id, request.draft(), request.cover.as_ref(), caller_id)
        .map_err(catalog_error)?;
    Ok(Json(BookResponse::from(&book)))
}

/// Delete a book (owner only)
async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let caller_id = authenticate(&state, &headers)?;
    state.books.delete(id, caller_id).map_err(catalog_error)?;
    Ok(StatusCode::NO_CONTENT)
}
