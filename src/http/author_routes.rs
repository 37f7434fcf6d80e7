//! Author HTTP Routes
//!
//! Listing and search are public; create, rename, and delete require an
//! authenticated owner.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::book_routes::BookSummary;
use super::{authenticate, catalog_error, ApiError, AppState};
use crate::catalog::Author;

/// Author routes with shared state
pub fn author_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route(
            "/:id",
            get(show_handler).put(rename_handler).delete(delete_handler),
        )
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct ListAuthorsQuery {
    /// Case-insensitive substring match on the name
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAuthorRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameAuthorRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
}

impl From<&Author> for AuthorResponse {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
            owner_id: author.owner_id,
        }
    }
}

/// Author detail with a sample of their books
#[derive(Debug, Serialize)]
pub struct AuthorDetailResponse {
    pub author: AuthorResponse,
    pub books: Vec<BookSummary>,
}

// ==================
// Handlers
// ==================

/// List authors, optionally filtered by name
async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAuthorsQuery>,
) -> Result<Json<Vec<AuthorResponse>>, ApiError> {
    let authors = state
        .authors
        .list(query.name.as_deref())
        .map_err(catalog_error)?;
    Ok(Json(authors.iter().map(AuthorResponse::from).collect()))
}

/// Create an author owned by the caller
async fn create_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreateAuthorRequest>,
) -> Result<(StatusCode, Json<AuthorResponse>), ApiError> {
    let caller_id = authenticate(&state, &headers)?;
    let author = state
        .authors
        .create(&request.name, caller_id)
        .map_err(catalog_error)?;
    Ok((StatusCode::CREATED, Json(AuthorResponse::from(&author))))
}

/// Author detail, including up to five of their books
async fn show_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AuthorDetailResponse>, ApiError> {
    let author = state.authors.get(id).map_err(catalog_error)?;
    let books = state.books.by_author(id, 5).map_err(catalog_error)?;
    Ok(Json(AuthorDetailResponse {
        author: AuthorResponse::from(&author),
        books: books.iter().map(BookSummary::from).collect(),
    }))
}

/// Rename an author (owner only)
async fn rename_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(request): Json<RenameAuthorRequest>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let caller_id = authenticate(&state, &headers)?;
    let author = state
        .authors
        .rename(id, &request.name, caller_id)
        .map_err(catalog_error)?;
    Ok(Json(AuthorResponse::from(&author)))
}

/// Delete an author (owner only, blocked while books reference them)
async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let caller_id = authenticate(&state, &headers)?;
    state.authors.delete(id, caller_id).map_err(catalog_error)?;
    Ok(StatusCode::NO_CONTENT)
}
