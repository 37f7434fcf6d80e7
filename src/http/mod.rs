//! # HTTP Layer
//!
//! axum routers translating requests into service calls. Handlers do no
//! catalog logic themselves: they extract the caller through the session
//! gate, call a service, and serialize the outcome.

pub mod auth_routes;
pub mod author_routes;
pub mod book_routes;
pub mod config;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{AuthError, SessionManager, UserService};
use crate::catalog::{AuthorService, BookService, CatalogError};
use crate::observability::Logger;
use crate::store::MemoryStore;

/// Services shared by every router, over one store handle.
pub struct AppState {
    pub users: UserService<MemoryStore>,
    pub sessions: SessionManager<MemoryStore>,
    pub authors: AuthorService<MemoryStore>,
    pub books: BookService<MemoryStore>,
}

impl AppState {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: UserService::new(store.clone()),
            sessions: SessionManager::new(store.clone()),
            authors: AuthorService::new(store.clone()),
            books: BookService::new(store),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON error body returned by every handler
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn catalog_error(err: CatalogError) -> ApiError {
    if !err.is_client_error() {
        Logger::error("CATALOG_ERROR", &[("error", &err.to_string())]);
    }
    let code = err.status_code();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code,
        }),
    )
}

pub(crate) fn auth_error(err: AuthError) -> ApiError {
    if !err.is_client_error() {
        Logger::error("AUTH_ERROR", &[("error", &err.to_string())]);
    }
    let code = err.status_code();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code,
        }),
    )
}

/// Extract the bearer token, if any.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Resolve the caller behind a request through the session gate.
pub(crate) fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let token = bearer_token(headers)
        .ok_or_else(|| auth_error(AuthError::AuthenticationRequired))?;
    state.sessions.authenticate(token).map_err(auth_error)
}
