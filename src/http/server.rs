//! # HTTP Server
//!
//! Combines the auth, author, and book routers into one axum server with
//! CORS, a health check, and the recent-books home listing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::auth_routes::auth_routes;
use super::author_routes::author_routes;
use super::book_routes::{book_routes, BookSummary};
use super::config::HttpServerConfig;
use super::{catalog_error, ApiError, AppState};
use crate::observability::Logger;

/// Number of books shown on the home listing
const RECENT_BOOKS_LIMIT: usize = 10;

/// HTTP server for the catalog
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a server with custom configuration
    pub fn with_config(config: HttpServerConfig) -> Self {
        let router = Self::build_router(&config, Arc::new(AppState::new()));
        Self { config, router }
    }

    /// Build the combined router over a shared state
    fn build_router(config: &HttpServerConfig, state: Arc<AppState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            // Permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(root_routes(state.clone()))
            .nest("/auth", auth_routes(state.clone()))
            .nest("/authors", author_routes(state.clone()))
            .nest("/books", book_routes(state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the server and serve until shutdown
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        Logger::info(
            "HTTP_SERVER_START",
            &[("addr", &addr.to_string())],
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check and the home listing
fn root_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/", get(home_handler))
        .with_state(state)
}

/// Liveness check
async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Home listing: the newest books
async fn home_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookSummary>>, ApiError> {
    let books = state
        .books
        .recent(RECENT_BOOKS_LIMIT)
        .map_err(catalog_error)?;
    Ok(Json(books.iter().map(BookSummary::from).collect()))
}
