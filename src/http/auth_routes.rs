//! Auth HTTP Routes
//!
//! Registration, login, logout, and the current-user endpoint.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{auth_error, authenticate, bearer_token, ApiError, AppState};
use crate::auth::{AuthError, User};
use crate::observability::Logger;

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/logout", delete(logout_handler))
        .route("/me", get(me_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// ==================
// Handlers
// ==================

/// Register handler
async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .users
        .register(&request.name, &request.email, &request.password)
        .map_err(auth_error)?;

    Logger::info("USER_REGISTERED", &[("user_id", &user.id.to_string())]);
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Login handler
async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .users
        .login(&request.email, &request.password)
        .map_err(auth_error)?;
    let (session, token) = state.sessions.open(user.id).map_err(auth_error)?;

    Ok(Json(LoginResponse {
        user: UserResponse::from(&user),
        token,
        expires_at: session.expires_at,
    }))
}

/// Logout handler: revokes the presented session
async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token =
        bearer_token(&headers).ok_or_else(|| auth_error(AuthError::AuthenticationRequired))?;
    state.sessions.revoke(token).map_err(auth_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current-user handler
async fn me_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let caller_id = authenticate(&state, &headers)?;
    let user = state.users.get(caller_id).map_err(auth_error)?;
    Ok(Json(UserResponse::from(&user)))
}
