//! HTTP API for the lobby server.
//!
//! The API is built with:
//! - **Axum**: Async web framework for the JSON endpoints
//! - **Tower-http**: CORS middleware for browser clients
//! - **Actor Model**: Session state managed by dedicated actor tasks in
//!   the `card_lobby` library
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /health                              - Health check
//! POST /api/v1/sessions                     - Create a session
//! POST /api/v1/sessions/{code}/join         - Join a session
//! POST /api/v1/sessions/{code}/start        - Host triggers the deal
//! GET  /api/v1/sessions/{code}/state        - Per-player projected state
//! ```
//!
//! Player identity is the opaque `player_id` returned by create/join; the
//! client stores it and passes it back on start and state calls. There are
//! no accounts and no authentication - the id itself is the unguessable
//! capability.
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production,
//! configure appropriate origins, methods, and headers.

pub mod request_id;
pub mod sessions;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use card_lobby::session::SessionManager;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request (cheap due to the Arc wrapper).
#[derive(Clone)]
pub struct AppState {
    pub session_manager: Arc<SessionManager>,
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Arguments
///
/// - `state`: Application state with the session manager
///
/// # Returns
///
/// Configured Axum router ready to serve requests
pub fn create_router(state: AppState) -> Router {
    let v1_routes = create_v1_router();

    let root_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(root_routes)
        .nest("/api/v1", v1_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create API v1 router with all versioned endpoints.
///
/// Versioning leaves room for future evolution (v2, v3, etc.) without
/// breaking existing clients.
fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(sessions::create_session))
        .route("/sessions/{code}/join", post(sessions::join_session))
        .route("/sessions/{code}/start", post(sessions::start_session))
        .route("/sessions/{code}/state", get(sessions::get_session_state))
}

/// Health check endpoint for monitoring and load balancers.
///
/// # Example
///
/// ```bash
/// curl http://localhost:3000/health
/// # {"status":"healthy","version":"0.1.0","sessions":{"active_count":2},"timestamp":"..."}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let active_count = state.session_manager.active_session_count().await;

    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": {
            "active_count": active_count,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
