//! Session API handlers.
//!
//! This module provides the four lobby operations as JSON endpoints:
//! - Creating a session (returns the public code and the host's player id)
//! - Joining a session by code
//! - Starting the one-time deal (host only)
//! - Polling the per-player projected state
//!
//! Session codes are treated case-insensitively; the session manager
//! normalizes them to uppercase. The projected state never contains
//! another player's cards, only hand counts.
//!
//! # Examples
//!
//! Create a session:
//! ```bash
//! curl -X POST http://localhost:3000/api/v1/sessions \
//!   -H "Content-Type: application/json" \
//!   -d '{"host_name": "Ann"}'
//! ```
//!
//! Poll state:
//! ```bash
//! curl "http://localhost:3000/api/v1/sessions/C4FKD/state?player_id=<uuid>"
//! ```

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use card_lobby::game::{
    SessionError,
    entities::{PlayerId, SeatIndex, SessionView},
};
use serde::{Deserialize, Serialize};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub host_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub code: String,
    pub player_id: PlayerId,
    pub seat_idx: SeatIndex,
}

#[derive(Debug, Deserialize)]
pub struct JoinSessionRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct JoinSessionResponse {
    pub player_id: PlayerId,
    pub seat_idx: SeatIndex,
}

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub player_id: PlayerId,
}

#[derive(Debug, Deserialize)]
pub struct StateQuery {
    pub player_id: PlayerId,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a domain error onto a status code and the JSON error body.
///
/// Missing things are 404, internal faults are 500, everything else is a
/// caller-correctable 400.
fn error_response(err: SessionError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        SessionError::NotFound | SessionError::PlayerNotInSession => StatusCode::NOT_FOUND,
        SessionError::CodeAllocation | SessionError::InternalStateError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorResponse { error: err.to_string() }))
}

/// Create a new session.
///
/// Seats the creator at position 0 and makes them the host for the
/// session's lifetime.
///
/// # Request Body
///
/// ```json
/// {"host_name": "Ann"}
/// ```
///
/// # Response
///
/// Returns `201 Created`:
/// ```json
/// {"code": "C4FKD", "player_id": "…", "seat_idx": 0}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Empty or whitespace-only host name
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), (StatusCode, Json<ErrorResponse>)> {
    match state.session_manager.create_session(&request.host_name).await {
        Ok(created) => Ok((
            StatusCode::CREATED,
            Json(CreateSessionResponse {
                code: created.code,
                player_id: created.player_id,
                seat_idx: created.seat_idx,
            }),
        )),
        Err(e) => Err(error_response(e)),
    }
}

/// Join a session by its public code.
///
/// Assigns the lowest free seat. The returned `player_id` is the caller's
/// identity for all later requests.
///
/// # Path Parameters
///
/// - `code`: Public session code (case-insensitive)
///
/// # Request Body
///
/// ```json
/// {"name": "Bob"}
/// ```
///
/// # Response
///
/// Returns `200 OK`:
/// ```json
/// {"player_id": "…", "seat_idx": 1}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Session full, already dealt, or invalid name
/// - `404 Not Found`: Unknown session code
pub async fn join_session(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<JoinSessionRequest>,
) -> Result<Json<JoinSessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.session_manager.join_session(&code, &request.name).await {
        Ok(seated) => Ok(Json(JoinSessionResponse {
            player_id: seated.player_id,
            seat_idx: seated.seat_idx,
        })),
        Err(e) => Err(error_response(e)),
    }
}

/// Start the one-time deal.
///
/// Only the host may start, and only with all four seats filled. On
/// success the 52-card deck is split into four 13-card hands and the
/// session status becomes `dealt`.
///
/// # Path Parameters
///
/// - `code`: Public session code (case-insensitive)
///
/// # Request Body
///
/// ```json
/// {"player_id": "…"}
/// ```
///
/// # Response
///
/// Returns `200 OK` with empty body on success.
///
/// # Errors
///
/// - `400 Bad Request`: Requester is not the host, fewer than four
///   players, or the session was already dealt
/// - `404 Not Found`: Unknown session code
pub async fn start_session(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<StartSessionRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state.session_manager.start_session(&code, request.player_id).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err(error_response(e)),
    }
}

/// Get the projected session state for one player.
///
/// The view contains the requester's own hand in canonical sorted order
/// and, for every seat, only id, name, position, host/you flags, and a
/// card count.
///
/// # Path Parameters
///
/// - `code`: Public session code (case-insensitive)
///
/// # Query Parameters
///
/// - `player_id`: The requesting player's id from create/join
///
/// # Errors
///
/// - `404 Not Found`: Unknown session code, or the player id is not a
///   member of this session
pub async fn get_session_state(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<StateQuery>,
) -> Result<Json<SessionView>, (StatusCode, Json<ErrorResponse>)> {
    match state.session_manager.session_view(&code, query.player_id).await {
        Ok(view) => Ok(Json(view)),
        Err(e) => Err(error_response(e)),
    }
}
