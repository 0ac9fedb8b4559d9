//! Session manager for spawning and managing session actors.

use super::{
    actor::{SessionActor, SessionHandle},
    messages::{Seated, SessionMessage},
};
use crate::game::{
    Session, SessionError,
    constants::{CODE_ALPHABET, CODE_LENGTH, MAX_CODE_ATTEMPTS},
    entities::{PlayerId, SeatIndex, SessionView},
};
use rand::Rng;
use std::collections::HashMap;
use tokio::sync::{RwLock, oneshot};

/// Result of a successful session creation
#[derive(Clone, Debug)]
pub struct CreatedSession {
    pub code: String,
    pub player_id: PlayerId,
    pub seat_idx: SeatIndex,
}

/// Session manager owning the registry of live sessions, keyed by public
/// code. Sessions are never removed; the registry lives as long as the
/// process.
#[derive(Default)]
pub struct SessionManager {
    /// Active session handles
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    /// Create an empty session manager
    ///
    /// # Returns
    ///
    /// * `SessionManager` - New manager instance
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session, seat the host at position 0, and spawn its actor
    ///
    /// # Arguments
    ///
    /// * `host_name` - Display name of the creating player
    ///
    /// # Returns
    ///
    /// * `Result<CreatedSession, SessionError>` - Code, host player id, and
    ///   seat, or `InvalidName` / `CodeAllocation`
    pub async fn create_session(&self, host_name: &str) -> Result<CreatedSession, SessionError> {
        let mut sessions = self.sessions.write().await;

        // Code generation happens under the write lock so a generated code
        // can't collide with a concurrent insert.
        let code = generate_code(&sessions)?;
        let session = Session::new(code.clone(), host_name)?;
        let player_id = session.host_id();

        let (actor, handle) = SessionActor::new(session);
        sessions.insert(code.clone(), handle);
        drop(sessions);

        tokio::spawn(async move {
            actor.run().await;
        });

        log::info!("created session {code}");

        Ok(CreatedSession {
            code,
            player_id,
            seat_idx: 0,
        })
    }

    /// Get a session handle. Lookup is case-insensitive; codes are stored
    /// uppercase.
    ///
    /// # Arguments
    ///
    /// * `code` - Public session code, any case
    ///
    /// # Returns
    ///
    /// * `Result<SessionHandle, SessionError>` - Handle or `NotFound`
    pub async fn get_session(&self, code: &str) -> Result<SessionHandle, SessionError> {
        let code = code.to_ascii_uppercase();
        let sessions = self.sessions.read().await;
        sessions.get(&code).cloned().ok_or(SessionError::NotFound)
    }

    /// Join a session
    ///
    /// # Arguments
    ///
    /// * `code` - Public session code, any case
    /// * `name` - Display name of the joining player
    ///
    /// # Returns
    ///
    /// * `Result<Seated, SessionError>` - New player id and seat, or a
    ///   join failure from the session state machine
    pub async fn join_session(&self, code: &str, name: &str) -> Result<Seated, SessionError> {
        let handle = self.get_session(code).await?;

        let (tx, rx) = oneshot::channel();
        handle
            .send(SessionMessage::Join {
                name: name.to_string(),
                response: tx,
            })
            .await?;

        rx.await.map_err(|_| SessionError::InternalStateError)?
    }

    /// Trigger the one-time deal
    ///
    /// # Arguments
    ///
    /// * `code` - Public session code, any case
    /// * `player_id` - Requester; must be the session host
    ///
    /// # Returns
    ///
    /// * `Result<(), SessionError>` - Success or a start failure from the
    ///   session state machine
    pub async fn start_session(&self, code: &str, player_id: PlayerId) -> Result<(), SessionError> {
        let handle = self.get_session(code).await?;

        let (tx, rx) = oneshot::channel();
        handle
            .send(SessionMessage::Start {
                player_id,
                response: tx,
            })
            .await?;

        rx.await.map_err(|_| SessionError::InternalStateError)?
    }

    /// Get the projected view of a session for one player
    ///
    /// # Arguments
    ///
    /// * `code` - Public session code, any case
    /// * `player_id` - Requesting player
    ///
    /// # Returns
    ///
    /// * `Result<SessionView, SessionError>` - Privacy-filtered view or
    ///   `NotFound` / `PlayerNotInSession`
    pub async fn session_view(
        &self,
        code: &str,
        player_id: PlayerId,
    ) -> Result<SessionView, SessionError> {
        let handle = self.get_session(code).await?;

        let (tx, rx) = oneshot::channel();
        handle
            .send(SessionMessage::GetView {
                player_id,
                response: tx,
            })
            .await?;

        rx.await.map_err(|_| SessionError::InternalStateError)?
    }

    /// Get active session count
    pub async fn active_session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

/// Draw random codes until one misses the registry, with a low retry cap
/// instead of unbounded recursion. At 32^5 combinations a collision is
/// rare enough that the cap is never reached in practice.
fn generate_code(existing: &HashMap<String, SessionHandle>) -> Result<String, SessionError> {
    let mut rng = rand::rng();
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code: String = (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        if !existing.contains_key(&code) {
            return Ok(code);
        }
    }
    Err(SessionError::CodeAllocation)
}
