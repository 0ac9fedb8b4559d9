//! Session actor message types.

use crate::game::SessionError;
use crate::game::entities::{PlayerId, SeatIndex, SessionView};
use tokio::sync::oneshot;

/// Messages that can be sent to a `SessionActor`
#[derive(Debug)]
pub enum SessionMessage {
    /// Seat a new player
    Join {
        name: String,
        response: oneshot::Sender<Result<Seated, SessionError>>,
    },

    /// Host-triggered deal
    Start {
        player_id: PlayerId,
        response: oneshot::Sender<Result<(), SessionError>>,
    },

    /// Project the session for one player
    GetView {
        player_id: PlayerId,
        response: oneshot::Sender<Result<SessionView, SessionError>>,
    },
}

/// Successful seat assignment, returned from create and join.
#[derive(Clone, Copy, Debug)]
pub struct Seated {
    pub player_id: PlayerId,
    pub seat_idx: SeatIndex,
}
