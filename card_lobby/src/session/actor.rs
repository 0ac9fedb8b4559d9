//! Session actor with async message handling.
//!
//! Each session runs in its own tokio task and owns its [`Session`]
//! exclusively, so joins, the deal, and view projections are serialized per
//! session without any locking. The registry lock in the manager never
//! extends over a session operation.

use super::messages::{Seated, SessionMessage};
use crate::game::{Session, SessionError};
use tokio::sync::mpsc;

const INBOX_CAPACITY: usize = 100;

/// Session actor handle for sending messages
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
    code: String,
}

impl SessionHandle {
    pub fn new(sender: mpsc::Sender<SessionMessage>, code: String) -> Self {
        Self { sender, code }
    }

    /// Public code of the session behind this handle
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Send a message to the session task. Sessions live for the whole
    /// process, so a closed inbox is an internal fault, not a user error.
    pub async fn send(&self, message: SessionMessage) -> Result<(), SessionError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::InternalStateError)
    }
}

/// Actor owning a single game session
pub struct SessionActor {
    session: Session,
    inbox: mpsc::Receiver<SessionMessage>,
}

impl SessionActor {
    /// Wrap a session in an actor, returning the actor and a cloneable
    /// handle for its inbox.
    pub fn new(session: Session) -> (Self, SessionHandle) {
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let handle = SessionHandle::new(sender, session.code().to_string());
        (Self { session, inbox }, handle)
    }

    /// Run the session event loop until every handle is dropped.
    pub async fn run(mut self) {
        log::info!("session {} task starting", self.session.code());

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
        }

        log::info!("session {} task stopping", self.session.code());
    }

    fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::Join { name, response } => {
                let result = self.session.join(&name).map(|player| Seated {
                    player_id: player.id,
                    seat_idx: player.seat_idx,
                });
                let _ = response.send(result);
            }

            SessionMessage::Start { player_id, response } => {
                let _ = response.send(self.session.start(player_id));
            }

            SessionMessage::GetView { player_id, response } => {
                let _ = response.send(self.session.view_for(player_id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_actor_answers_over_handle() {
        let session = Session::new("ABCDE".to_string(), "Ann").unwrap();
        let host_id = session.host_id();
        let (actor, handle) = SessionActor::new(session);
        tokio::spawn(actor.run());

        let (tx, rx) = oneshot::channel();
        handle
            .send(SessionMessage::Join { name: "Bob".to_string(), response: tx })
            .await
            .unwrap();
        let seated = rx.await.unwrap().unwrap();
        assert_eq!(seated.seat_idx, 1);

        let (tx, rx) = oneshot::channel();
        handle
            .send(SessionMessage::GetView { player_id: host_id, response: tx })
            .await
            .unwrap();
        let view = rx.await.unwrap().unwrap();
        assert_eq!(view.players.len(), 2);
    }

    #[tokio::test]
    async fn test_dropped_actor_reports_internal_error() {
        let session = Session::new("ABCDE".to_string(), "Ann").unwrap();
        let (actor, handle) = SessionActor::new(session);
        drop(actor);

        let (tx, _rx) = oneshot::channel();
        let err = handle
            .send(SessionMessage::Start { player_id: crate::game::entities::PlayerId::new(), response: tx })
            .await
            .unwrap_err();
        assert_eq!(err, SessionError::InternalStateError);
    }
}
