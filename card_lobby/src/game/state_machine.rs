//! Session lifecycle state machine.
//!
//! A [`Session`] moves through exactly two states, `lobby -> dealt`, and the
//! transition happens once: the host starts the deal with four seated
//! players, the shuffled deck is split into four 13-card hands, and the
//! session never accepts another join or deal. Every read goes through
//! [`Session::view_for`], which projects the session for one player without
//! exposing anybody else's cards.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{HAND_SIZE, MAX_PLAYERS};
use super::entities::{
    Deck, Player, PlayerId, PlayerName, SeatIndex, SeatView, SessionStatus, SessionView,
};

/// Errors that can occur during session operations
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum SessionError {
    #[error("display name can't be empty")]
    InvalidName,
    #[error("session does not exist")]
    NotFound,
    #[error("session is full")]
    SessionFull,
    #[error("session already started")]
    SessionAlreadyStarted,
    #[error("only the host can start the deal")]
    NotHost,
    #[error("dealing needs exactly four players")]
    PlayerCountInvalid,
    #[error("you're not in this session")]
    PlayerNotInSession,
    #[error("invalid session state: code space exhausted")]
    CodeAllocation,
    #[error("invalid session state: internal consistency error")]
    InternalStateError,
}

/// One four-seat game session, identified by its short public code.
#[derive(Clone, Debug)]
pub struct Session {
    code: String,
    host_id: PlayerId,
    status: SessionStatus,
    players: Vec<Player>,
    created_at: DateTime<Utc>,
}

impl Session {
    /// Create a session with the host seated at position 0.
    ///
    /// # Errors
    ///
    /// * `InvalidName` - host name is empty or whitespace-only
    pub fn new(code: String, host_name: &str) -> Result<Self, SessionError> {
        let name = PlayerName::new(host_name).ok_or(SessionError::InvalidName)?;
        let host = Player::new(name, 0);
        let host_id = host.id;
        Ok(Self {
            code,
            host_id,
            status: SessionStatus::Lobby,
            players: vec![host],
            created_at: Utc::now(),
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn host_id(&self) -> PlayerId {
        self.host_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn vacant_seat(&self) -> Option<SeatIndex> {
        (0..MAX_PLAYERS).find(|seat| !self.players.iter().any(|p| p.seat_idx == *seat))
    }

    /// Seat a new player at the lowest free position.
    ///
    /// Either fully adds the player (id + seat) or fails with the session
    /// unchanged.
    ///
    /// # Errors
    ///
    /// * `SessionAlreadyStarted` - the deal already happened
    /// * `SessionFull` - all four seats taken
    /// * `InvalidName` - name is empty or whitespace-only
    pub fn join(&mut self, name: &str) -> Result<&Player, SessionError> {
        if self.status != SessionStatus::Lobby {
            return Err(SessionError::SessionAlreadyStarted);
        }
        let name = PlayerName::new(name).ok_or(SessionError::InvalidName)?;
        let seat_idx = self.vacant_seat().ok_or(SessionError::SessionFull)?;
        let player = Player::new(name, seat_idx);
        info!("session {}: {} seated at {}", self.code, player.name, seat_idx);
        self.players.push(player);
        self.players.last().ok_or(SessionError::InternalStateError)
    }

    /// Start the one-time deal with a freshly shuffled deck.
    ///
    /// # Errors
    ///
    /// * `NotHost` - requester is not the session creator
    /// * `SessionAlreadyStarted` - the deal already happened
    /// * `PlayerCountInvalid` - fewer than four players seated
    pub fn start(&mut self, requester_id: PlayerId) -> Result<(), SessionError> {
        self.start_with_deck(requester_id, Deck::shuffled())
    }

    /// Same as [`Session::start`] but with a caller-supplied deck, the seam
    /// used by tests that need a seeded shuffle.
    pub fn start_with_deck(
        &mut self,
        requester_id: PlayerId,
        mut deck: Deck,
    ) -> Result<(), SessionError> {
        if requester_id != self.host_id {
            return Err(SessionError::NotHost);
        }
        if self.status != SessionStatus::Lobby {
            return Err(SessionError::SessionAlreadyStarted);
        }
        if self.players.len() != MAX_PLAYERS {
            return Err(SessionError::PlayerCountInvalid);
        }
        self.deal(&mut deck)
    }

    /// Split the deck into contiguous 13-card slices, seat 0 first. All
    /// hands are computed before any is committed, so a fault cannot leave
    /// the session half-dealt.
    fn deal(&mut self, deck: &mut Deck) -> Result<(), SessionError> {
        let mut hands = Vec::with_capacity(self.players.len());
        for _ in 0..self.players.len() {
            let mut hand = Vec::with_capacity(HAND_SIZE);
            for _ in 0..HAND_SIZE {
                hand.push(deck.deal_card().ok_or(SessionError::InternalStateError)?);
            }
            hands.push(hand);
        }

        self.players.sort_by_key(|p| p.seat_idx);
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.cards = hand;
        }
        self.status = SessionStatus::Dealt;
        info!("session {}: dealt {} cards each to {} players", self.code, HAND_SIZE, MAX_PLAYERS);
        Ok(())
    }

    /// Project the session for one player: everyone's seat, name, and card
    /// count, plus the requester's own hand in canonical sorted order.
    ///
    /// # Errors
    ///
    /// * `PlayerNotInSession` - unknown player id
    pub fn view_for(&self, player_id: PlayerId) -> Result<SessionView, SessionError> {
        let me = self
            .players
            .iter()
            .find(|p| p.id == player_id)
            .ok_or(SessionError::PlayerNotInSession)?;

        let mut players: Vec<SeatView> = self
            .players
            .iter()
            .map(|p| SeatView {
                id: p.id,
                name: p.name.to_string(),
                seat_idx: p.seat_idx,
                is_host: p.id == self.host_id,
                is_you: p.id == player_id,
                hand_size: p.cards.len(),
            })
            .collect();
        players.sort_by_key(|seat| seat.seat_idx);

        let mut hand = me.cards.clone();
        hand.sort();

        Ok(SessionView {
            code: self.code.clone(),
            status: self.status,
            host_id: self.host_id,
            created_at: self.created_at,
            players,
            hand,
        })
    }
}
