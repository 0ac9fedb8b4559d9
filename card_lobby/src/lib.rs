//! # Card Lobby
//!
//! A four-seat card-game lobby: players create or join a session via a short
//! public code, wait until four seats are filled, and the host triggers a
//! single deal that splits a standard 52-card deck into four 13-card hands.
//!
//! The library deliberately stops at the deal — there is no trick-taking,
//! bidding, or turn enforcement. What it does guarantee:
//!
//! - Seats 0..3 are assigned in first-available order, the creator at seat 0.
//! - A session deals exactly once, only with four players, only by the host.
//! - Every projected view contains the requesting player's own sorted hand
//!   and nothing but seat, name, and card count for everyone else.
//!
//! ## Core Modules
//!
//! - [`game`]: Entities (cards, deck, players) and the session state machine
//! - [`session`]: Async actor layer and the code-keyed session registry
//!
//! ## Example
//!
//! ```
//! use card_lobby::game::state_machine::Session;
//!
//! let mut session = Session::new("ABCDE".to_string(), "Ann").unwrap();
//! let bob = session.join("Bob").unwrap();
//! assert_eq!(bob.seat_idx, 1);
//! ```

/// Entities and the session lifecycle state machine.
pub mod game;
pub use game::{
    SessionError,
    constants::{self, HAND_SIZE, MAX_PLAYERS},
    entities,
    state_machine::Session,
};

/// Session actors and the code-keyed registry.
pub mod session;
pub use session::{CreatedSession, SessionActor, SessionHandle, SessionManager};
