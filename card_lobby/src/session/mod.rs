//! Session module providing multi-session support with async actor model.
//!
//! This module implements:
//! - SessionActor: Async actor owning a single game session
//! - SessionManager: Registry of live sessions keyed by public code
//! - Message-based communication with tokio channels
//!
//! ## Architecture
//!
//! Each session runs in a separate tokio task with an mpsc message inbox,
//! which gives every session its own critical section: two joins racing for
//! the last seat, or a start racing a join, are serialized by the actor's
//! single-threaded event loop. The SessionManager spawns actors, generates
//! collision-free public codes, and resolves code lookups; its registry
//! lock is never held across a session operation, so unrelated sessions
//! never contend.
//!
//! ## Example
//!
//! ```
//! use card_lobby::session::SessionManager;
//!
//! #[tokio::main]
//! async fn main() {
//!     let manager = SessionManager::new();
//!     let created = manager.create_session("Ann").await.unwrap();
//!     let seated = manager.join_session(&created.code, "Bob").await.unwrap();
//!     assert_eq!(seated.seat_idx, 1);
//! }
//! ```

pub mod actor;
pub mod manager;
pub mod messages;

pub use actor::{SessionActor, SessionHandle};
pub use manager::{CreatedSession, SessionManager};
pub use messages::{Seated, SessionMessage};
