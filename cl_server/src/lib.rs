//! Card-game lobby server.
//!
//! A thin HTTP boundary over the [`card_lobby`] library: four JSON
//! operations (create, join, start, poll state) plus a health check. All
//! game semantics live in the library; this crate only maps requests onto
//! the session manager and domain errors onto status codes.

pub mod api;
pub mod logging;
