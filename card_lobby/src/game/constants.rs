//! Game and registry constants.

/// Number of seats at a table. Dealing requires every seat filled.
pub const MAX_PLAYERS: usize = 4;

/// Cards dealt to each seat.
pub const HAND_SIZE: usize = 13;

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Length of a public session code.
pub const CODE_LENGTH: usize = 5;

/// Code alphabet: uppercase letters and digits minus the confusable
/// I/O/0/1, leaving 32 symbols (32^5 ≈ 33.5M codes).
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Attempts at generating a collision-free code before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 16;

/// Display names longer than this are truncated.
pub const MAX_NAME_LENGTH: usize = 24;
