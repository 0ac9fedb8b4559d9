use chrono::{DateTime, Utc};
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

use super::constants::{self, DECK_SIZE, HAND_SIZE};

/// Suit declaration order doubles as the canonical sort order:
/// spades before hearts before diamonds before clubs.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Spade, Self::Heart, Self::Diamond, Self::Club];

    fn code(self) -> char {
        match self {
            Self::Spade => 'S',
            Self::Heart => 'H',
            Self::Diamond => 'D',
            Self::Club => 'C',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Suit {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(Self::Spade),
            "H" => Ok(Self::Heart),
            "D" => Ok(Self::Diamond),
            "C" => Ok(Self::Club),
            _ => Err(ParseCardError(s.to_string())),
        }
    }
}

/// Rank declaration order is descending conventional strength, so the
/// derived `Ord` sorts aces first and twos last.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rank {
    Ace,
    King,
    Queen,
    Jack,
    Ten,
    Nine,
    Eight,
    Seven,
    Six,
    Five,
    Four,
    Three,
    Two,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::King,
        Self::Queen,
        Self::Jack,
        Self::Ten,
        Self::Nine,
        Self::Eight,
        Self::Seven,
        Self::Six,
        Self::Five,
        Self::Four,
        Self::Three,
        Self::Two,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::King => "K",
            Self::Queen => "Q",
            Self::Jack => "J",
            Self::Ten => "10",
            Self::Nine => "9",
            Self::Eight => "8",
            Self::Seven => "7",
            Self::Six => "6",
            Self::Five => "5",
            Self::Four => "4",
            Self::Three => "3",
            Self::Two => "2",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Rank {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::Ace),
            "K" => Ok(Self::King),
            "Q" => Ok(Self::Queen),
            "J" => Ok(Self::Jack),
            "10" => Ok(Self::Ten),
            "9" => Ok(Self::Nine),
            "8" => Ok(Self::Eight),
            "7" => Ok(Self::Seven),
            "6" => Ok(Self::Six),
            "5" => Ok(Self::Five),
            "4" => Ok(Self::Four),
            "3" => Ok(Self::Three),
            "2" => Ok(Self::Two),
            _ => Err(ParseCardError(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("not a card code: {0:?}")]
pub struct ParseCardError(String);

/// A card is a tuple of a rank and a suit, compared by identity only.
/// The wire encoding is the rank code followed by the one-letter suit
/// code, e.g. `10H` or `AS`, and round-trips exactly.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Card(pub Rank, pub Suit);

impl Ord for Card {
    // Suit-major: hands read S, H, D, C with aces leading each suit.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.1, self.0).cmp(&(other.1, other.0))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || s.len() < 2 {
            return Err(ParseCardError(s.to_string()));
        }
        let (rank, suit) = s.split_at(s.len() - 1);
        Ok(Self(rank.parse()?, suit.parse()?))
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A standard 52-card deck with a deal cursor.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
    deck_idx: usize,
}

impl Default for Deck {
    fn default() -> Self {
        let ranks = Rank::ALL.len();
        let cards = std::array::from_fn(|i| Card(Rank::ALL[i % ranks], Suit::ALL[i / ranks]));
        Self { cards, deck_idx: 0 }
    }
}

impl Deck {
    /// A fresh deck already shuffled with the process RNG.
    pub fn shuffled() -> Self {
        let mut deck = Self::default();
        deck.shuffle(&mut rand::rng());
        deck
    }

    /// Fisher-Yates permutation; resets the deal cursor. Pass a seeded
    /// `StdRng` for reproducible orders in tests.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.deck_idx = 0;
    }

    /// Hand out the next card, or `None` once the deck runs dry.
    pub fn deal_card(&mut self) -> Option<Card> {
        let card = self.cards.get(self.deck_idx).copied()?;
        self.deck_idx += 1;
        Some(card)
    }

    pub fn remaining(&self) -> usize {
        DECK_SIZE - self.deck_idx
    }
}

/// Opaque, unguessable player identity handed out at create/join time.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// User-supplied display name, trimmed and capped. Construction fails on
/// empty or whitespace-only input.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.chars().take(constants::MAX_NAME_LENGTH).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Type alias for seat positions at the table.
pub type SeatIndex = usize;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Lobby,
    Dealt,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Lobby => "lobby",
            Self::Dealt => "dealt",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    pub seat_idx: SeatIndex,
    pub cards: Vec<Card>,
}

impl Player {
    #[must_use]
    pub fn new(name: PlayerName, seat_idx: SeatIndex) -> Self {
        Self {
            id: PlayerId::new(),
            name,
            seat_idx,
            cards: Vec::with_capacity(HAND_SIZE),
        }
    }
}

/// What one seat looks like to any member of the session: identity,
/// position, and a card count - never the cards themselves.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SeatView {
    pub id: PlayerId,
    pub name: String,
    pub seat_idx: SeatIndex,
    pub is_host: bool,
    pub is_you: bool,
    pub hand_size: usize,
}

/// The per-player projection of a session. `hand` is the requesting
/// player's own cards in canonical order; no other hand appears anywhere.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionView {
    pub code: String,
    pub status: SessionStatus,
    pub host_id: PlayerId,
    pub created_at: DateTime<Utc>,
    pub players: Vec<SeatView>,
    pub hand: Vec<Card>,
}
