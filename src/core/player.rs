//! Player identity and per-round player state.
//!
//! `PlayerId` is a stable session identity assigned by the orchestration
//! layer when a player joins a room. Turn order is NOT derived from ids -
//! it is the positional index into `GameState::players`, fixed once a
//! round starts.

use serde::{Deserialize, Serialize};

use super::card::Card;

/// Stable session identity for a seated player or spectator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// A seated player.
///
/// `score` accumulates across rounds and is reset only at game creation.
/// `hand` and `announced_last_card` are reset every round. `connected` is
/// owned by the orchestration layer; the engine reads it only through the
/// active-player predicate used by turn advancement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
    pub score: u32,
    pub connected: bool,
    pub announced_last_card: bool,
    pub is_bot: bool,
}

impl Player {
    /// Create a human player with an empty hand.
    #[must_use]
    pub fn human(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            score: 0,
            connected: true,
            announced_last_card: false,
            is_bot: false,
        }
    }

    /// Create a bot player with an empty hand.
    #[must_use]
    pub fn bot(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            is_bot: true,
            ..Self::human(id, name)
        }
    }

    /// Whether this player should be given turns.
    ///
    /// Bots never disconnect; humans are skipped while `connected` is false.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.connected || self.is_bot
    }

    /// Look up a held card by identity.
    #[must_use]
    pub fn card(&self, card_id: super::card::CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == card_id)
    }

    /// Whether the player holds a card with this identity.
    #[must_use]
    pub fn holds(&self, card_id: super::card::CardId) -> bool {
        self.card(card_id).is_some()
    }
}
