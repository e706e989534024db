//! Action vocabulary and history records.
//!
//! An `Action` names one engine operation in player terms. The bot policy
//! produces exactly one `Action` per invocation, and the room layer records
//! every accepted action in the state's history for replay and debugging.

use serde::{Deserialize, Serialize};

use super::card::{CardId, Color, Symbol};
use super::player::PlayerId;

/// One player-level move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Play a single card from hand.
    PlayCard(CardId),
    /// Play two matching cards as one combined move. The second card
    /// resolves as the effective top.
    PlayDouble(CardId, CardId),
    /// Resolve a pending Dragon play.
    DeclareSymbol(Symbol),
    /// Resolve a pending Peacock play.
    DeclareColor(Color),
    /// Draw from the pile (voluntary, or resolving a stacked penalty).
    Draw,
    /// End the turn after a fruitless draw.
    Pass,
    /// Out-of-turn interrupt on a matching top card.
    MatchCard(CardId),
}

/// An accepted action with attribution, kept in the state history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was accepted.
    pub turn: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32) -> Self {
        Self {
            player,
            action,
            turn,
        }
    }
}
