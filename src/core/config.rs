//! Deployment-tunable rule configuration.
//!
//! Two knobs cover known rule variants (point scale and the declaration
//! escape); the timing fields are pacing hints for the hosting layer and
//! never affect engine correctness.

use serde::{Deserialize, Serialize};

use super::card::CardKind;
use crate::core::card::Command;

/// Point values assigned to cards at deck-build time.
///
/// Two incompatible scales circulate for the same deck; which one is in
/// force is a deployment choice, paired with an appropriate target score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointScale {
    /// Basic = 1, Frog/Crab = 2, Wasp = 3, Power = 5. Suits target scores
    /// in the 30-50 range.
    #[default]
    Low,
    /// Basic = 5, Command = 15, Power = 25. Suits triple-digit targets.
    High,
}

impl PointScale {
    /// Point value for a card of the given kind.
    #[must_use]
    pub fn points(self, kind: &CardKind) -> u16 {
        match (self, kind) {
            (PointScale::Low, CardKind::Basic { .. }) => 1,
            (PointScale::Low, CardKind::Command { command, .. }) => match command {
                Command::Wasp => 3,
                Command::Frog | Command::Crab => 2,
            },
            (PointScale::Low, CardKind::Power { .. }) => 5,
            (PointScale::High, CardKind::Basic { .. }) => 5,
            (PointScale::High, CardKind::Command { .. }) => 15,
            (PointScale::High, CardKind::Power { .. }) => 25,
        }
    }
}

/// How a standing declaration constrains the next play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationPolicy {
    /// Only the declared attribute satisfies the declaration (a Dragon or
    /// Peacock remains playable under the usual power gating).
    #[default]
    DeclaredOnly,
    /// The declared attribute, or the matching attribute of the most recent
    /// colored card on the discard pile, satisfies the declaration.
    DeclaredOrActive,
}

/// Engine configuration for one deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Card point values.
    pub point_scale: PointScale,

    /// Declaration escape policy.
    pub declaration_policy: DeclarationPolicy,

    /// How long the out-of-turn match window stays open. Host hint.
    pub match_window_ms: u64,

    /// Reconnect grace before a disconnected player is dropped. Host hint.
    pub reconnect_grace_ms: u64,

    /// Delay before a bot's first action in a turn. Host hint.
    pub bot_first_delay_ms: u64,

    /// Delay range between chained bot actions, min and max. Host hint.
    pub bot_chain_delay_ms: [u64; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            point_scale: PointScale::Low,
            declaration_policy: DeclarationPolicy::DeclaredOnly,
            match_window_ms: 1500,
            reconnect_grace_ms: 90_000,
            bot_first_delay_ms: 15_000,
            bot_chain_delay_ms: [400, 1500],
        }
    }
}
