//! Core engine types: cards, players, state, actions, RNG, configuration.
//!
//! Everything here is a plain serializable value. Rule semantics live in
//! the `rules`, `turn`, and `lifecycle` modules.

pub mod action;
pub mod card;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use card::{Card, CardId, CardKind, Color, Command, Power, Symbol};
pub use config::{DeclarationPolicy, GameConfig, PointScale};
pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use state::{Direction, GameState, Phase};
