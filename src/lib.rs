//! # zar-engine
//!
//! The authoritative rules engine for ZAR, a shedding-style card game for
//! 2 to 8 players built on a custom 62-card deck.
//!
//! ## Design Principles
//!
//! 1. **Pure State Machine**: Every rule lives in a function from state to
//!    state. Mutators take `&mut GameState`, predicates take `&GameState`;
//!    nothing in the engine blocks, sleeps, or spawns.
//!
//! 2. **Authority at the Boundary**: Clients send intents, never results.
//!    The `room` layer validates each intent against the live state and
//!    either applies it atomically or rejects it with a typed error.
//!
//! 3. **Timers Stay Outside**: The match window, reconnect grace, and bot
//!    pacing are host-scheduled callbacks into the engine. Durations are
//!    configuration, not behavior.
//!
//! ## Architecture
//!
//! - **One Cell Per Room**: A `Room` owns exactly one `GameState`; the
//!   host serializes intents per room, so at most one mutation is ever in
//!   flight and check-then-act races cannot occur.
//!
//! - **Deterministic Replay**: All randomness flows through a seeded
//!   `GameRng` whose position serializes in O(1), so a snapshot restores
//!   mid-round with identical future shuffles.
//!
//! - **Persistent History**: The per-round action log uses `im::Vector`
//!   for cheap structural sharing across snapshots.
//!
//! ## Modules
//!
//! - `core`: Cards, players, state, actions, RNG, configuration
//! - `deck`: The 62-card deck, shuffling, hand scoring
//! - `rules`: Play legality and the exact-pair match predicate
//! - `turn`: Card effects, turn advancement, drawing, match resolution
//! - `lifecycle`: Round start, round/game end, player removal
//! - `bot`: Deterministic fill-in player policy
//! - `view`: Per-observer redaction for broadcast
//! - `protocol`: Wire intents, events, and room codes
//! - `room`: Rooms and the room registry (the orchestration boundary)

pub mod bot;
pub mod core;
pub mod deck;
pub mod error;
pub mod lifecycle;
pub mod protocol;
pub mod room;
pub mod rules;
pub mod turn;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Card, CardId, CardKind, Color, Command, DeclarationPolicy, Direction,
    GameConfig, GameRng, GameRngState, GameState, Phase, Player, PlayerId, PointScale, Power,
    Symbol,
};

pub use crate::deck::{build_deck, hand_score, DECK_SIZE};

pub use crate::rules::{can_play, can_play_double, is_match, playable_cards};

pub use crate::error::GameError;

pub use crate::protocol::{ClientIntent, RoomCode, ServerEvent};

pub use crate::room::{Room, RoomRegistry};

pub use crate::view::{build_client_view, ClientState, PlayerView};
