//! Legality predicates.
//!
//! Pure read-only functions over `GameState`. The orchestration layer
//! checks these before calling any mutator, so mutators never need to
//! signal user-driven illegality.

pub mod legality;
pub mod matching;

pub use legality::{can_play, can_play_double, playable_cards};
pub use matching::is_match;
