//! The root game-state aggregate.
//!
//! `GameState` is a plain value: every engine operation takes `&mut
//! GameState` and leaves it in the next authoritative state, with no
//! internal locking or suspension. The orchestration layer owns exactly one
//! cell per room and serializes all mutations through it.
//!
//! This module provides only container primitives (hand/pile bookkeeping,
//! history, snapshots). Rule semantics live in `rules`, `turn`, and
//! `lifecycle`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::card::{Card, CardId, Color, Symbol};
use super::config::GameConfig;
use super::player::{Player, PlayerId};
use super::rng::GameRng;

/// Top-level state machine for one room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Lobby,
    Playing,
    RoundOver,
    GameOver,
}

/// Direction of turn rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Authoritative state of one game room.
///
/// Invariants while `phase == Playing`:
/// - the discard pile is never empty (the initial flip card remains);
/// - hands + draw pile + discard pile always total 62 cards;
/// - `declared_symbol` and `declared_color` are never both set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Top-level phase.
    pub phase: Phase,

    /// Seated players; turn order is the positional index, fixed for a round.
    pub players: Vec<Player>,

    /// Face-down pile, drawn from the front.
    pub draw_pile: Vec<Card>,

    /// Face-up pile; the top card is the last element.
    pub discard_pile: Vec<Card>,

    /// Index into `players` of the actor whose turn it is.
    pub current_player_index: usize,

    /// Current rotation direction.
    pub direction: Direction,

    /// Stacked forced-draw penalty awaiting the current actor (0 = none).
    pub pending_draw_count: u8,

    /// Standing symbol declaration after a resolved Dragon.
    pub declared_symbol: Option<Symbol>,

    /// Standing color declaration after a resolved Peacock.
    pub declared_color: Option<Color>,

    /// True between a Power play and its declaration; no other action is
    /// legal and the turn does not advance while set.
    pub waiting_for_declaration: bool,

    /// True once the current actor has taken their voluntary draw.
    pub drawn_this_turn: bool,

    /// True while the timed out-of-turn interrupt window is open.
    pub match_window_open: bool,

    /// Cumulative score that ends the game when reached.
    pub target_score: u32,

    /// Winner of the most recently finished round.
    pub round_winner: Option<PlayerId>,

    /// Turn counter, reset each round.
    pub turn_number: u32,

    /// Accepted actions this round, newest last.
    pub history: Vector<ActionRecord>,

    /// Deployment configuration.
    pub config: GameConfig,

    /// Deterministic randomness for shuffles and bot declarations.
    pub rng: GameRng,
}

impl GameState {
    /// Create a fresh room state in the lobby phase.
    #[must_use]
    pub fn new(config: GameConfig, target_score: u32, seed: u64) -> Self {
        Self {
            phase: Phase::Lobby,
            players: Vec::new(),
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            current_player_index: 0,
            direction: Direction::Clockwise,
            pending_draw_count: 0,
            declared_symbol: None,
            declared_color: None,
            waiting_for_declaration: false,
            drawn_this_turn: false,
            match_window_open: false,
            target_score,
            round_winner: None,
            turn_number: 1,
            history: Vector::new(),
            config,
            rng: GameRng::new(seed),
        }
    }

    /// Seat a player. Only meaningful in the lobby; callers enforce phase.
    pub fn seat(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Number of players currently eligible for turns.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a player mutably by id.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Positional index of a player, if seated.
    #[must_use]
    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Id of the player whose turn it is.
    #[must_use]
    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.current_player().map(|p| p.id)
    }

    /// The top card of the discard pile.
    #[must_use]
    pub fn top_discard(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    /// Remove a card from a player's hand by identity.
    ///
    /// Returns `None` if the player or card is not found; callers treat a
    /// miss as a no-op, never a crash.
    pub fn remove_from_hand(&mut self, player_id: PlayerId, card_id: CardId) -> Option<Card> {
        let player = self.player_mut(player_id)?;
        let pos = player.hand.iter().position(|c| c.id == card_id)?;
        Some(player.hand.remove(pos))
    }

    /// Clear any standing declaration. A new top card supersedes it.
    pub fn clear_declarations(&mut self) {
        self.declared_symbol = None;
        self.declared_color = None;
    }

    /// Total cards across hands and both piles.
    ///
    /// Equals 62 at every observation point while a round is in progress.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        let in_hands: usize = self.players.iter().map(|p| p.hand.len()).sum();
        in_hands + self.draw_pile.len() + self.discard_pile.len()
    }

    /// Append an accepted action to the round history.
    pub fn record(&mut self, player: PlayerId, action: Action) {
        self.history
            .push_back(ActionRecord::new(player, action, self.turn_number));
    }

    /// Serialize the full state (RNG included) to a compact snapshot.
    pub fn snapshot(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore a state previously produced by [`GameState::snapshot`].
    pub fn restore(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{CardKind, Color, Symbol};

    fn basic(id: u32) -> Card {
        Card::new(
            CardId::new(id),
            CardKind::Basic {
                color: Color::Red,
                symbol: Symbol::Sun,
            },
            1,
        )
    }

    fn two_player_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 40, 42);
        state.seat(Player::human(PlayerId::new(0), "ada"));
        state.seat(Player::human(PlayerId::new(1), "eve"));
        state
    }

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(GameConfig::default(), 40, 1);
        assert_eq!(state.phase, Phase::Lobby);
        assert_eq!(state.direction, Direction::Clockwise);
        assert_eq!(state.pending_draw_count, 0);
        assert!(!state.waiting_for_declaration);
        assert!(!state.match_window_open);
        assert_eq!(state.target_score, 40);
        assert_eq!(state.total_cards(), 0);
    }

    #[test]
    fn test_player_lookup() {
        let state = two_player_state();
        assert_eq!(state.player_count(), 2);
        assert!(state.player(PlayerId::new(1)).is_some());
        assert!(state.player(PlayerId::new(9)).is_none());
        assert_eq!(state.player_index(PlayerId::new(1)), Some(1));
        assert_eq!(state.current_player_id(), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_remove_from_hand_miss_is_none() {
        let mut state = two_player_state();
        state.player_mut(PlayerId::new(0)).unwrap().hand.push(basic(3));

        assert!(state.remove_from_hand(PlayerId::new(0), CardId::new(4)).is_none());
        assert!(state.remove_from_hand(PlayerId::new(9), CardId::new(3)).is_none());

        let removed = state.remove_from_hand(PlayerId::new(0), CardId::new(3));
        assert_eq!(removed.unwrap().id, CardId::new(3));
        assert!(state.player(PlayerId::new(0)).unwrap().hand.is_empty());
    }

    #[test]
    fn test_direction_flip() {
        assert_eq!(Direction::Clockwise.flipped(), Direction::CounterClockwise);
        assert_eq!(Direction::CounterClockwise.flipped(), Direction::Clockwise);
    }

    #[test]
    fn test_declarations_are_exclusive_after_clear() {
        let mut state = two_player_state();
        state.declared_symbol = Some(Symbol::Moon);
        state.clear_declarations();
        assert!(state.declared_symbol.is_none());
        assert!(state.declared_color.is_none());
    }

    #[test]
    fn test_history_records_turn() {
        let mut state = two_player_state();
        state.turn_number = 7;
        state.record(PlayerId::new(0), Action::Draw);

        assert_eq!(state.history.len(), 1);
        let rec = &state.history[0];
        assert_eq!(rec.turn, 7);
        assert_eq!(rec.action, Action::Draw);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = two_player_state();
        state.player_mut(PlayerId::new(0)).unwrap().hand.push(basic(1));
        state.discard_pile.push(basic(2));
        state.pending_draw_count = 4;

        let bytes = state.snapshot().unwrap();
        let back = GameState::restore(&bytes).unwrap();

        assert_eq!(back.pending_draw_count, 4);
        assert_eq!(back.player(PlayerId::new(0)).unwrap().hand.len(), 1);
        assert_eq!(back.top_discard().unwrap().id, CardId::new(2));
        assert_eq!(back.total_cards(), state.total_cards());
    }
}
