//! Per-observer state redaction.
//!
//! Clients never receive the authoritative `GameState`. They get a
//! `ClientState` in which every hand is reduced to a count (except the
//! observer's own), the draw pile is a count, and the discard pile is just
//! its top card. Spectators get the fully redacted view.

use serde::{Deserialize, Serialize};

use crate::core::{Card, Color, Direction, GameState, Phase, PlayerId, Symbol};

/// One player as seen by an observer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub hand_count: usize,
    /// Present only in the owner's own view.
    pub hand: Option<Vec<Card>>,
    pub score: u32,
    pub connected: bool,
    pub announced_last_card: bool,
    pub is_bot: bool,
}

/// The filtered state broadcast to one observer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientState {
    pub phase: Phase,
    pub players: Vec<PlayerView>,
    pub draw_count: usize,
    pub top_discard: Option<Card>,
    pub current_player_index: usize,
    pub direction: Direction,
    pub pending_draw_count: u8,
    pub declared_symbol: Option<Symbol>,
    pub declared_color: Option<Color>,
    pub waiting_for_declaration: bool,
    pub match_window_open: bool,
    pub target_score: u32,
    pub round_winner: Option<PlayerId>,
    pub turn_number: u32,
}

/// Redact `state` for one observer.
///
/// `observer` is the seated player receiving the view, or `None` for a
/// spectator, who sees no hand at all.
#[must_use]
pub fn build_client_view(state: &GameState, observer: Option<PlayerId>) -> ClientState {
    let players = state
        .players
        .iter()
        .map(|p| PlayerView {
            id: p.id,
            name: p.name.clone(),
            hand_count: p.hand.len(),
            hand: (observer == Some(p.id)).then(|| p.hand.clone()),
            score: p.score,
            connected: p.connected,
            announced_last_card: p.announced_last_card,
            is_bot: p.is_bot,
        })
        .collect();

    ClientState {
        phase: state.phase,
        players,
        draw_count: state.draw_pile.len(),
        top_discard: state.top_discard().cloned(),
        current_player_index: state.current_player_index,
        direction: state.direction,
        pending_draw_count: state.pending_draw_count,
        declared_symbol: state.declared_symbol,
        declared_color: state.declared_color,
        waiting_for_declaration: state.waiting_for_declaration,
        match_window_open: state.match_window_open,
        target_score: state.target_score,
        round_winner: state.round_winner,
        turn_number: state.turn_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Player};
    use crate::lifecycle::start_round;

    fn playing_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 40, 42);
        state.seat(Player::human(PlayerId::new(0), "ada"));
        state.seat(Player::human(PlayerId::new(1), "eve"));
        state.seat(Player::bot(PlayerId::new(2), "bot"));
        start_round(&mut state);
        state
    }

    #[test]
    fn test_owner_sees_own_hand_only() {
        let state = playing_state();
        let view = build_client_view(&state, Some(PlayerId::new(0)));

        let own = &view.players[0];
        assert!(own.hand.is_some());
        assert_eq!(own.hand.as_ref().unwrap().len(), own.hand_count);

        for other in &view.players[1..] {
            assert!(other.hand.is_none());
            assert_eq!(other.hand_count, 7);
        }
    }

    #[test]
    fn test_spectator_sees_no_hands() {
        let state = playing_state();
        let view = build_client_view(&state, None);

        for player in &view.players {
            assert!(player.hand.is_none());
            assert_eq!(player.hand_count, 7);
        }
    }

    #[test]
    fn test_piles_are_redacted_to_counts() {
        let state = playing_state();
        let view = build_client_view(&state, Some(PlayerId::new(1)));

        assert_eq!(view.draw_count, state.draw_pile.len());
        assert_eq!(view.top_discard.as_ref(), state.top_discard());
        assert_eq!(view.phase, Phase::Playing);
        assert_eq!(view.target_score, 40);
    }

    #[test]
    fn test_view_serializes() {
        let state = playing_state();
        let view = build_client_view(&state, None);
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"drawCount\""));
        let back: ClientState = serde_json::from_str(&json).unwrap();
        assert_eq!(view, back);
    }
}
