//! Round and game lifecycle: dealing, scoring, and termination.

use tracing::debug;

use crate::core::{Direction, GameState, Phase, Player, PlayerId};
use crate::deck::{build_deck, hand_score};

/// Cards dealt to each player for a round: `clamp(10 - player_count, 3, 7)`.
#[must_use]
pub fn hand_size_for(player_count: usize) -> usize {
    (10i64 - player_count as i64).clamp(3, 7) as usize
}

/// Deal a new round.
///
/// Builds a fresh shuffled deck, deals hands in turn order, and seeds the
/// discard pile with the first non-Power card so the round never opens
/// mid-declaration; skipped Power cards stay in the draw pile ahead of the
/// cards past the flip point, in their original relative order. All
/// per-round flags reset; scores carry over.
pub fn start_round(state: &mut GameState) {
    let mut deck = build_deck(state.config.point_scale, &mut state.rng);
    let hand_size = hand_size_for(state.players.len());

    for player in &mut state.players {
        player.hand = deck.drain(..hand_size).collect();
        player.announced_last_card = false;
    }

    // Defensive unwrap_or: a post-deal remainder of 62 - 7*players always
    // holds at least one non-Power card.
    let flip = deck.iter().position(|c| !c.is_power()).unwrap_or(0);
    let flip_card = deck.remove(flip);
    state.discard_pile = vec![flip_card];
    state.draw_pile = deck;

    state.current_player_index = 0;
    state.direction = Direction::Clockwise;
    state.pending_draw_count = 0;
    state.waiting_for_declaration = false;
    state.clear_declarations();
    state.match_window_open = false;
    state.drawn_this_turn = false;
    state.round_winner = None;
    state.turn_number = 1;
    state.history = im::Vector::new();
    state.phase = Phase::Playing;

    debug!(
        players = state.players.len(),
        hand_size,
        draw_pile = state.draw_pile.len(),
        "round started"
    );
}

/// Detect and score a finished round.
///
/// Returns false and leaves the state untouched while every hand is
/// non-empty. Otherwise the empty-handed player wins the round with no
/// score change, every other player gains their hand's point total, and the
/// phase moves to `GameOver` if any score reached the target, else
/// `RoundOver`.
pub fn check_round_over(state: &mut GameState) -> bool {
    if state.phase != Phase::Playing {
        return false;
    }
    let Some(winner_idx) = state.players.iter().position(|p| p.hand.is_empty()) else {
        return false;
    };
    let winner_id = state.players[winner_idx].id;

    for player in &mut state.players {
        if player.id != winner_id {
            player.score += hand_score(&player.hand);
        }
    }

    state.round_winner = Some(winner_id);
    state.match_window_open = false;
    let game_over = state
        .players
        .iter()
        .any(|p| p.score >= state.target_score);
    state.phase = if game_over {
        Phase::GameOver
    } else {
        Phase::RoundOver
    };

    debug!(winner = %winner_id, game_over, "round over");
    true
}

/// Remove a player whose reconnect grace expired.
///
/// Their hand returns to the bottom of the draw pile so the card count
/// stays conserved, and `current_player_index` is shifted to keep pointing
/// at the same seat. If fewer than two active participants remain in a
/// running game, the game ends.
pub fn remove_player(state: &mut GameState, player_id: PlayerId) -> Option<Player> {
    let idx = state.player_index(player_id)?;
    let mut removed = state.players.remove(idx);

    if state.phase == Phase::Playing {
        state.draw_pile.append(&mut removed.hand);
    }

    if idx < state.current_player_index {
        state.current_player_index -= 1;
    }
    if state.current_player_index >= state.players.len() && !state.players.is_empty() {
        state.current_player_index = 0;
    }

    if state.phase == Phase::Playing && state.active_count() < 2 {
        debug!(removed = %player_id, "too few active players, ending game");
        state.phase = Phase::GameOver;
    }

    Some(removed)
}
