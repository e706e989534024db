//! The turn engine: applying plays, declarations, draws, and interrupts.
//!
//! Every function here is a synchronous value-to-value mutator on
//! `GameState`. Callers (the room layer) are responsible for checking
//! legality first via `rules`; these mutators assume their preconditions
//! hold and never signal user-driven illegality.
//!
//! Played cards arrive by value: the caller removes them from the hand with
//! `GameState::remove_from_hand` and hands them to `apply_play` /
//! `apply_double`, which append them to the discard pile.

use tracing::debug;

use crate::core::{
    Card, CardKind, Color, Command, Direction, GameState, Player, PlayerId, Symbol,
};

/// Advance the turn pointer by `steps` positions in the current direction,
/// wrapping around and skipping players for which `active` is false.
///
/// Resets the per-turn voluntary-draw flag and bumps the turn counter. If no
/// player satisfies the predicate the pointer is left untouched; the
/// lifecycle layer guarantees at least two active participants while a round
/// is in progress.
pub fn advance_turn<F>(state: &mut GameState, steps: usize, active: F)
where
    F: Fn(&Player) -> bool,
{
    let n = state.players.len();
    if n == 0 || !state.players.iter().any(&active) {
        return;
    }

    let mut idx = state.current_player_index;
    for _ in 0..steps {
        loop {
            idx = match state.direction {
                Direction::Clockwise => (idx + 1) % n,
                Direction::CounterClockwise => (idx + n - 1) % n,
            };
            if active(&state.players[idx]) {
                break;
            }
        }
    }

    state.current_player_index = idx;
    state.drawn_this_turn = false;
    state.turn_number += 1;
}

/// Apply a single-card play.
///
/// The card has already been removed from the player's hand. Any standing
/// declaration is cleared (a new top card supersedes it), then the card's
/// kind decides the turn effect:
/// - Basic: advance 1
/// - Wasp: stack +2 onto the pending penalty, advance 1
/// - Frog: advance 2 (skips one player)
/// - Crab: flip direction, advance 1
/// - Power: wait for the same player's declaration; no advance
pub fn apply_play(state: &mut GameState, player_id: PlayerId, card: Card) {
    debug!(player = %player_id, card = %card, "apply play");

    state.clear_declarations();
    let kind = card.kind;
    state.discard_pile.push(card);

    match kind {
        CardKind::Basic { .. } => advance_turn(state, 1, Player::is_active),
        CardKind::Command { command, .. } => match command {
            Command::Wasp => {
                state.pending_draw_count += 2;
                advance_turn(state, 1, Player::is_active);
            }
            Command::Frog => advance_turn(state, 2, Player::is_active),
            Command::Crab => {
                state.direction = state.direction.flipped();
                advance_turn(state, 1, Player::is_active);
            }
        },
        CardKind::Power { .. } => {
            state.waiting_for_declaration = true;
        }
    }
}

/// Apply a double play: two matching cards as one combined move.
///
/// Both cards land on the discard pile in order; `second` becomes the
/// resolved top and decides the effect with amplified magnitude:
/// - double Wasp: one combined +4 on the pending penalty, advance 1
/// - double Frog: advance 3 (skips two players)
/// - double Crab: the two reversals cancel; direction unchanged, advance 1
/// - double Basic: advance 1
/// - double Power: wait for the declaration
///
/// The no-going-out-on-a-double precondition is the caller's to enforce
/// (see `rules::can_play_double`).
pub fn apply_double(state: &mut GameState, player_id: PlayerId, first: Card, second: Card) {
    debug!(player = %player_id, first = %first, second = %second, "apply double");

    state.clear_declarations();
    let kind = second.kind;
    state.discard_pile.push(first);
    state.discard_pile.push(second);

    match kind {
        CardKind::Basic { .. } => advance_turn(state, 1, Player::is_active),
        CardKind::Command { command, .. } => match command {
            Command::Wasp => {
                state.pending_draw_count += 4;
                advance_turn(state, 1, Player::is_active);
            }
            Command::Frog => advance_turn(state, 3, Player::is_active),
            Command::Crab => advance_turn(state, 1, Player::is_active),
        },
        CardKind::Power { .. } => {
            state.waiting_for_declaration = true;
        }
    }
}

/// Resolve a pending Dragon play by declaring the active symbol.
pub fn apply_dragon_declaration(state: &mut GameState, symbol: Symbol) {
    debug!(?symbol, "dragon declaration");
    state.declared_symbol = Some(symbol);
    state.declared_color = None;
    state.waiting_for_declaration = false;
    advance_turn(state, 1, Player::is_active);
}

/// Resolve a pending Peacock play by declaring the active color.
pub fn apply_peacock_declaration(state: &mut GameState, color: Color) {
    debug!(?color, "peacock declaration");
    state.declared_color = Some(color);
    state.declared_symbol = None;
    state.waiting_for_declaration = false;
    advance_turn(state, 1, Player::is_active);
}

/// Move up to `count` cards from the front of the draw pile into the
/// player's hand, one at a time.
///
/// When the draw pile empties mid-draw it is replenished from the discard
/// pile minus its top card, reshuffled; the top discard never recycles. If
/// fewer than `count` cards exist outside hands, drawing stops silently.
/// Never touches the turn pointer. Returns the number actually drawn.
pub fn draw_cards(state: &mut GameState, player_id: PlayerId, count: usize) -> usize {
    let mut drawn = 0;
    for _ in 0..count {
        if state.draw_pile.is_empty() {
            replenish_draw_pile(state);
        }
        if state.draw_pile.is_empty() {
            break;
        }
        let card = state.draw_pile.remove(0);
        match state.player_mut(player_id) {
            Some(player) => player.hand.push(card),
            None => {
                state.draw_pile.insert(0, card);
                break;
            }
        }
        drawn += 1;
    }
    drawn
}

/// Resolve an out-of-turn match interrupt.
///
/// Preconditions (room layer): the window is open, `matcher_id` is not the
/// current player, and `card` matches the top of the discard pile.
///
/// The interrupted current player draws a 1-card penalty unless the matched
/// card is a Wasp, whose effect stacks onto the pending penalty instead.
/// The turn pointer is reset to the matcher before the card's normal play
/// effect, so play continues from the player after the matcher. The window
/// closes immediately.
pub fn resolve_match(state: &mut GameState, matcher_id: PlayerId, card: Card) {
    if !card.is_wasp() {
        if let Some(interrupted) = state.current_player_id() {
            draw_cards(state, interrupted, 1);
        }
    }

    if let Some(idx) = state.player_index(matcher_id) {
        state.current_player_index = idx;
    }
    state.match_window_open = false;

    apply_play(state, matcher_id, card);
}

fn replenish_draw_pile(state: &mut GameState) {
    if state.discard_pile.len() <= 1 {
        return;
    }
    let Some(top) = state.discard_pile.pop() else {
        return;
    };
    let mut recycled = std::mem::take(&mut state.discard_pile);
    state.discard_pile.push(top);
    state.rng.shuffle(&mut recycled);
    debug!(recycled = recycled.len(), "replenished draw pile from discard");
    state.draw_pile = recycled;
}
