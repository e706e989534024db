//! Bot decision policy.
//!
//! A thin heuristic consumer of the legality predicates: it reads the state,
//! never mutates it, and consumes randomness only to pick a declaration.
//! Pacing (the human-perceivable delays between bot actions) is entirely a
//! host concern; the policy itself is a pure function suitable for direct
//! use in tests.

use crate::core::{Action, Card, Color, GameRng, GameState, PlayerId, Power, Symbol};
use crate::rules::{can_play, can_play_double};

/// Decide the bot's next action.
///
/// Decision order:
/// 1. A pending declaration is resolved with a random symbol or color.
/// 2. A stacked penalty is answered with a held Wasp, else a draw.
/// 3. With more than 2 cards, the first playable matching double.
/// 4. The first playable single card, in hand order.
/// 5. A voluntary draw, if one has not happened this turn.
/// 6. Pass.
#[must_use]
pub fn compute_bot_action(state: &GameState, bot_id: PlayerId, rng: &mut GameRng) -> Action {
    let Some(bot) = state.player(bot_id) else {
        return Action::Pass;
    };
    let hand = &bot.hand;

    if state.waiting_for_declaration {
        return match state.top_discard().and_then(Card::power) {
            Some(Power::Peacock) => {
                Action::DeclareColor(*rng.choose(&Color::ALL).unwrap_or(&Color::Yellow))
            }
            _ => Action::DeclareSymbol(*rng.choose(&Symbol::ALL).unwrap_or(&Symbol::Galaxy)),
        };
    }

    if state.pending_draw_count > 0 {
        if let Some(wasp) = hand.iter().find(|c| c.is_wasp()) {
            return Action::PlayCard(wasp.id);
        }
        return Action::Draw;
    }

    if hand.len() > 2 {
        for i in 0..hand.len() {
            for j in (i + 1)..hand.len() {
                if can_play_double(&hand[i], &hand[j], hand.len(), state) {
                    return Action::PlayDouble(hand[i].id, hand[j].id);
                }
                if can_play_double(&hand[j], &hand[i], hand.len(), state) {
                    return Action::PlayDouble(hand[j].id, hand[i].id);
                }
            }
        }
    }

    if let Some(card) = hand.iter().find(|c| can_play(c, state)) {
        return Action::PlayCard(card.id);
    }

    if !state.drawn_this_turn {
        return Action::Draw;
    }

    Action::Pass
}
