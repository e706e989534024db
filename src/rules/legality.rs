//! The play-legality predicate.
//!
//! `can_play` answers "may this card land on the discard pile right now".
//! Rules are checked in a fixed precedence order; earlier rules shadow
//! later ones:
//!
//! 1. Empty discard pile: anything goes (pre-flip defensive case).
//! 2. A stacked draw penalty gates everything except a Wasp.
//! 3. A standing symbol declaration (post-Dragon).
//! 4. A standing color declaration (post-Peacock).
//! 5. Dragon may land on anything except a Peacock.
//! 6. Peacock may land on anything except a Dragon.
//! 7. Normal matching: shared color, shared symbol, or shared command;
//!    Basic vs Command falls back to color only.

use smallvec::SmallVec;

use crate::core::{Card, CardId, DeclarationPolicy, GameState, Power};

use super::matching::is_match;

/// Whether `card` is legal to play on the current table state.
#[must_use]
pub fn can_play(card: &Card, state: &GameState) -> bool {
    let Some(top) = state.top_discard() else {
        return true;
    };

    if state.pending_draw_count > 0 {
        return card.is_wasp();
    }

    if let Some(declared) = state.declared_symbol {
        if card.is(Power::Dragon) {
            return true;
        }
        if card.symbol() == Some(declared) {
            return true;
        }
        return escape_matches_color(card, state);
    }

    if let Some(declared) = state.declared_color {
        if card.is(Power::Peacock) {
            return true;
        }
        if card.color() == Some(declared) {
            return true;
        }
        return escape_matches_identity(card, state);
    }

    if card.is(Power::Dragon) {
        return !top.is(Power::Peacock);
    }
    if card.is(Power::Peacock) {
        return !top.is(Power::Dragon);
    }

    // Normal matching. A Power top with no standing declaration only occurs
    // transiently (mid-declaration); nothing but another power lands on it.
    let colors_match = match (card.color(), top.color()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    let symbols_match = match (card.symbol(), top.symbol()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    let commands_match = match (card.command(), top.command()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    colors_match || symbols_match || commands_match
}

/// Whether a two-card double play is legal for a hand of `hand_len` cards.
///
/// The pair must `is_match`, the lead card must itself be playable, and the
/// hand must keep at least one card after the move - you may not go out on
/// a double.
#[must_use]
pub fn can_play_double(lead: &Card, mate: &Card, hand_len: usize, state: &GameState) -> bool {
    hand_len > 2 && is_match(lead, mate) && can_play(lead, state)
}

/// Ids of every playable card in `hand`, in hand order.
#[must_use]
pub fn playable_cards(hand: &[Card], state: &GameState) -> SmallVec<[CardId; 8]> {
    hand.iter()
        .filter(|c| can_play(c, state))
        .map(|c| c.id)
        .collect()
}

/// Declaration escape: a post-Dragon state also accepts a card whose color
/// matches the most recent colored card on the discard pile.
fn escape_matches_color(card: &Card, state: &GameState) -> bool {
    if state.config.declaration_policy != DeclarationPolicy::DeclaredOrActive {
        return false;
    }
    let active = state
        .discard_pile
        .iter()
        .rev()
        .find_map(|c| c.color());
    match (card.color(), active) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Declaration escape: a post-Peacock state also accepts a card sharing the
/// symbol or command of the most recent non-Power card on the discard pile.
fn escape_matches_identity(card: &Card, state: &GameState) -> bool {
    if state.config.declaration_policy != DeclarationPolicy::DeclaredOrActive {
        return false;
    }
    let Some(anchor) = state.discard_pile.iter().rev().find(|c| !c.is_power()) else {
        return false;
    };
    let symbols = match (card.symbol(), anchor.symbol()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    let commands = match (card.command(), anchor.command()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    symbols || commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        CardKind, Color, Command, GameConfig, Player, PlayerId, Symbol,
    };

    fn basic(id: u32, color: Color, symbol: Symbol) -> Card {
        Card::new(CardId::new(id), CardKind::Basic { color, symbol }, 1)
    }

    fn command(id: u32, color: Color, command: Command) -> Card {
        Card::new(CardId::new(id), CardKind::Command { color, command }, 2)
    }

    fn power(id: u32, power: Power, pair: u8) -> Card {
        Card::new(CardId::new(id), CardKind::Power { power, pair }, 5)
    }

    fn state_with_top(top: Card) -> GameState {
        let mut state = GameState::new(GameConfig::default(), 40, 42);
        state.seat(Player::human(PlayerId::new(0), "a"));
        state.seat(Player::human(PlayerId::new(1), "b"));
        state.discard_pile.push(top);
        state
    }

    #[test]
    fn test_empty_discard_accepts_anything() {
        let state = GameState::new(GameConfig::default(), 40, 42);
        assert!(can_play(&power(0, Power::Dragon, 1), &state));
        assert!(can_play(&basic(1, Color::Red, Symbol::Sun), &state));
    }

    #[test]
    fn test_pending_draw_admits_only_wasp() {
        let mut state = state_with_top(basic(0, Color::Red, Symbol::Sun));
        state.pending_draw_count = 2;

        assert!(can_play(&command(1, Color::Blue, Command::Wasp), &state));
        assert!(!can_play(&basic(2, Color::Red, Symbol::Sun), &state));
        assert!(!can_play(&command(3, Color::Red, Command::Frog), &state));
        assert!(!can_play(&power(4, Power::Dragon, 1), &state));
    }

    #[test]
    fn test_normal_matching() {
        let state = state_with_top(basic(0, Color::Red, Symbol::Sun));

        assert!(can_play(&basic(1, Color::Red, Symbol::Moon), &state)); // color
        assert!(can_play(&basic(2, Color::Blue, Symbol::Sun), &state)); // symbol
        assert!(!can_play(&basic(3, Color::Blue, Symbol::Moon), &state));
        assert!(can_play(&command(4, Color::Red, Command::Frog), &state)); // color fallback
        assert!(!can_play(&command(5, Color::Blue, Command::Frog), &state));
    }

    #[test]
    fn test_command_on_command() {
        let state = state_with_top(command(0, Color::Red, Command::Frog));

        assert!(can_play(&command(1, Color::Blue, Command::Frog), &state)); // command
        assert!(can_play(&command(2, Color::Red, Command::Crab), &state)); // color
        assert!(!can_play(&command(3, Color::Blue, Command::Crab), &state));
        assert!(can_play(&basic(4, Color::Red, Symbol::Sun), &state)); // color fallback
        assert!(!can_play(&basic(5, Color::Blue, Symbol::Sun), &state));
    }

    #[test]
    fn test_power_gating() {
        let on_basic = state_with_top(basic(0, Color::Red, Symbol::Sun));
        assert!(can_play(&power(1, Power::Dragon, 1), &on_basic));
        assert!(can_play(&power(2, Power::Peacock, 1), &on_basic));

        let on_dragon = state_with_top(power(0, Power::Dragon, 1));
        assert!(can_play(&power(1, Power::Dragon, 2), &on_dragon));
        assert!(!can_play(&power(2, Power::Peacock, 1), &on_dragon));

        let on_peacock = state_with_top(power(0, Power::Peacock, 1));
        assert!(!can_play(&power(1, Power::Dragon, 1), &on_peacock));
        assert!(can_play(&power(2, Power::Peacock, 2), &on_peacock));
    }

    #[test]
    fn test_declared_symbol_gate() {
        let mut state = state_with_top(power(0, Power::Dragon, 1));
        state.declared_symbol = Some(Symbol::Moon);

        assert!(can_play(&basic(1, Color::Red, Symbol::Moon), &state));
        assert!(!can_play(&basic(2, Color::Red, Symbol::Sun), &state));
        assert!(!can_play(&command(3, Color::Red, Command::Frog), &state));
        assert!(can_play(&power(4, Power::Dragon, 2), &state));
        assert!(!can_play(&power(5, Power::Peacock, 1), &state));
    }

    #[test]
    fn test_declared_color_gate() {
        let mut state = state_with_top(power(0, Power::Peacock, 1));
        state.declared_color = Some(Color::Blue);

        assert!(can_play(&basic(1, Color::Blue, Symbol::Sun), &state));
        assert!(can_play(&command(2, Color::Blue, Command::Wasp), &state));
        assert!(!can_play(&basic(3, Color::Red, Symbol::Sun), &state));
        assert!(can_play(&power(4, Power::Peacock, 2), &state));
        assert!(!can_play(&power(5, Power::Dragon, 1), &state));
    }

    #[test]
    fn test_declared_or_active_escape() {
        let mut state = state_with_top(basic(0, Color::Red, Symbol::Sun));
        state.config.declaration_policy = DeclarationPolicy::DeclaredOrActive;
        state.discard_pile.push(power(1, Power::Dragon, 1));
        state.declared_symbol = Some(Symbol::Moon);

        // Red was the most recent colored discard, so red cards escape.
        assert!(can_play(&basic(2, Color::Red, Symbol::Star), &state));
        assert!(!can_play(&basic(3, Color::Blue, Symbol::Star), &state));

        // Under the default policy the same card is rejected.
        state.config.declaration_policy = DeclarationPolicy::DeclaredOnly;
        assert!(!can_play(&basic(2, Color::Red, Symbol::Star), &state));
    }

    #[test]
    fn test_cannot_go_out_on_a_double() {
        let state = state_with_top(basic(0, Color::Red, Symbol::Sun));
        let a = basic(1, Color::Red, Symbol::Sun);
        let b = basic(2, Color::Red, Symbol::Sun);

        assert!(!can_play_double(&a, &b, 2, &state));
        assert!(can_play_double(&a, &b, 3, &state));
    }

    #[test]
    fn test_double_requires_playable_lead_and_match() {
        let state = state_with_top(basic(0, Color::Red, Symbol::Sun));
        let lead = basic(1, Color::Blue, Symbol::Moon); // not playable
        let mate = basic(2, Color::Blue, Symbol::Moon);
        assert!(!can_play_double(&lead, &mate, 5, &state));

        let lead = basic(3, Color::Red, Symbol::Moon); // playable, but
        let mate = basic(4, Color::Blue, Symbol::Moon); // not a match
        assert!(!can_play_double(&lead, &mate, 5, &state));
    }

    #[test]
    fn test_playable_cards_in_hand_order() {
        let state = state_with_top(basic(0, Color::Red, Symbol::Sun));
        let hand = vec![
            basic(1, Color::Blue, Symbol::Moon),
            basic(2, Color::Red, Symbol::Moon),
            basic(3, Color::Blue, Symbol::Sun),
        ];

        let playable = playable_cards(&hand, &state);
        assert_eq!(playable.as_slice(), &[CardId::new(2), CardId::new(3)]);
    }
}
