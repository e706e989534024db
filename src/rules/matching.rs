//! Exact-match predicate for double plays and out-of-turn interrupts.

use crate::core::{Card, CardKind};

/// Whether two cards form a "match" - the requirement for a double play and
/// for the out-of-turn interrupt.
///
/// Stricter than play legality:
/// - Power cards match only on the same power AND the same pair.
/// - Non-Power cards need the same color AND the same symbol (both Basic)
///   or the same command (both Command).
/// - A Basic and a Command never match, even with equal colors, and Power
///   never matches non-Power.
#[must_use]
pub fn is_match(a: &Card, b: &Card) -> bool {
    match (&a.kind, &b.kind) {
        (
            CardKind::Power { power: pa, pair: ra },
            CardKind::Power { power: pb, pair: rb },
        ) => pa == pb && ra == rb,
        (
            CardKind::Basic {
                color: ca,
                symbol: sa,
            },
            CardKind::Basic {
                color: cb,
                symbol: sb,
            },
        ) => ca == cb && sa == sb,
        (
            CardKind::Command {
                color: ca,
                command: ma,
            },
            CardKind::Command {
                color: cb,
                command: mb,
            },
        ) => ca == cb && ma == mb,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, Color, Command, Power, Symbol};

    fn basic(id: u32, color: Color, symbol: Symbol) -> Card {
        Card::new(CardId::new(id), CardKind::Basic { color, symbol }, 1)
    }

    fn command(id: u32, color: Color, command: Command) -> Card {
        Card::new(CardId::new(id), CardKind::Command { color, command }, 2)
    }

    fn power(id: u32, power: Power, pair: u8) -> Card {
        Card::new(CardId::new(id), CardKind::Power { power, pair }, 5)
    }

    #[test]
    fn test_basic_match_needs_color_and_symbol() {
        let a = basic(0, Color::Red, Symbol::Sun);
        let same = basic(1, Color::Red, Symbol::Sun);
        let color_only = basic(2, Color::Red, Symbol::Moon);
        let symbol_only = basic(3, Color::Blue, Symbol::Sun);

        assert!(is_match(&a, &same));
        assert!(!is_match(&a, &color_only));
        assert!(!is_match(&a, &symbol_only));
    }

    #[test]
    fn test_command_match_needs_color_and_command() {
        let a = command(0, Color::Blue, Command::Frog);
        let same = command(1, Color::Blue, Command::Frog);
        let color_only = command(2, Color::Blue, Command::Crab);
        let command_only = command(3, Color::Red, Command::Frog);

        assert!(is_match(&a, &same));
        assert!(!is_match(&a, &color_only));
        assert!(!is_match(&a, &command_only));
    }

    #[test]
    fn test_power_match_is_exact_pair() {
        let a = power(0, Power::Dragon, 1);
        let same_pair = power(1, Power::Dragon, 1);
        let other_pair = power(2, Power::Dragon, 2);
        let other_power = power(3, Power::Peacock, 1);

        assert!(is_match(&a, &same_pair));
        assert!(!is_match(&a, &other_pair));
        assert!(!is_match(&a, &other_power));
    }

    #[test]
    fn test_cross_kind_never_matches() {
        let b = basic(0, Color::Red, Symbol::Sun);
        let c = command(1, Color::Red, Command::Wasp);
        let p = power(2, Power::Dragon, 1);

        assert!(!is_match(&b, &c));
        assert!(!is_match(&c, &b));
        assert!(!is_match(&b, &p));
        assert!(!is_match(&c, &p));
    }
}
