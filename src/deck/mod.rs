//! Deck construction, shuffling, and hand scoring.
//!
//! ## Composition
//!
//! A deck is exactly 62 cards:
//! - 36 Basic: 6 symbols x 3 colors x 2 copies
//! - 18 Command: 3 commands x 3 colors x 2 copies
//! - 8 Power: 2 powers x 2 pairs x 2 copies
//!
//! `build_deck` holds this composition after every call; the property tests
//! in `tests/property_tests.rs` pin it down.

use crate::core::{Card, CardId, CardKind, Color, Command, GameRng, PointScale, Power, Symbol};

/// Number of cards in a complete deck.
pub const DECK_SIZE: usize = 62;

/// Build a fresh, shuffled 62-card deck.
///
/// Ids are assigned from a fresh namespace starting at 0; they are unique
/// within this deck only. Point values come from `scale`.
///
/// ```
/// use zar_engine::core::{GameRng, PointScale};
/// use zar_engine::deck::{build_deck, DECK_SIZE};
///
/// let mut rng = GameRng::new(7);
/// let deck = build_deck(PointScale::Low, &mut rng);
/// assert_eq!(deck.len(), DECK_SIZE);
/// ```
#[must_use]
pub fn build_deck(scale: PointScale, rng: &mut GameRng) -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    let mut next_id = 0u32;
    let mut push = |deck: &mut Vec<Card>, kind: CardKind| {
        deck.push(Card::new(CardId::new(next_id), kind, scale.points(&kind)));
        next_id += 1;
    };

    for symbol in Symbol::ALL {
        for color in Color::ALL {
            for _copy in 0..2 {
                push(&mut deck, CardKind::Basic { color, symbol });
            }
        }
    }

    for command in Command::ALL {
        for color in Color::ALL {
            for _copy in 0..2 {
                push(&mut deck, CardKind::Command { color, command });
            }
        }
    }

    for power in Power::ALL {
        for pair in 1..=2u8 {
            for _copy in 0..2 {
                push(&mut deck, CardKind::Power { power, pair });
            }
        }
    }

    rng.shuffle(&mut deck);
    deck
}

/// Return a uniformly shuffled copy of `items`, leaving the input untouched.
#[must_use]
pub fn shuffle<T: Clone>(items: &[T], rng: &mut GameRng) -> Vec<T> {
    let mut out = items.to_vec();
    rng.shuffle(&mut out);
    out
}

/// Sum of point values over a hand. Zero for an empty hand.
#[must_use]
pub fn hand_score(hand: &[Card]) -> u32 {
    hand.iter().map(|c| u32::from(c.points)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_composition() {
        let mut rng = GameRng::new(42);
        let deck = build_deck(PointScale::Low, &mut rng);

        assert_eq!(deck.len(), DECK_SIZE);

        let basics = deck
            .iter()
            .filter(|c| matches!(c.kind, CardKind::Basic { .. }))
            .count();
        let commands = deck
            .iter()
            .filter(|c| matches!(c.kind, CardKind::Command { .. }))
            .count();
        let powers = deck.iter().filter(|c| c.is_power()).count();

        assert_eq!(basics, 36);
        assert_eq!(commands, 18);
        assert_eq!(powers, 8);

        let wasps = deck.iter().filter(|c| c.is_wasp()).count();
        let dragons = deck.iter().filter(|c| c.is(Power::Dragon)).count();
        let peacocks = deck.iter().filter(|c| c.is(Power::Peacock)).count();

        assert_eq!(wasps, 6);
        assert_eq!(dragons, 4);
        assert_eq!(peacocks, 4);
    }

    #[test]
    fn test_deck_ids_unique() {
        let mut rng = GameRng::new(1);
        let deck = build_deck(PointScale::Low, &mut rng);

        let mut ids: Vec<u32> = deck.iter().map(|c| c.id.raw()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let mut rng = GameRng::new(9);
        let input: Vec<u32> = (0..20).collect();
        let before = input.clone();

        let shuffled = shuffle(&input, &mut rng);

        assert_eq!(input, before);
        let mut sorted = shuffled;
        sorted.sort_unstable();
        assert_eq!(sorted, before);
    }

    #[test]
    fn test_hand_score() {
        let mut rng = GameRng::new(3);
        let deck = build_deck(PointScale::High, &mut rng);

        assert_eq!(hand_score(&[]), 0);

        let hand: Vec<Card> = deck.iter().take(4).cloned().collect();
        let expected: u32 = hand.iter().map(|c| u32::from(c.points)).sum();
        assert_eq!(hand_score(&hand), expected);
    }

    #[test]
    fn test_total_points_differ_by_scale() {
        let mut rng = GameRng::new(5);
        let low = build_deck(PointScale::Low, &mut rng);
        let high = build_deck(PointScale::High, &mut rng);

        // 36*1 + 6*3 + 12*2 + 8*5 = 118
        assert_eq!(hand_score(&low), 118);
        // 36*5 + 18*15 + 8*25 = 650
        assert_eq!(hand_score(&high), 650);
    }
}
