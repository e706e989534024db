//! Card taxonomy for the ZAR deck.
//!
//! Three kinds of card exist:
//! - `Basic`: a color plus a symbol, playable by matching either.
//! - `Command`: a colored card with a forced effect (Wasp, Frog, Crab).
//! - `Power`: a wild card (Dragon, Peacock) that demands a follow-up
//!   declaration of symbol or color.
//!
//! Cards are immutable values. Once built into a deck they are only ever
//! relocated between the draw pile, a hand, and the discard pile - never
//! mutated. Point values are assigned at deck-build time from the configured
//! `PointScale`; they are data, not a structural invariant.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within one deck instance.
///
/// Ids are stable for the life of one deck and unique within it; they are
/// not globally unique across decks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card color, carried by Basic and Command cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Yellow,
    Blue,
    Red,
}

impl Color {
    /// All colors, in deck enumeration order.
    pub const ALL: [Color; 3] = [Color::Yellow, Color::Blue, Color::Red];
}

/// Symbol carried by Basic cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Galaxy,
    Moon,
    Cloud,
    Sun,
    Star,
    Lightning,
}

impl Symbol {
    /// All symbols, in deck enumeration order.
    pub const ALL: [Symbol; 6] = [
        Symbol::Galaxy,
        Symbol::Moon,
        Symbol::Cloud,
        Symbol::Sun,
        Symbol::Star,
        Symbol::Lightning,
    ];
}

/// Forced effect carried by Command cards.
///
/// - `Wasp`: the next player draws 2 (stackable).
/// - `Frog`: skips the next player.
/// - `Crab`: reverses play direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Wasp,
    Frog,
    Crab,
}

impl Command {
    /// All commands, in deck enumeration order.
    pub const ALL: [Command; 3] = [Command::Wasp, Command::Frog, Command::Crab];
}

/// Wild effect carried by Power cards.
///
/// - `Dragon`: the player redeclares the active symbol.
/// - `Peacock`: the player redeclares the active color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Power {
    Dragon,
    Peacock,
}

impl Power {
    /// All powers, in deck enumeration order.
    pub const ALL: [Power; 2] = [Power::Dragon, Power::Peacock];
}

/// Kind-specific card attributes.
///
/// Power cards carry no color or symbol; their `pair` field (1 or 2)
/// distinguishes the two duplicated pairs for exact-pair matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Basic { color: Color, symbol: Symbol },
    Command { color: Color, command: Command },
    Power { power: Power, pair: u8 },
}

/// An immutable card value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Identity within one deck instance.
    pub id: CardId,

    /// Kind plus kind-specific attributes.
    pub kind: CardKind,

    /// Score value when left in a losing hand at round end.
    pub points: u16,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(id: CardId, kind: CardKind, points: u16) -> Self {
        Self { id, kind, points }
    }

    /// The card's color, if it has one (Power cards do not).
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self.kind {
            CardKind::Basic { color, .. } | CardKind::Command { color, .. } => Some(color),
            CardKind::Power { .. } => None,
        }
    }

    /// The card's symbol, if it has one (Basic cards only).
    #[must_use]
    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            CardKind::Basic { symbol, .. } => Some(symbol),
            _ => None,
        }
    }

    /// The card's command, if it has one (Command cards only).
    #[must_use]
    pub fn command(&self) -> Option<Command> {
        match self.kind {
            CardKind::Command { command, .. } => Some(command),
            _ => None,
        }
    }

    /// The card's power, if it has one (Power cards only).
    #[must_use]
    pub fn power(&self) -> Option<Power> {
        match self.kind {
            CardKind::Power { power, .. } => Some(power),
            _ => None,
        }
    }

    /// Check whether this is a Power card.
    #[must_use]
    pub fn is_power(&self) -> bool {
        matches!(self.kind, CardKind::Power { .. })
    }

    /// Check whether this is a specific power.
    #[must_use]
    pub fn is(&self, power: Power) -> bool {
        self.power() == Some(power)
    }

    /// Check whether this is a Wasp card.
    #[must_use]
    pub fn is_wasp(&self) -> bool {
        self.command() == Some(Command::Wasp)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            CardKind::Basic { color, symbol } => write!(f, "{:?} {:?}", color, symbol),
            CardKind::Command { color, command } => write!(f, "{:?} {:?}", color, command),
            CardKind::Power { power, pair } => write!(f, "{:?} (pair {})", power, pair),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(id: u32, color: Color, symbol: Symbol) -> Card {
        Card::new(CardId::new(id), CardKind::Basic { color, symbol }, 1)
    }

    #[test]
    fn test_attribute_accessors() {
        let b = basic(0, Color::Red, Symbol::Sun);
        assert_eq!(b.color(), Some(Color::Red));
        assert_eq!(b.symbol(), Some(Symbol::Sun));
        assert_eq!(b.command(), None);
        assert_eq!(b.power(), None);
        assert!(!b.is_power());

        let c = Card::new(
            CardId::new(1),
            CardKind::Command {
                color: Color::Blue,
                command: Command::Wasp,
            },
            3,
        );
        assert_eq!(c.color(), Some(Color::Blue));
        assert_eq!(c.symbol(), None);
        assert_eq!(c.command(), Some(Command::Wasp));
        assert!(c.is_wasp());

        let p = Card::new(
            CardId::new(2),
            CardKind::Power {
                power: Power::Dragon,
                pair: 1,
            },
            5,
        );
        assert_eq!(p.color(), None);
        assert_eq!(p.symbol(), None);
        assert!(p.is_power());
        assert!(p.is(Power::Dragon));
        assert!(!p.is(Power::Peacock));
    }

    #[test]
    fn test_card_serialization() {
        let card = basic(7, Color::Yellow, Symbol::Moon);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }

    #[test]
    fn test_enum_cardinalities() {
        assert_eq!(Color::ALL.len(), 3);
        assert_eq!(Symbol::ALL.len(), 6);
        assert_eq!(Command::ALL.len(), 3);
        assert_eq!(Power::ALL.len(), 2);
    }
}
