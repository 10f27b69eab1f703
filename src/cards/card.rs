//! The 30 card identifiers and their static attributes.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use super::category::{Category, Gender, Presence, WeaponClass};
use super::color::Color;
use super::set::CardSet;

/// One of the 30 cards in the game.
///
/// Cards are globally comparable by (color, category, name), which gives a
/// deterministic ordering for presenting solutions and candidate actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Card {
    Harbor,
    Library,
    Market,
    Museum,
    Park,
    Parlor,
    Plaza,
    Racecourse,
    Railcar,
    Theater,

    Butcher,
    Coachman,
    Countess,
    Dancer,
    Duke,
    Florist,
    Maid,
    Nurse,
    Officer,
    Sailor,

    Blowgun,
    Bow,
    Candlestick,
    Crossbow,
    Gun,
    Hammer,
    Knife,
    Poison,
    Rifle,
    Sword,
}

impl Card {
    /// Number of cards in the universe.
    pub const COUNT: usize = 30;

    /// All cards, in declaration order (the bitset bit order).
    pub const ALL: [Card; Card::COUNT] = [
        Card::Harbor,
        Card::Library,
        Card::Market,
        Card::Museum,
        Card::Park,
        Card::Parlor,
        Card::Plaza,
        Card::Racecourse,
        Card::Railcar,
        Card::Theater,
        Card::Butcher,
        Card::Coachman,
        Card::Countess,
        Card::Dancer,
        Card::Duke,
        Card::Florist,
        Card::Maid,
        Card::Nurse,
        Card::Officer,
        Card::Sailor,
        Card::Blowgun,
        Card::Bow,
        Card::Candlestick,
        Card::Crossbow,
        Card::Gun,
        Card::Hammer,
        Card::Knife,
        Card::Poison,
        Card::Rifle,
        Card::Sword,
    ];

    /// Position of this card in [`Card::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Category of the card.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Card::Harbor | Card::Market | Card::Park | Card::Plaza | Card::Racecourse => {
                Category::Location(Presence::Outdoors)
            }
            Card::Library | Card::Museum | Card::Parlor | Card::Railcar | Card::Theater => {
                Category::Location(Presence::Indoors)
            }
            Card::Butcher | Card::Coachman | Card::Duke | Card::Officer | Card::Sailor => {
                Category::Person(Gender::Man)
            }
            Card::Countess | Card::Dancer | Card::Florist | Card::Maid | Card::Nurse => {
                Category::Person(Gender::Woman)
            }
            Card::Blowgun | Card::Bow | Card::Crossbow | Card::Gun | Card::Rifle => {
                Category::Weapon(WeaponClass::Ranged)
            }
            Card::Candlestick | Card::Hammer | Card::Knife | Card::Poison | Card::Sword => {
                Category::Weapon(WeaponClass::Melee)
            }
        }
    }

    /// Color of the card.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Card::Officer | Card::Parlor | Card::Knife => Color::Purple,
            Card::Duke | Card::Market | Card::Crossbow => Color::Pink,
            Card::Butcher | Card::Library | Card::Poison => Color::Red,
            Card::Countess | Card::Park | Card::Sword => Color::Green,
            Card::Nurse | Card::Museum | Card::Blowgun => Color::Yellow,
            Card::Maid | Card::Harbor | Card::Rifle => Color::Blue,
            Card::Dancer | Card::Theater | Card::Gun => Color::Orange,
            Card::Sailor | Card::Plaza | Card::Candlestick => Color::White,
            Card::Florist | Card::Railcar | Card::Hammer => Color::Brown,
            Card::Coachman | Card::Racecourse | Card::Bow => Color::Gray,
        }
    }

    /// `true` if this card is a person.
    #[must_use]
    pub const fn is_person(self) -> bool {
        matches!(self.category(), Category::Person(_))
    }

    /// `true` if this card is a location.
    #[must_use]
    pub const fn is_location(self) -> bool {
        matches!(self.category(), Category::Location(_))
    }

    /// `true` if this card is a weapon.
    #[must_use]
    pub const fn is_weapon(self) -> bool {
        matches!(self.category(), Category::Weapon(_))
    }

    /// The in-play card set for a game with the given number of players.
    ///
    /// Smaller games drop whole colors, from the back of the color
    /// ordering: gray leaves first, then brown, white, and orange.
    ///
    /// ## Panics
    ///
    /// Panics if `player_count` is outside `2..=6`.
    #[must_use]
    pub fn in_play_set(player_count: usize) -> CardSet {
        assert!(
            (2..=6).contains(&player_count),
            "player count must be between 2 and 6"
        );

        let mut cards = CardSet::ALL;
        if player_count <= 2 {
            cards -= CardSet::matching_color(Color::Orange);
        }
        if player_count <= 3 {
            cards -= CardSet::matching_color(Color::White);
        }
        if player_count <= 4 {
            cards -= CardSet::matching_color(Color::Brown);
        }
        if player_count <= 5 {
            cards -= CardSet::matching_color(Color::Gray);
        }
        cards
    }

    /// Capitalized display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Card::Harbor => "Harbor",
            Card::Library => "Library",
            Card::Market => "Market",
            Card::Museum => "Museum",
            Card::Park => "Park",
            Card::Parlor => "Parlor",
            Card::Plaza => "Plaza",
            Card::Racecourse => "Racecourse",
            Card::Railcar => "Railcar",
            Card::Theater => "Theater",
            Card::Butcher => "Butcher",
            Card::Coachman => "Coachman",
            Card::Countess => "Countess",
            Card::Dancer => "Dancer",
            Card::Duke => "Duke",
            Card::Florist => "Florist",
            Card::Maid => "Maid",
            Card::Nurse => "Nurse",
            Card::Officer => "Officer",
            Card::Sailor => "Sailor",
            Card::Blowgun => "Blowgun",
            Card::Bow => "Bow",
            Card::Candlestick => "Candlestick",
            Card::Crossbow => "Crossbow",
            Card::Gun => "Gun",
            Card::Hammer => "Hammer",
            Card::Knife => "Knife",
            Card::Poison => "Poison",
            Card::Rifle => "Rifle",
            Card::Sword => "Sword",
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.color(), self.category(), self.name()).cmp(&(
            other.color(),
            other.category(),
            other.name(),
        ))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Card {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Card::ALL
            .iter()
            .find(|card| card.name().to_ascii_lowercase() == lowered)
            .copied()
            .ok_or(())
    }
}
