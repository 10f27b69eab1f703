//! Compact card sets.
//!
//! A [`CardSet`] is a 30-bit bitset over the card universe. Sets are `Copy`,
//! so hypothesis enumeration can pass them around freely; all algebra is a
//! handful of integer operations.

use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

use super::card::Card;
use super::category::Category;
use super::color::Color;
use super::filter::Filter;

/// A set of cards, one bit per card in [`Card::ALL`] order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardSet(u32);

impl CardSet {
    /// The empty set.
    pub const EMPTY: CardSet = CardSet(0);

    /// All 30 cards.
    pub const ALL: CardSet = CardSet((1 << Card::COUNT) - 1);

    const fn of(cards: &[Card]) -> CardSet {
        let mut bits = 0u32;
        let mut i = 0;
        while i < cards.len() {
            bits |= 1 << cards[i] as u32;
            i += 1;
        }
        CardSet(bits)
    }

    /// All universe cards of the given color.
    #[must_use]
    pub const fn matching_color(color: Color) -> CardSet {
        let mut bits = 0u32;
        let mut i = 0;
        while i < Card::COUNT {
            if Card::ALL[i].color() as u8 == color as u8 {
                bits |= 1 << i;
            }
            i += 1;
        }
        CardSet(bits)
    }

    /// All universe cards of the given category.
    #[must_use]
    pub const fn matching_category(category: Category) -> CardSet {
        let mut bits = 0u32;
        let mut i = 0;
        while i < Card::COUNT {
            if Card::ALL[i].category().index() == category.index() {
                bits |= 1 << i;
            }
            i += 1;
        }
        CardSet(bits)
    }

    /// A set containing a single card.
    #[must_use]
    pub const fn singleton(card: Card) -> CardSet {
        CardSet(1 << card as u32)
    }

    /// Number of cards in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// `true` if the set has no cards.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if the set contains `card`.
    #[must_use]
    pub const fn contains(self, card: Card) -> bool {
        self.0 & (1 << card as u32) != 0
    }

    /// Add a card to the set.
    pub fn insert(&mut self, card: Card) {
        self.0 |= 1 << card as u32;
    }

    /// Remove a card from the set.
    pub fn remove(&mut self, card: Card) {
        self.0 &= !(1 << card as u32);
    }

    /// `true` if the sets share no cards.
    #[must_use]
    pub const fn is_disjoint(self, other: CardSet) -> bool {
        self.0 & other.0 == 0
    }

    /// `true` if every card of `self` is in `other`.
    #[must_use]
    pub const fn is_subset_of(self, other: CardSet) -> bool {
        self.0 & other.0 == self.0
    }

    /// The lowest-indexed card in the set, if any.
    #[must_use]
    pub fn first(self) -> Option<Card> {
        self.iter().next()
    }

    /// Iterate over the cards in bit order.
    pub fn iter(self) -> Iter {
        Iter(self.0)
    }

    // === Taxonomy views ===

    /// People in the set.
    #[must_use]
    pub fn people(self) -> CardSet {
        self & CardSet::PEOPLE
    }

    /// Men in the set.
    #[must_use]
    pub fn men(self) -> CardSet {
        self & CardSet::MEN
    }

    /// Women in the set.
    #[must_use]
    pub fn women(self) -> CardSet {
        self & CardSet::WOMEN
    }

    /// Locations in the set.
    #[must_use]
    pub fn locations(self) -> CardSet {
        self & CardSet::LOCATIONS
    }

    /// Indoors locations in the set.
    #[must_use]
    pub fn indoors(self) -> CardSet {
        self & CardSet::INDOORS
    }

    /// Outdoors locations in the set.
    #[must_use]
    pub fn outdoors(self) -> CardSet {
        self & CardSet::OUTDOORS
    }

    /// Weapons in the set.
    #[must_use]
    pub fn weapons(self) -> CardSet {
        self & CardSet::WEAPONS
    }

    /// Ranged weapons in the set.
    #[must_use]
    pub fn ranged(self) -> CardSet {
        self & CardSet::RANGED
    }

    /// Melee weapons in the set.
    #[must_use]
    pub fn melee(self) -> CardSet {
        self & CardSet::MELEE
    }

    /// Cards of the given color in the set.
    #[must_use]
    pub fn of_color(self, color: Color) -> CardSet {
        self & CardSet::matching_color(color)
    }

    /// Cards matching a filter in the set.
    #[must_use]
    pub fn matching(self, filter: Filter) -> CardSet {
        self & filter.cards()
    }

    /// The distinct colors present in the set, in color order.
    pub fn colors(self) -> impl Iterator<Item = Color> {
        Color::ALL
            .into_iter()
            .filter(move |&color| !self.of_color(color).is_empty())
    }

    const MEN: CardSet = CardSet::of(&[
        Card::Butcher,
        Card::Coachman,
        Card::Duke,
        Card::Officer,
        Card::Sailor,
    ]);
    const WOMEN: CardSet = CardSet::of(&[
        Card::Countess,
        Card::Dancer,
        Card::Florist,
        Card::Maid,
        Card::Nurse,
    ]);
    const PEOPLE: CardSet = CardSet(CardSet::MEN.0 | CardSet::WOMEN.0);
    const INDOORS: CardSet = CardSet::of(&[
        Card::Library,
        Card::Museum,
        Card::Parlor,
        Card::Railcar,
        Card::Theater,
    ]);
    const OUTDOORS: CardSet = CardSet::of(&[
        Card::Harbor,
        Card::Market,
        Card::Park,
        Card::Plaza,
        Card::Racecourse,
    ]);
    const LOCATIONS: CardSet = CardSet(CardSet::INDOORS.0 | CardSet::OUTDOORS.0);
    const RANGED: CardSet = CardSet::of(&[
        Card::Blowgun,
        Card::Bow,
        Card::Crossbow,
        Card::Gun,
        Card::Rifle,
    ]);
    const MELEE: CardSet = CardSet::of(&[
        Card::Candlestick,
        Card::Hammer,
        Card::Knife,
        Card::Poison,
        Card::Sword,
    ]);
    const WEAPONS: CardSet = CardSet(CardSet::RANGED.0 | CardSet::MELEE.0);
}

/// Iterator over the cards of a [`CardSet`], in bit order.
pub struct Iter(u32);

impl Iterator for Iter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Card::ALL[index])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::EMPTY;
        for card in iter {
            set.insert(card);
        }
        set
    }
}

impl Extend<Card> for CardSet {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        for card in iter {
            self.insert(card);
        }
    }
}

impl From<Card> for CardSet {
    fn from(card: Card) -> Self {
        CardSet::singleton(card)
    }
}

impl BitOr for CardSet {
    type Output = CardSet;

    fn bitor(self, rhs: CardSet) -> CardSet {
        CardSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for CardSet {
    fn bitor_assign(&mut self, rhs: CardSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CardSet {
    type Output = CardSet;

    fn bitand(self, rhs: CardSet) -> CardSet {
        CardSet(self.0 & rhs.0)
    }
}

impl BitAndAssign for CardSet {
    fn bitand_assign(&mut self, rhs: CardSet) {
        self.0 &= rhs.0;
    }
}

impl Sub for CardSet {
    type Output = CardSet;

    fn sub(self, rhs: CardSet) -> CardSet {
        CardSet(self.0 & !rhs.0)
    }
}

impl SubAssign for CardSet {
    fn sub_assign(&mut self, rhs: CardSet) {
        self.0 &= !rhs.0;
    }
}

impl std::fmt::Debug for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
