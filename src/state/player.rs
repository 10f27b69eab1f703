//! Players and their card sets.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardSet};

use super::action::Action;

/// Which of a player's two hidden cards a question singles out.
///
/// Only meaningful in two-player games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiddenCardPosition {
    Left,
    Right,
}

impl std::fmt::Display for HiddenCardPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HiddenCardPosition::Left => f.write_str("left"),
            HiddenCardPosition::Right => f.write_str("right"),
        }
    }
}

/// A player's two private cards, visible only to themselves.
///
/// Either side may be unknown before setup completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HiddenCardSet {
    pub left: Option<Card>,
    pub right: Option<Card>,
}

impl HiddenCardSet {
    /// Create a hidden card set.
    #[must_use]
    pub const fn new(left: Option<Card>, right: Option<Card>) -> Self {
        Self { left, right }
    }

    /// Replace the left card.
    #[must_use]
    pub const fn with_left(self, left: Option<Card>) -> Self {
        Self { left, right: self.right }
    }

    /// Replace the right card.
    #[must_use]
    pub const fn with_right(self, right: Option<Card>) -> Self {
        Self { left: self.left, right }
    }

    /// The known cards in the set.
    #[must_use]
    pub fn cards(self) -> CardSet {
        [self.left, self.right].into_iter().flatten().collect()
    }

    /// The card on the given side, if known.
    #[must_use]
    pub const fn card_on(self, side: HiddenCardPosition) -> Option<Card> {
        match side {
            HiddenCardPosition::Left => self.left,
            HiddenCardPosition::Right => self.right,
        }
    }

    /// `true` if both cards are known.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}

/// The (up to three) cards revealed about a player as clue-answer
/// commitments: one person, one location, one weapon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MysteryCardSet {
    pub person: Option<Card>,
    pub location: Option<Card>,
    pub weapon: Option<Card>,
}

impl MysteryCardSet {
    /// Create a mystery card set.
    ///
    /// ## Panics
    ///
    /// Panics if a component is a card of the wrong category.
    #[must_use]
    pub fn new(person: Option<Card>, location: Option<Card>, weapon: Option<Card>) -> Self {
        assert!(person.map_or(true, Card::is_person));
        assert!(location.map_or(true, Card::is_location));
        assert!(weapon.map_or(true, Card::is_weapon));
        Self { person, location, weapon }
    }

    /// Replace the person.
    #[must_use]
    pub fn with_person(self, person: Option<Card>) -> Self {
        Self::new(person, self.location, self.weapon)
    }

    /// Replace the location.
    #[must_use]
    pub fn with_location(self, location: Option<Card>) -> Self {
        Self::new(self.person, location, self.weapon)
    }

    /// Replace the weapon.
    #[must_use]
    pub fn with_weapon(self, weapon: Option<Card>) -> Self {
        Self::new(self.person, self.location, weapon)
    }

    /// `true` if all three cards are set.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.person.is_some() && self.location.is_some() && self.weapon.is_some()
    }

    /// The known cards in the set.
    #[must_use]
    pub fn cards(self) -> CardSet {
        [self.person, self.location, self.weapon]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// A player in the game.
///
/// The name doubles as the player's identity. The magnifying-glass counter
/// is turn-order bookkeeping riding on the action log; the deduction engine
/// never reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    hidden: HiddenCardSet,
    mystery: MysteryCardSet,
    magnifying_glasses: u8,
}

impl Player {
    /// Create a player.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        hidden: HiddenCardSet,
        mystery: MysteryCardSet,
        magnifying_glasses: u8,
    ) -> Self {
        Self {
            name: name.into(),
            hidden,
            mystery,
            magnifying_glasses,
        }
    }

    /// Create an unnamed-setup player from its seat ordinal (1-based).
    #[must_use]
    pub fn with_ordinal(ordinal: usize, magnifying_glasses: u8) -> Self {
        Self::new(
            format!("Player {ordinal}"),
            HiddenCardSet::default(),
            MysteryCardSet::default(),
            magnifying_glasses,
        )
    }

    /// The baseline counter value for a game of the given size.
    #[must_use]
    pub const fn base_magnifying_glasses(player_count: usize) -> u8 {
        if player_count > 2 { 1 } else { 0 }
    }

    /// The player's name (their identity).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The player's hidden cards.
    #[must_use]
    pub const fn hidden(&self) -> HiddenCardSet {
        self.hidden
    }

    /// The player's mystery cards.
    #[must_use]
    pub const fn mystery(&self) -> MysteryCardSet {
        self.mystery
    }

    /// The player's magnifying-glass count.
    #[must_use]
    pub const fn magnifying_glasses(&self) -> u8 {
        self.magnifying_glasses
    }

    /// All of the player's known cards, hidden and mystery.
    #[must_use]
    pub fn cards(&self) -> CardSet {
        self.mystery.cards() | self.hidden.cards()
    }

    // === Snapshot updates ===

    /// Replace the player's name.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Player {
        Player::new(name, self.hidden, self.mystery, self.magnifying_glasses)
    }

    /// Replace the left hidden card.
    #[must_use]
    pub fn with_hidden_left(&self, card: Option<Card>) -> Player {
        Player::new(
            self.name.clone(),
            self.hidden.with_left(card),
            self.mystery,
            self.magnifying_glasses,
        )
    }

    /// Replace the right hidden card.
    #[must_use]
    pub fn with_hidden_right(&self, card: Option<Card>) -> Player {
        Player::new(
            self.name.clone(),
            self.hidden.with_right(card),
            self.mystery,
            self.magnifying_glasses,
        )
    }

    /// Replace the person in the player's mystery.
    #[must_use]
    pub fn with_mystery_person(&self, card: Option<Card>) -> Player {
        Player::new(
            self.name.clone(),
            self.hidden,
            self.mystery.with_person(card),
            self.magnifying_glasses,
        )
    }

    /// Replace the location in the player's mystery.
    #[must_use]
    pub fn with_mystery_location(&self, card: Option<Card>) -> Player {
        Player::new(
            self.name.clone(),
            self.hidden,
            self.mystery.with_location(card),
            self.magnifying_glasses,
        )
    }

    /// Replace the weapon in the player's mystery.
    #[must_use]
    pub fn with_mystery_weapon(&self, card: Option<Card>) -> Player {
        Player::new(
            self.name.clone(),
            self.hidden,
            self.mystery.with_weapon(card),
            self.magnifying_glasses,
        )
    }

    /// Reset the counter to the game baseline, keeping all card knowledge.
    #[must_use]
    pub fn with_base_magnifying_glasses(&self, player_count: usize) -> Player {
        Player::new(
            self.name.clone(),
            self.hidden,
            self.mystery,
            Player::base_magnifying_glasses(player_count),
        )
    }

    /// Apply an action's magnifying-glass bookkeeping.
    ///
    /// Inquisitions cost the asker one and grant the answerer one;
    /// examinations cost the examiner one; accusations change nothing.
    /// Counters are only tracked in games with more than two players.
    #[must_use]
    pub(crate) fn resolving_action(&self, action: &Action, tracking: bool) -> Player {
        if !tracking {
            return self.clone();
        }
        let glasses = match action {
            Action::Inquisition(inquisition) => {
                if inquisition.asking_player == self.name {
                    self.magnifying_glasses.saturating_sub(1)
                } else if inquisition.answering_player == self.name {
                    self.magnifying_glasses.saturating_add(1)
                } else {
                    self.magnifying_glasses
                }
            }
            Action::Examination(examination) => {
                if examination.player == self.name {
                    self.magnifying_glasses.saturating_sub(1)
                } else {
                    self.magnifying_glasses
                }
            }
            Action::Accusation(_) => self.magnifying_glasses,
        };
        Player::new(self.name.clone(), self.hidden, self.mystery, glasses)
    }

    /// `true` if enough is known about this player to solve with.
    ///
    /// For the acting (first) player that means both hidden cards; for
    /// everyone else, the full mystery.
    #[must_use]
    pub fn is_solveable(&self, as_first_player: bool) -> bool {
        if as_first_player {
            self.hidden.is_complete()
        } else {
            self.mystery.is_complete()
        }
    }

    /// `true` if the player's knowledge content matches, ignoring the
    /// magnifying-glass counter.
    #[must_use]
    pub(crate) fn same_knowledge(&self, other: &Player) -> bool {
        self.name == other.name && self.hidden == other.hidden && self.mystery == other.mystery
    }
}
