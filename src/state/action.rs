//! Actions recorded in a game's log.
//!
//! A closed sum type: accusations, question/answer exchanges
//! (inquisitions), and informant examinations. Exhaustive matching over
//! the variants replaces any runtime type dispatch, and the ordinal gives
//! each record its position for replay.

use serde::{Deserialize, Serialize};

use crate::cards::{CardSet, Filter};

use super::player::{HiddenCardPosition, MysteryCardSet};

/// An accusation a player has made: a full three-card claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accusation {
    pub ordinal: usize,
    /// Name of the accusing player.
    pub accusing_player: String,
    /// The claimed solution. Always complete.
    pub accusation: MysteryCardSet,
}

impl Accusation {
    /// Create an accusation.
    ///
    /// ## Panics
    ///
    /// Panics if the claim is missing any of its three cards.
    #[must_use]
    pub fn new(ordinal: usize, accusing_player: impl Into<String>, accusation: MysteryCardSet) -> Self {
        assert!(accusation.is_complete(), "an accusation names all three cards");
        Self {
            ordinal,
            accusing_player: accusing_player.into(),
            accusation,
        }
    }

    /// The three cards claimed.
    #[must_use]
    pub fn cards(&self) -> CardSet {
        self.accusation.cards()
    }
}

/// A question one player asked another, with the count they answered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquisition {
    pub ordinal: usize,
    /// Name of the player who asked.
    pub asking_player: String,
    /// Name of the player who answered.
    pub answering_player: String,
    /// What the question was scoped to.
    pub filter: Filter,
    /// In two-player games, which of the answerer's hidden cards counts.
    pub including_card_on_side: Option<HiddenCardPosition>,
    /// How many matching cards the answerer claimed to see.
    pub count: usize,
}

impl Inquisition {
    /// Create an inquisition record.
    #[must_use]
    pub fn new(
        ordinal: usize,
        asking_player: impl Into<String>,
        answering_player: impl Into<String>,
        filter: Filter,
        including_card_on_side: Option<HiddenCardPosition>,
        count: usize,
    ) -> Self {
        Self {
            ordinal,
            asking_player: asking_player.into(),
            answering_player: answering_player.into(),
            filter,
            including_card_on_side,
            count,
        }
    }

    /// All universe cards the question was about.
    #[must_use]
    pub fn cards(&self) -> CardSet {
        self.filter.cards()
    }
}

/// A player examining a secret informant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Examination {
    pub ordinal: usize,
    /// Name of the examining player.
    pub player: String,
    /// Identity of the informant examined.
    pub informant: char,
}

impl Examination {
    /// Create an examination record.
    #[must_use]
    pub fn new(ordinal: usize, player: impl Into<String>, informant: char) -> Self {
        Self {
            ordinal,
            player: player.into(),
            informant,
        }
    }
}

/// An action taken in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Accusation(Accusation),
    Inquisition(Inquisition),
    Examination(Examination),
}

impl Action {
    /// Name of the player the action is attributed to: the accuser, the
    /// *answering* player of a question, or the examiner.
    #[must_use]
    pub fn player(&self) -> &str {
        match self {
            Action::Accusation(accusation) => &accusation.accusing_player,
            Action::Inquisition(inquisition) => &inquisition.answering_player,
            Action::Examination(examination) => &examination.player,
        }
    }

    /// Position of the action in the log it was recorded in.
    #[must_use]
    pub fn ordinal(&self) -> usize {
        match self {
            Action::Accusation(accusation) => accusation.ordinal,
            Action::Inquisition(inquisition) => inquisition.ordinal,
            Action::Examination(examination) => examination.ordinal,
        }
    }

    /// The cards named by a clue-bearing action, if any.
    #[must_use]
    pub fn cards(&self) -> Option<CardSet> {
        match self {
            Action::Accusation(accusation) => Some(accusation.cards()),
            Action::Inquisition(inquisition) => Some(inquisition.cards()),
            Action::Examination(_) => None,
        }
    }

    /// The action as an accusation, if it is one.
    #[must_use]
    pub fn as_accusation(&self) -> Option<&Accusation> {
        match self {
            Action::Accusation(accusation) => Some(accusation),
            _ => None,
        }
    }

    /// The action as an inquisition, if it is one.
    #[must_use]
    pub fn as_inquisition(&self) -> Option<&Inquisition> {
        match self {
            Action::Inquisition(inquisition) => Some(inquisition),
            _ => None,
        }
    }

    /// The action as an examination, if it is one.
    #[must_use]
    pub fn as_examination(&self) -> Option<&Examination> {
        match self {
            Action::Examination(examination) => Some(examination),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Category, Gender};

    #[test]
    fn test_accusation_cards() {
        let accusation = Accusation::new(
            0,
            "me",
            MysteryCardSet::new(Some(Card::Duke), Some(Card::Park), Some(Card::Knife)),
        );
        assert_eq!(accusation.cards().len(), 3);
        assert_eq!(Action::Accusation(accusation).player(), "me");
    }

    #[test]
    #[should_panic]
    fn test_incomplete_accusation_rejected() {
        let _ = Accusation::new(0, "me", MysteryCardSet::new(Some(Card::Duke), None, None));
    }

    #[test]
    fn test_inquisition_attribution() {
        let inquisition = Inquisition::new(
            1,
            "asker",
            "answerer",
            Filter::Category(Category::Person(Gender::Man)),
            None,
            2,
        );
        assert_eq!(inquisition.cards().len(), 5);

        let action = Action::Inquisition(inquisition);
        assert_eq!(action.player(), "answerer");
        assert_eq!(action.ordinal(), 1);
    }

    #[test]
    fn test_examination_has_no_clue_cards() {
        let action = Action::Examination(Examination::new(2, "me", 'A'));
        assert_eq!(action.cards(), None);
        assert!(action.as_examination().is_some());
        assert!(action.as_accusation().is_none());
    }
}
