//! Concrete hypotheses about the hidden arrangement of cards.
//!
//! A [`PossibleState`] is one fully concrete, internally consistent guess:
//! every player gets a definite mystery triple and hidden pair, and the
//! cards dealt to nobody are that hypothesis's informants. The generator
//! enumerates every hypothesis consistent with the acting player's private
//! knowledge; the elimination engine then prunes them against the action
//! log.

mod generator;

pub use generator::{all_possible_solutions, all_possible_states, append_states_for_solution};

use std::sync::Arc;

use smallvec::SmallVec;

use crate::cards::{Card, CardSet};
use crate::state::{HiddenCardPosition, HiddenCardSet, MysteryCardSet, Solution};

/// A player's mystery with every card decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PossibleMysterySet {
    pub person: Card,
    pub location: Card,
    pub weapon: Card,
}

impl PossibleMysterySet {
    /// Create a concrete mystery.
    ///
    /// ## Panics
    ///
    /// Panics if a component has the wrong category.
    #[must_use]
    pub fn new(person: Card, location: Card, weapon: Card) -> Self {
        assert!(person.is_person());
        assert!(location.is_location());
        assert!(weapon.is_weapon());
        Self { person, location, weapon }
    }

    /// The three cards of the mystery.
    #[must_use]
    pub fn cards(self) -> CardSet {
        CardSet::from_iter([self.person, self.location, self.weapon])
    }
}

impl From<Solution> for PossibleMysterySet {
    fn from(solution: Solution) -> Self {
        Self::new(solution.person, solution.location, solution.weapon)
    }
}

impl From<MysteryCardSet> for PossibleMysterySet {
    /// ## Panics
    ///
    /// Panics if the mystery is not complete.
    fn from(mystery: MysteryCardSet) -> Self {
        Self::new(
            mystery.person.expect("mystery person must be known"),
            mystery.location.expect("mystery location must be known"),
            mystery.weapon.expect("mystery weapon must be known"),
        )
    }
}

/// A player's hidden pair with both cards decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PossibleHiddenSet {
    pub left: Card,
    pub right: Card,
}

impl PossibleHiddenSet {
    /// Create a concrete hidden pair.
    ///
    /// ## Panics
    ///
    /// Panics if both sides are the same card.
    #[must_use]
    pub fn new(left: Card, right: Card) -> Self {
        assert!(left != right, "hidden cards are distinct");
        Self { left, right }
    }

    /// Build from a two-card set, lower card on the left.
    ///
    /// ## Panics
    ///
    /// Panics if the set does not hold exactly two cards.
    #[must_use]
    pub fn from_pair(pair: CardSet) -> Self {
        assert_eq!(pair.len(), 2, "a hidden pair holds exactly two cards");
        let mut cards = pair.iter();
        let left = cards.next().expect("pair has a first card");
        let right = cards.next().expect("pair has a second card");
        Self::new(left, right)
    }

    /// The two cards of the pair.
    #[must_use]
    pub fn cards(self) -> CardSet {
        CardSet::from_iter([self.left, self.right])
    }

    /// The card on the given side.
    #[must_use]
    pub const fn card_on(self, side: HiddenCardPosition) -> Card {
        match side {
            HiddenCardPosition::Left => self.left,
            HiddenCardPosition::Right => self.right,
        }
    }
}

impl From<HiddenCardSet> for PossibleHiddenSet {
    /// ## Panics
    ///
    /// Panics if either hidden card is unknown.
    fn from(hidden: HiddenCardSet) -> Self {
        Self::new(
            hidden.left.expect("left hidden card must be known"),
            hidden.right.expect("right hidden card must be known"),
        )
    }
}

/// One player's concrete cards within a hypothesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PossiblePlayer {
    /// The player's name (shared across hypotheses).
    pub name: Arc<str>,
    pub mystery: PossibleMysterySet,
    pub hidden: PossibleHiddenSet,
}

impl PossiblePlayer {
    /// Create a concrete player.
    #[must_use]
    pub fn new(name: Arc<str>, mystery: PossibleMysterySet, hidden: PossibleHiddenSet) -> Self {
        Self { name, mystery, hidden }
    }
}

/// One complete hypothesis: every player's cards plus the leftover
/// informant cards.
///
/// Across all players and the informants, every in-play card appears in
/// exactly one place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PossibleState {
    /// Players in base-state order; the first is the acting player.
    pub players: SmallVec<[PossiblePlayer; 6]>,
    /// Cards dealt to nobody in this hypothesis.
    pub informants: CardSet,
}

impl PossibleState {
    /// The acting player's mystery, read as a candidate solution.
    #[must_use]
    pub fn solution(&self) -> Solution {
        let mystery = self.players[0].mystery;
        Solution::new(mystery.person, mystery.location, mystery.weapon, 0.0)
    }

    /// Cards the named player sees in this hypothesis: their own hidden
    /// pair plus every other player's mystery.
    #[must_use]
    pub fn cards_visible_to(&self, player_name: &str) -> CardSet {
        self.cards_visible_to_including(player_name, None)
    }

    /// Like [`cards_visible_to`](Self::cards_visible_to), but when `side`
    /// is given the named player's own contribution is restricted to that
    /// single hidden card (the two-player question form).
    #[must_use]
    pub fn cards_visible_to_including(
        &self,
        player_name: &str,
        side: Option<HiddenCardPosition>,
    ) -> CardSet {
        self.players
            .iter()
            .map(|player| {
                if &*player.name == player_name {
                    match side {
                        Some(side) => CardSet::singleton(player.hidden.card_on(side)),
                        None => player.hidden.cards(),
                    }
                } else {
                    player.mystery.cards()
                }
            })
            .fold(CardSet::EMPTY, |acc, cards| acc | cards)
    }

    /// Every card placed by this hypothesis, informants included.
    #[must_use]
    pub fn all_cards(&self) -> CardSet {
        self.players
            .iter()
            .map(|player| player.mystery.cards() | player.hidden.cards())
            .fold(self.informants, |acc, cards| acc | cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, mystery: [Card; 3], hidden: [Card; 2]) -> PossiblePlayer {
        PossiblePlayer::new(
            Arc::from(name),
            PossibleMysterySet::new(mystery[0], mystery[1], mystery[2]),
            PossibleHiddenSet::new(hidden[0], hidden[1]),
        )
    }

    fn two_player_state() -> PossibleState {
        PossibleState {
            players: SmallVec::from_vec(vec![
                player("me", [Card::Duke, Card::Park, Card::Knife], [Card::Gun, Card::Maid]),
                player(
                    "them",
                    [Card::Nurse, Card::Harbor, Card::Sword],
                    [Card::Rifle, Card::Museum],
                ),
            ]),
            informants: CardSet::from_iter([Card::Bow, Card::Plaza]),
        }
    }

    #[test]
    fn test_solution_reads_first_player() {
        let state = two_player_state();
        assert_eq!(state.solution().triple(), (Card::Duke, Card::Park, Card::Knife));
    }

    #[test]
    fn test_visibility() {
        let state = two_player_state();

        let mine = state.cards_visible_to("me");
        assert!(mine.contains(Card::Gun));
        assert!(mine.contains(Card::Maid));
        assert!(mine.contains(Card::Nurse));
        assert!(!mine.contains(Card::Duke));
        assert!(!mine.contains(Card::Rifle));
        assert!(!mine.contains(Card::Bow));
    }

    #[test]
    fn test_visibility_with_side() {
        let state = two_player_state();

        let left_only =
            state.cards_visible_to_including("them", Some(HiddenCardPosition::Left));
        assert!(left_only.contains(Card::Rifle));
        assert!(!left_only.contains(Card::Museum));
        // My mystery is still visible to them.
        assert!(left_only.contains(Card::Duke));
    }

    #[test]
    fn test_from_pair_orders_cards() {
        let pair = PossibleHiddenSet::from_pair(CardSet::from_iter([Card::Sword, Card::Harbor]));
        assert_eq!(pair.cards().len(), 2);
        assert_ne!(pair.left, pair.right);
    }
}
