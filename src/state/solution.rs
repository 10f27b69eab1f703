//! Candidate solutions and their estimated probabilities.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::cards::{Card, CardSet};

/// A concrete (person, location, weapon) solution candidate, with the
/// fraction of surviving hypotheses that agree with it.
///
/// Solutions order by (probability, person, location, weapon).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub person: Card,
    pub location: Card,
    pub weapon: Card,
    pub probability: f64,
}

impl Solution {
    /// Create a solution.
    ///
    /// ## Panics
    ///
    /// Panics if a component has the wrong category or the probability is
    /// outside `[0, 1]`.
    #[must_use]
    pub fn new(person: Card, location: Card, weapon: Card, probability: f64) -> Self {
        assert!(person.is_person());
        assert!(location.is_location());
        assert!(weapon.is_weapon());
        assert!((0.0..=1.0).contains(&probability));
        Self {
            person,
            location,
            weapon,
            probability,
        }
    }

    /// The three cards of the solution.
    #[must_use]
    pub fn cards(&self) -> CardSet {
        CardSet::from_iter([self.person, self.location, self.weapon])
    }

    /// The card triple, without the probability estimate.
    #[must_use]
    pub const fn triple(&self) -> (Card, Card, Card) {
        (self.person, self.location, self.weapon)
    }
}

impl PartialOrd for Solution {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.probability, self.person, self.location, self.weapon).partial_cmp(&(
            other.probability,
            other.person,
            other.location,
            other.weapon,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_cards() {
        let solution = Solution::new(Card::Duke, Card::Park, Card::Knife, 0.5);
        assert_eq!(solution.cards().len(), 3);
        assert_eq!(solution.triple(), (Card::Duke, Card::Park, Card::Knife));
    }

    #[test]
    fn test_solution_ordering_is_probability_major() {
        let likely = Solution::new(Card::Duke, Card::Park, Card::Knife, 0.8);
        let unlikely = Solution::new(Card::Nurse, Card::Harbor, Card::Sword, 0.1);
        assert!(unlikely < likely);

        let a = Solution::new(Card::Officer, Card::Park, Card::Knife, 0.5);
        let b = Solution::new(Card::Duke, Card::Park, Card::Knife, 0.5);
        // Equal probability falls back to the card ordering.
        assert!(a < b || b < a);
    }

    #[test]
    #[should_panic]
    fn test_solution_rejects_wrong_category() {
        let _ = Solution::new(Card::Park, Card::Duke, Card::Knife, 0.0);
    }
}
