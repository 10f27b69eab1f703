//! Elimination passes.
//!
//! Each pass prunes a hypothesis set against one kind of evidence from the
//! action log. Passes only ever shrink or preserve the set, and they are
//! idempotent, so a cached set can be re-filtered after the log grows.

use rustc_hash::FxHashMap;
use std::cmp::Ordering;

use crate::cards::Card;
use crate::possible::PossibleState;
use crate::state::{GameState, Solution};

/// Number of passes the engine applies, in order.
pub const ELIMINATION_PASSES: usize = 4;

/// Drop hypotheses whose solution matches an accusation the acting player
/// already made: it was false, or the game would have ended.
pub fn resolve_my_accusations(state: &GameState, states: &mut Vec<PossibleState>) {
    let me = state.me().name();
    for action in state.actions() {
        if action.player() != me {
            continue;
        }
        let Some(accusation) = action.as_accusation() else {
            continue;
        };
        let cards = accusation.cards();
        states.retain(|possible| possible.solution().cards() != cards);
    }
}

/// Drop hypotheses whose solution shares a card with an opponent's
/// accusation: nobody accuses cards they can see for themselves.
pub fn resolve_opponent_accusations(state: &GameState, states: &mut Vec<PossibleState>) {
    let me = state.me().name();
    for action in state.actions() {
        if action.player() == me {
            continue;
        }
        let Some(accusation) = action.as_accusation() else {
            continue;
        };
        let cards = accusation.cards();
        states.retain(|possible| possible.solution().cards().is_disjoint(cards));
    }
}

/// Prune against every question answered by another player, each taken on
/// its own.
///
/// Aborts between inquisitions once `is_live` reports `false`; the caller
/// must then discard the partially filtered set.
pub fn resolve_inquisitions_in_isolation(
    state: &GameState,
    states: &mut Vec<PossibleState>,
    is_live: &dyn Fn() -> bool,
) {
    let me = state.me().name();
    for action in state.actions() {
        let Some(inquisition) = action.as_inquisition() else {
            continue;
        };
        if inquisition.answering_player == me {
            continue;
        }
        if !is_live() {
            return;
        }

        let answerer = inquisition.answering_player.as_str();
        let asker = inquisition.asking_player.as_str();
        let category = inquisition.cards() & state.cards();
        let count = inquisition.count;

        if count == 0 {
            // Any matching card in another player's mystery, or in the
            // answerer's own hand, would have been visible to them.
            states.retain(|possible| {
                !possible.players.iter().any(|player| {
                    if &*player.name == answerer {
                        !player.hidden.cards().is_disjoint(category)
                    } else {
                        !player.mystery.cards().is_disjoint(category)
                    }
                })
            });
        } else if count < category.len() {
            states.retain(|possible| {
                (possible.cards_visible_to(answerer) & category).len() == count
            });
        } else if count == category.len() {
            // Seeing all of them leaves no room for the category in any
            // hidden pair but their own, their own mystery, or the
            // informants.
            states.retain(|possible| {
                let hidden_from_answerer = possible.players.iter().any(|player| {
                    if &*player.name == answerer {
                        !player.mystery.cards().is_disjoint(category)
                    } else {
                        !player.hidden.cards().is_disjoint(category)
                    }
                });
                !hidden_from_answerer && possible.informants.is_disjoint(category)
            });
        }

        // A player who can already see the whole category has no reason to
        // ask about it.
        states.retain(|possible| {
            !category.is_subset_of(possible.cards_visible_to(asker))
        });
    }
}

/// Cross-referencing multiple answers jointly. Intentionally a no-op: the
/// joint rule has no agreed semantics yet, and guessing one would silently
/// over-prune.
pub fn resolve_inquisitions_in_combination(_state: &GameState, _states: &mut [PossibleState]) {}

/// Collapse a pruned hypothesis set into its solution distribution,
/// most probable first.
#[must_use]
pub fn solutions_from_states(states: &[PossibleState]) -> Vec<Solution> {
    if states.is_empty() {
        return Vec::new();
    }

    let mut tally: FxHashMap<(Card, Card, Card), usize> = FxHashMap::default();
    for possible in states {
        *tally.entry(possible.solution().triple()).or_insert(0) += 1;
    }

    let total = states.len() as f64;
    let mut solutions: Vec<Solution> = tally
        .into_iter()
        .map(|((person, location, weapon), count)| {
            Solution::new(person, location, weapon, count as f64 / total)
        })
        .collect();
    solutions.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    solutions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Category, Filter, Gender};
    use crate::possible::all_possible_states;
    use crate::state::{
        Accusation, Action, HiddenCardSet, Inquisition, MysteryCardSet, Player,
    };

    fn solveable_three_player() -> GameState {
        GameState::new(3)
            .with_player(
                0,
                Player::new(
                    "Player 1",
                    HiddenCardSet::new(Some(Card::Duke), Some(Card::Knife)),
                    MysteryCardSet::default(),
                    1,
                ),
            )
            .with_player(
                1,
                Player::new(
                    "Player 2",
                    HiddenCardSet::default(),
                    MysteryCardSet::new(Some(Card::Nurse), Some(Card::Park), Some(Card::Sword)),
                    1,
                ),
            )
            .with_player(
                2,
                Player::new(
                    "Player 3",
                    HiddenCardSet::default(),
                    MysteryCardSet::new(Some(Card::Maid), Some(Card::Harbor), Some(Card::Rifle)),
                    1,
                ),
            )
    }

    #[test]
    fn test_my_accusation_removes_exactly_that_solution() {
        let state = solveable_three_player();
        let mut states = all_possible_states(&state, &|| true);
        let accused = MysteryCardSet::new(
            Some(Card::Officer),
            Some(Card::Museum),
            Some(Card::Poison),
        );
        let with_accusation =
            state.appending(Action::Accusation(Accusation::new(0, "Player 1", accused)));

        let matching_before = states
            .iter()
            .filter(|s| s.solution().cards() == accused.cards())
            .count();
        assert!(matching_before > 0);
        let before = states.len();

        resolve_my_accusations(&with_accusation, &mut states);

        assert_eq!(states.len(), before - matching_before);
        assert!(states
            .iter()
            .all(|s| s.solution().cards() != accused.cards()));
    }

    #[test]
    fn test_opponent_accusation_removes_intersecting_solutions() {
        let state = solveable_three_player();
        let mut states = all_possible_states(&state, &|| true);
        let accused = MysteryCardSet::new(
            Some(Card::Officer),
            Some(Card::Museum),
            Some(Card::Poison),
        );
        let with_accusation =
            state.appending(Action::Accusation(Accusation::new(0, "Player 2", accused)));

        let before = states.len();
        resolve_opponent_accusations(&with_accusation, &mut states);

        assert!(states.len() < before);
        assert!(states
            .iter()
            .all(|s| s.solution().cards().is_disjoint(accused.cards())));
    }

    #[test]
    fn test_saw_none_eliminates_hidden_category_cards() {
        let state = solveable_three_player();
        let mut states = all_possible_states(&state, &|| true);
        let with_answer = state.appending(Action::Inquisition(Inquisition::new(
            0,
            "Player 1",
            "Player 2",
            Filter::Category(Category::Person(Gender::Man)),
            None,
            0,
        )));

        resolve_inquisitions_in_isolation(&with_answer, &mut states, &|| true);

        let men = state.cards().men();
        for possible in &states {
            let answerer = possible
                .players
                .iter()
                .find(|p| &*p.name == "Player 2")
                .unwrap();
            assert!(answerer.hidden.cards().is_disjoint(men));
            // And nobody else's mystery can hold a man either.
            for player in &possible.players {
                if &*player.name != "Player 2" {
                    assert!(player.mystery.cards().is_disjoint(men));
                }
            }
        }
    }

    #[test]
    fn test_saw_some_pins_visible_count() {
        let state = solveable_three_player();
        let mut states = all_possible_states(&state, &|| true);
        let filter = Filter::Category(Category::Person(Gender::Woman));
        let with_answer = state.appending(Action::Inquisition(Inquisition::new(
            0,
            "Player 1",
            "Player 3",
            filter,
            None,
            2,
        )));

        let before = states.len();
        resolve_inquisitions_in_isolation(&with_answer, &mut states, &|| true);
        assert!(states.len() < before);

        let women = state.cards().women();
        for possible in &states {
            assert_eq!((possible.cards_visible_to("Player 3") & women).len(), 2);
        }
    }

    #[test]
    fn test_saw_all_keeps_category_visible_to_answerer() {
        let state = solveable_three_player();
        let mut states = all_possible_states(&state, &|| true);
        // Three red cards in play: Butcher, Library, Poison.
        let filter = Filter::Color(crate::cards::Color::Red);
        let category = state.cards().matching(filter);
        let with_answer = state.appending(Action::Inquisition(Inquisition::new(
            0,
            "Player 1",
            "Player 2",
            filter,
            None,
            category.len(),
        )));

        resolve_inquisitions_in_isolation(&with_answer, &mut states, &|| true);

        assert!(!states.is_empty());
        for possible in &states {
            assert!(possible.informants.is_disjoint(category));
            for player in &possible.players {
                if &*player.name == "Player 2" {
                    assert!(player.mystery.cards().is_disjoint(category));
                } else {
                    assert!(player.hidden.cards().is_disjoint(category));
                }
            }
            assert!(category.is_subset_of(possible.cards_visible_to("Player 2")));
        }
    }

    #[test]
    fn test_passes_are_monotonic() {
        let state = solveable_three_player();
        let log = state
            .appending(Action::Inquisition(Inquisition::new(
                0,
                "Player 2",
                "Player 3",
                Filter::Category(Category::Weapon(crate::cards::WeaponClass::Melee)),
                None,
                1,
            )))
            .appending(Action::Accusation(Accusation::new(
                1,
                "Player 1",
                MysteryCardSet::new(Some(Card::Butcher), Some(Card::Library), Some(Card::Gun)),
            )));

        let mut states = all_possible_states(&log, &|| true);
        let mut previous = states.len();

        resolve_my_accusations(&log, &mut states);
        assert!(states.len() <= previous);
        previous = states.len();

        resolve_opponent_accusations(&log, &mut states);
        assert!(states.len() <= previous);
        previous = states.len();

        resolve_inquisitions_in_isolation(&log, &mut states, &|| true);
        assert!(states.len() <= previous);
        previous = states.len();

        resolve_inquisitions_in_combination(&log, &mut states);
        assert_eq!(states.len(), previous);
    }

    #[test]
    fn test_distribution_sums_to_one_and_sorts_descending() {
        let state = solveable_three_player();
        let mut states = all_possible_states(&state, &|| true);
        let with_answer = state.appending(Action::Inquisition(Inquisition::new(
            0,
            "Player 1",
            "Player 2",
            Filter::Category(Category::Person(Gender::Man)),
            None,
            0,
        )));
        resolve_inquisitions_in_isolation(&with_answer, &mut states, &|| true);

        let solutions = solutions_from_states(&states);
        assert!(!solutions.is_empty());

        let total: f64 = solutions.iter().map(|s| s.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);

        for pair in solutions.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
    }

    #[test]
    fn test_empty_set_yields_empty_distribution() {
        assert!(solutions_from_states(&[]).is_empty());
    }
}
