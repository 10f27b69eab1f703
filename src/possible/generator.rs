//! Exhaustive hypothesis enumeration.
//!
//! Candidate solutions are the Cartesian product of the unknown solution
//! components; for each candidate, the remaining unknown cards are split
//! into disjoint hidden pairs assigned to the other players in order, and
//! whatever is left over becomes that hypothesis's informants.
//!
//! Enumeration is exact: no sampling happens here. The cost grows
//! factorially with unknown cards, which is why callers fan candidates out
//! over a worker pool and may sample afterwards.

use smallvec::SmallVec;
use std::sync::Arc;

use crate::cards::CardSet;
use crate::state::{GameState, Solution};

use super::{PossibleHiddenSet, PossibleMysterySet, PossiblePlayer, PossibleState};

/// Every solution candidate consistent with what the acting player already
/// knows: known mystery components stay fixed, unknown ones range over the
/// matching category of the unallocated cards.
#[must_use]
pub fn all_possible_solutions(state: &GameState) -> Vec<Solution> {
    let me = state.me();
    let pool = state.unallocated_cards();

    let people: Vec<_> = match me.mystery().person {
        Some(person) => vec![person],
        None => pool.people().iter().collect(),
    };
    let locations: Vec<_> = match me.mystery().location {
        Some(location) => vec![location],
        None => pool.locations().iter().collect(),
    };
    let weapons: Vec<_> = match me.mystery().weapon {
        Some(weapon) => vec![weapon],
        None => pool.weapons().iter().collect(),
    };

    let mut solutions = Vec::with_capacity(people.len() * locations.len() * weapons.len());
    for &person in &people {
        for &location in &locations {
            for &weapon in &weapons {
                solutions.push(Solution::new(person, location, weapon, 0.0));
            }
        }
    }
    solutions
}

/// Enumerate every hypothesis consistent with the acting player's private
/// knowledge.
///
/// `is_live` is polled at every candidate solution and every recursive
/// expansion; once it reports `false`, enumeration stops and nothing is
/// returned.
///
/// ## Panics
///
/// Panics if the state is not solveable (my hidden pair or an opponent's
/// mystery is still unknown).
#[must_use]
pub fn all_possible_states(state: &GameState, is_live: &dyn Fn() -> bool) -> Vec<PossibleState> {
    let mut states = Vec::new();
    for solution in all_possible_solutions(state) {
        if !is_live() {
            return Vec::new();
        }
        append_states_for_solution(state, &solution, &mut states, is_live);
    }
    if is_live() { states } else { Vec::new() }
}

/// Append every hypothesis for one candidate solution.
///
/// ## Panics
///
/// Panics if the state is not solveable.
pub fn append_states_for_solution(
    state: &GameState,
    solution: &Solution,
    out: &mut Vec<PossibleState>,
    is_live: &dyn Fn() -> bool,
) {
    assert!(state.is_solveable(), "generation needs a solveable state");

    let me = state.me();
    let mut players: SmallVec<[PossiblePlayer; 6]> = SmallVec::new();
    players.push(PossiblePlayer::new(
        Arc::from(me.name()),
        PossibleMysterySet::from(*solution),
        PossibleHiddenSet::from(me.hidden()),
    ));

    let remaining = state.initial_unknown_cards() - solution.cards();
    let pairs = card_pairs(remaining);

    assign_hidden_pairs(state, &mut players, &pairs, out, is_live);
}

/// All unordered two-card subsets of `cards`.
fn card_pairs(cards: CardSet) -> Vec<CardSet> {
    let cards: Vec<_> = cards.iter().collect();
    let mut pairs = Vec::with_capacity(cards.len() * cards.len().saturating_sub(1) / 2);
    for (index, &first) in cards.iter().enumerate() {
        for &second in &cards[index + 1..] {
            pairs.push(CardSet::from_iter([first, second]));
        }
    }
    pairs
}

fn assign_hidden_pairs(
    state: &GameState,
    players: &mut SmallVec<[PossiblePlayer; 6]>,
    pairs: &[CardSet],
    out: &mut Vec<PossibleState>,
    is_live: &dyn Fn() -> bool,
) {
    if !is_live() {
        return;
    }

    if players.len() == state.number_of_players() {
        let informants = pairs
            .iter()
            .fold(CardSet::EMPTY, |acc, &pair| acc | pair);
        out.push(PossibleState {
            players: players.clone(),
            informants,
        });
        return;
    }

    let next = &state.players()[players.len()];
    let name: Arc<str> = Arc::from(next.name());
    let mystery = PossibleMysterySet::from(next.mystery());

    for &pair in pairs {
        players.push(PossiblePlayer::new(
            name.clone(),
            mystery,
            PossibleHiddenSet::from_pair(pair),
        ));
        let surviving: Vec<CardSet> = pairs
            .iter()
            .copied()
            .filter(|candidate| candidate.is_disjoint(pair))
            .collect();
        assign_hidden_pairs(state, players, &surviving, out, is_live);
        players.pop();
    }
}
