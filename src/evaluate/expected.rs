//! Expected-value scoring of candidate actions.
//!
//! Each scorer partitions the hypothesis set by the answer a candidate
//! would produce and sums probability-weighted removals. All scorers are
//! read-only functions of (state, hypothesis set, candidate). A candidate
//! that cannot be scored is "not applicable", never zero; in particular,
//! nothing is scorable against an empty hypothesis set.

use rustc_hash::FxHashSet;

use crate::cards::Card;
use crate::possible::PossibleState;
use crate::state::GameState;

use super::candidates::{CandidateAction, Informing, Inquiry};
use super::{CandidateScorer, ScoringStrategy};

/// Expected hypotheses removed by asking a question.
///
/// Hypotheses are split by how many category cards the answering player
/// would report seeing (1 up to the whole category); each possible answer
/// removes the hypotheses that disagree with it.
pub struct StatesRemovedByInquiry<'a> {
    state: &'a GameState,
    possible_states: &'a [PossibleState],
}

impl<'a> StatesRemovedByInquiry<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, possible_states: &'a [PossibleState]) -> Self {
        Self { state, possible_states }
    }

    /// Score one inquiry, or `None` when not applicable.
    #[must_use]
    pub fn evaluate(&self, inquiry: &Inquiry) -> Option<i64> {
        if self.possible_states.is_empty() {
            return None;
        }

        let category = inquiry.filter.cards() & self.state.cards();
        let total = self.possible_states.len();

        // Histogram of hypotheses by the answer they would produce.
        let mut matching = vec![0usize; category.len() + 1];
        for possible in self.possible_states {
            let seen = (possible
                .cards_visible_to_including(&inquiry.player, inquiry.including_card_on_side)
                & category)
                .len();
            matching[seen] += 1;
        }

        let expected: f64 = matching
            .iter()
            .skip(1)
            .map(|&count| {
                let probability = count as f64 / total as f64;
                probability * (total - count) as f64
            })
            .sum();
        Some(expected as i64)
    }
}

/// Expected hypotheses removed by examining an informant.
///
/// Hypotheses are split by which unallocated card the informant would
/// reveal.
pub struct StatesRemovedByInforming<'a> {
    state: &'a GameState,
    possible_states: &'a [PossibleState],
}

impl<'a> StatesRemovedByInforming<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, possible_states: &'a [PossibleState]) -> Self {
        Self { state, possible_states }
    }

    /// Score one informing, or `None` when not applicable.
    #[must_use]
    pub fn evaluate(&self, _informing: &Informing) -> Option<i64> {
        if self.possible_states.is_empty() {
            return None;
        }

        let total = self.possible_states.len();
        let expected: f64 = self
            .state
            .unallocated_cards()
            .iter()
            .map(|card| {
                let matching = self
                    .possible_states
                    .iter()
                    .filter(|possible| possible.informants.contains(card))
                    .count();
                let probability = matching as f64 / total as f64;
                probability * (total - matching) as f64
            })
            .sum();
        Some(expected as i64)
    }
}

/// Expected *distinct solutions* removed by asking a question.
///
/// Same partition as [`StatesRemovedByInquiry`], but each answer is
/// credited with the solution diversity it collapses rather than the raw
/// hypotheses it removes. The two can disagree when many hypotheses share
/// a solution.
pub struct SolutionsRemovedByInquiry<'a> {
    state: &'a GameState,
    possible_states: &'a [PossibleState],
    distinct_solutions: usize,
}

impl<'a> SolutionsRemovedByInquiry<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, possible_states: &'a [PossibleState]) -> Self {
        let distinct_solutions = distinct_solution_count(possible_states);
        Self {
            state,
            possible_states,
            distinct_solutions,
        }
    }

    /// Score one inquiry, or `None` when not applicable.
    #[must_use]
    pub fn evaluate(&self, inquiry: &Inquiry) -> Option<i64> {
        if self.possible_states.is_empty() {
            return None;
        }

        let category = inquiry.filter.cards() & self.state.cards();
        let total = self.possible_states.len();

        let mut matching_states = vec![0usize; category.len() + 1];
        let mut matching_solutions: Vec<FxHashSet<(Card, Card, Card)>> =
            vec![FxHashSet::default(); category.len() + 1];
        for possible in self.possible_states {
            let seen = (possible
                .cards_visible_to_including(&inquiry.player, inquiry.including_card_on_side)
                & category)
                .len();
            matching_states[seen] += 1;
            matching_solutions[seen].insert(possible.solution().triple());
        }

        let expected: f64 = matching_states
            .iter()
            .zip(matching_solutions.iter())
            .skip(1)
            .map(|(&states, solutions)| {
                let probability = states as f64 / total as f64;
                probability * (self.distinct_solutions - solutions.len()) as f64
            })
            .sum();
        Some(expected as i64)
    }
}

fn distinct_solution_count(possible_states: &[PossibleState]) -> usize {
    possible_states
        .iter()
        .map(|possible| possible.solution().triple())
        .collect::<FxHashSet<_>>()
        .len()
}

/// Composite scorer: dispatches a candidate to the inquiry or informing
/// scorer by its tag.
pub struct StatesRemovedByAction<'a> {
    inquiries: StatesRemovedByInquiry<'a>,
    informings: StatesRemovedByInforming<'a>,
}

impl<'a> StatesRemovedByAction<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, possible_states: &'a [PossibleState]) -> Self {
        Self {
            inquiries: StatesRemovedByInquiry::new(state, possible_states),
            informings: StatesRemovedByInforming::new(state, possible_states),
        }
    }
}

impl CandidateScorer for StatesRemovedByAction<'_> {
    fn evaluate(&self, action: &CandidateAction) -> Option<i64> {
        match action {
            CandidateAction::Inquiry(inquiry) => self.inquiries.evaluate(inquiry),
            CandidateAction::Informing(informing) => self.informings.evaluate(informing),
        }
    }
}

impl CandidateScorer for SolutionsRemovedByInquiry<'_> {
    /// Informings are outside this metric and score as not applicable.
    fn evaluate(&self, action: &CandidateAction) -> Option<i64> {
        match action {
            CandidateAction::Inquiry(inquiry) => self.evaluate(inquiry),
            CandidateAction::Informing(_) => None,
        }
    }
}

/// Strategy selecting [`StatesRemovedByAction`]: rank candidates by raw
/// hypotheses removed.
pub struct ExpectedStatesRemoved;

impl ScoringStrategy for ExpectedStatesRemoved {
    type Scorer<'a> = StatesRemovedByAction<'a>;

    fn build<'a>(state: &'a GameState, possible_states: &'a [PossibleState]) -> Self::Scorer<'a> {
        StatesRemovedByAction::new(state, possible_states)
    }
}

/// Strategy selecting [`SolutionsRemovedByInquiry`]: rank questions by the
/// solution diversity they collapse.
pub struct ExpectedSolutionsRemoved;

impl ScoringStrategy for ExpectedSolutionsRemoved {
    type Scorer<'a> = SolutionsRemovedByInquiry<'a>;

    fn build<'a>(state: &'a GameState, possible_states: &'a [PossibleState]) -> Self::Scorer<'a> {
        SolutionsRemovedByInquiry::new(state, possible_states)
    }
}
