//! Evaluating candidate next actions.
//!
//! Scoring strategies rank a single candidate by its expected reduction of
//! the hypothesis space; the [`BruteForceActionEvaluator`] scans every
//! candidate across a worker pool and keeps the co-optimal set; the
//! [`SamplingActionEvaluator`] trades accuracy for speed by scoring
//! against a random subset of the hypotheses.

mod brute_force;
mod candidates;
mod expected;
mod sampling;

pub use brute_force::BruteForceActionEvaluator;
pub use candidates::{CandidateAction, Informing, Inquiry};
pub use expected::{
    ExpectedSolutionsRemoved, ExpectedStatesRemoved, SolutionsRemovedByInquiry,
    StatesRemovedByAction, StatesRemovedByInforming, StatesRemovedByInquiry,
};
pub use sampling::SamplingActionEvaluator;

use thiserror::Error;

use crate::possible::PossibleState;
use crate::state::GameState;

/// Terminal signal of an evaluation task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EvaluatorError {
    /// The task was cancelled before completion.
    #[error("evaluation was cancelled")]
    Cancelled,
    /// The task completed; no more updates will follow. Streaming
    /// consumers use this to stop listening.
    #[error("evaluation completed")]
    Completed,
}

/// Receives an evaluation task's leader sets and terminal signal.
pub trait ActionEvaluatorDelegate: Send + Sync {
    /// The current co-optimal candidates, sorted. Called once at
    /// completion, and on every leader change when streaming is enabled.
    fn did_find_optimal_actions(&self, state: &GameState, actions: &[CandidateAction]);

    /// The task ended, with [`EvaluatorError::Completed`] marking a normal
    /// finish.
    fn did_encounter_error(&self, state: &GameState, error: EvaluatorError);
}

/// Scores one candidate at a time against a fixed (state, hypotheses)
/// pair. `None` means the candidate cannot be ranked.
pub trait CandidateScorer: Sync {
    fn evaluate(&self, action: &CandidateAction) -> Option<i64>;
}

/// A family of [`CandidateScorer`]s, one built per evaluation task.
pub trait ScoringStrategy {
    type Scorer<'a>: CandidateScorer + 'a;

    /// Build the scorer for one task over the given state and hypotheses.
    fn build<'a>(state: &'a GameState, possible_states: &'a [PossibleState]) -> Self::Scorer<'a>;
}

/// An evaluator working against one state at a time.
pub trait ActionEvaluator {
    /// Find the best next action(s). Blocks until the task completes or is
    /// cancelled; results are delivered through the delegate.
    fn find_optimal_action(&self, base_state: &GameState, possible_states: &[PossibleState]);

    /// Cancel the task registered for this state, if any, and emit the
    /// cancelled signal. Idempotent.
    fn cancel_evaluating(&self, state: &GameState);

    /// Fraction of candidates processed, 1.0 once finished, `None` when no
    /// task is registered for this state.
    fn progress_evaluating(&self, state: &GameState) -> Option<f64>;

    /// Whether leader updates stream to the delegate as they happen.
    fn is_streaming(&self) -> bool;

    /// Enable or disable streaming leader updates.
    fn set_streaming(&mut self, streaming: bool);
}
