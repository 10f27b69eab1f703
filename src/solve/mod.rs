//! Solving: prune the hypothesis space and rank solutions.
//!
//! The [`EliminationSolver`] generates every hypothesis consistent with
//! the acting player's knowledge, prunes it against the action log, and
//! reports the surviving hypotheses with their solution distribution
//! through a delegate. Work is registered per state identity so callers
//! can cancel it and poll progress.

mod elimination;
mod solver;

pub use elimination::{
    resolve_inquisitions_in_combination, resolve_inquisitions_in_isolation,
    resolve_my_accusations, resolve_opponent_accusations, solutions_from_states,
    ELIMINATION_PASSES,
};
pub use solver::EliminationSolver;

use thiserror::Error;

use crate::possible::PossibleState;
use crate::state::{GameState, Solution};

/// Terminal failure of a solving task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The task was cancelled before completion.
    #[error("solving was cancelled")]
    Cancelled,
}

/// Receives a solving task's single terminal signal.
pub trait SolverDelegate: Send + Sync {
    /// The task completed: ranked solutions (most probable first) plus the
    /// hypotheses that survived elimination.
    fn did_find_solutions(
        &self,
        state: &GameState,
        solutions: &[Solution],
        possible_states: &[PossibleState],
    );

    /// The task ended without a result.
    fn did_encounter_error(&self, state: &GameState, error: SolverError);
}

/// A mystery solver working against one state at a time.
pub trait Solver {
    /// Start solving a state. Blocks until the task completes or is
    /// cancelled; the outcome is delivered through the delegate.
    fn solve(&self, state: &GameState);

    /// Cancel the task registered for this state, if any, and emit the
    /// cancelled signal. Idempotent.
    fn cancel_solving(&self, state: &GameState);

    /// Fraction of the task done, 1.0 once finished, `None` when no task
    /// is registered for this state.
    fn progress_solving(&self, state: &GameState) -> Option<f64>;
}
