//! The elimination solver.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::possible::{all_possible_solutions, append_states_for_solution, PossibleState};
use crate::state::{GameState, Solution};
use crate::tasks::{TaskHandle, TaskRegistry};

use super::elimination::{
    resolve_inquisitions_in_combination, resolve_inquisitions_in_isolation,
    resolve_my_accusations, resolve_opponent_accusations, solutions_from_states,
    ELIMINATION_PASSES,
};
use super::{Solver, SolverDelegate, SolverError};

/// Solves by eliminating contradictory hypotheses and reading the
/// probable solutions off whatever remains.
///
/// Generation fans candidate solutions out over a bounded pool of scoped
/// workers; elimination then runs the passes in order. When a solve is
/// requested for a state that extends the most recently completed one,
/// the previous pruned hypothesis set is reused and generation is skipped
/// entirely.
pub struct EliminationSolver {
    pool_size: usize,
    delegate: Option<Arc<dyn SolverDelegate>>,
    registry: TaskRegistry,
    cache: Mutex<Option<SolveCache>>,
}

struct SolveCache {
    state: GameState,
    states: Vec<PossibleState>,
}

impl EliminationSolver {
    /// Create a solver with one worker per available CPU.
    #[must_use]
    pub fn new() -> Self {
        Self::with_pool_size(num_cpus::get().max(1))
    }

    /// Create a solver with a fixed worker-pool size.
    ///
    /// ## Panics
    ///
    /// Panics if `pool_size` is zero.
    #[must_use]
    pub fn with_pool_size(pool_size: usize) -> Self {
        assert!(pool_size >= 1, "the worker pool needs at least one worker");
        Self {
            pool_size,
            delegate: None,
            registry: TaskRegistry::new(),
            cache: Mutex::new(None),
        }
    }

    /// Attach the delegate that receives results and terminal signals.
    #[must_use]
    pub fn with_delegate(mut self, delegate: Arc<dyn SolverDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Replace the delegate.
    pub fn set_delegate(&mut self, delegate: Arc<dyn SolverDelegate>) {
        self.delegate = Some(delegate);
    }

    /// Take the pruned hypothesis set forward from the previous solve if
    /// that solve's state is a strict prefix of this one.
    fn cached_states_for(&self, state: &GameState) -> Option<Vec<PossibleState>> {
        let cache = self.cache.lock();
        cache
            .as_ref()
            .filter(|cached| cached.state.is_earlier_state(state))
            .map(|cached| cached.states.clone())
    }

    /// Generate hypotheses for every candidate solution across the worker
    /// pool. Chunks are merged in order, so the result is deterministic.
    fn generate(
        &self,
        state: &GameState,
        candidates: &[Solution],
        handle: &TaskHandle,
    ) -> Vec<PossibleState> {
        let chunk_size = candidates.len().div_ceil(self.pool_size).max(1);
        let results: Mutex<Vec<(usize, Vec<PossibleState>)>> = Mutex::new(Vec::new());

        std::thread::scope(|scope| {
            for (index, chunk) in candidates.chunks(chunk_size).enumerate() {
                let results = &results;
                scope.spawn(move || {
                    let mut local = Vec::new();
                    for solution in chunk {
                        if !handle.is_live() {
                            return;
                        }
                        append_states_for_solution(state, solution, &mut local, &|| {
                            handle.is_live()
                        });
                        handle.complete_unit();
                    }
                    if handle.is_live() {
                        results.lock().push((index, local));
                    }
                });
            }
        });

        let mut results = results.into_inner();
        results.sort_by_key(|(index, _)| *index);
        results.into_iter().flat_map(|(_, states)| states).collect()
    }
}

impl Default for EliminationSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for EliminationSolver {
    fn solve(&self, state: &GameState) {
        let cached = self.cached_states_for(state);
        let candidates = all_possible_solutions(state);
        let generation_units = if cached.is_some() { 0 } else { candidates.len() };
        let handle = self
            .registry
            .begin(state.id(), generation_units + ELIMINATION_PASSES);

        let mut states = match cached {
            Some(states) => {
                debug!(states = states.len(), "reusing hypotheses from earlier state");
                states
            }
            None => {
                let states = self.generate(state, &candidates, &handle);
                debug!(
                    candidates = candidates.len(),
                    states = states.len(),
                    "generated hypotheses"
                );
                states
            }
        };
        if !handle.is_live() {
            return;
        }

        resolve_my_accusations(state, &mut states);
        handle.complete_unit();
        debug!(states = states.len(), "resolved my accusations");
        if !handle.is_live() {
            return;
        }

        resolve_opponent_accusations(state, &mut states);
        handle.complete_unit();
        debug!(states = states.len(), "resolved opponent accusations");
        if !handle.is_live() {
            return;
        }

        resolve_inquisitions_in_isolation(state, &mut states, &|| handle.is_live());
        handle.complete_unit();
        debug!(states = states.len(), "resolved inquisitions in isolation");
        if !handle.is_live() {
            return;
        }

        resolve_inquisitions_in_combination(state, &mut states);
        handle.complete_unit();
        if !handle.is_live() {
            return;
        }

        let solutions = solutions_from_states(&states);
        *self.cache.lock() = Some(SolveCache {
            state: state.clone(),
            states: states.clone(),
        });
        self.registry.finish(state.id(), &handle);
        debug!(
            states = states.len(),
            solutions = solutions.len(),
            "finished solving"
        );

        if let Some(delegate) = &self.delegate {
            delegate.did_find_solutions(state, &solutions, &states);
        }
    }

    fn cancel_solving(&self, state: &GameState) {
        self.registry.cancel(state.id());
        if let Some(delegate) = &self.delegate {
            delegate.did_encounter_error(state, SolverError::Cancelled);
        }
    }

    fn progress_solving(&self, state: &GameState) -> Option<f64> {
        self.registry.progress(state.id())
    }
}
