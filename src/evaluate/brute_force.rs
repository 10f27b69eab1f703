//! Brute-force candidate scanning across a worker pool.

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::possible::PossibleState;
use crate::state::GameState;
use crate::tasks::TaskRegistry;

use super::candidates::CandidateAction;
use super::{ActionEvaluator, ActionEvaluatorDelegate, CandidateScorer, EvaluatorError, ScoringStrategy};

/// Evaluates every candidate action and keeps the co-optimal set.
///
/// Candidates are split into one contiguous chunk per worker. Workers
/// check task liveness before every candidate and abandon their remaining
/// units once the task dies; every update to the running leader set goes
/// through a single lock, so the final set is a plain max/tie-set over all
/// candidates regardless of worker interleaving. With streaming enabled,
/// the delegate sees the sorted leader set every time it improves or ties.
pub struct BruteForceActionEvaluator<S: ScoringStrategy> {
    pool_size: usize,
    streaming: bool,
    delegate: Option<Arc<dyn ActionEvaluatorDelegate>>,
    registry: TaskRegistry,
    _strategy: PhantomData<fn() -> S>,
}

struct Leaders {
    ranking: i64,
    actions: Vec<CandidateAction>,
}

impl<S: ScoringStrategy> BruteForceActionEvaluator<S> {
    /// Create an evaluator with one worker per available CPU.
    #[must_use]
    pub fn new() -> Self {
        Self::with_pool_size(num_cpus::get().max(1))
    }

    /// Create an evaluator with a fixed worker-pool size.
    ///
    /// ## Panics
    ///
    /// Panics if `pool_size` is zero.
    #[must_use]
    pub fn with_pool_size(pool_size: usize) -> Self {
        assert!(pool_size >= 1, "the worker pool needs at least one worker");
        Self {
            pool_size,
            streaming: false,
            delegate: None,
            registry: TaskRegistry::new(),
            _strategy: PhantomData,
        }
    }

    /// Attach the delegate that receives leader sets and terminal signals.
    #[must_use]
    pub fn with_delegate(mut self, delegate: Arc<dyn ActionEvaluatorDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Enable or disable streaming leader updates.
    #[must_use]
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Replace the delegate.
    pub fn set_delegate(&mut self, delegate: Arc<dyn ActionEvaluatorDelegate>) {
        self.delegate = Some(delegate);
    }

    fn stream_leaders(&self, state: &GameState, leaders: &Leaders) {
        if !self.streaming {
            return;
        }
        if let Some(delegate) = &self.delegate {
            let mut actions = leaders.actions.clone();
            actions.sort();
            delegate.did_find_optimal_actions(state, &actions);
        }
    }
}

impl<S: ScoringStrategy> Default for BruteForceActionEvaluator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ScoringStrategy> ActionEvaluator for BruteForceActionEvaluator<S> {
    fn find_optimal_action(&self, base_state: &GameState, possible_states: &[PossibleState]) {
        let candidates = base_state.all_possible_actions();
        let handle = self.registry.begin(base_state.id(), candidates.len());
        debug!(candidates = candidates.len(), "evaluating candidate actions");

        let scorer = S::build(base_state, possible_states);
        let leaders = Mutex::new(Leaders {
            ranking: 0,
            actions: Vec::new(),
        });

        let chunk_size = candidates.len().div_ceil(self.pool_size).max(1);
        std::thread::scope(|scope| {
            for chunk in candidates.chunks(chunk_size) {
                let scorer = &scorer;
                let leaders = &leaders;
                let handle = &handle;
                scope.spawn(move || {
                    for candidate in chunk {
                        if !handle.is_live() {
                            return;
                        }
                        if base_state.action_has_been_taken(candidate) {
                            handle.complete_unit();
                            continue;
                        }

                        let ranking = scorer.evaluate(candidate);
                        handle.complete_unit();
                        let Some(ranking) = ranking else {
                            continue;
                        };

                        let mut leaders = leaders.lock();
                        if ranking > leaders.ranking {
                            leaders.ranking = ranking;
                            leaders.actions = vec![candidate.clone()];
                            self.stream_leaders(base_state, &leaders);
                        } else if ranking == leaders.ranking {
                            leaders.actions.push(candidate.clone());
                            self.stream_leaders(base_state, &leaders);
                        }
                    }
                });
            }
        });

        if !handle.is_live() {
            debug!("abandoned evaluating; task is no longer live");
            return;
        }

        let mut leaders = leaders.into_inner();
        leaders.actions.sort();
        self.registry.finish(base_state.id(), &handle);
        debug!(
            best = leaders.actions.len(),
            ranking = leaders.ranking,
            "finished evaluating"
        );

        if let Some(delegate) = &self.delegate {
            delegate.did_find_optimal_actions(base_state, &leaders.actions);
            delegate.did_encounter_error(base_state, EvaluatorError::Completed);
        }
    }

    fn cancel_evaluating(&self, state: &GameState) {
        self.registry.cancel(state.id());
        if let Some(delegate) = &self.delegate {
            delegate.did_encounter_error(state, EvaluatorError::Cancelled);
        }
    }

    fn progress_evaluating(&self, state: &GameState) -> Option<f64> {
        self.registry.progress(state.id())
    }

    fn is_streaming(&self) -> bool {
        self.streaming
    }

    fn set_streaming(&mut self, streaming: bool) {
        self.streaming = streaming;
    }
}
