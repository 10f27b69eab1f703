//! Sampling decorator: evaluate against a random subset of hypotheses.

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::possible::PossibleState;
use crate::state::GameState;

use super::ActionEvaluator;

/// Wraps any evaluator and hands it a random fraction of the hypothesis
/// set, trading accuracy for speed on large spaces. Cancellation,
/// progress, and streaming pass through to the wrapped evaluator
/// unchanged.
pub struct SamplingActionEvaluator<T> {
    base: T,
    sample_rate: f64,
    rng: Mutex<ChaCha8Rng>,
}

impl<T: ActionEvaluator> SamplingActionEvaluator<T> {
    /// Default fraction of hypotheses kept.
    pub const DEFAULT_SAMPLE_RATE: f64 = 0.1;

    /// Wrap an evaluator with the default sample rate and a random seed.
    #[must_use]
    pub fn new(base: T) -> Self {
        Self {
            base,
            sample_rate: Self::DEFAULT_SAMPLE_RATE,
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Change the fraction of hypotheses kept.
    ///
    /// ## Panics
    ///
    /// Panics if `sample_rate` is outside `(0, 1]`.
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        assert!(
            sample_rate > 0.0 && sample_rate <= 1.0,
            "sample rate must be in (0, 1]"
        );
        self.sample_rate = sample_rate;
        self
    }

    /// Fix the sampling seed for reproducible subsets.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(ChaCha8Rng::seed_from_u64(seed));
        self
    }

    /// The wrapped evaluator.
    #[must_use]
    pub fn base(&self) -> &T {
        &self.base
    }
}

impl<T: ActionEvaluator> ActionEvaluator for SamplingActionEvaluator<T> {
    fn find_optimal_action(&self, base_state: &GameState, possible_states: &[PossibleState]) {
        let count = (possible_states.len() as f64 * self.sample_rate) as usize;
        let sampled: Vec<PossibleState> = {
            let mut rng = self.rng.lock();
            possible_states
                .choose_multiple(&mut *rng, count)
                .cloned()
                .collect()
        };
        debug!(
            total = possible_states.len(),
            sampled = sampled.len(),
            "sampled hypotheses before evaluating"
        );
        self.base.find_optimal_action(base_state, &sampled);
    }

    fn cancel_evaluating(&self, state: &GameState) {
        self.base.cancel_evaluating(state);
    }

    fn progress_evaluating(&self, state: &GameState) -> Option<f64> {
        self.base.progress_evaluating(state)
    }

    fn is_streaming(&self) -> bool {
        self.base.is_streaming()
    }

    fn set_streaming(&mut self, streaming: bool) {
        self.base.set_streaming(streaming);
    }
}
