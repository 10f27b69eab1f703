//! In-flight task bookkeeping.
//!
//! Long-running work (solving, evaluating) is registered here keyed by the
//! originating snapshot's [`StateId`]. Cancellation is removal from the
//! registry; liveness is an atomic flag mirrored on the handle so workers
//! can poll it without touching the map lock. A finished task's handle
//! stays registered, reporting progress 1.0, until the next task for the
//! same identity evicts it or a cancel removes it.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::state::StateId;

/// Shared handle for one registered task.
pub(crate) struct TaskHandle {
    live: AtomicBool,
    finished: AtomicBool,
    total_units: usize,
    completed_units: AtomicUsize,
}

impl TaskHandle {
    fn new(total_units: usize) -> Self {
        Self {
            live: AtomicBool::new(true),
            finished: AtomicBool::new(false),
            total_units,
            completed_units: AtomicUsize::new(0),
        }
    }

    /// `true` while the task has not been cancelled or replaced.
    pub(crate) fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn kill(&self) {
        self.live.store(false, Ordering::Release);
    }

    fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }

    /// Record one processed unit of work.
    pub(crate) fn complete_unit(&self) {
        self.completed_units.fetch_add(1, Ordering::Relaxed);
    }

    /// Fraction of units processed, 1.0 once finished.
    pub(crate) fn progress(&self) -> f64 {
        if self.finished.load(Ordering::Acquire) {
            return 1.0;
        }
        if self.total_units == 0 {
            return 0.0;
        }
        let completed = self.completed_units.load(Ordering::Relaxed);
        (completed as f64 / self.total_units as f64).min(1.0)
    }
}

/// Registry of in-flight (and just-finished) tasks by state identity.
pub(crate) struct TaskRegistry {
    tasks: Mutex<FxHashMap<StateId, Arc<TaskHandle>>>,
}

impl TaskRegistry {
    pub(crate) fn new() -> Self {
        Self {
            tasks: Mutex::new(FxHashMap::default()),
        }
    }

    /// Register a task, evicting and killing any previous task for the
    /// same identity.
    pub(crate) fn begin(&self, id: StateId, total_units: usize) -> Arc<TaskHandle> {
        let handle = Arc::new(TaskHandle::new(total_units));
        if let Some(evicted) = self.tasks.lock().insert(id, handle.clone()) {
            evicted.kill();
        }
        handle
    }

    /// Deregister a task. Returns `true` if one was registered.
    pub(crate) fn cancel(&self, id: StateId) -> bool {
        match self.tasks.lock().remove(&id) {
            Some(handle) => {
                handle.kill();
                true
            }
            None => false,
        }
    }

    /// Mark a task finished, keeping it registered for terminal progress
    /// queries. A handle that has been evicted or cancelled is left alone.
    pub(crate) fn finish(&self, id: StateId, handle: &Arc<TaskHandle>) {
        let tasks = self.tasks.lock();
        if let Some(current) = tasks.get(&id) {
            if Arc::ptr_eq(current, handle) {
                handle.finish();
            }
        }
    }

    /// Progress of the registered task, if any.
    pub(crate) fn progress(&self, id: StateId) -> Option<f64> {
        self.tasks.lock().get(&id).map(|handle| handle.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameState;

    #[test]
    fn test_lifecycle() {
        let registry = TaskRegistry::new();
        let id = GameState::new(3).id();

        assert_eq!(registry.progress(id), None);

        let handle = registry.begin(id, 4);
        assert!(handle.is_live());
        assert_eq!(registry.progress(id), Some(0.0));

        handle.complete_unit();
        assert_eq!(registry.progress(id), Some(0.25));

        registry.finish(id, &handle);
        assert_eq!(registry.progress(id), Some(1.0));

        assert!(registry.cancel(id));
        assert_eq!(registry.progress(id), None);
        assert!(!registry.cancel(id));
    }

    #[test]
    fn test_begin_evicts_previous_task() {
        let registry = TaskRegistry::new();
        let id = GameState::new(3).id();

        let first = registry.begin(id, 10);
        let second = registry.begin(id, 10);

        assert!(!first.is_live());
        assert!(second.is_live());
    }

    #[test]
    fn test_finish_ignores_evicted_handle() {
        let registry = TaskRegistry::new();
        let id = GameState::new(3).id();

        let first = registry.begin(id, 2);
        let _second = registry.begin(id, 2);

        registry.finish(id, &first);
        assert_eq!(registry.progress(id), Some(0.0));
    }

    #[test]
    fn test_zero_unit_task_reports_zero_until_finished() {
        let registry = TaskRegistry::new();
        let id = GameState::new(3).id();

        let handle = registry.begin(id, 0);
        assert_eq!(registry.progress(id), Some(0.0));
        registry.finish(id, &handle);
        assert_eq!(registry.progress(id), Some(1.0));
    }
}
