use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag for abandoning an in-flight batch of runs.
///
/// Clones observe the same flag. The simulator checks it before each run, so a cancelled batch
/// stops at a run boundary and never exposes a partially written trajectory.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
