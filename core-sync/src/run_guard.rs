//! Non-blocking mutual exclusion for sync passes
//!
//! A pass that starts while another is still running is skipped, not queued.
//! The lock is held by an RAII guard, so it is released however the pass ends:
//! success, error, or panic unwinding through the task.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of asking the guard to run a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome<T> {
    /// The guard was free and the pass ran to its end.
    Completed(T),
    /// Another pass held the guard; nothing ran.
    Skipped,
}

impl<T> RunOutcome<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RunOutcome::Skipped)
    }

    pub fn completed(self) -> Option<T> {
        match self {
            RunOutcome::Completed(value) => Some(value),
            RunOutcome::Skipped => None,
        }
    }
}

/// Shared single-slot guard. Clones refer to the same slot.
#[derive(Debug, Clone, Default)]
pub struct RunGuard {
    slot: Arc<Mutex<()>>,
}

impl RunGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pass currently holds the guard.
    pub fn is_busy(&self) -> bool {
        self.slot.try_lock().is_err()
    }

    /// Run `pass` if the guard is free, otherwise return immediately.
    pub async fn try_run<F, Fut, T>(&self, pass: F) -> RunOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let Ok(_held) = self.slot.try_lock() else {
            return RunOutcome::Skipped;
        };

        RunOutcome::Completed(pass().await)
    }
}
