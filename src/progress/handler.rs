//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while the pipeline runs
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Run started with the given phase plan
    RunStarted { phases: Vec<String> },

    PhaseStarted { phase: String, index: usize, total: usize },

    /// Phase finished and its artifacts are on disk
    PhaseCompleted {
        phase: String,
        items: usize,
        artifacts: usize,
        duration: Duration,
    },

    PhaseFailed {
        phase: String,
        error: String,
        duration: Duration,
    },

    RunCompleted {
        succeeded: usize,
        failed: usize,
        total_time: Duration,
    },
}

/// Trait for handling progress events during a run
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}
