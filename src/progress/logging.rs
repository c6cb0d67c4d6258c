//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{info, warn};

/// Handler that logs one line per phase using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::RunStarted { phases } => {
                info!(phases = %phases.join(","), "Starting dataset run");
            }
            ProgressEvent::PhaseStarted {
                phase,
                index,
                total,
            } => {
                info!(
                    phase = %phase,
                    progress = format!("{}/{}", index, total),
                    "Starting phase"
                );
            }
            ProgressEvent::PhaseCompleted {
                phase,
                items,
                artifacts,
                duration,
            } => {
                info!(
                    phase = %phase,
                    items,
                    artifacts,
                    duration_ms = duration.as_millis(),
                    "Phase complete"
                );
            }
            ProgressEvent::PhaseFailed {
                phase,
                error,
                duration,
            } => {
                warn!(
                    phase = %phase,
                    error = %error,
                    duration_ms = duration.as_millis(),
                    "Phase failed"
                );
            }
            ProgressEvent::RunCompleted {
                succeeded,
                failed,
                total_time,
            } => {
                if *failed > 0 {
                    warn!(
                        succeeded,
                        failed,
                        total_time_ms = total_time.as_millis(),
                        "Run complete with failures"
                    );
                } else {
                    info!(
                        succeeded,
                        total_time_ms = total_time.as_millis(),
                        "Run complete"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_logging_all_events() {
        let handler = LoggingHandler;

        let events = vec![
            ProgressEvent::RunStarted {
                phases: vec!["beans".to_string(), "qa".to_string()],
            },
            ProgressEvent::PhaseStarted {
                phase: "beans".to_string(),
                index: 1,
                total: 2,
            },
            ProgressEvent::PhaseCompleted {
                phase: "beans".to_string(),
                items: 20,
                artifacts: 1,
                duration: Duration::from_millis(10),
            },
            ProgressEvent::PhaseFailed {
                phase: "qa".to_string(),
                error: "read-only".to_string(),
                duration: Duration::from_millis(1),
            },
            ProgressEvent::RunCompleted {
                succeeded: 1,
                failed: 1,
                total_time: Duration::from_secs(1),
            },
            ProgressEvent::RunCompleted {
                succeeded: 2,
                failed: 0,
                total_time: Duration::from_secs(1),
            },
        ];

        for event in events {
            handler.on_progress(&event);
        }
    }
}
