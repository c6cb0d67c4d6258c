use super::context::{PipelineContext, Registries};
use super::phases::workflow_phase;
use super::selection::{resolve_phases, Phase};
use super::summary::{PhaseReport, PhaseStatus, RunSummary};
use crate::config::DataforgeConfig;
use crate::fs::FileSystem;
use crate::progress::{LoggingHandler, ProgressEvent, ProgressHandler};
use crate::search::SearchBackend;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Runs the selected phases strictly in order, one at a time.
///
/// A failing phase is recorded and the run moves on; later phases see the
/// registries of every phase that succeeded before them.
pub struct PipelineOrchestrator {
    file_system: Arc<dyn FileSystem>,
    config: DataforgeConfig,
    search: SearchBackend,
    progress_handler: Arc<dyn ProgressHandler>,
}

impl PipelineOrchestrator {
    pub fn new(file_system: Arc<dyn FileSystem>, config: DataforgeConfig, search: SearchBackend) -> Self {
        Self {
            file_system,
            config,
            search,
            progress_handler: Arc::new(LoggingHandler),
        }
    }

    pub fn with_progress(mut self, handler: Arc<dyn ProgressHandler>) -> Self {
        self.progress_handler = handler;
        self
    }

    pub fn run(&self, selection: &[Phase]) -> RunSummary {
        let started_at = Utc::now();
        let start = Instant::now();
        let phases = resolve_phases(selection);

        info!(
            source = %self.config.source_dir.display(),
            output = %self.config.output_dir.display(),
            search = %self.search.describe(),
            "Starting pipeline"
        );
        self.progress_handler.on_progress(&ProgressEvent::RunStarted {
            phases: phases.iter().map(|p| p.to_string()).collect(),
        });

        let context = PipelineContext::new(
            Arc::clone(&self.file_system),
            self.config.clone(),
            self.search.clone(),
        );
        debug!(files = context.corpus.files().len(), "Corpus snapshot taken");

        let mut snapshot = Registries::default();
        let mut reports = Vec::with_capacity(phases.len());
        let total = phases.len();

        for (i, phase) in phases.into_iter().enumerate() {
            let Some(step) = workflow_phase(phase) else {
                continue;
            };
            self.progress_handler.on_progress(&ProgressEvent::PhaseStarted {
                phase: phase.to_string(),
                index: i + 1,
                total,
            });

            let phase_start = Instant::now();
            let result = step.execute(&context, &snapshot);
            let duration = phase_start.elapsed();

            let report = match result {
                Ok(outcome) => {
                    let artifacts: Vec<String> = outcome
                        .artifacts
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect();
                    self.progress_handler.on_progress(&ProgressEvent::PhaseCompleted {
                        phase: phase.to_string(),
                        items: outcome.items,
                        artifacts: artifacts.len(),
                        duration,
                    });
                    snapshot = snapshot.with(outcome.update);
                    PhaseReport {
                        phase,
                        status: PhaseStatus::Succeeded,
                        items: outcome.items,
                        artifacts,
                        error: None,
                        duration_ms: duration.as_millis() as u64,
                    }
                }
                Err(e) => {
                    let error = format!("{:#}", e);
                    self.progress_handler.on_progress(&ProgressEvent::PhaseFailed {
                        phase: phase.to_string(),
                        error: error.clone(),
                        duration,
                    });
                    PhaseReport {
                        phase,
                        status: PhaseStatus::Failed,
                        items: 0,
                        artifacts: Vec::new(),
                        error: Some(error),
                        duration_ms: duration.as_millis() as u64,
                    }
                }
            };
            reports.push(report);
        }

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            search_backend: self.search.describe(),
            phases: reports,
            qa: snapshot.qa,
        };
        self.progress_handler.on_progress(&ProgressEvent::RunCompleted {
            succeeded: summary.succeeded(),
            failed: summary.failed(),
            total_time: start.elapsed(),
        });
        summary
    }
}
