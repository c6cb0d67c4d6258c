use super::context::{PipelineContext, Registries, RegistryUpdate};
use super::selection::Phase;
use anyhow::Result;
use std::path::PathBuf;

/// Result of one successful phase
#[derive(Debug, Default)]
pub struct PhaseOutcome {
    /// Entries produced (symbols, commands, table rows, QA findings)
    pub items: usize,
    pub artifacts: Vec<PathBuf>,
    pub update: RegistryUpdate,
}

/// One independently re-runnable pipeline step.
///
/// A phase reads the corpus and the snapshot of earlier phases, renders its
/// artifacts in memory, then persists them whole. Only persistence errors
/// are returned; everything else is recovered inside the phase.
pub trait WorkflowPhase: Send + Sync {
    fn phase(&self) -> Phase;

    fn execute(&self, context: &PipelineContext, snapshot: &Registries) -> Result<PhaseOutcome>;
}
