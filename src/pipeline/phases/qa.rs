use crate::pipeline::context::{PipelineContext, Registries, RegistryUpdate};
use crate::pipeline::phase_trait::{PhaseOutcome, WorkflowPhase};
use crate::pipeline::selection::Phase;
use crate::quality::QualityAuditor;
use anyhow::Result;

/// Reports only; the QA summary is carried in the run summary, not persisted
pub struct QaPhase;

impl WorkflowPhase for QaPhase {
    fn phase(&self) -> Phase {
        Phase::Qa
    }

    fn execute(&self, context: &PipelineContext, _snapshot: &Registries) -> Result<PhaseOutcome> {
        let report = QualityAuditor::new(context.fs()).audit(&context.corpus, &context.config.output_dir);

        Ok(PhaseOutcome {
            items: report.duplicate_variants + report.empty_artifacts + report.excluded_files,
            artifacts: Vec::new(),
            update: RegistryUpdate::Qa(report),
        })
    }
}
