use crate::extract::ConstantConsolidator;
use crate::pipeline::context::{PipelineContext, Registries, RegistryUpdate};
use crate::pipeline::phase_trait::{PhaseOutcome, WorkflowPhase};
use crate::pipeline::selection::Phase;
use crate::pipeline::writer::{ArtifactWriter, CONSTANTS_FILE};
use anyhow::Result;

pub struct ConstantsPhase;

impl WorkflowPhase for ConstantsPhase {
    fn phase(&self) -> Phase {
        Phase::Constants
    }

    fn execute(&self, context: &PipelineContext, _snapshot: &Registries) -> Result<PhaseOutcome> {
        let tables = ConstantConsolidator::new(context.fs(), &context.corpus).consolidate();

        let path = context.config.game_data_dir().join(CONSTANTS_FILE);
        let written = ArtifactWriter::new(context.fs()).write_json(&path, &tables)?;

        Ok(PhaseOutcome {
            items: tables.values().map(|t| t.len()).sum(),
            artifacts: vec![written],
            update: RegistryUpdate::Constants(tables),
        })
    }
}
