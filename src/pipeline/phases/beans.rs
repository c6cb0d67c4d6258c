use crate::catalog::TARGET_SYMBOLS;
use crate::extract::FieldExtractor;
use crate::pipeline::context::{PipelineContext, Registries, RegistryUpdate};
use crate::pipeline::phase_trait::{PhaseOutcome, WorkflowPhase};
use crate::pipeline::selection::Phase;
use crate::pipeline::writer::{ArtifactWriter, BEAN_MAPPINGS_FILE};
use anyhow::Result;

pub struct BeansPhase;

impl WorkflowPhase for BeansPhase {
    fn phase(&self) -> Phase {
        Phase::Beans
    }

    fn execute(&self, context: &PipelineContext, _snapshot: &Registries) -> Result<PhaseOutcome> {
        let fields = FieldExtractor::new(context.fs(), &context.corpus).extract_all(TARGET_SYMBOLS);

        let path = context.config.game_data_dir().join(BEAN_MAPPINGS_FILE);
        let written = ArtifactWriter::new(context.fs()).write_json(&path, &fields)?;

        Ok(PhaseOutcome {
            items: fields.len(),
            artifacts: vec![written],
            update: RegistryUpdate::Fields(fields),
        })
    }
}
