use crate::catalog::COMMAND_CATEGORIES;
use crate::extract::CommandExtractor;
use crate::pipeline::context::{PipelineContext, Registries, RegistryUpdate};
use crate::pipeline::phase_trait::{PhaseOutcome, WorkflowPhase};
use crate::pipeline::selection::Phase;
use crate::pipeline::writer::{ArtifactWriter, PROTOCOL_PARAMETERS_FILE};
use anyhow::Result;

pub struct ProtocolsPhase;

impl WorkflowPhase for ProtocolsPhase {
    fn phase(&self) -> Phase {
        Phase::Protocols
    }

    fn execute(&self, context: &PipelineContext, _snapshot: &Registries) -> Result<PhaseOutcome> {
        let config = &context.config;
        let commands = CommandExtractor::new(context.fs(), &context.corpus)
            .with_fallback_file(&config.mapping_file)
            .with_search(context.search.clone(), config.search_top_k)
            .extract_all();

        let path = config.game_data_dir().join(PROTOCOL_PARAMETERS_FILE);
        let written = ArtifactWriter::new(context.fs())
            .write_json(&path, &commands.to_artifact(COMMAND_CATEGORIES))?;

        Ok(PhaseOutcome {
            items: commands.len(),
            artifacts: vec![written],
            update: RegistryUpdate::Commands(commands),
        })
    }
}
