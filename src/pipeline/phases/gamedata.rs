use crate::pipeline::context::{PipelineContext, Registries};
use crate::pipeline::phase_trait::{PhaseOutcome, WorkflowPhase};
use crate::pipeline::selection::Phase;
use crate::pipeline::writer::{
    to_artifact_json, ArtifactWriter, BUILDINGS_FILE, ITEMS_FILE, NPCS_FILE, RESEARCH_FILE,
    TROOPS_FILE,
};
use crate::reference::ReferenceDataSynthesizer;
use anyhow::Result;
use tracing::warn;

pub struct GamedataPhase;

impl WorkflowPhase for GamedataPhase {
    fn phase(&self) -> Phase {
        Phase::Gamedata
    }

    fn execute(&self, context: &PipelineContext, _snapshot: &Registries) -> Result<PhaseOutcome> {
        let data = ReferenceDataSynthesizer::new().generate();
        let dir = context.config.game_data_dir();
        let writer = ArtifactWriter::new(context.fs());

        let rendered = [
            (BUILDINGS_FILE, to_artifact_json(&data.buildings)?),
            (TROOPS_FILE, to_artifact_json(&data.troops)?),
            (RESEARCH_FILE, to_artifact_json(&data.research)?),
            (ITEMS_FILE, to_artifact_json(&data.items)?),
            (NPCS_FILE, to_artifact_json(&data.npcs)?),
        ];

        // Each file is whole or absent; earlier files stay on disk when a later one fails
        let mut artifacts = Vec::with_capacity(rendered.len());
        for (file, text) in &rendered {
            match writer.write_text(&dir.join(file), text) {
                Ok(path) => artifacts.push(path),
                Err(e) => {
                    let persisted: Vec<String> =
                        artifacts.iter().map(|p| p.display().to_string()).collect();
                    warn!(
                        failed = %file,
                        persisted = ?persisted,
                        "Reference data only partially written"
                    );
                    return Err(e.into());
                }
            }
        }

        Ok(PhaseOutcome {
            items: data.total_entries(),
            artifacts,
            ..Default::default()
        })
    }
}
