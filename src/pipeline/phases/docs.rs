use crate::docs::DocumentationRenderer;
use crate::error::ExtractionError;
use crate::fs::FileSystem;
use crate::output::{CommandRegistry, CommandRegistryArtifact, ConstantTables, FieldRegistry};
use crate::pipeline::context::{PipelineContext, Registries};
use crate::pipeline::phase_trait::{PhaseOutcome, WorkflowPhase};
use crate::pipeline::selection::Phase;
use crate::pipeline::writer::{
    ArtifactWriter, API_DOC_FILE, BEAN_MAPPINGS_FILE, CONSTANTS_FILE, DATA_MODEL_DOC_FILE,
    PROTOCOL_PARAMETERS_FILE,
};
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

pub struct DocsPhase;

/// Read an artifact written by an earlier run; absent or unreadable means empty.
fn load_persisted<T: DeserializeOwned + Default>(fs: &dyn FileSystem, path: &Path) -> T {
    if !fs.is_file(path) {
        debug!(path = %path.display(), "No persisted artifact, rendering empty section");
        return T::default();
    }

    let parsed = fs
        .read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()));
    match parsed {
        Ok(value) => value,
        Err(reason) => {
            let e = ExtractionError::Decode {
                path: path.to_path_buf(),
                reason,
            };
            warn!(kind = e.kind(), "{}", e);
            T::default()
        }
    }
}

impl WorkflowPhase for DocsPhase {
    fn phase(&self) -> Phase {
        Phase::Docs
    }

    fn execute(&self, context: &PipelineContext, snapshot: &Registries) -> Result<PhaseOutcome> {
        let fs = context.fs();
        let game_data = context.config.game_data_dir();

        let fields: FieldRegistry = match &snapshot.fields {
            Some(fields) => fields.clone(),
            None => load_persisted(fs, &game_data.join(BEAN_MAPPINGS_FILE)),
        };
        let commands = match &snapshot.commands {
            Some(commands) => commands.clone(),
            None => CommandRegistry::from_artifact(load_persisted::<CommandRegistryArtifact>(
                fs,
                &game_data.join(PROTOCOL_PARAMETERS_FILE),
            )),
        };
        let constants: ConstantTables = match &snapshot.constants {
            Some(constants) => constants.clone(),
            None => load_persisted(fs, &game_data.join(CONSTANTS_FILE)),
        };

        let renderer = DocumentationRenderer::new();
        let data_model = renderer.render_data_model(&fields, &constants)?;
        let api = renderer.render_api_reference(&commands)?;

        let docs_dir = context.config.docs_dir();
        let writer = ArtifactWriter::new(fs);
        let artifacts = vec![
            writer.write_text(&docs_dir.join(DATA_MODEL_DOC_FILE), &data_model)?,
            writer.write_text(&docs_dir.join(API_DOC_FILE), &api)?,
        ];

        Ok(PhaseOutcome {
            items: fields.len() + commands.len() + constants.len(),
            artifacts,
            ..Default::default()
        })
    }
}
