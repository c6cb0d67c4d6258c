//! Whole-artifact persistence

use crate::error::{ExtractionError, ExtractionResult};
use crate::fs::FileSystem;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const BEAN_MAPPINGS_FILE: &str = "bean_mappings.json";
pub const PROTOCOL_PARAMETERS_FILE: &str = "protocol_parameters.json";
pub const BUILDINGS_FILE: &str = "buildings.json";
pub const TROOPS_FILE: &str = "troops.json";
pub const RESEARCH_FILE: &str = "research.json";
pub const ITEMS_FILE: &str = "items.json";
pub const NPCS_FILE: &str = "npcs.json";
pub const CONSTANTS_FILE: &str = "all_constants.json";
pub const DATA_MODEL_DOC_FILE: &str = "DATA_MODEL_REFERENCE.md";
pub const API_DOC_FILE: &str = "API_REFERENCE.md";

/// Pretty JSON with two-space indentation and a trailing newline
pub fn to_artifact_json<T: Serialize + ?Sized>(value: &T) -> ExtractionResult<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Writes artifacts only after they are fully rendered in memory
pub struct ArtifactWriter<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ArtifactWriter<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> ExtractionResult<PathBuf> {
        let text = to_artifact_json(value)?;
        self.write_text(path, &text)
    }

    pub fn write_text(&self, path: &Path, text: &str) -> ExtractionResult<PathBuf> {
        self.fs
            .write_atomic(path, text.as_bytes())
            .map_err(|e| ExtractionError::Write {
                path: path.to_path_buf(),
                reason: format!("{:#}", e),
            })?;
        debug!(path = %path.display(), bytes = text.len(), "Wrote artifact");
        Ok(path.to_path_buf())
    }
}
