//! Per-run context and the registry snapshot passed between phases

use crate::config::DataforgeConfig;
use crate::corpus::CorpusIndex;
use crate::fs::FileSystem;
use crate::output::{CommandRegistry, ConstantTables, FieldRegistry};
use crate::quality::QaReport;
use crate::search::SearchBackend;
use std::sync::Arc;

/// Everything a phase may read; immutable for the duration of a run
pub struct PipelineContext {
    pub file_system: Arc<dyn FileSystem>,
    pub config: DataforgeConfig,
    pub search: SearchBackend,
    /// Corpus snapshot taken when the run started
    pub corpus: CorpusIndex,
}

impl PipelineContext {
    pub fn new(file_system: Arc<dyn FileSystem>, config: DataforgeConfig, search: SearchBackend) -> Self {
        let corpus = CorpusIndex::scan(file_system.as_ref(), &config.source_dir);
        Self {
            file_system,
            config,
            search,
            corpus,
        }
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.file_system.as_ref()
    }
}

/// Registries produced so far in this run.
///
/// `None` means the producing phase has not run; consumers then fall back
/// to persisted artifacts.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub fields: Option<FieldRegistry>,
    pub commands: Option<CommandRegistry>,
    pub constants: Option<ConstantTables>,
    pub qa: Option<QaReport>,
}

/// What a phase hands forward to later phases
#[derive(Debug, Clone, Default)]
pub enum RegistryUpdate {
    #[default]
    None,
    Fields(FieldRegistry),
    Commands(CommandRegistry),
    Constants(ConstantTables),
    Qa(QaReport),
}

impl Registries {
    /// Next snapshot with `update` applied
    pub fn with(self, update: RegistryUpdate) -> Self {
        match update {
            RegistryUpdate::None => self,
            RegistryUpdate::Fields(fields) => Self {
                fields: Some(fields),
                ..self
            },
            RegistryUpdate::Commands(commands) => Self {
                commands: Some(commands),
                ..self
            },
            RegistryUpdate::Constants(constants) => Self {
                constants: Some(constants),
                ..self
            },
            RegistryUpdate::Qa(qa) => Self { qa: Some(qa), ..self },
        }
    }
}
