pub mod context;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;
pub mod selection;
pub mod summary;
pub mod writer;

pub use context::{PipelineContext, Registries, RegistryUpdate};
pub use orchestrator::PipelineOrchestrator;
pub use phase_trait::{PhaseOutcome, WorkflowPhase};
pub use selection::{resolve_phases, Phase};
pub use summary::{PhaseReport, PhaseStatus, RunSummary};
pub use writer::ArtifactWriter;
