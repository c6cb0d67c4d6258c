mod beans;
mod constants;
mod docs;
mod gamedata;
mod protocols;
mod qa;

pub use beans::BeansPhase;
pub use constants::ConstantsPhase;
pub use docs::DocsPhase;
pub use gamedata::GamedataPhase;
pub use protocols::ProtocolsPhase;
pub use qa::QaPhase;

use super::phase_trait::WorkflowPhase;
use super::selection::Phase;

/// The implementation behind a concrete phase; `None` for [`Phase::All`]
pub fn workflow_phase(phase: Phase) -> Option<Box<dyn WorkflowPhase>> {
    let phase: Box<dyn WorkflowPhase> = match phase {
        Phase::All => return None,
        Phase::Beans => Box::new(BeansPhase),
        Phase::Protocols => Box::new(ProtocolsPhase),
        Phase::Gamedata => Box::new(GamedataPhase),
        Phase::Constants => Box::new(ConstantsPhase),
        Phase::Docs => Box::new(DocsPhase),
        Phase::Qa => Box::new(QaPhase),
    };
    Some(phase)
}
