mod orchestrator;
mod subtask;

pub use orchestrator::{PhaseOrchestrator, PhasePlan, PhaseReport, PhaseRequest};
pub use subtask::SubtaskResult;
