//! Application layer: stage handlers and the orchestrator.

mod orchestrator;
pub mod stages;

pub use orchestrator::{AgentResponse, Orchestrator, OrchestratorError, SessionStatus, StartedSession};
pub use stages::StageResponse;
