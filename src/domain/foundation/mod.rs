//! Shared domain primitives: identifiers, timestamps, validation errors,
//! and the state machine trait used by the conversation stage enum.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::SessionId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
