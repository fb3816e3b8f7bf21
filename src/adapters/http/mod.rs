//! HTTP adapter: the thin web surface over the orchestrator.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AgentMessageRequest, AgentMessageResponse, ErrorResponse, StartSessionResponse,
    StatusResponse,
};
pub use handlers::AgentHandlers;
pub use routes::agent_routes;
