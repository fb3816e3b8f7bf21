//! HTTP routes for the agent endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{process_message, session_status, start_session, AgentHandlers};

/// Creates the agent router with all endpoints.
pub fn agent_routes(handlers: AgentHandlers) -> Router {
    Router::new()
        .route("/start", post(start_session))
        .route("/message", post(process_message))
        .route("/status/:id", get(session_status))
        .with_state(handlers)
}
