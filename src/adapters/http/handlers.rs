//! HTTP handlers for the agent endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::{Orchestrator, OrchestratorError};
use crate::domain::foundation::SessionId;

use super::dto::{
    AgentMessageRequest, AgentMessageResponse, ErrorResponse, StartSessionResponse,
    StatusResponse,
};

/// Shared handler state.
#[derive(Clone)]
pub struct AgentHandlers {
    orchestrator: Arc<Orchestrator>,
}

impl AgentHandlers {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// POST /api/agent/start - Create a session and return the welcome prompt.
pub async fn start_session(State(handlers): State<AgentHandlers>) -> Response {
    match handlers.orchestrator.start_session().await {
        Ok(started) => {
            let response: StartSessionResponse = started.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_orchestrator_error(e),
    }
}

/// POST /api/agent/message - Run one conversation turn.
pub async fn process_message(
    State(handlers): State<AgentHandlers>,
    Json(request): Json<AgentMessageRequest>,
) -> Response {
    let session_id = match request.session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid session ID")),
            )
                .into_response()
        }
    };

    match handlers
        .orchestrator
        .process_message(session_id, &request.message)
        .await
    {
        Ok(agent_response) => {
            let response = AgentMessageResponse {
                message: agent_response.message,
                is_complete: agent_response.is_complete,
                progress: agent_response.progress,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_orchestrator_error(e),
    }
}

/// GET /api/agent/status/:id - Full session snapshot.
pub async fn session_status(
    State(handlers): State<AgentHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid session ID")),
            )
                .into_response()
        }
    };

    match handlers.orchestrator.status(session_id).await {
        Ok(status) => {
            let response: StatusResponse = status.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_orchestrator_error(e),
    }
}

fn handle_orchestrator_error(error: OrchestratorError) -> Response {
    if error.is_not_found() {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Session not found")),
        )
            .into_response();
    }

    error!(error = %error, "orchestrator failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal error")),
    )
        .into_response()
}
