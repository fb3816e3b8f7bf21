//! HTTP DTOs for the agent endpoints. Wire names are camelCase.

use serde::{Deserialize, Serialize};

use crate::application::{SessionStatus, StartedSession};
use crate::domain::analysis::AnalysisResult;
use crate::domain::economics::CalculationResult;
use crate::domain::profile::UserProfile;
use crate::domain::technical::TechnicalData;

/// Response to `POST /api/agent/start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: String,
    pub message: String,
}

impl From<StartedSession> for StartSessionResponse {
    fn from(started: StartedSession) -> Self {
        Self {
            session_id: started.session_id.to_string(),
            message: started.message,
        }
    }
}

/// Request body of `POST /api/agent/message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMessageRequest {
    pub session_id: String,
    #[serde(default)]
    pub message: String,
}

/// Response to `POST /api/agent/message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMessageResponse {
    pub message: String,
    pub is_complete: bool,
    pub progress: u8,
}

/// Response to `GET /api/agent/status/:id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub session_id: String,
    pub stage: String,
    pub progress: u8,
    pub profile: UserProfile,
    pub technical: Option<TechnicalData>,
    pub analysis: Option<AnalysisResult>,
    pub calculations: Option<CalculationResult>,
}

impl From<SessionStatus> for StatusResponse {
    fn from(status: SessionStatus) -> Self {
        Self {
            session_id: status.session_id.to_string(),
            stage: status.stage.to_string(),
            progress: status.progress,
            profile: status.profile,
            technical: status.technical,
            analysis: status.analysis,
            calculations: status.calculations,
        }
    }
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_request_defaults_missing_message_to_empty() {
        let request: AgentMessageRequest =
            serde_json::from_str(r#"{"sessionId": "abc"}"#).unwrap();
        assert_eq!(request.message, "");
    }

    #[test]
    fn message_response_uses_camel_case() {
        let response = AgentMessageResponse {
            message: "hi".to_string(),
            is_complete: true,
            progress: 100,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"isComplete\":true"));
        assert!(json.contains("\"progress\":100"));
    }
}
