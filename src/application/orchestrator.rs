//! Orchestrator: the conversation state machine.
//!
//! Routes each inbound message to the handler for the session's current
//! stage and chains auto-advances: while a handler reports complete the
//! next stage runs immediately on the same session, no further user input
//! required. The chain stops at the first incomplete response or once the
//! report is produced. Each transition persists the session before the
//! next handler runs.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::analysis::AnalysisResult;
use crate::domain::economics::CalculationResult;
use crate::domain::foundation::SessionId;
use crate::domain::profile::UserProfile;
use crate::domain::session::{ConversationStage, Session};
use crate::domain::technical::TechnicalData;
use crate::ports::{SessionStore, SessionStoreError};

use super::stages::{
    AnalysisStage, CalculationStage, DataCollectionStage, ReportStage, StageResponse,
};

/// One turn's answer to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResponse {
    pub session_id: SessionId,
    pub message: String,
    pub is_complete: bool,
    pub progress: u8,
}

/// Result of starting a session: the id plus the welcome prompt.
#[derive(Debug, Clone)]
pub struct StartedSession {
    pub session_id: SessionId,
    pub message: String,
}

/// Full snapshot of a session for the status endpoint.
#[derive(Debug, Clone)]
pub struct SessionStatus {
    pub session_id: SessionId,
    pub stage: ConversationStage,
    pub progress: u8,
    pub profile: UserProfile,
    pub technical: Option<TechnicalData>,
    pub analysis: Option<AnalysisResult>,
    pub calculations: Option<CalculationResult>,
}

/// Orchestrator failures. Stage-level problems never appear here; stages
/// degrade internally and always return a normal response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

impl OrchestratorError {
    /// True when the failure is an unknown session id.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrchestratorError::Store(SessionStoreError::NotFound(_)))
    }
}

/// The conversation pipeline driver.
///
/// Holds no session state of its own; everything lives in the store and is
/// addressed by id.
pub struct Orchestrator {
    store: Arc<dyn SessionStore>,
    data_collection: DataCollectionStage,
    analysis: AnalysisStage,
    calculation: CalculationStage,
    report: ReportStage,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        data_collection: DataCollectionStage,
        analysis: AnalysisStage,
        calculation: CalculationStage,
        report: ReportStage,
    ) -> Self {
        Self {
            store,
            data_collection,
            analysis,
            calculation,
            report,
        }
    }

    /// Creates a session and primes it with an empty-message data
    /// collection turn, returning the welcome prompt.
    pub async fn start_session(&self) -> Result<StartedSession, OrchestratorError> {
        let session = self.store.create().await;
        let session_id = session.id();
        debug!(%session_id, "session started");

        let response = self.process_message(session_id, "").await?;

        Ok(StartedSession {
            session_id,
            message: response.message,
        })
    }

    /// Runs one conversation turn as a single serialized read-modify-write
    /// transaction over the session.
    #[instrument(skip_all, fields(%session_id))]
    pub async fn process_message(
        &self,
        session_id: SessionId,
        text: &str,
    ) -> Result<AgentResponse, OrchestratorError> {
        // Held for the whole turn; concurrent turns for the same id queue
        // up here instead of interleaving.
        let _turn = self.store.turn_lock(session_id).await?;

        let mut session = self.store.get(session_id).await?;
        let mut input = text;

        let response = loop {
            let response = self.run_stage(&mut session, input).await;

            if !response.is_complete || session.stage() == ConversationStage::Report {
                break response;
            }

            match session.advance_stage() {
                Ok(stage) => debug!(%session_id, %stage, "stage advanced"),
                Err(_) => break response,
            }
            self.store.update(session.clone()).await?;

            // Chained stages run without new user input.
            input = "";
        };

        self.store.update(session).await?;

        Ok(AgentResponse {
            session_id,
            message: response.message,
            is_complete: response.is_complete,
            progress: response.progress,
        })
    }

    /// Snapshot of the session: stage, progress, and full state copies.
    pub async fn status(&self, session_id: SessionId) -> Result<SessionStatus, OrchestratorError> {
        let session = self.store.get(session_id).await?;

        let progress = match session.stage() {
            ConversationStage::DataCollection => session.profile.collection_progress(),
            ConversationStage::Analysis => 50,
            ConversationStage::Calculation => 75,
            ConversationStage::Report => 100,
        };

        Ok(SessionStatus {
            session_id,
            stage: session.stage(),
            progress,
            profile: session.profile,
            technical: session.technical,
            analysis: session.analysis,
            calculations: session.calculations,
        })
    }

    async fn run_stage(&self, session: &mut Session, text: &str) -> StageResponse {
        match session.stage() {
            ConversationStage::DataCollection => self.data_collection.handle(session, text).await,
            ConversationStage::Analysis => self.analysis.handle(session).await,
            ConversationStage::Calculation => self.calculation.handle(session),
            ConversationStage::Report => self.report.handle(session).await,
        }
    }
}
