//! Session aggregate: one conversation's accumulated state.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::AnalysisResult;
use crate::domain::economics::CalculationResult;
use crate::domain::foundation::{SessionId, StateMachine, Timestamp, ValidationError};
use crate::domain::profile::UserProfile;
use crate::domain::technical::TechnicalData;

use super::ConversationStage;

/// All state owned by one advisory conversation.
///
/// The orchestrator never keeps session state itself; everything a stage
/// produces lives here and is persisted through the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    stage: ConversationStage,
    pub profile: UserProfile,
    pub technical: Option<TechnicalData>,
    pub analysis: Option<AnalysisResult>,
    pub calculations: Option<CalculationResult>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Creates a fresh session at the DataCollection stage.
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    /// Creates a fresh session with a caller-supplied id.
    pub fn with_id(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            stage: ConversationStage::DataCollection,
            profile: UserProfile::default(),
            technical: None,
            analysis: None,
            calculations: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn stage(&self) -> ConversationStage {
        self.stage
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Advances to the next stage, enforcing forward-only transitions.
    pub fn advance_stage(&mut self) -> Result<ConversationStage, ValidationError> {
        let target = self.stage.next().ok_or_else(|| {
            ValidationError::invalid_format("stage", "Report is the terminal stage")
        })?;
        self.stage = self.stage.transition_to(target)?;
        Ok(self.stage)
    }

    /// Records fetched technical data.
    ///
    /// Technical data is fetched exactly once per session; a second call is
    /// a no-op so a re-entered stage can never overwrite it.
    pub fn attach_technical(&mut self, data: TechnicalData) {
        if self.technical.is_none() {
            self.technical = Some(data);
        }
    }

    /// Refreshes the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
