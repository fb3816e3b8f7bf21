//! Conversation stage state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Phase of the advisory conversation pipeline.
///
/// Stages only ever advance forward; a stage that reported incomplete is
/// re-entered on the next user turn without a transition. `Report` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    DataCollection,
    Analysis,
    Calculation,
    Report,
}

impl ConversationStage {
    /// The stage that follows this one, if any.
    pub fn next(&self) -> Option<ConversationStage> {
        match self {
            ConversationStage::DataCollection => Some(ConversationStage::Analysis),
            ConversationStage::Analysis => Some(ConversationStage::Calculation),
            ConversationStage::Calculation => Some(ConversationStage::Report),
            ConversationStage::Report => None,
        }
    }
}

impl StateMachine for ConversationStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.next().as_ref() == Some(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.next().into_iter().collect()
    }
}

impl fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConversationStage::DataCollection => "data_collection",
            ConversationStage::Analysis => "analysis",
            ConversationStage::Calculation => "calculation",
            ConversationStage::Report => "report",
        };
        write!(f, "{}", s)
    }
}
