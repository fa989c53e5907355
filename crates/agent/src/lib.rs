//! Marketing workflow agent core
//!
//! Conversation state, the JSON action extractor, the action registry and
//! the bounded agent loop that ties them to a model backend.

use serde_json::{json, Value};
use thiserror::Error;

pub mod actions;
pub mod context;
pub mod conversation;
pub mod extract;
pub mod loop_agent;

pub use actions::{ActionKind, ActionRegistry, MarketingAction};
pub use context::ContextBuilder;
pub use conversation::ConversationState;
pub use extract::{extract_json, find_action, ActionDescriptor, JsonCandidates};
pub use loop_agent::{AgentLoop, LoopEvent, LoopState, QueryOutcome, Termination};

/// Coarse classification of action failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
}

/// Failures raised by action capabilities.
///
/// These never cross the dispatch boundary as errors: the registry folds
/// them into a structured `{"error": ...}` value for the conversation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Campaign '{campaign_id}' not found")]
    CampaignNotFound {
        campaign_id: String,
        available: Vec<String>,
    },

    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid arguments for {action}: {reason}")]
    InvalidArguments { action: String, reason: String },
}

impl ActionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::CampaignNotFound { .. } | ActionError::UnknownAction(_) => {
                ErrorKind::NotFound
            }
            ActionError::Validation(_) | ActionError::InvalidArguments { .. } => {
                ErrorKind::Validation
            }
        }
    }

    /// Structured error value handed back to the model
    pub fn to_value(&self) -> Value {
        match self {
            ActionError::CampaignNotFound { available, .. } => json!({
                "error": self.to_string(),
                "available_campaigns": available,
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }
}

pub type Result<T> = std::result::Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let not_found = ActionError::CampaignNotFound {
            campaign_id: "x".to_string(),
            available: vec![],
        };
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(
            ActionError::UnknownAction("x".to_string()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ActionError::Validation("bad".to_string()).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_not_found_value_lists_campaigns() {
        let err = ActionError::CampaignNotFound {
            campaign_id: "spring".to_string(),
            available: vec!["a".to_string(), "b".to_string()],
        };
        let value = err.to_value();
        assert_eq!(value["error"], "Campaign 'spring' not found");
        assert_eq!(value["available_campaigns"], json!(["a", "b"]));
    }

    #[test]
    fn test_validation_value() {
        let value = ActionError::Validation("Cannot schedule content in the past".to_string())
            .to_value();
        assert_eq!(value, json!({"error": "Cannot schedule content in the past"}));
    }
}
