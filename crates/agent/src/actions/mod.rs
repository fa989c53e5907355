//! Marketing actions the agent can invoke

pub mod campaign;
pub mod content;
pub mod platform;
pub mod schedule;
pub mod templates;

pub use campaign::{CampaignAnalyzer, CampaignDataset, DatasetError};
pub use content::{ContentGenerator, ContentRequest};
pub use schedule::{ContentScheduler, ScheduleRequest};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::extract::ActionDescriptor;
use crate::{ActionError, Result};

/// A capability exposed to the model
pub trait MarketingAction: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &str;
    /// Example `function_parms` shown in the system prompt
    fn example(&self) -> Value;
    fn execute(&self, params: &Map<String, Value>) -> Result<Value>;
}

/// Decode a parameter mapping into a capability's argument struct
pub(crate) fn parse_params<T: DeserializeOwned>(
    action: &str,
    params: &Map<String, Value>,
) -> Result<T> {
    serde_json::from_value(Value::Object(params.clone())).map_err(|e| {
        ActionError::InvalidArguments {
            action: action.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Closed set of actions, plus whatever else the model asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    AnalyzeCampaignData,
    GenerateContent,
    ScheduleContent,
    Unknown(String),
}

impl ActionKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "analyze_campaign_data" => ActionKind::AnalyzeCampaignData,
            "generate_content" => ActionKind::GenerateContent,
            "schedule_content" => ActionKind::ScheduleContent,
            other => ActionKind::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ActionKind::AnalyzeCampaignData => "analyze_campaign_data",
            ActionKind::GenerateContent => "generate_content",
            ActionKind::ScheduleContent => "schedule_content",
            ActionKind::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ActionKind::Unknown(_))
    }
}

/// The three marketing capabilities
pub struct ActionRegistry {
    analyzer: CampaignAnalyzer,
    generator: ContentGenerator,
    scheduler: ContentScheduler,
}

impl ActionRegistry {
    pub fn new(dataset: CampaignDataset) -> Self {
        Self {
            analyzer: CampaignAnalyzer::new(dataset),
            generator: ContentGenerator::new(),
            scheduler: ContentScheduler::new(),
        }
    }

    pub fn get(&self, kind: &ActionKind) -> Option<&dyn MarketingAction> {
        match kind {
            ActionKind::AnalyzeCampaignData => Some(&self.analyzer),
            ActionKind::GenerateContent => Some(&self.generator),
            ActionKind::ScheduleContent => Some(&self.scheduler),
            ActionKind::Unknown(_) => None,
        }
    }

    /// Registered actions in prompt order
    pub fn actions(&self) -> [&dyn MarketingAction; 3] {
        [&self.analyzer, &self.generator, &self.scheduler]
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.actions().iter().map(|a| a.name()).collect()
    }

    pub fn has(&self, name: &str) -> bool {
        ActionKind::from_name(name).is_known()
    }

    pub fn campaigns(&self) -> &CampaignDataset {
        self.analyzer.dataset()
    }

    pub fn execute(&self, kind: &ActionKind, params: &Map<String, Value>) -> Result<Value> {
        let action = self
            .get(kind)
            .ok_or_else(|| ActionError::UnknownAction(kind.name().to_string()))?;
        debug!("Executing action: {}", action.name());
        action.execute(params)
    }

    /// Run a descriptor, folding any failure into an `{"error": ...}` value
    pub fn dispatch(&self, descriptor: &ActionDescriptor) -> Value {
        let kind = ActionKind::from_name(&descriptor.name);
        match self.execute(&kind, &descriptor.parameters) {
            Ok(value) => value,
            Err(e) => {
                warn!("Action {} failed: {}", descriptor.name, e);
                e.to_value()
            }
        }
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new(CampaignDataset::builtin())
    }
}
