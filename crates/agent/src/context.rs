//! System prompt assembly

use chrono::{Local, NaiveDate};

use crate::actions::ActionRegistry;

const PROTOCOL: &str = r#"You run in a loop of Thought, Action, PAUSE, Action_Response.
At the end of the loop you output an Answer.

Use Thought to understand what marketing workflow the user needs help with.
Use Action to run one of the actions available to you - then return PAUSE.
Action_Response will be the result of running those actions.
Emit at most one Action JSON object per reply, in exactly the format shown."#;

const EXAMPLE_SESSION: &str = r#"Example session:

Question: Can you analyze our email campaign performance and suggest some content ideas based on the results?
Thought: I need to first analyze the email campaign data to understand its performance, then use those insights to generate relevant content.
Action:
{
  "function_name": "analyze_campaign_data",
  "function_parms": {
    "campaign_id": "email_campaign_q1"
  }
}
PAUSE

Action_Response: {"campaign_id": "email_campaign_q1", "insights": ["Open rate is above industry average (20%)", "Click rate could be improved", "Conversion rate needs improvement"], "recommendations": ["Review call-to-action clarity and placement", "Strengthen calls-to-action and landing page design"]}

Thought: The open rate is good but clicks and conversions lag. I should generate content on the theme that worked, aimed at improving those metrics.
Action:
{
  "function_name": "generate_content",
  "function_parms": {
    "topic": "AI Marketing ROI optimization",
    "audience": "Marketing Managers",
    "tone": "professional",
    "platform": "email",
    "length": "medium"
  }
}
PAUSE

Action_Response: {"topic": "AI Marketing ROI optimization", "platform": "email", "content": "Subject: New insights on AI Marketing ROI optimization for Marketing Managers ..."}

Answer: Your open rate of 22.5% is above the industry average, while the click rate (3.8%) and conversion rate (1.2%) have room to grow. I drafted an email on AI Marketing ROI optimization for Marketing Managers with a clearer call-to-action. Would you like me to schedule it?"#;

/// Builds the system prompt handed to the model
pub struct ContextBuilder<'a> {
    registry: &'a ActionRegistry,
    today: NaiveDate,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(registry: &'a ActionRegistry) -> Self {
        Self {
            registry,
            today: Local::now().date_naive(),
        }
    }

    /// Pin the date quoted in the prompt
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn build_system_prompt(&self) -> String {
        let parts = [
            "You are a Marketing Workflow Assistant that helps automate multi-step marketing tasks."
                .to_string(),
            PROTOCOL.to_string(),
            self.action_catalog(),
            format!(
                "Today's date is {}. Known campaigns: {}.",
                self.today.format("%Y-%m-%d"),
                self.registry.campaigns().ids().join(", ")
            ),
            EXAMPLE_SESSION.to_string(),
        ];
        parts.join("\n\n")
    }

    fn action_catalog(&self) -> String {
        let mut out = String::from("Your available actions are:");
        for action in self.registry.actions() {
            let example = serde_json::json!({
                "function_name": action.name(),
                "function_parms": action.example(),
            });
            out.push_str(&format!(
                "\n\n{}:\ne.g. {}\n{}",
                action.name(),
                example,
                action.description()
            ));
        }
        out
    }
}
