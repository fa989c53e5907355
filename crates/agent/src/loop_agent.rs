//! Agent loop - bounded Thought / Action / Action_Response cycle

use tracing::{debug, error, info, warn};

use marketeer_provider::{ChatParams, Provider};

use crate::actions::{ActionKind, ActionRegistry};
use crate::context::ContextBuilder;
use crate::conversation::{ConversationState, ACTION_RESPONSE_PREFIX};
use crate::extract::find_action;

/// Default number of dispatches allowed per query
pub const DEFAULT_MAX_TURNS: u32 = 5;

/// Where the loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    AwaitingUserInput,
    Thinking,
    Dispatching,
    Done,
}

/// Progress reported to the caller while a query runs
#[derive(Debug, Clone, PartialEq)]
pub enum LoopEvent {
    Thinking { turn: u32, max: u32 },
    ModelReply(String),
    Executing(String),
    /// Serialized `Action_Response: ...` line appended to the conversation
    ActionResult(String),
    UnknownAction(String),
    BackendError(String),
    TurnBudgetExhausted,
}

/// Why a query stopped
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    Answered,
    UnknownAction(String),
    TurnBudgetExhausted,
    BackendError(String),
}

/// Result of one user query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub answer: String,
    /// Turn counter when the query stopped (starts at 1)
    pub turns: u32,
    pub dispatches: u32,
    pub termination: Termination,
}

/// The agent loop owns the backend, the actions and the conversation
pub struct AgentLoop<P: Provider> {
    provider: P,
    model: String,
    max_turns: u32,
    max_tokens: u32,
    temperature: f32,
    registry: ActionRegistry,
    conversation: ConversationState,
    state: LoopState,
}

impl<P: Provider> AgentLoop<P> {
    /// Create a loop whose conversation is seeded with the system prompt
    pub fn new(provider: P, model: impl Into<String>, registry: ActionRegistry) -> Self {
        let system_prompt = ContextBuilder::new(&registry).build_system_prompt();
        Self {
            provider,
            model: model.into(),
            max_turns: DEFAULT_MAX_TURNS,
            max_tokens: ChatParams::default().max_tokens,
            temperature: ChatParams::default().temperature,
            registry,
            conversation: ConversationState::new(system_prompt),
            state: LoopState::AwaitingUserInput,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }

    /// `Done` between a finished query and the next input
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    /// Whether a line of user input ends the session
    pub fn is_exit_command(input: &str) -> bool {
        input.trim().eq_ignore_ascii_case("exit")
    }

    pub async fn process_query(&mut self, input: &str) -> QueryOutcome {
        self.process_query_with(input, |_| {}).await
    }

    /// Run one query to completion, reporting progress to `observer`
    pub async fn process_query_with<F>(&mut self, input: &str, mut observer: F) -> QueryOutcome
    where
        F: FnMut(&LoopEvent),
    {
        info!("Processing query: {}", preview(input));
        self.conversation.push_user(input);

        let mut turn: u32 = 1;
        let mut dispatches: u32 = 0;
        let mut last_reply = String::new();

        let outcome = loop {
            if turn > self.max_turns {
                warn!("Turn budget of {} exhausted", self.max_turns);
                observer(&LoopEvent::TurnBudgetExhausted);
                break QueryOutcome {
                    answer: last_reply,
                    turns: turn,
                    dispatches,
                    termination: Termination::TurnBudgetExhausted,
                };
            }

            self.state = LoopState::Thinking;
            debug!("Agent turn {}/{}", turn, self.max_turns);
            observer(&LoopEvent::Thinking {
                turn,
                max: self.max_turns,
            });

            let params = ChatParams {
                model: self.model.clone(),
                messages: self.conversation.messages().to_vec(),
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            };

            let reply = match self.provider.chat(params).await {
                Ok(response) => response.content_or_empty().to_string(),
                Err(e) => {
                    error!("Model call failed: {}", e);
                    let message = format!("Error generating response: {}", e);
                    observer(&LoopEvent::BackendError(message.clone()));
                    break QueryOutcome {
                        answer: message,
                        turns: turn,
                        dispatches,
                        termination: Termination::BackendError(e.to_string()),
                    };
                }
            };
            observer(&LoopEvent::ModelReply(reply.clone()));

            let Some(descriptor) = find_action(&reply) else {
                self.conversation.push_assistant(reply.clone());
                break QueryOutcome {
                    answer: reply,
                    turns: turn,
                    dispatches,
                    termination: Termination::Answered,
                };
            };

            let kind = ActionKind::from_name(&descriptor.name);
            if !kind.is_known() {
                warn!("Model requested unknown action: {}", descriptor.name);
                observer(&LoopEvent::UnknownAction(descriptor.name.clone()));
                break QueryOutcome {
                    answer: format!("Unknown action: {}", descriptor.name),
                    turns: turn,
                    dispatches,
                    termination: Termination::UnknownAction(descriptor.name),
                };
            }

            self.state = LoopState::Dispatching;
            info!("Dispatching action: {}", kind.name());
            observer(&LoopEvent::Executing(kind.name().to_string()));

            let result = self.registry.dispatch(&descriptor);
            self.conversation.push_assistant(reply.clone());
            self.conversation.push_action_response(&result);
            dispatches += 1;
            observer(&LoopEvent::ActionResult(format!(
                "{}{}",
                ACTION_RESPONSE_PREFIX, result
            )));

            last_reply = reply;
            turn += 1;
        };

        debug!(
            "Query finished after {} dispatches: {:?}",
            outcome.dispatches, outcome.termination
        );
        self.state = LoopState::Done;
        outcome
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(100) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
