//! Marketeer command implementations

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use marketeer_agent::actions::CampaignDataset;
use marketeer_agent::{ActionRegistry, AgentLoop, LoopEvent};
use marketeer_config::{self, Config};
use marketeer_provider::{OpenAiProvider, Provider};

/// Flags for the interactive session
#[derive(Debug, Default)]
pub struct ChatOptions {
    pub config: Option<PathBuf>,
    pub model: Option<String>,
    pub max_turns: Option<u32>,
}

/// Load config from an explicit path (which must exist) or the default
/// location, with environment overrides applied
async fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let mut config = Config::load_existing(path)
                .await
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.apply_env();
            Ok(config)
        }
        None => Config::load().await.context("Failed to load config"),
    }
}

async fn load_dataset(config: &Config) -> Result<CampaignDataset> {
    match config.campaigns_path() {
        Some(path) => CampaignDataset::from_file(&path)
            .await
            .with_context(|| format!("Failed to load campaigns from {}", path.display())),
        None => Ok(CampaignDataset::builtin()),
    }
}

/// Interactive marketing session
pub async fn chat_command(options: ChatOptions) -> Result<()> {
    let config = load_config(options.config.as_deref()).await?;
    let dataset = load_dataset(&config).await?;

    let api_key = config.api_key().with_context(|| {
        format!(
            "No API key configured. Set {} or add one to {}",
            marketeer_config::API_KEY_ENV,
            marketeer_config::config_path().display()
        )
    })?;
    let model = options.model.unwrap_or_else(|| config.model());
    let max_turns = options.max_turns.unwrap_or_else(|| config.max_turns());

    let provider = OpenAiProvider::new(api_key, config.api_base(), Some(model.clone()));
    info!("Using model {} via {}", model, provider.api_base());

    let mut agent = AgentLoop::new(provider, model, ActionRegistry::new(dataset))
        .with_max_turns(max_turns)
        .with_sampling(config.agent.max_tokens, config.agent.temperature);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_session(&mut agent, stdin.lock(), &mut stdout).await
}

/// Prompt, answer and repeat until the exit sentinel or end of input
pub async fn run_session<P, R, W>(agent: &mut AgentLoop<P>, input: R, out: &mut W) -> Result<()>
where
    P: Provider,
    R: BufRead,
    W: Write,
{
    writeln!(out, "\n=== Marketing Workflow Agent ===")?;
    writeln!(
        out,
        "This agent can analyze campaigns, generate content, and schedule posts."
    )?;
    writeln!(out, "Type 'exit' to quit.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "\nWhat marketing task can I help you with? ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        if AgentLoop::<P>::is_exit_command(&line) {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let mut write_error = None;
        let outcome = agent
            .process_query_with(query, |event| {
                if write_error.is_none() {
                    write_error = render_event(out, event).err();
                }
            })
            .await;
        if let Some(e) = write_error {
            return Err(e.into());
        }
        debug!(
            "Query done: {} turns, {} dispatches",
            outcome.turns, outcome.dispatches
        );
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

fn render_event<W: Write>(out: &mut W, event: &LoopEvent) -> std::io::Result<()> {
    match event {
        LoopEvent::Thinking { turn, max } => {
            writeln!(out, "\n[Thinking... Step {}/{}]", turn, max)
        }
        LoopEvent::ModelReply(text) => writeln!(out, "\nWorkflow Agent: {}", text),
        LoopEvent::Executing(name) => writeln!(out, "\n[Executing {}...]", name),
        LoopEvent::ActionResult(line) => writeln!(out, "\n[Result: {}]", line),
        LoopEvent::UnknownAction(name) => writeln!(out, "Error: Unknown action '{}'", name),
        LoopEvent::BackendError(message) => writeln!(out, "\nWorkflow Agent: {}", message),
        LoopEvent::TurnBudgetExhausted => writeln!(out, "\n[Step limit reached]"),
    }
}

/// Write a default config file
pub async fn init_command(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(marketeer_config::config_path);

    println!("=== Initializing Marketeer ===");

    if path.exists() {
        println!("Config already exists at {}", path.display());
    } else {
        Config::default()
            .save_to(&path)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Created {}", path.display());
    }

    println!("\nNext steps:");
    println!(
        "  1. Add your API key to {} or export {}",
        path.display(),
        marketeer_config::API_KEY_ENV
    );
    println!("  2. Start a session: marketeer");

    Ok(())
}

/// Show configuration status
pub async fn status_command(path: Option<PathBuf>) -> Result<()> {
    let config_path = path
        .clone()
        .unwrap_or_else(marketeer_config::config_path);

    println!("=== Marketeer Status ===");
    println!(
        "Config:    {} {}",
        config_path.display(),
        if config_path.exists() {
            "[OK]"
        } else {
            "[Missing]"
        }
    );

    let config = load_config(path.as_deref()).await?;
    println!("Model:     {}", config.model());
    println!(
        "API Key:   {}",
        if config.has_api_key() {
            "[Set]"
        } else {
            "[Missing]"
        }
    );
    if let Some(base) = config.api_base() {
        println!("API Base:  {}", base);
    }
    println!("Max turns: {}", config.max_turns());

    match config.campaigns_path() {
        Some(campaigns) => match CampaignDataset::from_file(&campaigns).await {
            Ok(dataset) => println!(
                "Campaigns: {} ({} campaigns)",
                campaigns.display(),
                dataset.len()
            ),
            Err(e) => println!("Campaigns: {} [Invalid: {}]", campaigns.display(), e),
        },
        None => println!(
            "Campaigns: built-in ({} campaigns)",
            CampaignDataset::builtin().len()
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use marketeer_provider::{ChatParams, ChatResponse, ProviderError};
    use std::sync::Mutex;

    /// Replays canned replies in order
    struct ScriptedProvider {
        replies: Mutex<Vec<marketeer_provider::Result<ChatResponse>>>,
    }

    impl ScriptedProvider {
        fn new(mut replies: Vec<marketeer_provider::Result<ChatResponse>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
            }
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        async fn chat(&self, _params: ChatParams) -> marketeer_provider::Result<ChatResponse> {
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(ChatResponse::text("Answer: nothing more to do")))
        }

        fn default_model(&self) -> String {
            "scripted".to_string()
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    async fn session(provider: ScriptedProvider, input: &str) -> String {
        let mut agent = AgentLoop::new(provider, "scripted", ActionRegistry::default());
        let mut out = Vec::new();
        run_session(&mut agent, input.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_session_exit_sentinel() {
        let out = session(ScriptedProvider::new(vec![]), "EXIT\n").await;
        assert!(out.contains("=== Marketing Workflow Agent ==="));
        assert!(out.contains("What marketing task can I help you with? "));
        assert!(out.trim_end().ends_with("Goodbye!"));
        assert!(!out.contains("[Thinking"));
    }

    #[tokio::test]
    async fn test_session_ends_at_eof() {
        let out = session(ScriptedProvider::new(vec![]), "").await;
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[tokio::test]
    async fn test_session_renders_action_turn() {
        let provider = ScriptedProvider::new(vec![
            Ok(ChatResponse::text(
                r#"Action: {"function_name": "analyze_campaign_data", "function_parms": {"campaign_id": "webinar_series_2023"}} PAUSE"#,
            )),
            Ok(ChatResponse::text("Answer: attendance is excellent")),
        ]);
        let out = session(provider, "How did the webinars do?\nexit\n").await;

        assert!(out.contains("[Thinking... Step 1/5]"));
        assert!(out.contains("[Executing analyze_campaign_data...]"));
        assert!(out.contains("[Result: Action_Response: {"));
        assert!(out.contains("Excellent attendance rate"));
        assert!(out.contains("[Thinking... Step 2/5]"));
        assert!(out.contains("Workflow Agent: Answer: attendance is excellent"));
    }

    #[tokio::test]
    async fn test_session_reports_unknown_action_and_continues() {
        let provider = ScriptedProvider::new(vec![
            Ok(ChatResponse::text(
                r#"{"function_name": "send_invoice", "function_parms": {}}"#,
            )),
            Ok(ChatResponse::text("Answer: hello again")),
        ]);
        let out = session(provider, "bill them\nhello\nexit\n").await;

        assert!(out.contains("Error: Unknown action 'send_invoice'"));
        assert!(out.contains("Workflow Agent: Answer: hello again"));
    }

    #[tokio::test]
    async fn test_session_survives_backend_error() {
        let provider = ScriptedProvider::new(vec![Err(ProviderError::Unauthorized(
            "invalid key".to_string(),
        ))]);
        let out = session(provider, "analyze\nexit\n").await;

        assert!(out.contains(
            "Workflow Agent: Error generating response: authentication failed: invalid key"
        ));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[tokio::test]
    async fn test_load_config_requires_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_config(Some(&missing)).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load config"));
    }

    #[tokio::test]
    async fn test_load_dataset_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaigns.json");
        std::fs::write(&path, r#"{"fall_promo": {"open_rate": 25.0}}"#).unwrap();

        let mut config = Config::default();
        config.actions.campaigns_file = Some(path.to_string_lossy().to_string());
        let dataset = load_dataset(&config).await.unwrap();
        assert_eq!(dataset.ids(), vec!["fall_promo"]);

        assert_eq!(load_dataset(&Config::default()).await.unwrap().len(), 3);
    }
}
