//! Marketeer - a marketing workflow agent

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{chat_command, init_command, status_command, ChatOptions};

/// Marketeer - marketing workflow agent for your terminal
#[derive(Parser)]
#[command(name = "marketeer")]
#[command(about = "Analyze campaigns, draft content and schedule posts with an AI agent")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Config file (defaults to ~/.marketeer/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Model id, overriding config and environment
    #[arg(short, long)]
    model: Option<String>,

    /// Maximum actions the agent may run per request
    #[arg(long)]
    max_turns: Option<u32>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init,
    /// Show configuration status
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so the conversation on stdout stays readable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Init) => {
            if let Err(e) = init_command(cli.config).await {
                error!("Init failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Status) => {
            if let Err(e) = status_command(cli.config).await {
                error!("Status failed: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            let options = ChatOptions {
                config: cli.config,
                model: cli.model,
                max_turns: cli.max_turns,
            };
            if let Err(e) = chat_command(options).await {
                error!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}
