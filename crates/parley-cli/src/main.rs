//! Parley CLI - chat with models on a local Ollama server.

use clap::{Parser, Subcommand};
use parley_client::{ClientConfig, OllamaClient};
use std::time::Duration;

mod commands;

/// Parley - a terminal chat client for a local Ollama server
#[derive(Parser)]
#[command(name = "parley")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ollama server URL (default: PARLEY_OLLAMA_URL or http://localhost:11434)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Seconds to wait for a chat reply (default: wait indefinitely)
    #[arg(long, global = true)]
    chat_timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show server status and installed models
    Status,

    /// List catalog models with their install status
    Models,

    /// Show details about a model
    Info {
        /// Model identifier, e.g. llama2:13b
        model: String,
    },

    /// Download a model to the server
    Pull {
        /// Model identifier, e.g. llama2:13b
        model: String,
    },

    /// Start an interactive chat
    Chat {
        /// Model to chat with (default: first catalog model)
        #[arg(short, long)]
        model: Option<String>,
    },
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.url {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = self.chat_timeout {
            config.chat_timeout = Some(Duration::from_secs(secs));
        }
        config
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let client = OllamaClient::new(cli.client_config());
    let command = cli.command;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| miette::miette!("Failed to start async runtime: {}", e))?;

    runtime.block_on(commands::require_server(&client))?;

    runtime.block_on(async move {
        match command {
            Commands::Status => commands::status::run(&client).await,
            Commands::Models => commands::models::list(&client).await,
            Commands::Info { model } => commands::models::info(&client, &model).await,
            Commands::Pull { model } => commands::pull::run(&client, &model).await,
            Commands::Chat { model } => commands::chat::run(&client, model).await,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "parley",
            "--url",
            "http://gpu-box:11434/",
            "--chat-timeout",
            "90",
            "chat",
            "--model",
            "mistral",
        ]);
        let config = cli.client_config();
        assert_eq!(config.base_url, "http://gpu-box:11434");
        assert_eq!(config.chat_timeout, Some(Duration::from_secs(90)));
        assert!(matches!(cli.command, Commands::Chat { model: Some(ref m) } if m == "mistral"));
    }
}
