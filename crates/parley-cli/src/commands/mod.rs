//! CLI commands.

use parley_client::OllamaClient;

pub mod chat;
pub mod models;
pub mod pull;
pub mod status;

/// Stop early when the Ollama server cannot be reached.
pub(crate) async fn require_server(client: &OllamaClient) -> miette::Result<()> {
    if client.is_server_up().await {
        Ok(())
    } else {
        Err(miette::miette!(
            "Ollama server is not running at {}! Please start it with: ollama serve",
            client.base_url()
        ))
    }
}

/// Marker shown next to a model name.
pub(crate) fn install_marker(installed: bool) -> &'static str {
    if installed {
        "✓"
    } else {
        "↓"
    }
}
