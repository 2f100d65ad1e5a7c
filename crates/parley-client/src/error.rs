//! Error types for Ollama client operations.

use thiserror::Error;

/// Errors from talking to the Ollama server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error response.
    #[error("Ollama API error: {0}")]
    Api(String),

    /// Server is not running or not reachable.
    #[error("Ollama server not running at {0}. Start it with: ollama serve")]
    ServerNotRunning(String),

    /// The pull stream did not reach the success marker.
    #[error("Failed to pull model: {0}")]
    PullFailed(String),
}

/// Errors surfaced by a chat exchange.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The session's model is not installed on the server.
    #[error("Model '{0}' is not installed. Pull it with: parley pull {0}")]
    Unavailable(String),

    /// The server did not produce a reply.
    #[error("Error generating response: {0}")]
    GenerationFailed(String),
}

impl From<ClientError> for ChatError {
    fn from(err: ClientError) -> Self {
        ChatError::GenerationFailed(err.to_string())
    }
}
