//! Ollama API client: reachability probe and installed-model listing.
//!
//! Model pulls live in `pull.rs` and chat exchanges in `chat.rs`; both are
//! further `impl OllamaClient` blocks.

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::registry::{InstalledModels, TagsResponse};

/// Ollama API client.
pub struct OllamaClient {
    pub(crate) client: reqwest::Client,
    pub(crate) config: ClientConfig,
}

impl OllamaClient {
    /// Create a new client from configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a new client against a custom URL with default timeouts.
    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self::new(ClientConfig::builder().base_url(base_url).build())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Connection failures mean the server is down; anything else is kept.
    pub(crate) fn request_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_connect() {
            ClientError::ServerNotRunning(self.config.base_url.clone())
        } else {
            ClientError::Http(err)
        }
    }

    /// Probe the tag listing with the health timeout.
    pub async fn check_health(&self) -> Result<(), ClientError> {
        let response = self
            .client
            .get(self.endpoint("/api/tags"))
            .timeout(self.config.health_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::ServerNotRunning(self.config.base_url.clone())
                } else {
                    self.request_error(e)
                }
            })?;

        if response.status() == reqwest::StatusCode::OK {
            Ok(())
        } else {
            Err(ClientError::ServerNotRunning(self.config.base_url.clone()))
        }
    }

    /// Check if the Ollama server is reachable. Never fails.
    pub async fn is_server_up(&self) -> bool {
        match self.check_health().await {
            Ok(()) => true,
            Err(e) => {
                debug!("Health probe failed: {}", e);
                false
            }
        }
    }

    /// Query the server for installed models.
    pub async fn fetch_installed_models(&self) -> Result<InstalledModels, ClientError> {
        let response = self
            .client
            .get(self.endpoint("/api/tags"))
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        if response.status() != reqwest::StatusCode::OK {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(format!("{}: {}", status, text)));
        }

        let body = response.bytes().await?;
        let tags: TagsResponse = serde_json::from_slice(&body)?;
        Ok(InstalledModels::from(tags))
    }

    /// Installed models, or an empty set if the listing failed for any reason.
    pub async fn list_installed_models(&self) -> InstalledModels {
        match self.fetch_installed_models().await {
            Ok(installed) => {
                debug!("Server reports {} installed model(s)", installed.len());
                installed
            }
            Err(e) => {
                warn!("Could not list installed models: {}", e);
                InstalledModels::default()
            }
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
