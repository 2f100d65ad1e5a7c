//! Client configuration.

use std::time::Duration;

use crate::DEFAULT_OLLAMA_URL;

/// Configuration for the Ollama client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Ollama server base URL
    pub base_url: String,
    /// Timeout for the reachability probe
    pub health_timeout: Duration,
    /// Overall timeout for a streamed model pull
    pub pull_timeout: Duration,
    /// Timeout for a chat request (`None` waits indefinitely)
    pub chat_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            health_timeout: Duration::from_secs(5),
            pull_timeout: Duration::from_secs(300),
            chat_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup("PARLEY_OLLAMA_URL")
            .or_else(|| lookup("OLLAMA_HOST").map(normalize_host))
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let chat_timeout = lookup("PARLEY_CHAT_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .or(defaults.chat_timeout);

        let pull_timeout = lookup("PARLEY_PULL_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.pull_timeout);

        Self {
            base_url,
            health_timeout: defaults.health_timeout,
            pull_timeout,
            chat_timeout,
        }
    }

    /// Create a builder for configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// `OLLAMA_HOST` is often just `host:port`.
fn normalize_host(host: String) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host
    } else {
        format!("http://{}", host)
    }
}

/// Builder for client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.config.health_timeout = timeout;
        self
    }

    pub fn pull_timeout(mut self, timeout: Duration) -> Self {
        self.config.pull_timeout = timeout;
        self
    }

    pub fn chat_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.chat_timeout = timeout;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
