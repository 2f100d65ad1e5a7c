//! # Parley client core
//!
//! This crate talks to a locally running Ollama server: it knows a fixed
//! catalog of model names, discovers which ones are installed, streams
//! model downloads with progress feedback, and exchanges chat turns for an
//! in-memory conversation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │  Model Catalog  │     │  OllamaClient   │ --> │  Ollama server  │
//! │  (static)       │     │  health / tags  │     │  :11434         │
//! └─────────────────┘     │  pull / chat    │     └─────────────────┘
//!                         └────────┬────────┘
//!                                  │
//!                           ┌──────┴──────┐
//!                           │ ChatSession │
//!                           └─────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use parley_client::{ChatSession, ClientConfig, OllamaClient};
//!
//! let client = OllamaClient::new(ClientConfig::default());
//! if client.is_server_up().await {
//!     let mut session = ChatSession::new("llama3");
//!     let reply = client.send_turn(&mut session, "hello").await?;
//! }
//! ```

pub mod catalog;
mod chat;
mod config;
mod error;
mod ollama;
mod pull;
mod registry;
mod session;

pub use catalog::{describe_model, is_known_model, list_available_models, ModelDescriptor};
pub use chat::{ChatReply, ChatResponse};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ChatError, ClientError};
pub use ollama::OllamaClient;
pub use pull::PullProgress;
pub use registry::{base_name, InstalledModels};
pub use session::{ChatSession, Role, Turn};

/// Default Ollama server URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Status value that marks the end of a successful pull.
pub const PULL_SUCCESS_STATUS: &str = "success";
