//! In-memory conversation state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::registry::InstalledModels;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A conversation with one selected model.
///
/// Turns are append-only. Switching models keeps the history, and a failed
/// exchange leaves the user turn in place without a reply.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    model: String,
    turns: Vec<Turn>,
}

impl ChatSession {
    /// Create an empty session for `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            turns: Vec::new(),
        }
    }

    /// Get the selected model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Switch to another model without touching the history.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    /// Gate a send on the selected model being installed.
    ///
    /// [`OllamaClient::send_turn`](crate::OllamaClient::send_turn) does not
    /// check this itself; callers run it against a fresh installed set.
    pub fn ensure_available(&self, installed: &InstalledModels) -> Result<(), ChatError> {
        if installed.contains(&self.model) {
            Ok(())
        } else {
            Err(ChatError::Unavailable(self.model.clone()))
        }
    }

    /// All turns in the order they were appended.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Content of the most recent assistant turn.
    pub fn last_reply(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::Assistant)
            .map(|turn| turn.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub(crate) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}
