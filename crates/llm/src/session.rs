//! Conversation memory carried between chat turns.
//!
//! A `ChatSession` records every question and reply in order. Requests sent
//! with the session's turns as history let the model resolve follow-ups
//! such as "and what about the deposit?".

use lexibot_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One message of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// Ordered history of a conversation with the assistant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatSession {
    #[serde(default)]
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append a completed exchange. Failed calls are never recorded, so the
    /// history always alternates user and model turns.
    pub fn record_exchange(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(ChatTurn::user(question));
        self.turns.push(ChatTurn::model(answer));
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Load a session saved with [`ChatSession::save`]. A missing file is a
    /// new, empty conversation.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!("No session at {:?}, starting a new conversation", path);
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Other(format!("Failed to read session {:?}: {}", path, e)))?;
        let session: Self = serde_json::from_str(&content)?;

        tracing::debug!("Loaded session with {} turns from {:?}", session.len(), path);
        Ok(session)
    }

    /// Write the session as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;

        tracing::debug!("Saved session with {} turns to {:?}", self.len(), path);
        Ok(())
    }
}
