//! Conversation transcript model.

use serde::{Deserialize, Serialize};

/// Greeting seeded into every new transcript.
pub const GREETING_TEXT: &str = "Hello! I'm your creative AI assistant. How can I help you today?";

/// Terminal model turn shown when a streamed reply fails.
pub const APOLOGY_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// Author of a turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, text: text.into() }
    }
}

/// Ordered sequence of turns as the user sees it.
///
/// Role alternation is a usage convention, not something this type enforces.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conversation {
    pub turns: Vec<Turn>,
}

impl Conversation {
    /// New transcript containing only the greeting turn.
    pub fn seeded() -> Self {
        Self { turns: vec![Turn::model(GREETING_TEXT)] }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::user(text));
    }

    /// Open an empty model turn that streamed chunks are appended to.
    pub fn begin_model_turn(&mut self) {
        self.turns.push(Turn::model(String::new()));
    }

    /// Append a streamed fragment to the trailing model turn.
    pub fn append_to_model_turn(&mut self, chunk: &str) {
        match self.turns.last_mut() {
            Some(turn) if turn.role == Role::Model => turn.text.push_str(chunk),
            _ => self.turns.push(Turn::model(chunk)),
        }
    }

    /// Replace the trailing model turn (partial or empty) with the apology.
    pub fn fail_model_turn(&mut self) {
        match self.turns.last_mut() {
            Some(turn) if turn.role == Role::Model => turn.text = APOLOGY_TEXT.to_string(),
            _ => self.turns.push(Turn::model(APOLOGY_TEXT)),
        }
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
