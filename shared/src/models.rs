//! Shared data models.

use serde::{Deserialize, Serialize};

/// Name of the assistant message that carries the vitals context.
pub const VITALS_MESSAGE_NAME: &str = "vitals";

/// Chat role understood by the model backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Assistant,
    User,
}

/// One message in the model request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            name: None,
            content: content.into(),
        }
    }

    /// Assistant message tagged `vitals`, the only source the prompt allows for personal data.
    pub fn vitals(context: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            name: Some(VITALS_MESSAGE_NAME.to_string()),
            content: context.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            name: None,
            content: content.into(),
        }
    }
}

/// Body sent to the model backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl ModelRequest {
    /// System prompt, then the vitals context, then the user's question.
    pub fn grounded(system_prompt: &str, context: &str, question: &str, max_tokens: u32) -> Self {
        Self {
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::vitals(context),
                ChatMessage::user(question),
            ],
            max_tokens,
        }
    }
}

/// Successful answer payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Error payload for validation and configuration failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
