//! LLM request types
//!
//! These model the OpenAI-style chat completions API: one system message,
//! one user message, max_tokens, temperature. Each request is a complete,
//! self-contained conversation - no state survives between calls.

use serde::{Deserialize, Serialize};

/// Per-operation temperature defaults
///
/// Questions and suggestions want some variety; sections want focus; titles
/// can afford to be playful.
pub mod temperature {
    pub const QUESTION: f64 = 0.7;
    pub const SECTIONS: f64 = 0.6;
    pub const TITLE: f64 = 0.8;
    pub const SUGGESTIONS: f64 = 0.7;
    pub const ASSISTANT: f64 = 0.7;
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Everything needed for one gateway call
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Label identifying the calling operation ("first_question",
    /// "plan_sections", ...), used only for the per-call log event
    pub context: &'static str,

    /// System prompt rendered by the PromptBuilder
    pub system: String,

    /// User prompt rendered by the PromptBuilder
    pub user: String,

    /// Max tokens for the response
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f64,
}

impl ChatRequest {
    pub fn new(context: &'static str, system: String, user: String, max_tokens: u32, temperature: f64) -> Self {
        Self {
            context,
            system,
            user,
            max_tokens,
            temperature,
        }
    }

    /// Messages in wire order: system first, then user
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![ChatMessage::system(self.system.clone()), ChatMessage::user(self.user.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_order() {
        let request = ChatRequest::new("test", "be brief".to_string(), "hello".to_string(), 100, 0.7);
        let messages = request.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "be brief");
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "hello");
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }
}
