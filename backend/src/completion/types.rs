//! Chat-completion wire types
//!
//! Request and response bodies of an OpenAI-compatible
//! `/chat/completions` endpoint.

use serde::{Deserialize, Serialize};

/// Request body
#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// System prompt followed by the user message
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f32,
    /// Reply length limit
    pub max_tokens: u32,
}

/// One message in a request or response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// "system", "user" or "assistant"
    pub role: String,
    /// Message text
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    /// System-role message
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    /// User-role message
    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// Response body
#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    /// Generated candidates; the first one is used
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A single generated candidate
#[derive(Deserialize, Debug)]
pub struct Choice {
    /// The generated message
    pub message: ChatMessage,
}
