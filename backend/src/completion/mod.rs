//! External completion collaborator
//!
//! Optional chat-completion service used instead of the local matcher when
//! an API key is configured. Any failure here is absorbed by the caller.

pub mod client;
pub mod error;
pub mod types;

pub use client::OpenAiCompatibleClient;
pub use error::CompletionError;

use async_trait::async_trait;

/// A service that turns one user message into one reply
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a reply for `user_text`, authenticating with `api_key`
    async fn complete(&self, api_key: &str, user_text: &str) -> Result<String, CompletionError>;
}
