//! Chat data models
//!
//! Defines the conversation log entries and the outcome of a send.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Message typed by the visitor
    User,
    /// Reply from EcoBot
    Bot,
}

impl Sender {
    /// Convert the sender to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A single entry of the conversation log
///
/// Messages are appended once and never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Message text
    pub text: String,
    /// Author of the message
    pub sender: Sender,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    /// Create a message stamped with the current time
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// Message from the visitor
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Message from the bot
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }
}

/// Non-fatal notice shown next to a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notification {
    /// The completion service rejected the API key
    InvalidCredentials,
    /// The completion service failed; offline answers were used
    OfflineFallback,
}

impl Notification {
    /// User-facing text (Portuguese)
    pub fn message(&self) -> &'static str {
        match self {
            Notification::InvalidCredentials => {
                "Chave de API inválida. Usando respostas offline."
            }
            Notification::OfflineFallback => {
                "Não foi possível contatar o assistente online. Usando respostas offline."
            }
        }
    }
}

/// Result of one `send` call
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Input was empty or whitespace only; nothing happened
    Ignored,
    /// A reply is still being prepared; the send was rejected
    Busy,
    /// The widget is closed
    Closed,
    /// The widget closed while the reply was being prepared; nothing was appended
    Discarded,
    /// A bot reply was appended to the log
    Replied {
        /// The appended bot message
        reply: ConversationMessage,
        /// Notice to surface alongside the reply, if any
        notification: Option<Notification>,
    },
}

impl SendOutcome {
    /// Short machine-readable label
    pub fn status(&self) -> &'static str {
        match self {
            SendOutcome::Ignored => "ignored",
            SendOutcome::Busy => "busy",
            SendOutcome::Closed => "closed",
            SendOutcome::Discarded => "discarded",
            SendOutcome::Replied { .. } => "replied",
        }
    }
}
