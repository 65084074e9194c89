//! Reply generation
//!
//! Chooses between the optional completion service and the local matcher.
//! Every failure of the completion service degrades to the matcher and a
//! [`Notification`]; nothing is propagated to the conversation.

use super::models::Notification;
use crate::completion::{CompletionClient, CompletionError};
use crate::knowledge::KnowledgeBase;
use crate::matcher;
use crate::typing::simulate_typing;
use std::sync::Arc;
use tracing::{debug, warn};

/// A generated reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply text
    pub text: String,
    /// Notice for the user, set when the completion service failed
    pub notification: Option<Notification>,
}

/// Produces replies for one widget
#[derive(Clone)]
pub struct Responder {
    knowledge: Arc<KnowledgeBase>,
    completion: Option<Arc<dyn CompletionClient>>,
    simulate_typing: bool,
}

impl Responder {
    /// Local-only responder
    pub fn local(knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            knowledge,
            completion: None,
            simulate_typing: true,
        }
    }

    /// Attach a completion service, used whenever an API key is present
    pub fn with_completion(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.completion = Some(client);
        self
    }

    /// Turn the typing delay on or off
    pub fn with_typing(mut self, enabled: bool) -> Self {
        self.simulate_typing = enabled;
        self
    }

    /// Knowledge base used for local replies
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// True when a completion service is attached
    pub fn has_completion(&self) -> bool {
        self.completion.is_some()
    }

    /// Generate a reply for `input`
    pub async fn reply(&self, input: &str, api_key: Option<&str>) -> Reply {
        let remote = match (&self.completion, api_key) {
            (Some(client), Some(key)) if !key.trim().is_empty() => Some((client, key)),
            _ => None,
        };

        let Some((client, key)) = remote else {
            return self.local_reply(input, None).await;
        };

        match client.complete(key, input).await {
            Ok(text) => Reply {
                text,
                notification: None,
            },
            Err(e) => {
                warn!(error = %e, "Completion failed, falling back to local responses");
                let notification = notification_for(&e);
                self.local_reply(input, Some(notification)).await
            }
        }
    }

    async fn local_reply(&self, input: &str, notification: Option<Notification>) -> Reply {
        let found = matcher::find_match(&self.knowledge, input);
        debug!(pass = ?found.pass, "Local response selected");

        let text = found.response.to_string();
        let text = if self.simulate_typing {
            simulate_typing(text).await
        } else {
            text
        };
        Reply { text, notification }
    }
}

fn notification_for(error: &CompletionError) -> Notification {
    if error.is_credential_error() {
        Notification::InvalidCredentials
    } else {
        Notification::OfflineFallback
    }
}
