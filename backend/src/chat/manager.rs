//! Widget Manager
//!
//! Tracks the open chat widgets. Each open widget is one `ChatSession`;
//! closing a widget drops its conversation log.

use super::responder::Responder;
use super::session::ChatSession;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Registry of open chat widgets
pub struct WidgetManager {
    /// Map from session id to session
    sessions: RwLock<HashMap<String, Arc<ChatSession>>>,
    /// Template cloned into every new session
    responder: Responder,
    /// Current API key, handed to new sessions
    api_key: RwLock<Option<String>>,
}

impl WidgetManager {
    /// Create a manager whose widgets answer with `responder`
    pub fn new(responder: Responder, api_key: Option<String>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            responder,
            api_key: RwLock::new(api_key),
        }
    }

    /// Open a new widget and return its session
    pub async fn open(&self) -> Arc<ChatSession> {
        let id = Uuid::new_v4().to_string();
        let api_key = self.api_key.read().await.clone();
        let session = Arc::new(ChatSession::new(id.clone(), self.responder.clone(), api_key));

        self.sessions.write().await.insert(id.clone(), session.clone());

        info!(session_id = %id, "Chat widget opened");
        session
    }

    /// Look up an open widget
    pub async fn get(&self, session_id: &str) -> Option<Arc<ChatSession>> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Close a widget. Returns false if no such widget was open.
    pub async fn close(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().await.remove(session_id);
        match removed {
            Some(session) => {
                session.close();
                info!(session_id = %session_id, "Chat widget closed");
                true
            }
            None => {
                debug!(session_id = %session_id, "No open widget to close");
                false
            }
        }
    }

    /// Close every widget (for graceful shutdown)
    pub async fn close_all(&self) {
        let mut sessions = self.sessions.write().await;
        for (_, session) in sessions.drain() {
            session.close();
        }
        info!("All chat widgets closed");
    }

    /// Close widgets with no activity for longer than `max_idle`
    ///
    /// A widget that is typing a reply is never evicted. Returns how many
    /// widgets were closed.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, session| {
            if session.is_typing() || session.idle_for() <= max_idle {
                return true;
            }
            session.close();
            debug!(session_id = %id, "Evicting idle chat widget");
            false
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Idle chat widgets closed");
        }
        evicted
    }

    /// Change the API key for new and already open widgets
    pub async fn set_api_key(&self, api_key: Option<String>) {
        *self.api_key.write().await = api_key.clone();
        for session in self.sessions.read().await.values() {
            session.set_api_key(api_key.clone());
        }
    }

    /// Current API key
    pub async fn api_key(&self) -> Option<String> {
        self.api_key.read().await.clone()
    }

    /// True when an API key is configured
    pub async fn has_api_key(&self) -> bool {
        self.api_key.read().await.is_some()
    }

    /// Number of open widgets
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
