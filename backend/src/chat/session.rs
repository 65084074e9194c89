//! Chat session
//!
//! Owns one open widget's conversation: the message log, the busy/typing
//! flag and the current API key. A send appends the user message, waits for
//! the responder and appends exactly one bot message.
//!
//! Overlapping sends are refused through the typing flag rather than queued.
//! The flag is released by a guard, so it is cleared on every exit path.

use super::models::{ConversationMessage, SendOutcome};
use super::responder::Responder;
use crate::constants::WIDGET_GREETING;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Clears the typing flag when dropped
struct TypingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> TypingGuard<'a> {
    /// Set the flag, or return `None` if it was already set
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for TypingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Conversation state of one open widget
pub struct ChatSession {
    id: String,
    responder: Responder,
    messages: Mutex<Vec<ConversationMessage>>,
    api_key: Mutex<Option<String>>,
    typing: AtomicBool,
    open: AtomicBool,
    last_active: Mutex<Instant>,
}

impl ChatSession {
    /// Open a session whose log starts with the greeting message
    pub fn new(id: impl Into<String>, responder: Responder, api_key: Option<String>) -> Self {
        Self {
            id: id.into(),
            responder,
            messages: Mutex::new(vec![ConversationMessage::bot(WIDGET_GREETING)]),
            api_key: Mutex::new(api_key),
            typing: AtomicBool::new(false),
            open: AtomicBool::new(true),
            last_active: Mutex::new(Instant::now()),
        }
    }

    /// Session identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Send one user message and wait for the bot reply
    pub async fn send(&self, input: &str) -> SendOutcome {
        if input.trim().is_empty() {
            return SendOutcome::Ignored;
        }
        if !self.is_open() {
            return SendOutcome::Closed;
        }
        let Some(_typing) = TypingGuard::acquire(&self.typing) else {
            debug!(session_id = %self.id, "Send rejected while typing");
            return SendOutcome::Busy;
        };

        self.touch();
        self.log().push(ConversationMessage::user(input));

        let api_key = self.api_key();
        let reply = self.responder.reply(input, api_key.as_deref()).await;

        if !self.is_open() {
            debug!(session_id = %self.id, "Widget closed before reply was ready");
            return SendOutcome::Discarded;
        }

        let message = ConversationMessage::bot(reply.text);
        self.log().push(message.clone());
        self.touch();

        info!(
            session_id = %self.id,
            reply_len = message.text.len(),
            notification = ?reply.notification,
            "Bot reply appended"
        );

        SendOutcome::Replied {
            reply: message,
            notification: reply.notification,
        }
    }

    /// Snapshot of the conversation log
    pub fn messages(&self) -> Vec<ConversationMessage> {
        self.log().clone()
    }

    /// True while a reply is being prepared
    pub fn is_typing(&self) -> bool {
        self.typing.load(Ordering::Acquire)
    }

    /// False once the widget has been closed
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Close the widget; replies still in flight are dropped
    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }

    /// Record activity, postponing idle eviction
    pub fn touch(&self) {
        *self.last_active.lock().unwrap_or_else(|e| e.into_inner()) = Instant::now();
    }

    /// Time since the last send, reply or lookup
    pub fn idle_for(&self) -> Duration {
        self.last_active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .elapsed()
    }

    /// Replace the API key used for later sends
    pub fn set_api_key(&self, api_key: Option<String>) {
        *self.api_key.lock().unwrap_or_else(|e| e.into_inner()) = api_key;
    }

    fn api_key(&self) -> Option<String> {
        self.api_key
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn log(&self) -> MutexGuard<'_, Vec<ConversationMessage>> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::models::Sender;
    use crate::knowledge::{builtin, CatalogVariant};
    use std::sync::Arc;

    fn session() -> ChatSession {
        ChatSession::new(
            "s1",
            Responder::local(builtin(CatalogVariant::Full)).with_typing(false),
            None,
        )
    }

    #[test]
    fn test_new_session_has_greeting() {
        let s = session();
        let log = s.messages();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].sender, Sender::Bot);
        assert_eq!(log[0].text, WIDGET_GREETING);
        assert!(s.is_open());
        assert!(!s.is_typing());
    }

    #[tokio::test]
    async fn test_send_appends_user_and_bot() {
        let s = session();
        let outcome = s.send("me fala sobre corais").await;
        assert_eq!(outcome.status(), "replied");

        let log = s.messages();
        assert_eq!(log.len(), 3);
        assert_eq!(log[1].sender, Sender::User);
        assert_eq!(log[1].text, "me fala sobre corais");
        assert_eq!(log[2].sender, Sender::Bot);
        assert!(log[2].text.starts_with("Os corais"));
        assert!(!s.is_typing());
    }

    #[tokio::test]
    async fn test_blank_send_is_ignored() {
        let s = session();
        assert_eq!(s.send("").await, SendOutcome::Ignored);
        assert_eq!(s.send("  \n ").await, SendOutcome::Ignored);
        assert_eq!(s.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_send_after_close() {
        let s = session();
        s.close();
        assert_eq!(s.send("oi").await, SendOutcome::Closed);
        assert_eq!(s.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_send_rejected_while_typing() {
        let s = Arc::new(ChatSession::new(
            "s2",
            Responder::local(builtin(CatalogVariant::Full)),
            None,
        ));

        let first = tokio::spawn({
            let s = s.clone();
            async move { s.send("Olá").await }
        });
        while !s.is_typing() {
            tokio::task::yield_now().await;
        }

        assert_eq!(s.send("corais").await, SendOutcome::Busy);

        let outcome = first.await.unwrap();
        assert_eq!(outcome.status(), "replied");
        assert!(!s.is_typing());
        // greeting + user + bot; the rejected send left no trace
        assert_eq!(s.messages().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_while_typing_discards_reply() {
        let s = Arc::new(ChatSession::new(
            "s3",
            Responder::local(builtin(CatalogVariant::Full)),
            None,
        ));

        let pending = tokio::spawn({
            let s = s.clone();
            async move { s.send("corais").await }
        });
        while !s.is_typing() {
            tokio::task::yield_now().await;
        }
        s.close();

        assert_eq!(pending.await.unwrap(), SendOutcome::Discarded);
        assert!(!s.is_typing());
        let log = s.messages();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].sender, Sender::User);
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_resets_idle_time() {
        let s = session();
        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(s.idle_for() >= Duration::from_secs(60));

        s.send("oi").await;
        assert!(s.idle_for() < Duration::from_secs(1));

        tokio::time::advance(Duration::from_secs(10)).await;
        s.touch();
        assert!(s.idle_for() < Duration::from_secs(1));
    }

    #[test]
    fn test_typing_guard_releases_on_drop() {
        let flag = AtomicBool::new(false);
        {
            let _g = TypingGuard::acquire(&flag).unwrap();
            assert!(flag.load(Ordering::SeqCst));
            assert!(TypingGuard::acquire(&flag).is_none());
        }
        assert!(!flag.load(Ordering::SeqCst));
    }
}
