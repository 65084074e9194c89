// Application state
// Owns the knowledge base, the credential store and the registry of open widgets

use crate::chat::{Responder, WidgetManager};
use crate::completion::OpenAiCompatibleClient;
use crate::config::{Config, KnowledgeSource};
use crate::credentials::CredentialStore;
use crate::error::AppError;
use crate::knowledge::{builtin, KnowledgeBase};
use anyhow::anyhow;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// State shared by all request handlers
pub type SharedState = Arc<AppState>;

/// Main application state
pub struct AppState {
    /// Loaded configuration
    pub config: Config,
    /// Knowledge base answering local replies
    pub knowledge: Arc<KnowledgeBase>,
    /// Open chat widgets
    pub widgets: WidgetManager,
    /// Persistent API key storage
    pub credentials: CredentialStore,
}

impl AppState {
    /// Build the state described by `config`
    ///
    /// The stored API key takes precedence over `ECOBOT_API_KEY`. An unreadable
    /// credential file is logged and treated as "no key" so the widget stays usable.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let knowledge = load_knowledge(&config.knowledge)?;
        info!(entries = knowledge.len(), "Knowledge base loaded");

        let credentials = CredentialStore::in_dir(&config.persistence.data_dir);
        let stored_key = credentials.load().unwrap_or_else(|e| {
            warn!(error = %e, path = %credentials.path().display(), "Ignoring unreadable credential file");
            None
        });
        let api_key = stored_key.or_else(|| config.completion.api_key.clone());

        let mut responder = Responder::local(knowledge.clone());
        if config.completion.enabled {
            let http = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.completion.timeout_secs))
                .build()
                .map_err(|e| AppError::Internal(anyhow!("Failed to build HTTP client: {}", e)))?;
            let client = OpenAiCompatibleClient::with_base_url(
                http,
                &config.completion.base_url,
                &config.completion.model,
            );
            info!(model = %client.model(), "Completion service enabled");
            responder = responder.with_completion(Arc::new(client));
        }

        Ok(Self {
            widgets: WidgetManager::new(responder, api_key),
            knowledge,
            credentials,
            config,
        })
    }

    /// Persist a new API key and hand it to every widget
    pub async fn update_api_key(&self, api_key: &str) -> Result<(), AppError> {
        self.credentials.save(api_key)?;
        let value = Some(api_key.trim().to_string()).filter(|k| !k.is_empty());
        self.widgets.set_api_key(value).await;
        Ok(())
    }

    /// Forget the API key; widgets fall back to local matching only
    pub async fn clear_api_key(&self) -> Result<(), AppError> {
        self.credentials.clear()?;
        self.widgets.set_api_key(None).await;
        Ok(())
    }
}

/// Periodically close widgets idle longer than the configured timeout
///
/// Runs until the returned handle is aborted.
pub fn spawn_idle_sweeper(state: SharedState) -> JoinHandle<()> {
    let max_idle = state.config.widget_idle_timeout();
    let period = (max_idle / 4).max(Duration::from_secs(1));
    info!(max_idle_secs = max_idle.as_secs(), "Idle widget sweeper started");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            state.widgets.evict_idle(max_idle).await;
        }
    })
}

fn load_knowledge(source: &KnowledgeSource) -> Result<Arc<KnowledgeBase>, AppError> {
    match source {
        KnowledgeSource::Builtin(variant) => Ok(builtin(*variant)),
        KnowledgeSource::File(path) => Ok(Arc::new(KnowledgeBase::load_from_file(path)?)),
    }
}
