//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::constants::{DEFAULT_COMPLETION_BASE_URL, DEFAULT_COMPLETION_MODEL};
use crate::knowledge::CatalogVariant;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default idle time before an abandoned widget is closed (30 minutes)
pub const DEFAULT_WIDGET_IDLE_TIMEOUT_SECS: u64 = 30 * 60;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Persistence configuration
    pub persistence: PersistenceConfig,
    /// Knowledge base selection
    pub knowledge: KnowledgeSource,
    /// External completion service configuration
    pub completion: CompletionConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
    /// Seconds without activity before an open widget is closed
    pub widget_idle_timeout_secs: u64,
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Directory holding the credential file
    pub data_dir: PathBuf,
}

/// Where the knowledge base comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeSource {
    /// One of the catalogs compiled into the binary
    Builtin(CatalogVariant),
    /// A JSON file on disk
    File(PathBuf),
}

impl KnowledgeSource {
    /// Parse `full`, `compact`, or a file path
    pub fn parse(value: &str) -> Self {
        match value.parse::<CatalogVariant>() {
            Ok(variant) => KnowledgeSource::Builtin(variant),
            Err(_) => KnowledgeSource::File(PathBuf::from(value.trim())),
        }
    }
}

impl Default for KnowledgeSource {
    fn default() -> Self {
        KnowledgeSource::Builtin(CatalogVariant::Full)
    }
}

/// External completion service configuration
///
/// `api_key` only seeds the credential store; the stored value wins after that.
#[derive(Clone)]
pub struct CompletionConfig {
    /// Whether the completion service may be used at all
    pub enabled: bool,
    /// Endpoint base URL (the client appends `/chat/completions`)
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// API key from the environment, if any
    pub api_key: Option<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: DEFAULT_COMPLETION_BASE_URL.to_string(),
            model: DEFAULT_COMPLETION_MODEL.to_string(),
            timeout_secs: 30,
            api_key: None,
        }
    }
}

// Manual impl so the API key never reaches the logs.
impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("enabled", &self.enabled)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = CompletionConfig::default();
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                widget_idle_timeout_secs: env::var("WIDGET_IDLE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .filter(|t| *t > 0)
                    .unwrap_or(DEFAULT_WIDGET_IDLE_TIMEOUT_SECS),
            },
            persistence: PersistenceConfig {
                data_dir: env::var_os("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_data_dir),
            },
            knowledge: env::var("KNOWLEDGE_BASE")
                .map(|v| KnowledgeSource::parse(&v))
                .unwrap_or_default(),
            completion: CompletionConfig {
                enabled: env::var("COMPLETION_ENABLED")
                    .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                    .unwrap_or(defaults.enabled),
                base_url: env::var("COMPLETION_API_BASE_URL").unwrap_or(defaults.base_url),
                model: env::var("COMPLETION_MODEL").unwrap_or(defaults.model),
                timeout_secs: env::var("COMPLETION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .filter(|t| *t > 0)
                    .unwrap_or(defaults.timeout_secs),
                api_key: env::var("ECOBOT_API_KEY")
                    .ok()
                    .filter(|k| !k.trim().is_empty()),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Idle time after which an open widget is evicted
    pub fn widget_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.server.widget_idle_timeout_secs)
    }
}

// Default to ~/.ecobot or a local directory
fn default_data_dir() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".ecobot"),
        None => PathBuf::from(".ecobot"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 10] = [
        "PORT",
        "WIDGET_IDLE_TIMEOUT_SECS",
        "HOST",
        "DATA_DIR",
        "KNOWLEDGE_BASE",
        "COMPLETION_ENABLED",
        "COMPLETION_API_BASE_URL",
        "COMPLETION_MODEL",
        "COMPLETION_TIMEOUT_SECS",
        "ECOBOT_API_KEY",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(
            config.knowledge,
            KnowledgeSource::Builtin(CatalogVariant::Full)
        );
        assert!(!config.completion.enabled);
        assert_eq!(config.completion.timeout_secs, 30);
        assert!(config.completion.api_key.is_none());
        assert_eq!(config.widget_idle_timeout(), Duration::from_secs(1800));
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        env::set_var("PORT", "9000");
        env::set_var("WIDGET_IDLE_TIMEOUT_SECS", "90");
        env::set_var("DATA_DIR", "/tmp/ecobot-test");
        env::set_var("KNOWLEDGE_BASE", "compact");
        env::set_var("COMPLETION_ENABLED", "true");
        env::set_var("COMPLETION_TIMEOUT_SECS", "0");
        env::set_var("ECOBOT_API_KEY", "sk-env");

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.widget_idle_timeout_secs, 90);
        assert_eq!(config.persistence.data_dir, PathBuf::from("/tmp/ecobot-test"));
        assert_eq!(
            config.knowledge,
            KnowledgeSource::Builtin(CatalogVariant::Compact)
        );
        assert!(config.completion.enabled);
        // zero is rejected in favour of the default
        assert_eq!(config.completion.timeout_secs, 30);
        assert_eq!(config.completion.api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_knowledge_source_parse_path() {
        assert_eq!(
            KnowledgeSource::parse("/etc/ecobot/kb.json"),
            KnowledgeSource::File(PathBuf::from("/etc/ecobot/kb.json"))
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = CompletionConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
