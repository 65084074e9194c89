//! Knowledge base types
//!
//! A knowledge base is an ordered list of entries plus one default response.
//! Entry order is match priority, so entries live in a `Vec` and are never
//! re-sorted or keyed by phrase.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while building or loading a knowledge base
#[derive(Error, Debug)]
pub enum KnowledgeError {
    /// Entry has no trigger phrases
    #[error("Entry {0} has no keys")]
    NoKeys(usize),

    /// Trigger phrase is empty or whitespace only
    #[error("Entry {entry} has an empty key at position {position}")]
    EmptyKey {
        /// Index of the offending entry
        entry: usize,
        /// Index of the key within the entry
        position: usize,
    },

    /// Trigger phrase contains uppercase characters and could never match
    #[error("Entry {entry} has a key that is not lowercase: {key:?}")]
    NotLowercase {
        /// Index of the offending entry
        entry: usize,
        /// The key as authored
        key: String,
    },

    /// Entry response is empty
    #[error("Entry {0} has an empty response")]
    EmptyResponse(usize),

    /// Default response is empty
    #[error("Default response cannot be empty")]
    EmptyDefault,

    /// Knowledge base file could not be read
    #[error("Failed to read knowledge base file: {0}")]
    Io(#[from] std::io::Error),

    /// Knowledge base file is not valid JSON
    #[error("Invalid knowledge base JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One record pairing trigger phrases with a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Trigger phrases, lowercase, checked in declared order
    pub keys: Vec<String>,
    /// Response returned when any key matches
    pub response: String,
}

impl KnowledgeEntry {
    /// Create an entry from borrowed phrases
    pub fn new(keys: &[&str], response: &str) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            response: response.to_string(),
        }
    }
}

/// Ordered knowledge base with a distinguished fallback response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    default_response: String,
}

impl KnowledgeBase {
    /// Build a validated knowledge base
    ///
    /// # Errors
    /// Returns `KnowledgeError` if any entry breaks the entry invariants
    /// (see [`KnowledgeBase::validate`]).
    pub fn new(
        entries: Vec<KnowledgeEntry>,
        default_response: impl Into<String>,
    ) -> Result<Self, KnowledgeError> {
        let kb = Self::from_parts(entries, default_response.into());
        kb.validate()?;
        Ok(kb)
    }

    /// Assemble without validation. Used by the built-in catalogs, which are
    /// checked by tests instead.
    pub(crate) fn from_parts(entries: Vec<KnowledgeEntry>, default_response: String) -> Self {
        Self {
            entries,
            default_response,
        }
    }

    /// Load a knowledge base from a JSON file
    ///
    /// The file holds `{"entries": [...], "default_response": "..."}`; array
    /// order becomes match priority.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeError> {
        let json = fs::read_to_string(path.as_ref())?;
        let kb: KnowledgeBase = serde_json::from_str(&json)?;
        kb.validate()?;
        Ok(kb)
    }

    /// Check entry invariants
    ///
    /// Every entry needs at least one non-empty lowercase key and a response,
    /// and the default response must be non-empty.
    pub fn validate(&self) -> Result<(), KnowledgeError> {
        if self.default_response.trim().is_empty() {
            return Err(KnowledgeError::EmptyDefault);
        }
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.keys.is_empty() {
                return Err(KnowledgeError::NoKeys(index));
            }
            for (position, key) in entry.keys.iter().enumerate() {
                if key.trim().is_empty() {
                    return Err(KnowledgeError::EmptyKey {
                        entry: index,
                        position,
                    });
                }
                if key.to_lowercase() != *key {
                    return Err(KnowledgeError::NotLowercase {
                        entry: index,
                        key: key.clone(),
                    });
                }
            }
            if entry.response.trim().is_empty() {
                return Err(KnowledgeError::EmptyResponse(index));
            }
        }
        Ok(())
    }

    /// Entries in match-priority order
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Response used when nothing matches
    pub fn default_response(&self) -> &str {
        &self.default_response
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the base has no entries (every input gets the default)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
