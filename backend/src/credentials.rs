// Credential persistence
// Keeps the optional completion API key in a small JSON file under the data directory

use crate::constants::CREDENTIAL_KEY;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Error types for credential storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// File I/O error
    Io(String),
    /// JSON serialization/deserialization error
    Json(String),
    /// File written by an unknown format version
    UnsupportedVersion(u32),
}

impl std::fmt::Display for CredentialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialError::Io(msg) => write!(f, "IO Error: {}", msg),
            CredentialError::Json(msg) => write!(f, "JSON Error: {}", msg),
            CredentialError::UnsupportedVersion(v) => {
                write!(f, "Unsupported credential file version: {}", v)
            }
        }
    }
}

impl std::error::Error for CredentialError {}

/// On-disk layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialFile {
    version: u32,
    values: BTreeMap<String, String>,
}

impl Default for CredentialFile {
    fn default() -> Self {
        Self {
            version: 1,
            values: BTreeMap::new(),
        }
    }
}

/// File-backed key/value store for the API key
///
/// Absence of a value is a valid state and means "local matching only".
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by `credentials.json` inside `data_dir`
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join("credentials.json"),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored API key, if any
    pub fn load(&self) -> Result<Option<String>, CredentialError> {
        let file = self.read_file()?;
        Ok(file
            .values
            .get(CREDENTIAL_KEY)
            .filter(|v| !v.trim().is_empty())
            .cloned())
    }

    /// Persist the API key; a blank key clears the stored value
    pub fn save(&self, api_key: &str) -> Result<(), CredentialError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return self.clear();
        }
        let mut file = self.read_file()?;
        file.values
            .insert(CREDENTIAL_KEY.to_string(), api_key.to_string());
        self.write_file(&file)
    }

    /// Remove the stored API key
    pub fn clear(&self) -> Result<(), CredentialError> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut file = self.read_file()?;
        file.values.remove(CREDENTIAL_KEY);
        self.write_file(&file)
    }

    fn read_file(&self) -> Result<CredentialFile, CredentialError> {
        if !self.path.exists() {
            return Ok(CredentialFile::default());
        }

        let json =
            fs::read_to_string(&self.path).map_err(|e| CredentialError::Io(e.to_string()))?;
        let file: CredentialFile =
            serde_json::from_str(&json).map_err(|e| CredentialError::Json(e.to_string()))?;

        if file.version != 1 {
            return Err(CredentialError::UnsupportedVersion(file.version));
        }
        Ok(file)
    }

    fn write_file(&self, file: &CredentialFile) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| CredentialError::Io(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(file)
            .map_err(|e| CredentialError::Json(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| CredentialError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_file() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::in_dir(dir.path());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::in_dir(dir.path().join("nested"));

        store.save("sk-test-123").unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), Some("sk-test-123".to_string()));

        // A second store on the same directory sees the value.
        let reopened = CredentialStore::in_dir(dir.path().join("nested"));
        assert_eq!(reopened.load().unwrap(), Some("sk-test-123".to_string()));
    }

    #[test]
    fn test_blank_save_clears() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::in_dir(dir.path());
        store.save("sk-test").unwrap();
        store.save("   ").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_clear_without_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::in_dir(dir.path());
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_unsupported_version() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::in_dir(dir.path());
        fs::write(store.path(), r#"{"version": 2, "values": {}}"#).unwrap();
        assert_eq!(
            store.load().unwrap_err(),
            CredentialError::UnsupportedVersion(2)
        );
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::in_dir(dir.path());
        fs::write(store.path(), "{").unwrap();
        assert!(matches!(store.load(), Err(CredentialError::Json(_))));
    }
}
