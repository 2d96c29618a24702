//! Persisted client storage for the bearer token.

use std::{
    fmt::Debug,
    fs, io,
    path::{Path, PathBuf},
};

use mockall::automock;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// Fixed storage key the token lives under.
pub const TOKEN_KEY: &str = "token";

/// Errors raised while writing the token store.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// Reading or writing the storage file failed.
    #[error("token storage io error: {0}")]
    Io(#[from] io::Error),

    /// The storage file is not a JSON object.
    #[error("token storage is not a JSON object: {0}")]
    Format(#[from] serde_json::Error),
}

/// Source of the optional bearer token.
#[automock]
pub trait TokenStore: Debug + Send + Sync {
    /// The stored token, if any.
    fn token(&self) -> Option<String>;
}

/// Key/value JSON file acting as the client's persisted storage.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store backed by the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `token` under [`TOKEN_KEY`], keeping any other keys.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, parsed or written.
    pub fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut entries = self.read_entries()?;

        entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));

        self.write_entries(&entries)
    }

    /// Remove the token, keeping any other keys.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, parsed or written.
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        let mut entries = self.read_entries()?;

        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }

        self.write_entries(&entries)
    }

    fn read_entries(&self) -> Result<Map<String, Value>, TokenStoreError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(Map::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(error) => Err(error.into()),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        match self.read_entries() {
            Ok(entries) => entries
                .get(TOKEN_KEY)
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
                .map(str::to_string),
            Err(error) => {
                warn!(path = %self.path.display(), "unreadable token storage: {error}");

                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_file_has_no_token() -> TestResult {
        let dir = tempdir()?;
        let store = FileTokenStore::new(dir.path().join("storage.json"));

        assert_eq!(store.token(), None);

        Ok(())
    }

    #[test]
    fn saved_token_is_read_back() -> TestResult {
        let dir = tempdir()?;
        let store = FileTokenStore::new(dir.path().join("nested").join("storage.json"));

        store.save("abc123")?;

        assert_eq!(store.token(), Some("abc123".to_string()));

        Ok(())
    }

    #[test]
    fn clear_keeps_other_keys() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"token":"abc","theme":"dark"}"#)?;

        let store = FileTokenStore::new(&path);
        store.clear()?;

        let remaining: Map<String, Value> = serde_json::from_slice(&fs::read(&path)?)?;

        assert_eq!(store.token(), None);
        assert_eq!(remaining.get("theme"), Some(&Value::String("dark".to_string())));

        Ok(())
    }

    #[test]
    fn corrupt_file_yields_no_token() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json")?;

        assert_eq!(FileTokenStore::new(&path).token(), None);

        Ok(())
    }

    #[test]
    fn empty_token_counts_as_missing() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"token":""}"#)?;

        assert_eq!(FileTokenStore::new(&path).token(), None);

        Ok(())
    }
}
