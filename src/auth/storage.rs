//! Token storage backends.
//!
//! The token manager reads and writes the cached token only while holding
//! its refresh lock, so implementations do not need to coordinate between
//! concurrent callers of the same manager.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::token::AuthorizationToken;
use crate::{Error, Result};

/// File name used by [`FileStorage`] inside its directory.
pub const TOKEN_FILE_NAME: &str = "mangopay_token.json";

/// Serialized form of a cached token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredToken {
    /// Client id and host the token was issued for
    pub environment_key: String,
    /// Token type, normally `Bearer`
    pub token_type: String,
    /// Raw access token
    pub access_token: String,
    /// Expiry, margin already applied
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    pub(crate) fn from_token(token: &AuthorizationToken, environment_key: String) -> Self {
        Self {
            environment_key,
            token_type: token.token_type().to_string(),
            access_token: token.access_token().to_string(),
            expires_at: token.expires_at(),
        }
    }

    pub(crate) fn into_token(self) -> AuthorizationToken {
        AuthorizationToken::new(self.token_type, self.access_token, self.expires_at)
    }
}

/// Where the token manager keeps its token between calls.
pub trait TokenStorage: Send + Sync {
    /// Return the stored token, if any.
    fn get(&self) -> Result<Option<StoredToken>>;

    /// Replace the stored token.
    fn store(&self, token: &StoredToken) -> Result<()>;

    /// Remove the stored token.
    fn clear(&self) -> Result<()>;
}

/// In-process storage; the default.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    token: RwLock<Option<StoredToken>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self) -> Result<Option<StoredToken>> {
        let token = self
            .token
            .read()
            .map_err(|_| Error::Storage("token lock poisoned".to_string()))?;
        Ok(token.clone())
    }

    fn store(&self, token: &StoredToken) -> Result<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|_| Error::Storage("token lock poisoned".to_string()))?;
        *slot = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|_| Error::Storage("token lock poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}

/// Keeps the token in a JSON file so separate processes sharing `temp_dir`
/// reuse it.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Store the token in [`TOKEN_FILE_NAME`] under `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_FILE_NAME),
        }
    }

    /// Path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileStorage {
    fn get(&self) -> Result<Option<StoredToken>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Storage(format!("{}: {}", self.path.display(), e))),
        };

        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))
    }

    fn store(&self, token: &StoredToken) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| Error::Storage(format!("{}: {}", dir.display(), e)))?;
        let storage_err =
            |e: std::io::Error| Error::Storage(format!("{}: {}", self.path.display(), e));

        // Staged beside the target, then renamed over it.
        let mut file = NamedTempFile::new_in(dir).map_err(storage_err)?;
        serde_json::to_writer(&mut file, token)?;
        file.as_file().sync_all().map_err(storage_err)?;
        file.persist(&self.path).map_err(|e| storage_err(e.error))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(format!("{}: {}", self.path.display(), e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StoredToken {
        StoredToken {
            environment_key: "sdk@https://api.sandbox.mangopay.com".to_string(),
            token_type: "Bearer".to_string(),
            access_token: "token-1".to_string(),
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get().unwrap(), None);

        let token = sample();
        storage.store(&token).unwrap();
        assert_eq!(storage.get().unwrap(), Some(token));

        storage.clear().unwrap();
        assert_eq!(storage.get().unwrap(), None);
    }

    #[test]
    fn test_file_storage_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let token = sample();

        FileStorage::new(dir.path()).store(&token).unwrap();
        let loaded = FileStorage::new(dir.path()).get().unwrap();
        assert_eq!(loaded, Some(token));
    }

    #[test]
    fn test_file_storage_replaces_existing_token() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.store(&sample()).unwrap();

        let newer = StoredToken {
            access_token: "token-2".to_string(),
            ..sample()
        };
        storage.store(&newer).unwrap();

        assert_eq!(storage.get().unwrap(), Some(newer));
        // Only the token file remains; the staging file was renamed over it.
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_file_storage_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get().unwrap(), None);
        storage.clear().unwrap();
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        fs::write(storage.path(), b"not json").unwrap();

        assert!(matches!(storage.get(), Err(Error::Storage(_))));
    }
}
