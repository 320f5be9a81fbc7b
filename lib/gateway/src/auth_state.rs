//! Credential persistence.
//!
//! Credentials are opaque to us. They are loaded once at startup, saved on
//! every update from the transport, and cleared when the account is logged
//! out so the next pairing starts clean.

use crate::error::CredentialError;
use async_trait::async_trait;
use nukkad_core::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Opaque credential bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthBlob(Vec<u8>);

impl AuthBlob {
    /// Wraps credential bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the blob is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Never print credential contents.
impl fmt::Debug for AuthBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthBlob({} bytes)", self.0.len())
    }
}

/// Storage for transport credentials.
#[async_trait]
pub trait AuthStateStore: Send + Sync {
    /// Returns the stored credentials, if any.
    async fn load(&self) -> Result<Option<AuthBlob>, CredentialError>;

    /// Replaces the stored credentials.
    async fn save(&self, credentials: &AuthBlob) -> Result<(), CredentialError>;

    /// Removes the stored credentials. Succeeds if none were stored.
    async fn clear(&self) -> Result<(), CredentialError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredAuthState {
    saved_at: DateTime<Utc>,
    credentials: String,
}

/// Auth-state store backed by a JSON file.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash mid-write leaves the previous state intact.
#[derive(Debug, Clone)]
pub struct FileAuthStateStore {
    path: PathBuf,
}

impl FileAuthStateStore {
    /// Creates a store for `path`. Nothing is read until [`load`](AuthStateStore::load).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_failed(&self, reason: impl ToString) -> CredentialError {
        CredentialError::WriteFailed {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl AuthStateStore for FileAuthStateStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<AuthBlob>, CredentialError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no stored auth state");
                return Ok(None);
            }
            Err(e) => {
                return Err(CredentialError::ReadFailed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                }
                .into());
            }
        };

        let invalid = |reason: String| CredentialError::InvalidFormat {
            path: self.path.clone(),
            reason,
        };
        let stored: StoredAuthState =
            serde_json::from_slice(&raw).map_err(|e| invalid(e.to_string()))?;
        let bytes = STANDARD
            .decode(stored.credentials)
            .map_err(|e| invalid(e.to_string()))?;

        debug!(bytes = bytes.len(), saved_at = %stored.saved_at, "loaded auth state");
        Ok(Some(AuthBlob::new(bytes)))
    }

    #[instrument(skip(self, credentials), fields(path = %self.path.display()))]
    async fn save(&self, credentials: &AuthBlob) -> Result<(), CredentialError> {
        let stored = StoredAuthState {
            saved_at: Utc::now(),
            credentials: STANDARD.encode(credentials.as_bytes()),
        };
        let json = serde_json::to_vec_pretty(&stored).map_err(|e| self.write_failed(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_failed(e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, json)
            .await
            .map_err(|e| self.write_failed(e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.write_failed(e))?;

        debug!(bytes = credentials.len(), "saved auth state");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn clear(&self) -> Result<(), CredentialError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("cleared auth state");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.write_failed(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileAuthStateStore {
        FileAuthStateStore::new(dir.path().join("auth").join("state.json"))
    }

    #[tokio::test]
    async fn load_without_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        assert_eq!(store.load().await.expect("load"), None);
    }

    #[tokio::test]
    async fn save_then_load_returns_same_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        let blob = AuthBlob::new(vec![0u8, 1, 2, 255, 128]);

        store.save(&blob).await.expect("save");

        assert_eq!(store.load().await.expect("load"), Some(blob));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn clear_removes_state_and_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.save(&AuthBlob::new(b"creds".to_vec())).await.expect("save");

        store.clear().await.expect("clear");
        store.clear().await.expect("second clear");

        assert_eq!(store.load().await.expect("load"), None);
    }

    #[tokio::test]
    async fn corrupt_file_is_invalid_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"{\"saved_at\":\"2024-01-01T00:00:00Z\",\"credentials\":\"***\"}")
            .expect("write");

        let err = FileAuthStateStore::new(&path).load().await.expect_err("should fail");
        assert!(err.to_string().contains("invalid auth state"));
    }

    #[test]
    fn debug_hides_contents() {
        let blob = AuthBlob::new(b"secret".to_vec());
        assert_eq!(format!("{blob:?}"), "AuthBlob(6 bytes)");
    }
}
