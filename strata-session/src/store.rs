//! Credential storage
//!
//! Single-slot persistence for the bearer token. The trait mirrors the
//! platform secure-store contract (get/set/delete on a well-known key); the
//! file-backed implementation is used by real deployments, the in-memory one
//! by tests and ephemeral sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use strata_core::{StrataError, StrataResult};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Well-known key for the session token slot
pub const TOKEN_KEY: &str = "auth_token";

/// Secure credential store contract
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> StrataResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> StrataResult<()>;
    async fn delete(&self, key: &str) -> StrataResult<()>;
}

/// File-backed credential store, one file per key under the data directory
pub struct FileCredentialStore {
    storage_dir: PathBuf,
}

impl FileCredentialStore {
    /// Create a new file-backed credential store
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> StrataResult<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&storage_dir).map_err(|e| {
            let message = format!("Failed to create credential directory: {}", e);
            StrataError::storage(message, Some(Box::new(e)), "credential_store")
        })?;

        info!("Credential store initialized at {}", storage_dir.display());

        Ok(Self { storage_dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.storage_dir.join(format!("{}.cred", key))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> StrataResult<Option<String>> {
        let path = self.key_path(key);

        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                let message = format!("Failed to read credential '{}': {}", key, e);
                Err(StrataError::storage(
                    message,
                    Some(Box::new(e)),
                    "credential_store",
                ))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> StrataResult<()> {
        let path = self.key_path(key);

        std::fs::write(&path, value).map_err(|e| {
            let message = format!("Failed to write credential '{}': {}", key, e);
            StrataError::storage(message, Some(Box::new(e)), "credential_store")
        })?;

        // Credential files are readable by the owner only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).map_err(
                |e| {
                    let message = format!("Failed to restrict credential '{}': {}", key, e);
                    StrataError::storage(message, Some(Box::new(e)), "credential_store")
                },
            )?;
        }

        debug!("Stored credential '{}'", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StrataResult<()> {
        let path = self.key_path(key);

        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted credential '{}'", key);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                let message = format!("Failed to delete credential '{}': {}", key, e);
                Err(StrataError::storage(
                    message,
                    Some(Box::new(e)),
                    "credential_store",
                ))
            }
        }
    }
}

/// In-memory credential store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> StrataResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StrataResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StrataResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
