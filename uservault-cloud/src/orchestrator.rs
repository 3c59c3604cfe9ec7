//! Public get/set surface over remote user storage.
//!
//! Ties auth preconditions, storage-key derivation, and the sync service
//! together. Every call is a self-contained request: resolve auth, derive
//! the key, hit the remote store. The only state kept between calls is a
//! session-scoped cache of the derived key, invalidated the moment the
//! session identifier changes.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::auth::{AuthProvider, MessageSigner, StorageKey, STORAGE_KEY_SIGNING_TAG};
use crate::config::CloudConfig;
use crate::error::{CloudError, CloudResult};
use crate::service::UserStorageService;

/// Cached key, valid only while the session identifier is unchanged.
struct CachedKey {
    session: String,
    key: StorageKey,
}

/// Client surface for encrypted remote user storage.
pub struct UserStorageClient {
    service: UserStorageService,
    auth: Arc<dyn AuthProvider>,
    signer: Arc<dyn MessageSigner>,
    key_cache: RwLock<Option<CachedKey>>,
}

impl UserStorageClient {
    pub fn new(
        config: CloudConfig,
        auth: Arc<dyn AuthProvider>,
        signer: Arc<dyn MessageSigner>,
    ) -> Self {
        Self {
            service: UserStorageService::new(config),
            auth,
            signer,
            key_cache: RwLock::new(None),
        }
    }

    /// Derives the storage key for the current session.
    ///
    /// The key is the SHA-256 of a signature over a session-tagged
    /// message, binding it to proof of account control. Derivations are
    /// cached in memory per session identifier; the key itself is never
    /// persisted anywhere.
    pub async fn storage_key(&self) -> CloudResult<StorageKey> {
        let session = self
            .auth
            .session_identifier()
            .await
            .ok_or(CloudError::MissingSession)?;

        // Fast path: the session is unchanged since the last derivation.
        {
            let cache = self.key_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.session == session {
                    return Ok(cached.key.clone());
                }
            }
        }

        let message = format!("{STORAGE_KEY_SIGNING_TAG}{session}");
        let signature = self.signer.sign_message(&message).await?;
        let key = StorageKey::from_signature(&signature);

        let mut cache = self.key_cache.write().await;
        *cache = Some(CachedKey {
            session,
            key: key.clone(),
        });
        debug!("storage key derived for current session");
        Ok(key)
    }

    /// Reads and decrypts an entry; `None` when nothing usable is stored.
    pub async fn get(&self, entry_id: &str) -> CloudResult<Option<String>> {
        let bearer_token = self
            .auth
            .bearer_token()
            .await
            .ok_or(CloudError::MissingBearerToken)?;
        let key = self.storage_key().await?;
        self.service.read_entry(entry_id, &key, &bearer_token).await
    }

    /// Encrypts and writes an entry.
    pub async fn set(&self, entry_id: &str, value: &str) -> CloudResult<()> {
        let bearer_token = self
            .auth
            .bearer_token()
            .await
            .ok_or(CloudError::MissingBearerToken)?;
        let key = self.storage_key().await?;
        self.service
            .write_entry(entry_id, value, &key, &bearer_token)
            .await
    }
}
