//! HTTP sync against the remote user-storage endpoints.
//!
//! Owns the narrow GET/PUT protocol and its two deliberate semantics:
//! a 404 means "never written" and resolves to `None`, and a stored blob
//! that fails to decrypt degrades to `None` instead of failing the
//! caller.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use uservault_crypto::{decrypt_string, encrypt_string};

use crate::auth::StorageKey;
use crate::config::CloudConfig;
use crate::error::{CloudError, CloudResult};
use crate::path::derive_entry_path;
use crate::types::{GetUserStorageResponse, UpsertUserStorageRequest};

/// Client for the user-storage REST endpoints.
pub struct UserStorageService {
    client: Client,
    config: CloudConfig,
}

impl UserStorageService {
    pub fn new(config: CloudConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self { client, config }
    }

    fn entry_url(&self, entry_id: &str, storage_key: &StorageKey) -> CloudResult<String> {
        let path = derive_entry_path(entry_id, storage_key.as_str())?;
        Ok(format!("{}/api/v1/userstorage{}", self.config.api_base_url, path))
    }

    /// Fetches and decrypts an entry.
    ///
    /// `Ok(None)` covers three states the caller treats identically: the
    /// path was never written (404), the record exists with no data, or
    /// the stored blob does not decrypt under this storage key.
    pub async fn read_entry(
        &self,
        entry_id: &str,
        storage_key: &StorageKey,
        bearer_token: &str,
    ) -> CloudResult<Option<String>> {
        let url = self.entry_url(entry_id, storage_key)?;

        let resp = self
            .client
            .get(&url)
            .bearer_auth(bearer_token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            debug!("user storage entry {entry_id} not present");
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(CloudError::ReadFailed(resp.status().as_u16()));
        }

        let body: GetUserStorageResponse = resp.json().await?;
        let Some(data) = body.data.filter(|d| !d.is_empty()) else {
            return Ok(None);
        };

        match decrypt_string(&data, storage_key.as_str()) {
            Ok(plaintext) => Ok(Some(plaintext)),
            Err(err) => {
                // A corrupted or foreign-format blob reads as absent.
                warn!("user storage entry {entry_id} failed to decrypt: {err}");
                Ok(None)
            }
        }
    }

    /// Encrypts and uploads an entry. Last write wins at the remote
    /// store; no retry happens at this layer.
    pub async fn write_entry(
        &self,
        entry_id: &str,
        plaintext: &str,
        storage_key: &StorageKey,
        bearer_token: &str,
    ) -> CloudResult<()> {
        let url = self.entry_url(entry_id, storage_key)?;
        let envelope = encrypt_string(plaintext, storage_key.as_str())?;

        let resp = self
            .client
            .put(&url)
            .bearer_auth(bearer_token)
            .json(&UpsertUserStorageRequest { data: envelope })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CloudError::WriteFailed(resp.status().as_u16()));
        }
        debug!("user storage entry {entry_id} written");
        Ok(())
    }
}
