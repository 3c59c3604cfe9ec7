//! Auth collaborators and storage-key derivation.
//!
//! The storage key is the secret everything else hangs off: the password
//! for entry encryption and the hash input for remote paths. It is
//! derived from a signature the external signing authority produces over
//! a session-bound message, so holding it proves account control without
//! this crate ever touching private key material.

use std::fmt;

use async_trait::async_trait;
use uservault_crypto::sha256_hex;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CloudResult;

/// Tag bound into the signed message. Part of the key-derivation
/// contract: changing it orphans every previously written blob.
pub const STORAGE_KEY_SIGNING_TAG: &str = "metamask:";

/// Supplies the bearer token and session identifier. Implemented by the
/// host application's auth layer; this crate never authenticates anyone.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current bearer token, if the user is signed in.
    async fn bearer_token(&self) -> Option<String>;

    /// Current session identifier, if a session exists.
    async fn session_identifier(&self) -> Option<String>;
}

/// Opaque signing oracle proving account control.
#[async_trait]
pub trait MessageSigner: Send + Sync {
    /// Signs the tagged message and returns the signature as hex.
    async fn sign_message(&self, message: &str) -> CloudResult<String>;
}

/// The per-user storage secret: `sha256(signature)`, hex-encoded.
///
/// Never cached to disk, never logged, never sent over the wire.
/// Zeroized on drop and redacted in debug output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct StorageKey(String);

impl StorageKey {
    /// Derives the key from an account-bound signature.
    pub fn from_signature(signature: &str) -> Self {
        Self(sha256_hex(signature))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StorageKey(<redacted>)")
    }
}
