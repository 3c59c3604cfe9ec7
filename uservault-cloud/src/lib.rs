//! Encrypted remote user storage for UserVault.
//!
//! Persists small encrypted blobs against the user-storage REST endpoint.
//! Confidentiality is entirely client-side: the key is derived on demand
//! from a signature the user's signing authority produces, and is never
//! stored or transmitted. Remote paths are one-way hashes, so the server
//! learns neither entry names nor account identities.
//!
//! Layering, outermost first:
//! - [`orchestrator::UserStorageClient`]: public get/set surface, auth
//!   gating, storage-key derivation
//! - [`service::UserStorageService`]: GET/PUT protocol, not-found and
//!   corruption semantics
//! - [`path`] / [`entries`]: deterministic remote path hashing over the
//!   static entry registry

pub mod auth;
pub mod config;
pub mod entries;
pub mod error;
pub mod orchestrator;
pub mod path;
pub mod service;
pub mod types;

pub use auth::{AuthProvider, MessageSigner, StorageKey, STORAGE_KEY_SIGNING_TAG};
pub use config::CloudConfig;
pub use error::{CloudError, CloudResult};
pub use orchestrator::UserStorageClient;
pub use service::UserStorageService;
