//! Client-side encryption for UserVault.
//!
//! Everything persisted remotely is sealed on the client under a
//! password-derived key:
//! - scrypt for password key derivation, with the cost parameters
//!   embedded in every blob
//! - AES-GCM for authenticated encryption
//! - SHA-256 helpers for path and storage-key fingerprints
//!
//! The engine is stateless: free functions over owned inputs, nothing to
//! share or synchronize. Callers re-invoke it per operation.

mod envelope;
mod error;
mod hash;
mod key;

pub use envelope::{
    decrypt_string, encrypt_string, encrypt_string_with_params, EncryptedEnvelope, ENVELOPE_KIND,
    ENVELOPE_VERSION, NONCE_SIZE, TAG_SIZE,
};
pub use error::{CryptoError, CryptoResult};
pub use hash::sha256_hex;
pub use key::{derive_key, DerivedKey, Salt, ScryptParams, SALT_SIZE};
