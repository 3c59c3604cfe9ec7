//! Error types for the encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur during encryption or decryption.
///
/// Messages are fixed descriptions; key material, plaintext, and
/// intermediate state never appear in an error.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Any failure while producing an envelope.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Any failure while opening an envelope other than the discriminant
    /// check: bad encoding, truncation, tag mismatch, bad UTF-8.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// The envelope declares a version or kind this build cannot decode.
    #[error("unsupported envelope (version {version:?}, kind {kind:?})")]
    UnsupportedEnvelope { version: String, kind: String },

    /// Key derivation parameters outside what the scheme supports.
    #[error("invalid key derivation parameters: {0}")]
    InvalidParams(String),
}
