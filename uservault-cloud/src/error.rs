//! User-storage error types.

use thiserror::Error;

/// Result type for user-storage operations.
pub type CloudResult<T> = Result<T, CloudError>;

/// Errors that can occur while reading or writing remote user storage.
///
/// "Not present" is never an error: reads resolve it as `Ok(None)`.
/// Nothing here is retried at this layer; transient failures surface
/// immediately so the caller can apply its own policy.
#[derive(Debug, Error)]
pub enum CloudError {
    /// Auth precondition: no bearer token available.
    #[error("bearer token is not available")]
    MissingBearerToken,

    /// Auth precondition: no session identifier available.
    #[error("session identifier is not available")]
    MissingSession,

    /// A GET returned a failure status other than 404.
    #[error("remote read failed with status {0}")]
    ReadFailed(u16),

    /// A PUT returned a non-2xx status.
    #[error("remote write failed with status {0}")]
    WriteFailed(u16),

    /// Lookup of an entry id that is not in the registry. A programming
    /// error in the caller, not a runtime condition.
    #[error("unknown user storage entry: {0}")]
    UnknownEntry(String),

    /// The external signing authority failed or refused to sign.
    #[error("signing request failed: {0}")]
    Signing(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("crypto error: {0}")]
    Crypto(#[from] uservault_crypto::CryptoError),
}
