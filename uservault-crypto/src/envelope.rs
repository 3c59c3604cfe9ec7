//! Versioned authenticated-encryption envelope.
//!
//! Wire/at-rest JSON:
//! `{"v":"1","t":"script","d":"<base64 salt||nonce||ciphertext+tag>","o":{...}}`
//!
//! `d` decodes to `salt(16) || nonce(12) || AES-GCM ciphertext+tag`. The
//! scrypt parameters ride inside `o`; the decoder always re-derives the
//! key from the recorded values, never the current defaults.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, DerivedKey, Salt, ScryptParams, SALT_SIZE};

/// Envelope format version this module reads and writes.
pub const ENVELOPE_VERSION: &str = "1";

/// Scheme discriminant (scrypt-derived key, AES-GCM payload).
pub const ENVELOPE_KIND: &str = "script";

/// AES-GCM nonce length in bytes. Fixed by the cipher; must not change
/// independently of the decoder.
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_SIZE: usize = 16;

/// The persisted/transmitted ciphertext form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    #[serde(rename = "v")]
    pub version: String,
    #[serde(rename = "t")]
    pub kind: String,
    /// base64 of `salt(16) || nonce(12) || ciphertext+tag`.
    #[serde(rename = "d")]
    pub data: String,
    /// KDF cost parameters used for this ciphertext.
    #[serde(rename = "o")]
    pub params: ScryptParams,
}

/// Encrypts `plaintext` under a password with the default parameters.
pub fn encrypt_string(plaintext: &str, password: &str) -> CryptoResult<String> {
    encrypt_string_with_params(plaintext, password, &ScryptParams::default())
}

/// Encrypts with explicit cost parameters.
///
/// Whatever parameters are passed end up recorded in the envelope, so the
/// result stays decodable regardless of future default changes.
pub fn encrypt_string_with_params(
    plaintext: &str,
    password: &str,
    params: &ScryptParams,
) -> CryptoResult<String> {
    let salt = Salt::random()?;
    let key = derive_key(password, &salt, params)?;

    // Fresh nonce per encryption; a repeat under the same key would void
    // the AEAD guarantees.
    let mut nonce = [0u8; NONCE_SIZE];
    getrandom::getrandom(&mut nonce)
        .map_err(|_| CryptoError::Encryption("random source unavailable".into()))?;

    let ciphertext = aead_seal(&key, &nonce, plaintext.as_bytes())?;

    let mut blob = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(salt.as_bytes());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);

    let envelope = EncryptedEnvelope {
        version: ENVELOPE_VERSION.to_string(),
        kind: ENVELOPE_KIND.to_string(),
        data: STANDARD.encode(&blob),
        params: params.clone(),
    };
    serde_json::to_string(&envelope)
        .map_err(|_| CryptoError::Encryption("envelope serialization failed".into()))
}

/// Decrypts an envelope produced by [`encrypt_string`].
///
/// A failed tag check (wrong password or corrupted bytes) is an error,
/// never garbage plaintext. Every failure past the discriminant check
/// collapses into [`CryptoError::Decryption`].
pub fn decrypt_string(envelope: &str, password: &str) -> CryptoResult<String> {
    let envelope: EncryptedEnvelope = serde_json::from_str(envelope)
        .map_err(|_| CryptoError::Decryption("malformed envelope".into()))?;
    check_discriminants(&envelope)?;

    let blob = STANDARD
        .decode(&envelope.data)
        .map_err(|_| CryptoError::Decryption("invalid base64 payload".into()))?;
    if blob.len() < SALT_SIZE + NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::Decryption("payload too short".into()));
    }

    let (salt_bytes, rest) = blob.split_at(SALT_SIZE);
    let (nonce, ciphertext) = rest.split_at(NONCE_SIZE);

    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(salt_bytes);

    // Re-derive from the parameters recorded in the envelope, not the
    // current defaults.
    let key = derive_key(password, &Salt::from_bytes(salt), &envelope.params)
        .map_err(|_| CryptoError::Decryption("unusable key derivation parameters".into()))?;

    let plaintext = aead_open(&key, nonce, ciphertext)?;
    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::Decryption("plaintext is not valid UTF-8".into()))
}

/// Rejects anything but the single known version/kind pair before any
/// cryptographic work happens.
fn check_discriminants(envelope: &EncryptedEnvelope) -> CryptoResult<()> {
    if envelope.version != ENVELOPE_VERSION || envelope.kind != ENVELOPE_KIND {
        return Err(CryptoError::UnsupportedEnvelope {
            version: envelope.version.clone(),
            kind: envelope.kind.clone(),
        });
    }
    Ok(())
}

fn aead_seal(key: &DerivedKey, nonce: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    match key.as_bytes().len() {
        16 => {
            let cipher = Aes128Gcm::new_from_slice(key.as_bytes())
                .map_err(|_| CryptoError::Encryption("cipher init failed".into()))?;
            cipher
                .encrypt(Nonce::from_slice(nonce), plaintext)
                .map_err(|_| CryptoError::Encryption("seal failed".into()))
        }
        32 => {
            let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
                .map_err(|_| CryptoError::Encryption("cipher init failed".into()))?;
            cipher
                .encrypt(Nonce::from_slice(nonce), plaintext)
                .map_err(|_| CryptoError::Encryption("seal failed".into()))
        }
        len => Err(CryptoError::InvalidParams(format!(
            "unsupported dkLen {len}, expected 16 or 32"
        ))),
    }
}

fn aead_open(key: &DerivedKey, nonce: &[u8], ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
    match key.as_bytes().len() {
        16 => {
            let cipher = Aes128Gcm::new_from_slice(key.as_bytes())
                .map_err(|_| CryptoError::Decryption("cipher init failed".into()))?;
            cipher
                .decrypt(Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| CryptoError::Decryption("wrong password or tampered data".into()))
        }
        32 => {
            let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
                .map_err(|_| CryptoError::Decryption("cipher init failed".into()))?;
            cipher
                .decrypt(Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| CryptoError::Decryption("wrong password or tampered data".into()))
        }
        _ => Err(CryptoError::Decryption(
            "unusable key derivation parameters".into(),
        )),
    }
}
