//! Password key derivation (scrypt) and its self-describing parameters.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, CryptoResult};

/// Salt length in bytes.
pub const SALT_SIZE: usize = 16;

/// scrypt cost parameters.
///
/// Every ciphertext carries the parameters it was produced with, so the
/// decoder never consults the compile-time defaults. Tuning the defaults
/// therefore cannot strand previously written data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptParams {
    #[serde(rename = "N")]
    pub n: u32,
    pub r: u32,
    pub p: u32,
    #[serde(rename = "dkLen")]
    pub dk_len: usize,
}

impl Default for ScryptParams {
    fn default() -> Self {
        // 2^14 keeps derivation sub-second on commodity hardware while
        // still pricing out bulk password guessing.
        Self {
            n: 1 << 14,
            r: 8,
            p: 1,
            dk_len: 16,
        }
    }
}

impl ScryptParams {
    /// The scrypt backend takes `log2(N)`; anything that is not a power
    /// of two cannot be expressed.
    fn log_n(&self) -> CryptoResult<u8> {
        if self.n < 2 || !self.n.is_power_of_two() {
            return Err(CryptoError::InvalidParams(format!(
                "N must be a power of two >= 2, got {}",
                self.n
            )));
        }
        Ok(self.n.ilog2() as u8)
    }
}

/// Random per-encryption salt.
#[derive(Clone)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Draws a fresh salt from the OS random source.
    pub fn random() -> CryptoResult<Self> {
        let mut bytes = [0u8; SALT_SIZE];
        getrandom::getrandom(&mut bytes)
            .map_err(|_| CryptoError::Encryption("random source unavailable".into()))?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

/// Derived key material, zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey(Vec<u8>);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Derives `params.dk_len` bytes of key material from a password.
///
/// Deterministic: the same (password, salt, params) always yields the
/// same key.
pub fn derive_key(password: &str, salt: &Salt, params: &ScryptParams) -> CryptoResult<DerivedKey> {
    let scrypt_params = scrypt::Params::new(params.log_n()?, params.r, params.p, params.dk_len)
        .map_err(|e| CryptoError::InvalidParams(e.to_string()))?;

    let mut out = vec![0u8; params.dk_len];
    scrypt::scrypt(
        password.as_bytes(),
        salt.as_bytes(),
        &scrypt_params,
        &mut out,
    )
    .map_err(|e| CryptoError::InvalidParams(e.to_string()))?;
    Ok(DerivedKey(out))
}
