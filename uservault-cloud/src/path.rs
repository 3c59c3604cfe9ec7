//! Remote path derivation.
//!
//! Paths are one-way: without the storage key nobody can correlate a
//! remote path back to an entry name or an account.

use uservault_crypto::sha256_hex;

use crate::entries;
use crate::error::CloudResult;

/// Derives the remote path for a registered entry:
/// `"/" + path_segment + "/" + sha256(entry_name + storage_key)`.
///
/// Pure and deterministic; no I/O.
pub fn derive_entry_path(entry_id: &str, storage_key: &str) -> CloudResult<String> {
    let entry = entries::lookup(entry_id)?;
    let digest = sha256_hex(format!("{}{}", entry.entry_name, storage_key));
    Ok(format!("/{}/{}", entry.path_segment, digest))
}
