//! Static registry of user-storage entries.
//!
//! Every logical entry the application persists remotely is registered
//! here; the registry is fixed at compile time and read-only. Adding an
//! entry type is an edit to `REGISTRY`. Looking up an unregistered id is
//! a bug in the caller and fails loudly.

use crate::error::{CloudError, CloudResult};

/// Where and under what name an entry lives remotely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryDescriptor {
    /// First segment of the remote path, shared by related entries.
    pub path_segment: &'static str,
    /// Stable name hashed (together with the storage key) into the
    /// second path segment.
    pub entry_name: &'static str,
}

/// Registered entries, keyed by the id the application uses.
pub const REGISTRY: &[(&str, EntryDescriptor)] = &[(
    "notification_settings",
    EntryDescriptor {
        path_segment: "notifications",
        entry_name: "notification_settings",
    },
)];

/// Looks up a registered entry id.
pub fn lookup(entry_id: &str) -> CloudResult<&'static EntryDescriptor> {
    REGISTRY
        .iter()
        .find(|(id, _)| *id == entry_id)
        .map(|(_, descriptor)| descriptor)
        .ok_or_else(|| CloudError::UnknownEntry(entry_id.to_string()))
}
