//! Remote path derivation tests.

use pretty_assertions::assert_eq;
use uservault_cloud::error::CloudError;
use uservault_cloud::path::derive_entry_path;
use uservault_crypto::sha256_hex;

#[test]
fn path_is_deterministic() {
    let a = derive_entry_path("notification_settings", "MOCK_STORAGE_KEY").unwrap();
    let b = derive_entry_path("notification_settings", "MOCK_STORAGE_KEY").unwrap();
    assert_eq!(a, b);
}

#[test]
fn path_is_segment_plus_hash_of_entry_name_and_key() {
    let path = derive_entry_path("notification_settings", "MOCK_STORAGE_KEY").unwrap();
    let expected = format!(
        "/notifications/{}",
        sha256_hex("notification_settingsMOCK_STORAGE_KEY")
    );
    assert_eq!(path, expected);
}

#[test]
fn known_digest_for_mock_key() {
    let path = derive_entry_path("notification_settings", "MOCK_STORAGE_KEY").unwrap();
    assert_eq!(
        path,
        "/notifications/50f65447980018849b991e038d7ad87de5cf07fbad9736b0280e93972e17bac8"
    );
}

#[test]
fn different_keys_produce_unrelated_paths() {
    let a = derive_entry_path("notification_settings", "key-one").unwrap();
    let b = derive_entry_path("notification_settings", "key-two").unwrap();
    assert_ne!(a, b);
}

#[test]
fn entry_segment_is_an_opaque_digest() {
    let path = derive_entry_path("notification_settings", "MOCK_STORAGE_KEY").unwrap();
    let digest = path.rsplit('/').next().unwrap();
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn unknown_entry_id_is_rejected() {
    let err = derive_entry_path("browsing_history", "MOCK_STORAGE_KEY").unwrap_err();
    assert!(matches!(err, CloudError::UnknownEntry(id) if id == "browsing_history"));
}
