//! Sync protocol tests against a mock user-storage server: not-found and
//! corruption semantics, auth headers, and write failures.

use uservault_cloud::auth::StorageKey;
use uservault_cloud::config::CloudConfig;
use uservault_cloud::error::CloudError;
use uservault_cloud::path::derive_entry_path;
use uservault_cloud::service::UserStorageService;
use uservault_crypto::{decrypt_string, encrypt_string};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENTRY: &str = "notification_settings";
const TOKEN: &str = "jwt-access-token";

fn setup(server: &MockServer) -> UserStorageService {
    UserStorageService::new(CloudConfig {
        api_base_url: server.uri(),
    })
}

fn storage_key() -> StorageKey {
    StorageKey::from_signature("0x5eedfeed-signature")
}

fn entry_path(key: &StorageKey) -> String {
    format!(
        "/api/v1/userstorage{}",
        derive_entry_path(ENTRY, key.as_str()).unwrap()
    )
}

// ── Read: Not-Found Semantics ──

#[tokio::test]
async fn read_missing_entry_resolves_to_none() {
    let server = MockServer::start().await;
    let key = storage_key();

    Mock::given(method("GET"))
        .and(path(entry_path(&key)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = setup(&server);
    let result = service.read_entry(ENTRY, &key, TOKEN).await.unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn read_treats_empty_data_as_absent() {
    let server = MockServer::start().await;
    let key = storage_key();

    Mock::given(method("GET"))
        .and(path(entry_path(&key)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "HashedKey": "abc123",
            "Data": ""
        })))
        .mount(&server)
        .await;

    let service = setup(&server);
    let result = service.read_entry(ENTRY, &key, TOKEN).await.unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn read_treats_missing_data_field_as_absent() {
    let server = MockServer::start().await;
    let key = storage_key();

    Mock::given(method("GET"))
        .and(path(entry_path(&key)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "HashedKey": "abc123"
        })))
        .mount(&server)
        .await;

    let service = setup(&server);
    let result = service.read_entry(ENTRY, &key, TOKEN).await.unwrap();
    assert_eq!(result, None);
}

// ── Read: Success ──

#[tokio::test]
async fn read_decrypts_stored_envelope() {
    let server = MockServer::start().await;
    let key = storage_key();
    let stored = encrypt_string(r#"{"is_enabled":true}"#, key.as_str()).unwrap();

    Mock::given(method("GET"))
        .and(path(entry_path(&key)))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "HashedKey": "abc123",
            "Data": stored
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = setup(&server);
    let result = service.read_entry(ENTRY, &key, TOKEN).await.unwrap();
    assert_eq!(result.as_deref(), Some(r#"{"is_enabled":true}"#));
}

// ── Read: Corruption Resilience ──

#[tokio::test]
async fn read_recovers_from_garbage_data() {
    let server = MockServer::start().await;
    let key = storage_key();

    Mock::given(method("GET"))
        .and(path(entry_path(&key)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "HashedKey": "abc123",
            "Data": "definitely not an envelope"
        })))
        .mount(&server)
        .await;

    let service = setup(&server);
    let result = service.read_entry(ENTRY, &key, TOKEN).await.unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn read_recovers_from_foreign_key_envelope() {
    let server = MockServer::start().await;
    let key = storage_key();
    // Valid envelope, but sealed under somebody else's storage key.
    let foreign = encrypt_string("foreign data", "some-other-storage-key").unwrap();

    Mock::given(method("GET"))
        .and(path(entry_path(&key)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "HashedKey": "abc123",
            "Data": foreign
        })))
        .mount(&server)
        .await;

    let service = setup(&server);
    let result = service.read_entry(ENTRY, &key, TOKEN).await.unwrap();
    assert_eq!(result, None);
}

// ── Read: Failure Statuses ──

#[tokio::test]
async fn read_surfaces_server_errors() {
    let server = MockServer::start().await;
    let key = storage_key();

    Mock::given(method("GET"))
        .and(path(entry_path(&key)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = setup(&server);
    let err = service.read_entry(ENTRY, &key, TOKEN).await.unwrap_err();
    assert!(matches!(err, CloudError::ReadFailed(500)));
}

#[tokio::test]
async fn read_surfaces_unauthorized() {
    let server = MockServer::start().await;
    let key = storage_key();

    Mock::given(method("GET"))
        .and(path(entry_path(&key)))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let service = setup(&server);
    let err = service.read_entry(ENTRY, &key, TOKEN).await.unwrap_err();
    assert!(matches!(err, CloudError::ReadFailed(401)));
}

// ── Write ──

#[tokio::test]
async fn write_uploads_a_decryptable_envelope() {
    let server = MockServer::start().await;
    let key = storage_key();

    Mock::given(method("PUT"))
        .and(path(entry_path(&key)))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let service = setup(&server);
    service
        .write_entry(ENTRY, "plaintext settings", &key, TOKEN)
        .await
        .unwrap();

    // The uploaded body must be `{"data": <envelope>}` with an envelope
    // that decrypts under the same storage key.
    let requests = server.received_requests().await.unwrap();
    let put = requests.iter().find(|r| r.method.to_string() == "PUT").unwrap();
    let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    let envelope = body["data"].as_str().unwrap();
    assert_eq!(
        decrypt_string(envelope, key.as_str()).unwrap(),
        "plaintext settings"
    );
}

#[tokio::test]
async fn write_failure_is_an_error() {
    let server = MockServer::start().await;
    let key = storage_key();

    Mock::given(method("PUT"))
        .and(path(entry_path(&key)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = setup(&server);
    let err = service
        .write_entry(ENTRY, "value", &key, TOKEN)
        .await
        .unwrap_err();
    assert!(matches!(err, CloudError::WriteFailed(500)));
}

#[tokio::test]
async fn write_forbidden_is_an_error() {
    let server = MockServer::start().await;
    let key = storage_key();

    Mock::given(method("PUT"))
        .and(path(entry_path(&key)))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let service = setup(&server);
    let err = service
        .write_entry(ENTRY, "value", &key, TOKEN)
        .await
        .unwrap_err();
    assert!(matches!(err, CloudError::WriteFailed(403)));
}

// ── Registry Errors ──

#[tokio::test]
async fn read_of_unregistered_entry_never_hits_the_network() {
    let server = MockServer::start().await;
    let key = storage_key();

    let service = setup(&server);
    let err = service
        .read_entry("browsing_history", &key, TOKEN)
        .await
        .unwrap_err();
    assert!(matches!(err, CloudError::UnknownEntry(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn write_of_unregistered_entry_never_hits_the_network() {
    let server = MockServer::start().await;
    let key = storage_key();

    let service = setup(&server);
    let err = service
        .write_entry("browsing_history", "value", &key, TOKEN)
        .await
        .unwrap_err();
    assert!(matches!(err, CloudError::UnknownEntry(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
