//! Wire types for the user-storage REST endpoints.

use serde::{Deserialize, Serialize};

/// Response body of `GET {base}/api/v1/userstorage{path}`.
///
/// `Data` carries the serialized encrypted envelope; the server may omit
/// it or send an empty string for a record with nothing stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetUserStorageResponse {
    #[serde(rename = "HashedKey")]
    pub hashed_key: String,
    #[serde(rename = "Data", default)]
    pub data: Option<String>,
}

/// Request body of `PUT {base}/api/v1/userstorage{path}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpsertUserStorageRequest {
    pub data: String,
}
