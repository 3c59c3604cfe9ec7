//! User-storage client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the user-storage client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Base URL for the user-storage API (e.g., "https://api.uservault.io").
    pub api_base_url: String,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.uservault.io".to_string(),
        }
    }
}
