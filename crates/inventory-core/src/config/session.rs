//! Durable client session configuration.

use serde::{Deserialize, Serialize};

/// Where the client keeps its session between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file on disk.
    #[default]
    File,
    /// Process memory only. Useful for tests.
    Memory,
}

/// Client session storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage backend.
    #[serde(default)]
    pub storage: StorageBackend,
    /// Path of the session file. Relative paths resolve against the home
    /// directory when used from the CLI.
    #[serde(default = "default_path")]
    pub path: String,
    /// Storage key holding the bearer token.
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// Storage key holding the serialized user profile.
    #[serde(default = "default_user_key")]
    pub user_key: String,
    /// Cookie the page gate reads the token from.
    #[serde(default = "default_token_key")]
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            path: default_path(),
            token_key: default_token_key(),
            user_key: default_user_key(),
            cookie_name: default_token_key(),
        }
    }
}

fn default_path() -> String {
    ".inventory/session.json".to_string()
}

fn default_token_key() -> String {
    "inventory_auth_token".to_string()
}

fn default_user_key() -> String {
    "inventory_user_info".to_string()
}
