//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Where the chat page is served and how long idle browser sessions live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Idle browser sessions are dropped after this many seconds (valid range: 60-86400).
    pub session_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8501,
            session_ttl_secs: 3600,
        }
    }
}
