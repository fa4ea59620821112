//! Backend connection settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the prediction/chat/planner backend lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:5000`
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Base URL with surrounding whitespace and trailing slashes removed so
    /// endpoint paths can be appended.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_seconds: 30,
        }
    }
}
