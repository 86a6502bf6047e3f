//! Completion provider (Gemini) configuration.

use serde::{Deserialize, Serialize};

/// Model selection and generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
    /// Maximum output tokens per reply (valid range: 1-8192).
    pub max_tokens: u32,
    /// Whole-request timeout in seconds (valid range: 5-600).
    pub request_timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-1.5-pro".into(),
            temperature: 0.7,
            max_tokens: 4096,
            request_timeout_secs: 120,
        }
    }
}
