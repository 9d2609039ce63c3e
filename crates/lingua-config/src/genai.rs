use std::fmt;

use serde::{Deserialize, Serialize};

/// The only provider with a backend implementation
pub const GOOGLE_AI_PROVIDER: &str = "googleai";

fn default_provider() -> String {
    GOOGLE_AI_PROVIDER.to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

/// Generative backend connection settings
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GenAiConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Per-request timeout, 0 waits forever
    #[serde(default)]
    pub timeout_seconds: u64,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: String::new(),
            api_url: default_api_url(),
            temperature: default_temperature(),
            timeout_seconds: 0,
        }
    }
}

// Keeps the key out of log lines
impl fmt::Debug for GenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenAiConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &if self.has_api_key() { "<set>" } else { "<empty>" })
            .field("api_url", &self.api_url)
            .field("temperature", &self.temperature)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl GenAiConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Full `generateContent` endpoint for the configured model
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}
