use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::genai::GenAiConfig;
use self::history::HistoryConfig;
use self::ui::UiConfig;

pub mod genai;
pub mod history;
pub mod ui;

pub const APP_NAME: &str = "lingua-lens";

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub genai: GenAiConfig,
    pub history: HistoryConfig,
    pub ui: UiConfig,

    /// Capacity of the UI -> app channel
    pub command_queue: usize,
}

impl Config {
    /// Defaults overlaid with whatever the environment provides
    pub fn new() -> Self {
        Config {
            command_queue: 64,
            ..Default::default()
        }
        .with_env_overrides()
    }

    /// Apply `LINGUA_*` and API key variables on top of the current values
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = env_string("GEMINI_API_KEY").or_else(|| env_string("GOOGLE_API_KEY")) {
            self.genai.api_key = key;
        }
        if let Some(model) = env_string("LINGUA_MODEL") {
            self.genai.model = model;
        }
        if let Some(url) = env_string("LINGUA_API_URL") {
            self.genai.api_url = url;
        }
        if let Some(timeout) = env_string("LINGUA_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.genai.timeout_seconds = timeout;
        }
        if let Some(dir) = env_string("LINGUA_HISTORY_DIR") {
            self.history.dir = PathBuf::from(dir);
        }
        if let Some(language) = env_string("LINGUA_TARGET_LANGUAGE") {
            self.ui.target_language = language;
        }
        if let Some(command) = env_string("LINGUA_SPEECH_COMMAND") {
            self.ui.speech_command = command;
        }
        if self.command_queue == 0 {
            self.command_queue = 64;
        }

        self
    }

    /// Default location of the JSON profile
    pub fn default_profile_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join("config.json")
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "genai": { "model": "gemini-1.5-pro" } }"#).unwrap();

        assert_eq!(config.genai.model, "gemini-1.5-pro");
        assert_eq!(config.genai.provider, "googleai");
        assert_eq!(config.history.capacity, 20);
        assert_eq!(config.history.storage_key, "linguaLensHistory");
        assert_eq!(config.ui.target_language, "Spanish");
        assert_eq!(config.genai.timeout_seconds, 0);
    }

    #[test]
    fn empty_profile_is_valid() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.ui.speech_command, "espeak-ng");
        assert!(config.history.dir.ends_with(APP_NAME));
    }

    #[test]
    fn zero_queue_is_replaced() {
        let config = Config::default().with_env_overrides();
        assert_eq!(config.command_queue, 64);
    }
}
