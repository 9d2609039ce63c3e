use serde::{Deserialize, Serialize};

fn default_target_language() -> String {
    "Spanish".to_string()
}

fn default_speech_command() -> String {
    "espeak-ng".to_string()
}

fn default_history_preview_chars() -> usize {
    60
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// Program invoked as `<cmd> -v <locale> <text>` to read translations aloud
    #[serde(default = "default_speech_command")]
    pub speech_command: String,
    #[serde(default = "default_history_preview_chars")]
    pub history_preview_chars: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            target_language: default_target_language(),
            speech_command: default_speech_command(),
            history_preview_chars: default_history_preview_chars(),
        }
    }
}
