use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HISTORY_KEY: &str = "linguaLensHistory";

fn default_capacity() -> usize {
    20
}

fn default_storage_key() -> String {
    DEFAULT_HISTORY_KEY.to_string()
}

fn default_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(crate::APP_NAME)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Directory holding the persisted history file
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            storage_key: default_storage_key(),
            dir: default_dir(),
        }
    }
}
