use std::fmt;

use serde::{Deserialize, Serialize};

/// One completed translation, as kept in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    pub id: String,
    pub original_text: String,
    pub translated_text: String,
    pub language: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}

/// The three things a user can ask the backend for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    Translate,
    Define,
    Pronounce,
}

impl Capability {
    pub fn label(&self) -> &'static str {
        match self {
            Capability::Translate => "Translate",
            Capability::Define => "Define Meaning",
            Capability::Pronounce => "Pronunciation",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Input was rejected before any network call
    Validation,
    /// A backend call failed, user may retry
    Failure,
}

/// User-facing message, the terminal counterpart of a toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn validation(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Validation,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // UI -> app
    SetInput(String),
    SetLanguage(String),
    Request(Capability),
    Listen,
    ShowHistory,
    SelectHistory(usize),
    ClearHistory,
    Quit,

    // app -> UI
    Busy {
        capability: Capability,
        busy: bool,
    },
    ShowTranslation {
        original: String,
        text: String,
        language: String,
    },
    ShowMeaning(String),
    ShowPronunciation(String),
    HistoryList(Vec<TranslationEntry>),
    Notify(Notification),
    Status(String),
    BackendReady,
}
