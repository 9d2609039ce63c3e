use chrono::{DateTime, Local};
use lingua_core::language::SUPPORTED_LANGUAGES;
use lingua_types::{AppEvent, NotificationKind, TranslationEntry};

/// Text to print for an app event, if it has a visible effect
pub fn render_event(event: &AppEvent, preview_chars: usize) -> Option<String> {
    match event {
        AppEvent::BackendReady => {
            Some("Ready. Type text to translate, :help for commands.".to_string())
        }
        AppEvent::Busy {
            capability,
            busy: true,
        } => Some(format!("[{capability}] working...")),
        AppEvent::Busy { busy: false, .. } => None,
        AppEvent::ShowTranslation { text, language, .. } => {
            Some(format!("Translation ({language}):\n  {text}"))
        }
        AppEvent::ShowMeaning(meaning) => Some(format!("Context & Meaning:\n  {meaning}")),
        AppEvent::ShowPronunciation(pronunciation) => {
            Some(format!("Pronunciation:\n  {pronunciation}"))
        }
        AppEvent::HistoryList(entries) => Some(render_history(entries, preview_chars)),
        AppEvent::Notify(notification) => {
            let marker = match notification.kind {
                NotificationKind::Validation => "!",
                NotificationKind::Failure => "x",
            };
            Some(format!(
                "{marker} {}: {}",
                notification.title, notification.description
            ))
        }
        AppEvent::Status(status) => Some(status.clone()),
        AppEvent::SetInput(_)
        | AppEvent::SetLanguage(_)
        | AppEvent::Request(_)
        | AppEvent::Listen
        | AppEvent::ShowHistory
        | AppEvent::SelectHistory(_)
        | AppEvent::ClearHistory
        | AppEvent::Quit => None,
    }
}

pub fn render_history(entries: &[TranslationEntry], preview_chars: usize) -> String {
    if entries.is_empty() {
        return "Your translation history is empty.".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{:>2}. {} -> {} ({}, {})",
                i + 1,
                preview(&entry.original_text, preview_chars),
                preview(&entry.translated_text, preview_chars),
                entry.language,
                format_timestamp(entry.timestamp),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_languages() -> String {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|l| format!("  {} ({})", l.name, l.locale))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clip to `max` characters, marking the cut with an ellipsis
pub fn preview(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown time".to_string())
}
