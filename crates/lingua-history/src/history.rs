use std::sync::Arc;

use lingua_types::TranslationEntry;

use crate::store::KeyValueStore;

/// Newest-first translation log, bounded and mirrored to a key-value store.
///
/// Storage problems never escape: a failed write or a corrupt blob is logged
/// and the in-memory list stays authoritative.
pub struct History {
    store: Arc<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    entries: Vec<TranslationEntry>,
}

impl History {
    /// Read whatever is persisted under `key`. Missing or unreadable data
    /// yields an empty history.
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>, capacity: usize) -> Self {
        let key = key.into();
        let capacity = capacity.max(1);

        let entries = match store.get(&key) {
            Ok(Some(data)) => match serde_json::from_str::<Vec<TranslationEntry>>(&data) {
                Ok(mut entries) => {
                    if entries.len() > capacity {
                        tracing::warn!(
                            stored = entries.len(),
                            capacity,
                            "persisted history over capacity, truncating"
                        );
                        entries.truncate(capacity);
                    }
                    entries
                }
                Err(e) => {
                    tracing::error!("Failed to load history from storage: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("Failed to read history from storage: {e}");
                Vec::new()
            }
        };

        tracing::debug!(entries = entries.len(), %key, "history loaded");

        Self {
            store,
            key,
            capacity,
            entries,
        }
    }

    /// Record a finished translation and persist the new list
    pub fn add_entry(
        &mut self,
        original_text: &str,
        translated_text: &str,
        language: &str,
    ) -> TranslationEntry {
        let entry = TranslationEntry {
            id: uuid::Uuid::new_v4().to_string(),
            original_text: original_text.to_string(),
            translated_text: translated_text.to_string(),
            language: language.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        self.entries.insert(0, entry.clone());
        self.entries.truncate(self.capacity);
        self.persist();

        entry
    }

    /// Drop everything, in memory and in storage
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.delete(&self.key) {
            tracing::error!("Failed to clear history from storage: {e}");
        }
    }

    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&TranslationEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        let data = match serde_json::to_string(&self.entries) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Failed to serialize history: {e}");
                return;
            }
        };

        if let Err(e) = self.store.set(&self.key, &data) {
            tracing::error!("Failed to save history to storage: {e}");
        }
    }
}
