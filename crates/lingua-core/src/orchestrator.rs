use std::sync::Arc;

use lingua_flows::GenerativeBackend;
use lingua_history::History;
use lingua_types::Capability;

use crate::language::locale_for;
use crate::session::{Completion, Outcome, PendingCall, Rejection, Session};
use crate::speech::{SpeechError, Speaker};
use crate::state::Translation;

/// Session state plus the collaborators it drives: the generative backend
/// and the translation history.
pub struct Orchestrator {
    session: Session,
    history: History,
    backend: Arc<dyn GenerativeBackend>,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn GenerativeBackend>, history: History, target_language: &str) -> Self {
        Self {
            session: Session::new(target_language),
            history,
            backend,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn backend(&self) -> Arc<dyn GenerativeBackend> {
        self.backend.clone()
    }

    pub fn begin(&mut self, capability: Capability) -> Result<PendingCall, Rejection> {
        let call = self.session.begin(capability)?;
        tracing::info!(%capability, generation = call.generation, "request started");
        Ok(call)
    }

    /// Apply a completion; successful translations land in the history
    pub fn finish(&mut self, completion: Completion) -> Outcome {
        let outcome = self.session.finish(completion);

        if let Some(translation) = &outcome.translation {
            let entry = self.history.add_entry(
                &translation.original,
                &translation.text,
                &translation.language,
            );
            tracing::debug!(id = %entry.id, entries = self.history.len(), "history entry added");
        }

        tracing::info!(
            capability = %outcome.capability,
            applied = outcome.applied,
            failed = outcome.notification.is_some(),
            "request finished"
        );
        outcome
    }

    /// Begin, call the backend and finish in one go
    pub async fn run(&mut self, capability: Capability) -> Result<Outcome, Rejection> {
        let call = self.begin(capability)?;
        let completion = call.execute(self.backend.as_ref()).await;
        Ok(self.finish(completion))
    }

    pub fn select_history(&mut self, index: usize) -> Result<Translation, Rejection> {
        let entry = self
            .history
            .get(index)
            .cloned()
            .ok_or(Rejection::NoSuchEntry(index))?;
        self.session.select_history(&entry)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        tracing::info!("history cleared");
    }

    /// Text and locale of the current translation, if there is one to speak
    pub fn speech_request(&self) -> Result<(String, &'static str), SpeechError> {
        let translation = self
            .session
            .translation()
            .success()
            .ok_or(SpeechError::NothingToSpeak)?;

        Ok((translation.text.clone(), locale_for(&translation.language)))
    }

    /// Read the current translation aloud
    pub async fn listen(&self, speaker: &dyn Speaker) -> Result<(), SpeechError> {
        let (text, locale) = self.speech_request()?;
        tracing::debug!(%locale, "speaking translation");
        speaker.speak(&text, locale).await
    }
}
