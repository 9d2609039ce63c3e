//! Interaction state for one user session.
//!
//! Each capability moves `Idle -> InFlight -> Success | Failed`. `begin`
//! performs the user-action half of a transition and hands back a
//! [`PendingCall`]; whoever runs the call feeds the [`Completion`] to
//! `finish`. Nothing here touches the network, so the whole machine can be
//! driven step by step in tests.

use std::fmt;

use lingua_flows::{
    DefineMeaningInput, DefineMeaningOutput, FlowError, GenerativeBackend, PronounceTextInput,
    PronounceTextOutput, TranslateTextInput, TranslateTextOutput,
};
use lingua_types::{Capability, Notification, TranslationEntry};

use crate::language::{DEFAULT_LANGUAGE, find_language};
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::state::{FlowState, Translation};

#[derive(Debug, Clone)]
pub enum FlowRequest {
    Translate(TranslateTextInput),
    Define(DefineMeaningInput),
    Pronounce(PronounceTextInput),
}

/// A flow call that has been admitted but not yet run
#[derive(Debug, Clone)]
pub struct PendingCall {
    pub generation: u64,
    pub request: FlowRequest,
}

impl PendingCall {
    pub fn capability(&self) -> Capability {
        match self.request {
            FlowRequest::Translate(_) => Capability::Translate,
            FlowRequest::Define(_) => Capability::Define,
            FlowRequest::Pronounce(_) => Capability::Pronounce,
        }
    }

    pub async fn execute(self, backend: &dyn GenerativeBackend) -> Completion {
        let result = match self.request {
            FlowRequest::Translate(input) => {
                let result = lingua_flows::translate_text(backend, &input).await;
                FlowResult::Translated { input, result }
            }
            FlowRequest::Define(input) => {
                FlowResult::Defined(lingua_flows::define_meaning(backend, &input).await)
            }
            FlowRequest::Pronounce(input) => {
                FlowResult::Pronounced(lingua_flows::pronounce_text(backend, &input).await)
            }
        };

        Completion {
            generation: self.generation,
            result,
        }
    }
}

#[derive(Debug)]
pub enum FlowResult {
    Translated {
        input: TranslateTextInput,
        result: Result<TranslateTextOutput, FlowError>,
    },
    Defined(Result<DefineMeaningOutput, FlowError>),
    Pronounced(Result<PronounceTextOutput, FlowError>),
}

#[derive(Debug)]
pub struct Completion {
    pub generation: u64,
    pub result: FlowResult,
}

impl Completion {
    pub fn capability(&self) -> Capability {
        match self.result {
            FlowResult::Translated { .. } => Capability::Translate,
            FlowResult::Defined(_) => Capability::Define,
            FlowResult::Pronounced(_) => Capability::Pronounce,
        }
    }
}

/// Why a user action was not admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The control is disabled while this capability is in flight
    Busy(Capability),
    /// Define/pronounce/listen need a translation first
    NoTranslation,
    NoSuchEntry(usize),
    Invalid(Notification),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Busy(capability) => write!(f, "{capability} is already running"),
            Rejection::NoTranslation => f.write_str("Translate some text first"),
            Rejection::NoSuchEntry(index) => write!(f, "No history entry #{}", index + 1),
            Rejection::Invalid(n) => write!(f, "{}: {}", n.title, n.description),
        }
    }
}

/// What `finish` did with a completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub capability: Capability,
    /// False when the result belonged to a superseded translation
    pub applied: bool,
    pub notification: Option<Notification>,
    /// Set when a new translation succeeded
    pub translation: Option<Translation>,
}

pub struct Session {
    input_text: String,
    target_language: String,
    generation: u64,
    translation: FlowState<Translation>,
    meaning: FlowState<String>,
    pronunciation: FlowState<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl Session {
    pub fn new(target_language: &str) -> Self {
        let target_language = match find_language(target_language) {
            Some(language) => language.name,
            None => {
                tracing::warn!(
                    requested = target_language,
                    fallback = DEFAULT_LANGUAGE,
                    "unsupported target language"
                );
                DEFAULT_LANGUAGE
            }
        };

        Self {
            input_text: String::new(),
            target_language: target_language.to_string(),
            generation: 0,
            translation: FlowState::Idle,
            meaning: FlowState::Idle,
            pronunciation: FlowState::Idle,
        }
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn translation(&self) -> &FlowState<Translation> {
        &self.translation
    }

    pub fn meaning(&self) -> &FlowState<String> {
        &self.meaning
    }

    pub fn pronunciation(&self) -> &FlowState<String> {
        &self.pronunciation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_busy(&self, capability: Capability) -> bool {
        match capability {
            Capability::Translate => self.translation.is_in_flight(),
            Capability::Define => self.meaning.is_in_flight(),
            Capability::Pronounce => self.pronunciation.is_in_flight(),
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> Result<(), Rejection> {
        self.ensure_idle_translation()?;
        self.input_text = text.into();
        Ok(())
    }

    pub fn set_target_language(&mut self, name: &str) -> Result<(), Rejection> {
        self.ensure_idle_translation()?;
        let language = find_language(name).ok_or_else(|| {
            Rejection::Invalid(Notification::validation(
                "Unsupported Language",
                format!("\"{}\" is not one of the available languages.", name.trim()),
            ))
        })?;
        self.target_language = language.name.to_string();
        Ok(())
    }

    /// Admit a user action, moving its capability to in-flight
    pub fn begin(&mut self, capability: Capability) -> Result<PendingCall, Rejection> {
        match capability {
            Capability::Translate => self.begin_translate(),
            Capability::Define => {
                let translation = self.ready_translation(Capability::Define)?;
                let request = FlowRequest::Define(DefineMeaningInput {
                    text: translation.text.clone(),
                });
                self.meaning = FlowState::InFlight;
                Ok(self.pending(request))
            }
            Capability::Pronounce => {
                let translation = self.ready_translation(Capability::Pronounce)?;
                let request = FlowRequest::Pronounce(PronounceTextInput {
                    text: translation.text.clone(),
                    language: translation.language.clone(),
                });
                self.pronunciation = FlowState::InFlight;
                Ok(self.pending(request))
            }
        }
    }

    fn begin_translate(&mut self) -> Result<PendingCall, Rejection> {
        self.ensure_idle_translation()?;

        let text = DefaultPreprocessor.process(&self.input_text);
        if text.is_empty() {
            return Err(Rejection::Invalid(Notification::validation(
                "Input Required",
                "Please enter some text to translate.",
            )));
        }

        self.generation += 1;
        self.translation = FlowState::InFlight;
        self.meaning = FlowState::Idle;
        self.pronunciation = FlowState::Idle;

        Ok(self.pending(FlowRequest::Translate(TranslateTextInput {
            text,
            target_language: self.target_language.clone(),
        })))
    }

    /// Apply a finished call
    pub fn finish(&mut self, completion: Completion) -> Outcome {
        let capability = completion.capability();

        if completion.generation != self.generation {
            tracing::debug!(
                %capability,
                stale = completion.generation,
                current = self.generation,
                "discarding result for superseded translation"
            );
            return Outcome {
                capability,
                applied: false,
                notification: None,
                translation: None,
            };
        }

        let mut outcome = Outcome {
            capability,
            applied: true,
            notification: None,
            translation: None,
        };

        match completion.result {
            FlowResult::Translated { input, result } => match result {
                Ok(output) => {
                    let translation = Translation {
                        original: input.text,
                        text: output.translation,
                        language: input.target_language,
                    };
                    self.translation = FlowState::Success(translation.clone());
                    outcome.translation = Some(translation);
                }
                Err(e) => {
                    tracing::error!("Translation failed: {e}");
                    self.translation = FlowState::Failed;
                    outcome.notification = Some(Notification::failure(
                        "Translation Failed",
                        "Could not translate the text. Please try again later.",
                    ));
                }
            },
            FlowResult::Defined(result) => match result {
                Ok(output) => self.meaning = FlowState::Success(output.meaning),
                Err(e) => {
                    tracing::error!("Definition failed: {e}");
                    self.meaning = FlowState::Failed;
                    outcome.notification = Some(Notification::failure(
                        "Definition Failed",
                        "Could not define the meaning of the text. Please try again.",
                    ));
                }
            },
            FlowResult::Pronounced(result) => match result {
                Ok(output) => self.pronunciation = FlowState::Success(output.pronunciation),
                Err(e) => {
                    tracing::error!("Pronunciation failed: {e}");
                    self.pronunciation = FlowState::Failed;
                    outcome.notification = Some(Notification::failure(
                        "Pronunciation Failed",
                        "Could not get the pronunciation. Please try again.",
                    ));
                }
            },
        }

        outcome
    }

    /// Show a stored translation without calling the backend
    pub fn select_history(&mut self, entry: &TranslationEntry) -> Result<Translation, Rejection> {
        self.ensure_idle_translation()?;

        let translation = Translation {
            original: entry.original_text.clone(),
            text: entry.translated_text.clone(),
            language: entry.language.clone(),
        };

        self.generation += 1;
        self.input_text = entry.original_text.clone();
        self.target_language = entry.language.clone();
        self.translation = FlowState::Success(translation.clone());
        self.meaning = FlowState::Idle;
        self.pronunciation = FlowState::Idle;

        Ok(translation)
    }

    fn ensure_idle_translation(&self) -> Result<(), Rejection> {
        if self.translation.is_in_flight() {
            return Err(Rejection::Busy(Capability::Translate));
        }
        Ok(())
    }

    fn ready_translation(&self, capability: Capability) -> Result<&Translation, Rejection> {
        self.ensure_idle_translation()?;
        if self.is_busy(capability) {
            return Err(Rejection::Busy(capability));
        }
        self.translation.success().ok_or(Rejection::NoTranslation)
    }

    fn pending(&self, request: FlowRequest) -> PendingCall {
        PendingCall {
            generation: self.generation,
            request,
        }
    }
}
