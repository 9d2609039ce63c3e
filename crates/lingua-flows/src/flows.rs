//! The three flows: translate, define, pronounce.
//!
//! Each flow is a prompt template plus a declared output schema. `run_flow`
//! renders the prompt, hands it to a [`GenerativeBackend`] and turns the JSON
//! answer into the typed output.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::prompt::PromptTemplate;
use crate::{FlowError, GenerateRequest, GenerativeBackend};

pub const TRANSLATE_FLOW: &str = "translateTextFlow";
pub const DEFINE_FLOW: &str = "defineMeaningFlow";
pub const PRONOUNCE_FLOW: &str = "pronounceTextFlow";

const TRANSLATE_PROMPT: PromptTemplate = PromptTemplate::new(
    "You are an expert multilingual translator. Translate the following text into {targetLanguage}.

Text to translate:
\"{text}\"",
);

const DEFINE_PROMPT: PromptTemplate = PromptTemplate::new(
    "What is the meaning of the following text: {text}",
);

const PRONOUNCE_PROMPT: PromptTemplate = PromptTemplate::new(
    "You are a linguistic expert. Provide the phonetic pronunciation for the following text, which is in {language}. Use the International Phonetic Alphabet (IPA) if appropriate for the language.

Text: \"{text}\"",
);

/// Output types carry exactly one text field
pub trait FlowOutput: DeserializeOwned {
    fn text(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct FlowDefinition {
    pub name: &'static str,
    pub prompt: PromptTemplate,
    pub output_schema: Value,
}

impl FlowDefinition {
    pub fn translate() -> Self {
        Self {
            name: TRANSLATE_FLOW,
            prompt: TRANSLATE_PROMPT,
            output_schema: text_schema("translation", "The translated text."),
        }
    }

    pub fn define() -> Self {
        Self {
            name: DEFINE_FLOW,
            prompt: DEFINE_PROMPT,
            output_schema: text_schema("meaning", "The meaning of the text."),
        }
    }

    pub fn pronounce() -> Self {
        Self {
            name: PRONOUNCE_FLOW,
            prompt: PRONOUNCE_PROMPT,
            output_schema: text_schema(
                "pronunciation",
                "The phonetic pronunciation of the text, using the International Phonetic Alphabet (IPA) if possible.",
            ),
        }
    }
}

fn text_schema(field: &str, description: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            field: { "type": "STRING", "description": description }
        },
        "required": [field]
    })
}

fn require(value: &str, what: &str) -> Result<(), FlowError> {
    if value.trim().is_empty() {
        return Err(FlowError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextInput {
    pub text: String,
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateTextOutput {
    pub translation: String,
}

impl FlowOutput for TranslateTextOutput {
    fn text(&self) -> &str {
        &self.translation
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefineMeaningInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefineMeaningOutput {
    pub meaning: String,
}

impl FlowOutput for DefineMeaningOutput {
    fn text(&self) -> &str {
        &self.meaning
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronounceTextInput {
    pub text: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronounceTextOutput {
    pub pronunciation: String,
}

impl FlowOutput for PronounceTextOutput {
    fn text(&self) -> &str {
        &self.pronunciation
    }
}

/// Render, call the backend and parse the structured answer
pub async fn run_flow<O: FlowOutput>(
    backend: &dyn GenerativeBackend,
    definition: &FlowDefinition,
    vars: &[(&str, &str)],
) -> Result<O, FlowError> {
    let request = GenerateRequest {
        flow: definition.name.to_string(),
        prompt: definition.prompt.render(vars),
        output_schema: definition.output_schema.clone(),
    };

    tracing::debug!(
        flow = definition.name,
        prompt_chars = request.prompt.len(),
        "running flow"
    );

    let value = backend.generate(request).await?;

    if value.is_null() {
        return Err(FlowError::EmptyOutput {
            flow: definition.name.to_string(),
        });
    }

    let output: O = serde_json::from_value(value).map_err(|e| FlowError::MalformedOutput {
        flow: definition.name.to_string(),
        reason: e.to_string(),
    })?;

    if output.text().trim().is_empty() {
        return Err(FlowError::EmptyOutput {
            flow: definition.name.to_string(),
        });
    }

    Ok(output)
}

pub async fn translate_text(
    backend: &dyn GenerativeBackend,
    input: &TranslateTextInput,
) -> Result<TranslateTextOutput, FlowError> {
    require(&input.text, "text")?;
    require(&input.target_language, "targetLanguage")?;

    run_flow(
        backend,
        &FlowDefinition::translate(),
        &[
            ("text", input.text.as_str()),
            ("targetLanguage", input.target_language.as_str()),
        ],
    )
    .await
}

pub async fn define_meaning(
    backend: &dyn GenerativeBackend,
    input: &DefineMeaningInput,
) -> Result<DefineMeaningOutput, FlowError> {
    require(&input.text, "text")?;

    run_flow(backend, &FlowDefinition::define(), &[("text", input.text.as_str())]).await
}

pub async fn pronounce_text(
    backend: &dyn GenerativeBackend,
    input: &PronounceTextInput,
) -> Result<PronounceTextOutput, FlowError> {
    require(&input.text, "text")?;
    require(&input.language, "language")?;

    run_flow(
        backend,
        &FlowDefinition::pronounce(),
        &[("text", input.text.as_str()), ("language", input.language.as_str())],
    )
    .await
}
