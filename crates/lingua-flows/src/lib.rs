pub mod flows;
pub mod gemini;
pub mod mock;
pub mod prompt;

pub use flows::{
    DefineMeaningInput, DefineMeaningOutput, FlowDefinition, FlowOutput, PronounceTextInput,
    PronounceTextOutput, TranslateTextInput, TranslateTextOutput, define_meaning, pronounce_text,
    run_flow, translate_text,
};
pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use prompt::PromptTemplate;

/// Generative model interface: prompt in, schema-shaped JSON out
#[async_trait::async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Run one prompt and return the structured output
    async fn generate(&self, request: GenerateRequest) -> Result<serde_json::Value, FlowError>;

    /// Provider metadata
    fn metadata(&self) -> BackendMetadata;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Name of the flow issuing the request
    pub flow: String,
    pub prompt: String,
    /// Shape the model must answer in
    pub output_schema: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct BackendMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("{flow} returned no output")]
    EmptyOutput { flow: String },

    #[error("{flow} returned malformed output: {reason}")]
    MalformedOutput { flow: String, reason: String },
}

impl From<reqwest::Error> for FlowError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FlowError::Timeout
        } else {
            FlowError::NetworkError(e)
        }
    }
}
