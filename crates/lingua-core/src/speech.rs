/// Text-to-speech interface
#[async_trait::async_trait]
pub trait Speaker: Send + Sync {
    /// Read `text` aloud using a BCP 47 locale such as `es-ES`
    async fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Nothing to speak, translate some text first")]
    NothingToSpeak,

    #[error("Speech command failed: {0}")]
    Command(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
