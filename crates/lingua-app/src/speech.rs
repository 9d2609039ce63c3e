use lingua_core::{SpeechError, Speaker};
use tokio::process::Command;

/// Speaks through an external synthesizer invoked as `<program> -v <locale> <text>`
pub struct CommandSpeaker {
    program: String,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait::async_trait]
impl Speaker for CommandSpeaker {
    async fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::NothingToSpeak);
        }

        tracing::debug!(program = %self.program, %locale, "spawning speech command");
        let status = Command::new(&self.program)
            .arg("-v")
            .arg(locale)
            .arg(text)
            .kill_on_drop(true)
            .status()
            .await?;

        if !status.success() {
            return Err(SpeechError::Command(format!(
                "{} exited with {status}",
                self.program
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_an_io_error() {
        let speaker = CommandSpeaker::new("lingua-no-such-synthesizer");
        let err = speaker.speak("hola", "es-ES").await.unwrap_err();
        assert!(matches!(err, SpeechError::Io(_)));
    }

    #[tokio::test]
    async fn blank_text_is_not_spoken() {
        let speaker = CommandSpeaker::new("lingua-no-such-synthesizer");
        let err = speaker.speak("  ", "es-ES").await.unwrap_err();
        assert!(matches!(err, SpeechError::NothingToSpeak));
    }
}
