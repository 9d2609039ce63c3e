use std::io::Write;

use lingua_core::{Orchestrator, Outcome, Speaker};
use lingua_flows::{DefineMeaningInput, PronounceTextInput};
use lingua_types::Capability;

use crate::ui::render::render_history;

/// Options for a one-shot translation
pub struct TranslateArgs {
    pub text: String,
    pub to: Option<String>,
    pub define: bool,
    pub pronounce: bool,
    pub listen: bool,
}

pub async fn translate(
    orchestrator: &mut Orchestrator,
    speaker: &dyn Speaker,
    args: TranslateArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Some(language) = &args.to {
        orchestrator
            .session_mut()
            .set_target_language(language)
            .map_err(|r| anyhow::anyhow!("{r}"))?;
    }
    orchestrator
        .session_mut()
        .set_input(args.text)
        .map_err(|r| anyhow::anyhow!("{r}"))?;

    let outcome = run(orchestrator, Capability::Translate).await?;
    if let Some(translation) = outcome.translation {
        writeln!(out, "{}", translation.text)?;
    }

    if args.define {
        run(orchestrator, Capability::Define).await?;
        if let Some(meaning) = orchestrator.session().meaning().success() {
            writeln!(out, "\nContext & Meaning:\n{meaning}")?;
        }
    }

    if args.pronounce {
        run(orchestrator, Capability::Pronounce).await?;
        if let Some(pronunciation) = orchestrator.session().pronunciation().success() {
            writeln!(out, "\nPronunciation:\n{pronunciation}")?;
        }
    }

    if args.listen {
        orchestrator.listen(speaker).await?;
    }

    Ok(())
}

/// Run one capability, turning rejections and failure notices into errors
async fn run(orchestrator: &mut Orchestrator, capability: Capability) -> anyhow::Result<Outcome> {
    let outcome = orchestrator
        .run(capability)
        .await
        .map_err(|r| anyhow::anyhow!("{r}"))?;

    if let Some(notification) = &outcome.notification {
        anyhow::bail!("{}: {}", notification.title, notification.description);
    }
    Ok(outcome)
}

/// Explain arbitrary text without translating it first
pub async fn define(
    orchestrator: &Orchestrator,
    text: String,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let backend = orchestrator.backend();
    let output = lingua_flows::define_meaning(backend.as_ref(), &DefineMeaningInput { text }).await?;
    writeln!(out, "{}", output.meaning)?;
    Ok(())
}

pub async fn pronounce(
    orchestrator: &Orchestrator,
    text: String,
    language: Option<String>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let language = language.unwrap_or_else(|| orchestrator.session().target_language().to_string());
    let backend = orchestrator.backend();
    let output =
        lingua_flows::pronounce_text(backend.as_ref(), &PronounceTextInput { text, language })
            .await?;
    writeln!(out, "{}", output.pronunciation)?;
    Ok(())
}

pub fn history(orchestrator: &Orchestrator, preview_chars: usize, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", render_history(orchestrator.history().entries(), preview_chars))?;
    Ok(())
}

pub fn clear_history(orchestrator: &mut Orchestrator, out: &mut impl Write) -> anyhow::Result<()> {
    let removed = orchestrator.history().len();
    orchestrator.clear_history();
    writeln!(out, "Removed {removed} entries.")?;
    Ok(())
}
