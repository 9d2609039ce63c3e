use std::sync::Arc;

use kanal::AsyncSender;
use lingua_core::{Orchestrator, Speaker};
use lingua_types::{AppEvent, Notification};

/// Speak the current translation without blocking the event loop
pub async fn handle_listen(
    orchestrator: &Orchestrator,
    speaker: Arc<dyn Speaker>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (text, locale) = match orchestrator.speech_request() {
        Ok(request) => request,
        Err(e) => {
            app_to_ui_tx.send(AppEvent::Status(e.to_string())).await?;
            return Ok(());
        }
    };

    tracing::debug!(%locale, "Speaking translation");
    let app_to_ui_tx = app_to_ui_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = speaker.speak(&text, locale).await {
            tracing::error!("Speech failed: {e}");
            let _ = app_to_ui_tx
                .send(AppEvent::Notify(Notification::failure(
                    "Speech Unavailable",
                    "Could not read the translation aloud.",
                )))
                .await;
        }
    });

    Ok(())
}
