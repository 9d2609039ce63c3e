use kanal::AsyncSender;
use lingua_core::Orchestrator;
use lingua_types::AppEvent;

use super::send_rejection;

pub async fn handle_set_input(
    orchestrator: &mut Orchestrator,
    text: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::debug!("Input set: {} chars", text.chars().count());
    if let Err(rejection) = orchestrator.session_mut().set_input(text) {
        send_rejection(app_to_ui_tx, rejection).await?;
    }
    Ok(())
}

pub async fn handle_set_language(
    orchestrator: &mut Orchestrator,
    name: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match orchestrator.session_mut().set_target_language(name) {
        Ok(()) => {
            let language = orchestrator.session().target_language().to_string();
            tracing::info!("Target language: {language}");
            app_to_ui_tx
                .send(AppEvent::Status(format!("Target language: {language}")))
                .await?;
        }
        Err(rejection) => send_rejection(app_to_ui_tx, rejection).await?,
    }
    Ok(())
}
