use kanal::AsyncSender;
use lingua_core::Orchestrator;
use lingua_types::AppEvent;

use super::send_rejection;

pub async fn handle_show_history(
    orchestrator: &Orchestrator,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let entries = orchestrator.history().entries().to_vec();
    tracing::debug!("Showing {} history entries", entries.len());
    app_to_ui_tx.send(AppEvent::HistoryList(entries)).await?;
    Ok(())
}

pub async fn handle_select_history(
    orchestrator: &mut Orchestrator,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match orchestrator.select_history(index) {
        Ok(translation) => {
            app_to_ui_tx
                .send(AppEvent::ShowTranslation {
                    original: translation.original,
                    text: translation.text,
                    language: translation.language,
                })
                .await?;
        }
        Err(rejection) => send_rejection(app_to_ui_tx, rejection).await?,
    }
    Ok(())
}

pub async fn handle_clear_history(
    orchestrator: &mut Orchestrator,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    orchestrator.clear_history();
    app_to_ui_tx.send(AppEvent::HistoryList(Vec::new())).await?;
    Ok(())
}
