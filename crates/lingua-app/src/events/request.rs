use kanal::AsyncSender;
use lingua_core::{Completion, Orchestrator};
use lingua_types::{AppEvent, Capability};

use super::send_rejection;

/// Admit a request and run it on its own task. Returns whether a call was
/// started.
pub async fn handle_request(
    orchestrator: &mut Orchestrator,
    capability: Capability,
    done_tx: &AsyncSender<Completion>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<bool> {
    let call = match orchestrator.begin(capability) {
        Ok(call) => call,
        Err(rejection) => {
            send_rejection(app_to_ui_tx, rejection).await?;
            return Ok(false);
        }
    };

    app_to_ui_tx
        .send(AppEvent::Busy {
            capability,
            busy: true,
        })
        .await?;

    let backend = orchestrator.backend();
    let done_tx = done_tx.clone();
    tokio::spawn(async move {
        let completion = call.execute(backend.as_ref()).await;
        if let Err(e) = done_tx.send(completion).await {
            tracing::debug!("Dropping {capability} result, event loop is gone: {e}");
        }
    });

    Ok(true)
}

pub async fn handle_completion(
    orchestrator: &mut Orchestrator,
    completion: Completion,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let outcome = orchestrator.finish(completion);
    let capability = outcome.capability;
    let session = orchestrator.session();

    app_to_ui_tx
        .send(AppEvent::Busy {
            capability,
            busy: session.is_busy(capability),
        })
        .await?;

    if !outcome.applied {
        return Ok(());
    }

    if let Some(notification) = outcome.notification {
        app_to_ui_tx.send(AppEvent::Notify(notification)).await?;
        return Ok(());
    }

    let event = match capability {
        Capability::Translate => outcome.translation.map(|t| AppEvent::ShowTranslation {
            original: t.original,
            text: t.text,
            language: t.language,
        }),
        Capability::Define => session.meaning().success().cloned().map(AppEvent::ShowMeaning),
        Capability::Pronounce => session
            .pronunciation()
            .success()
            .cloned()
            .map(AppEvent::ShowPronunciation),
    };

    if let Some(event) = event {
        app_to_ui_tx.send(event).await?;
    }

    Ok(())
}
