use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lingua_core::{Completion, Orchestrator, Rejection, Speaker};
use lingua_types::AppEvent;
use tokio_util::sync::CancellationToken;

pub mod history;
pub mod input;
pub mod listen;
pub mod request;

use history::{handle_clear_history, handle_select_history, handle_show_history};
use input::{handle_set_input, handle_set_language};
use listen::handle_listen;
use request::{handle_completion, handle_request};

/// App's main loop.
///
/// Owns the orchestrator. Backend calls run in their own tasks and report
/// back over a completion channel, so user actions stay responsive while a
/// request is in flight. On `Quit` the loop stops taking commands and exits
/// once every running request has reported back.
pub async fn event_loop(
    mut orchestrator: Orchestrator,
    speaker: Arc<dyn Speaker>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (done_tx, done_rx) = kanal::unbounded_async::<Completion>();
    let mut in_flight = 0usize;
    let mut quitting = false;

    app_to_ui_tx.send(AppEvent::BackendReady).await?;
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv(), if !quitting => {
                let event = match event {
                    Ok(AppEvent::Quit) | Err(_) => {
                        quitting = true;
                        if in_flight == 0 {
                            break;
                        }
                        tracing::info!(in_flight, "[EVENT_LOOP] Waiting for running requests");
                        continue;
                    }
                    Ok(event) => event,
                };

                tracing::debug!("[EVENT_LOOP] EVENT RECEIVED: {:?}", event);
                if let AppEvent::Request(capability) = event {
                    if handle_request(&mut orchestrator, capability, &done_tx, &app_to_ui_tx).await? {
                        in_flight += 1;
                    }
                } else {
                    handle_events(&mut orchestrator, &speaker, &app_to_ui_tx, event).await?;
                }
            }
            completion = done_rx.recv() => {
                let completion = completion?;
                in_flight = in_flight.saturating_sub(1);
                handle_completion(&mut orchestrator, completion, &app_to_ui_tx).await?;

                if quitting && in_flight == 0 {
                    break;
                }
            }
        }
    }

    cancel.cancel();
    Ok(())
}

async fn handle_events(
    orchestrator: &mut Orchestrator,
    speaker: &Arc<dyn Speaker>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::SetInput(text) => handle_set_input(orchestrator, text, app_to_ui_tx).await?,
        AppEvent::SetLanguage(name) => {
            handle_set_language(orchestrator, &name, app_to_ui_tx).await?
        }
        AppEvent::Listen => handle_listen(orchestrator, speaker.clone(), app_to_ui_tx).await?,
        AppEvent::ShowHistory => handle_show_history(orchestrator, app_to_ui_tx).await?,
        AppEvent::SelectHistory(index) => {
            handle_select_history(orchestrator, index, app_to_ui_tx).await?
        }
        AppEvent::ClearHistory => handle_clear_history(orchestrator, app_to_ui_tx).await?,
        AppEvent::Request(_) | AppEvent::Quit => {
            // Handled by the loop itself
        }
        AppEvent::Busy { .. }
        | AppEvent::ShowTranslation { .. }
        | AppEvent::ShowMeaning(_)
        | AppEvent::ShowPronunciation(_)
        | AppEvent::HistoryList(_)
        | AppEvent::Notify(_)
        | AppEvent::Status(_)
        | AppEvent::BackendReady => {
            // UI-only event, ignore in backend
        }
    }

    Ok(())
}

/// Tell the UI why an action was refused
pub(crate) async fn send_rejection(
    app_to_ui_tx: &AsyncSender<AppEvent>,
    rejection: Rejection,
) -> anyhow::Result<()> {
    tracing::debug!("Action rejected: {rejection}");
    let event = match rejection {
        Rejection::Invalid(notification) => AppEvent::Notify(notification),
        other => AppEvent::Status(other.to_string()),
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}
