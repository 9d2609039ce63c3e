use std::io::{ErrorKind, Write};
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lingua_config::Config;
use lingua_types::AppEvent;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

pub mod command;
pub mod render;

use command::{HELP, UiCommand, parse_command};
use render::{render_event, render_languages};

enum LineAction {
    Continue,
    Print(String),
    Quit,
}

/// Terminal front end: input lines become app events, app events become
/// text written to `out`.
pub async fn ui_loop<W>(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    input_rx: AsyncReceiver<Option<String>>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
    mut out: W,
) -> anyhow::Result<()>
where
    W: Write + Send + 'static,
{
    let preview_chars = config.read().await.ui.history_preview_chars;
    let mut input_open = true;

    loop {
        tokio::select! {
            // Drain pending output before honouring cancellation
            biased;

            event = app_to_ui_rx.recv() => {
                let event = event?;
                if let Some(text) = render_event(&event, preview_chars) {
                    if !emit(&mut out, &text, &cancel) {
                        break;
                    }
                }
            }
            line = input_rx.recv(), if input_open => {
                match line {
                    Ok(Some(line)) => match handle_line(&line, &ui_to_app_tx).await? {
                        LineAction::Continue => {}
                        LineAction::Print(text) => {
                            if !emit(&mut out, &text, &cancel) {
                                break;
                            }
                        }
                        LineAction::Quit => input_open = false,
                    },
                    Ok(None) | Err(_) => {
                        tracing::debug!("Input finished, asking app to quit");
                        input_open = false;
                        ui_to_app_tx.send(AppEvent::Quit).await?;
                    }
                }
            }
            _ = cancel.cancelled() => {
                tracing::debug!("UI loop stopping");
                break;
            }
        }
    }

    Ok(())
}

/// Write one block of output. A closed stdout (`lingua | head`) ends the
/// session instead of panicking.
fn emit(out: &mut impl Write, text: &str, cancel: &CancellationToken) -> bool {
    match writeln!(out, "{text}").and_then(|()| out.flush()) {
        Ok(()) => true,
        Err(e) => {
            if e.kind() == ErrorKind::BrokenPipe {
                tracing::debug!("Output closed, stopping");
            } else {
                tracing::error!("Failed to write output: {e}");
            }
            cancel.cancel();
            false
        }
    }
}

async fn handle_line(
    line: &str,
    ui_to_app_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<LineAction> {
    let action = match parse_command(line) {
        UiCommand::Send(events) => {
            for event in events {
                let quit = event == AppEvent::Quit;
                ui_to_app_tx.send(event).await?;
                if quit {
                    return Ok(LineAction::Quit);
                }
            }
            LineAction::Continue
        }
        UiCommand::Help => LineAction::Print(HELP.to_string()),
        UiCommand::Languages => LineAction::Print(render_languages()),
        UiCommand::Unknown(line) => {
            LineAction::Print(format!("Unknown command {line:?}, try :help"))
        }
        UiCommand::Empty => LineAction::Continue,
    };
    Ok(action)
}
