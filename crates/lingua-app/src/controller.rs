use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lingua_core::{Orchestrator, Speaker};
use lingua_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::spawn_stdin_reader;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(command_queue: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256),
            ui_to_app: kanal::bounded_async(command_queue.max(1)),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, command_queue: usize) -> Self {
        Self {
            channels: ChannelSet::new(command_queue),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(
        &self,
        orchestrator: Orchestrator,
        speaker: Arc<dyn Speaker>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            orchestrator,
            speaker,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.clone(),
        ));

        // UI loop
        let (input_tx, input_rx) = kanal::bounded(16);
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            input_rx.to_async(),
            self.state.config.clone(),
            self.cancel_token.clone(),
            std::io::stdout(),
        ));

        // Stdin reader
        if let Err(e) = spawn_stdin_reader(input_tx) {
            tracing::error!("Failed to start input reader: {e}");
            self.cancel_token.cancel();
        }

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
