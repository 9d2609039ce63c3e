mod sync_channel_tests;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lingua_core::{Orchestrator, SpeechError, Speaker};
use lingua_flows::MockBackend;
use lingua_history::{History, KeyValueStore, MemoryStore};
use lingua_types::AppEvent;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;

pub const HISTORY_KEY: &str = "linguaLensHistory";

/// Speaker that reports what it was asked to say
pub struct ChannelSpeaker {
    pub tx: AsyncSender<(String, String)>,
}

#[async_trait::async_trait]
impl Speaker for ChannelSpeaker {
    async fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError> {
        self.tx
            .send((text.to_string(), locale.to_string()))
            .await
            .map_err(|e| SpeechError::Command(e.to_string()))
    }
}

/// Writer whose contents the test can read back
#[derive(Clone, Default)]
pub struct SharedOutput(pub Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stdout after the reading end of the pipe has gone away
pub struct ClosedOutput;

impl Write for ClosedOutput {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct Harness {
    pub backend: Arc<MockBackend>,
    pub store: Arc<MemoryStore>,
    pub ui_tx: AsyncSender<AppEvent>,
    pub app_rx: AsyncReceiver<AppEvent>,
    pub spoken_rx: AsyncReceiver<(String, String)>,
    pub cancel: CancellationToken,
    pub handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    pub fn start(backend: MockBackend) -> Self {
        let backend = Arc::new(backend);
        let store = Arc::new(MemoryStore::new());
        let history = History::load(store.clone(), HISTORY_KEY, 20);
        let orchestrator = Orchestrator::new(backend.clone(), history, "Spanish");

        let (spoken_tx, spoken_rx) = kanal::unbounded_async();
        let speaker: Arc<dyn Speaker> = Arc::new(ChannelSpeaker { tx: spoken_tx });

        let (ui_tx, ui_rx) = kanal::unbounded_async();
        let (app_tx, app_rx) = kanal::unbounded_async();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(event_loop(
            orchestrator,
            speaker,
            ui_rx,
            app_tx,
            cancel.clone(),
        ));

        Self {
            backend,
            store,
            ui_tx,
            app_rx,
            spoken_rx,
            cancel,
            handle,
        }
    }

    pub async fn send(&self, event: AppEvent) {
        self.ui_tx.send(event).await.expect("send failed");
    }

    pub async fn recv(&self) -> AppEvent {
        match timeout(Duration::from_secs(2), self.app_rx.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {e}"),
            Err(_) => panic!("Timeout waiting for app event"),
        }
    }

    pub fn stored_history(&self) -> Option<String> {
        self.store.get(HISTORY_KEY).unwrap()
    }
}
