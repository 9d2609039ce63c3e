use std::io;
use std::sync::Arc;
use std::time::Duration;

use lingua_config::Config;
use lingua_flows::MockBackend;
use lingua_flows::flows::TRANSLATE_FLOW;
use lingua_history::KeyValueStore;
use lingua_types::{AppEvent, Capability};
use serde_json::json;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::{ClosedOutput, HISTORY_KEY, Harness, SharedOutput};
use crate::io::forward_lines;
use crate::ui::ui_loop;

async fn recv(rx: &kanal::AsyncReceiver<AppEvent>) -> AppEvent {
    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Channel error: {e}"),
        Err(_) => panic!("Timeout - event never arrived!"),
    }
}

#[tokio::test]
async fn test_ui_lines_become_app_events() {
    let (app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, ui_rx) = kanal::unbounded_async::<AppEvent>();
    let (input_tx, input_rx) = kanal::unbounded_async::<Option<String>>();
    let cancel = CancellationToken::new();
    let config = Arc::new(RwLock::new(Config::default()));
    let output = SharedOutput::default();

    let handle = tokio::spawn(ui_loop(
        app_rx,
        ui_tx,
        input_rx,
        config,
        cancel.clone(),
        output.clone(),
    ));

    input_tx.send(Some("Good morning".to_string())).await.unwrap();
    input_tx.send(Some(":help".to_string())).await.unwrap();
    input_tx.send(Some(":to French".to_string())).await.unwrap();
    input_tx.send(None).await.unwrap();

    assert_eq!(recv(&ui_rx).await, AppEvent::SetInput("Good morning".to_string()));
    assert_eq!(recv(&ui_rx).await, AppEvent::Request(Capability::Translate));
    assert_eq!(recv(&ui_rx).await, AppEvent::SetLanguage("French".to_string()));
    assert_eq!(recv(&ui_rx).await, AppEvent::Quit);

    // Output still renders after input has ended
    app_tx.send(AppEvent::Status("bye".to_string())).await.unwrap();
    cancel.cancel();

    let result = timeout(Duration::from_secs(2), handle)
        .await
        .expect("ui loop did not stop");
    assert!(result.unwrap().is_ok());

    let text = output.text();
    assert!(text.contains("Type any text to translate it."));
    assert!(text.ends_with("bye\n"));
}

#[tokio::test]
async fn test_quit_command_stops_reading_input() {
    let (_app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, ui_rx) = kanal::unbounded_async::<AppEvent>();
    let (input_tx, input_rx) = kanal::unbounded_async::<Option<String>>();
    let cancel = CancellationToken::new();
    let config = Arc::new(RwLock::new(Config::default()));

    let handle = tokio::spawn(ui_loop(
        app_rx,
        ui_tx,
        input_rx,
        config,
        cancel.clone(),
        io::sink(),
    ));

    input_tx.send(Some(":quit".to_string())).await.unwrap();
    input_tx.send(Some("ignored".to_string())).await.unwrap();

    assert_eq!(recv(&ui_rx).await, AppEvent::Quit);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(matches!(ui_rx.try_recv(), Ok(None)));

    cancel.cancel();
    assert!(timeout(Duration::from_secs(2), handle).await.is_ok());
}

#[tokio::test]
async fn test_piped_session_runs_to_completion() {
    let backend = MockBackend::new();
    backend.respond(TRANSLATE_FLOW, json!({ "translation": "Guten Morgen" }));
    let harness = Harness::start(backend);

    let (line_tx, line_rx) = kanal::unbounded::<Option<String>>();
    forward_lines(&b":to German\nGood morning\n"[..], &line_tx).unwrap();

    let (ui_app_tx, ui_app_rx) = kanal::unbounded_async::<AppEvent>();
    let config = Arc::new(RwLock::new(Config::default()));
    let ui = tokio::spawn(ui_loop(
        ui_app_rx,
        harness.ui_tx.clone(),
        line_rx.to_async(),
        config,
        harness.cancel.clone(),
        io::sink(),
    ));

    // Relay app output into the UI loop
    let app_rx = harness.app_rx.clone();
    tokio::spawn(async move {
        while let Ok(event) = app_rx.recv().await {
            if ui_app_tx.send(event).await.is_err() {
                break;
            }
        }
    });

    let event_loop = timeout(Duration::from_secs(2), harness.handle)
        .await
        .expect("event loop did not stop");
    assert!(event_loop.unwrap().is_ok());
    assert!(timeout(Duration::from_secs(2), ui).await.is_ok());

    let stored = harness.store.get(HISTORY_KEY).unwrap().unwrap();
    assert!(stored.contains("Guten Morgen"));
    assert!(stored.contains("\"language\":\"German\""));
}

#[tokio::test]
async fn test_closed_output_ends_session() {
    let (app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, _ui_rx) = kanal::unbounded_async::<AppEvent>();
    let (_input_tx, input_rx) = kanal::unbounded_async::<Option<String>>();
    let cancel = CancellationToken::new();
    let config = Arc::new(RwLock::new(Config::default()));

    let handle = tokio::spawn(ui_loop(
        app_rx,
        ui_tx,
        input_rx,
        config,
        cancel.clone(),
        ClosedOutput,
    ));

    app_tx.send(AppEvent::Status("first line".to_string())).await.unwrap();

    let result = timeout(Duration::from_secs(2), handle)
        .await
        .expect("ui loop did not stop");
    assert!(result.unwrap().is_ok());
    assert!(cancel.is_cancelled());
}
