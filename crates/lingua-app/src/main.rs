use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use lingua_core::{Orchestrator, Speaker};
use lingua_flows::{GeminiBackend, GenerativeBackend};
use lingua_history::{FileStore, History};
use tokio::signal;

mod commands;
mod controller;
mod events;
mod io;
mod logging;
mod profile;
mod speech;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::commands::TranslateArgs;
use self::controller::AppController;
use self::speech::CommandSpeaker;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "lingua", version, about = "Translate, explain and pronounce text")]
struct Cli {
    /// JSON profile to load instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the history file
    #[arg(long, global = true)]
    history_dir: Option<PathBuf>,

    /// Target language for this run
    #[arg(long, short = 't', global = true)]
    language: Option<String>,

    /// Log as JSON even on a terminal
    #[arg(long, global = true)]
    log_json: bool,

    /// More logging, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Translate text and print the result
    Translate {
        text: String,
        /// Target language, defaults to the configured one
        #[arg(long)]
        to: Option<String>,
        /// Also explain the translation
        #[arg(long)]
        define: bool,
        /// Also show how to pronounce the translation
        #[arg(long)]
        pronounce: bool,
        /// Read the translation aloud
        #[arg(long)]
        listen: bool,
    },
    /// Explain the meaning and usage of text
    Define { text: String },
    /// Show how to pronounce text
    Pronounce {
        text: String,
        /// Language the text is written in
        #[arg(long = "in")]
        language: Option<String>,
    },
    /// List recent translations
    History,
    /// Delete all stored translations
    ClearHistory,
    /// Write a default profile
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.log_json);

    if let Some(Command::InitConfig) = cli.command {
        let path = profile::init_profile(cli.config.as_deref())?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let mut config = profile::load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.history_dir {
        config.history.dir = dir;
    }
    if let Some(language) = cli.language {
        config.ui.target_language = language;
    }
    profile::validate_config(&config)?;
    tracing::debug!(?config, "Configuration loaded");

    let backend: Arc<dyn GenerativeBackend> = Arc::new(GeminiBackend::from_config(&config.genai)?);
    let metadata = backend.metadata();
    tracing::info!(backend = %metadata.name, model = %metadata.model, "Backend ready");
    if metadata.requires_api_key && !config.genai.has_api_key() {
        tracing::warn!("No API key set, requests will fail. Set GEMINI_API_KEY.");
    }

    let store = Arc::new(FileStore::new(config.history.dir.clone()));
    let history = History::load(
        store,
        config.history.storage_key.clone(),
        config.history.capacity,
    );
    let mut orchestrator = Orchestrator::new(backend, history, &config.ui.target_language);
    let speaker: Arc<dyn Speaker> = Arc::new(CommandSpeaker::new(config.ui.speech_command.clone()));

    let mut stdout = std::io::stdout();
    match cli.command {
        Some(Command::Translate {
            text,
            to,
            define,
            pronounce,
            listen,
        }) => {
            let args = TranslateArgs {
                text,
                to,
                define,
                pronounce,
                listen,
            };
            commands::translate(&mut orchestrator, speaker.as_ref(), args, &mut stdout).await
        }
        Some(Command::Define { text }) => commands::define(&orchestrator, text, &mut stdout).await,
        Some(Command::Pronounce { text, language }) => {
            commands::pronounce(&orchestrator, text, language, &mut stdout).await
        }
        Some(Command::History) => {
            commands::history(&orchestrator, config.ui.history_preview_chars, &mut stdout)
        }
        Some(Command::ClearHistory) => commands::clear_history(&mut orchestrator, &mut stdout),
        Some(Command::InitConfig) => Ok(()),
        None => run_interactive(config, orchestrator, speaker).await,
    }
}

async fn run_interactive(
    config: lingua_config::Config,
    orchestrator: Orchestrator,
    speaker: Arc<dyn Speaker>,
) -> anyhow::Result<()> {
    let command_queue = config.command_queue;
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state, command_queue);
    let mut tasks = controller.spawn_tasks(orchestrator, speaker);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::debug!("Task finished"),
                Ok(Err(e)) => tracing::error!("Task failed: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();

    let drain = async {
        while let Some(result) = tasks.join_next().await {
            if let Ok(Err(e)) = result {
                tracing::error!("Task failed during shutdown: {e}");
            }
        }
    };
    if tokio::time::timeout(Duration::from_secs(2), drain).await.is_err() {
        tracing::warn!("Tasks did not stop in time");
        tasks.abort_all();
    }

    Ok(())
}
