//! Workout Timer - run a timed workout session from the terminal
//!
//! This is the main entry point for the workout-timer application.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use workout_timer::{
    config::Config,
    engine::WorkoutTemplate,
    session::{session_ticker_task, SessionCommand, SessionState},
    tracking::{JsonlSink, LogSink, SessionSink},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("workout_timer={}", config.log_level()))
        .init();

    info!("Starting workout-timer v1.0.0");

    let template = WorkoutTemplate::from_json_file(&config.template)?;
    info!(
        "Loaded template '{}' with {} steps",
        template.name,
        template.step_count()
    );

    // Completed-workout records go to a JSONL file when requested,
    // otherwise to the log
    let sink: Arc<dyn SessionSink> = match &config.output {
        Some(path) => Arc::new(JsonlSink::new(path.clone())),
        None => Arc::new(LogSink),
    };

    // Create session state and the control channel
    let state = Arc::new(SessionState::new(template)?);
    let (cmd_tx, cmd_rx) = mpsc::channel(16);

    // Print every display update as the session progresses
    let mut display_rx = state.subscribe();
    tokio::spawn(async move {
        while display_rx.changed().await.is_ok() {
            let line = display_rx.borrow_and_update().status_line();
            info!("{}", line);
        }
    });

    // Start the session ticker background task
    let session = tokio::spawn(session_ticker_task(Arc::clone(&state), cmd_rx, sink));

    if config.auto_start {
        cmd_tx.send(SessionCommand::Start).await?;
    } else {
        info!("Commands:");
        info!("  start  - arm the one-second ticker");
        info!("  pause  - suspend ticking");
        info!("  resume - resume ticking");
        info!("  skip   - skip forward to the next phase");
        info!("  back   - go back one phase (pauses the timer)");
        info!("  quit   - cancel the session");
    }

    // Map stdin to control commands for the lifetime of the session
    tokio::spawn(read_commands(cmd_tx.clone()));

    tokio::select! {
        result = session => {
            if let Err(e) = result {
                tracing::error!("Session task error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received, cancelling session");
            let _ = cmd_tx.send(SessionCommand::Quit).await;
        }
    }

    info!("Session closed");
    Ok(())
}

/// Read stdin lines and forward them as session commands until EOF or quit
async fn read_commands(commands: mpsc::Sender<SessionCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let cmd = match line.trim().to_lowercase().as_str() {
            "" => continue,
            "start" | "s" => SessionCommand::Start,
            "pause" | "p" => SessionCommand::Pause,
            "resume" | "r" => SessionCommand::Resume,
            "skip" | "n" => SessionCommand::Skip,
            "back" | "b" => SessionCommand::GoBack,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            other => {
                warn!("Unknown command: {}", other);
                continue;
            }
        };

        let is_quit = cmd == SessionCommand::Quit;
        if commands.send(cmd).await.is_err() || is_quit {
            break;
        }
    }
}
