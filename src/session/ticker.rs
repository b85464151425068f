//! Workout session background task

use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::engine::Event;
use crate::tracking::SessionSink;

use super::SessionState;

/// User control commands routed to the session task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Pause,
    Resume,
    Skip,
    GoBack,
    /// Cancel the session and discard the timer state
    Quit,
}

impl SessionCommand {
    /// Engine event for this command; `Quit` has none
    fn event(self) -> Option<Event> {
        match self {
            SessionCommand::Start => Some(Event::Start),
            SessionCommand::Pause => Some(Event::Pause),
            SessionCommand::Resume => Some(Event::Resume),
            SessionCommand::Skip => Some(Event::Skip),
            SessionCommand::GoBack => Some(Event::GoBack),
            SessionCommand::Quit => None,
        }
    }
}

/// Background task that drives the timer with one-second ticks while the
/// session is running and unpaused, routes user commands, and hands the
/// completed-workout record to the sink when the terminal state is reached.
///
/// The interval keeps firing while the timer is idle or paused; ticks are
/// gated on the timer state instead, so resuming loses no time.
pub async fn session_ticker_task(
    state: Arc<SessionState>,
    mut commands: mpsc::Receiver<SessionCommand>,
    sink: Arc<dyn SessionSink>,
) {
    info!("Starting session task for workout '{}'", state.template.name);

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately; consume it so the countdown
    // starts a full second after the task is spawned.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.snapshot() {
                    Ok(snapshot) if snapshot.running && !snapshot.paused => {
                        if let Err(e) = state.dispatch(Event::Tick) {
                            error!("Failed to apply tick: {}", e);
                            continue;
                        }
                    }
                    Ok(_) => continue,
                    Err(e) => {
                        error!("Failed to read timer state: {}", e);
                        continue;
                    }
                }
            }

            cmd = commands.recv() => {
                match cmd {
                    Some(SessionCommand::Quit) | None => {
                        info!("Session cancelled, discarding timer state");
                        break;
                    }
                    Some(cmd) => {
                        debug!("Session command received: {:?}", cmd);
                        if let Some(event) = cmd.event() {
                            if let Err(e) = state.dispatch(event) {
                                error!("Failed to apply command {:?}: {}", cmd, e);
                                continue;
                            }
                        }
                    }
                }
            }
        }

        // The tick or command just applied may have reached the terminal
        // state; try_finish emits at most one record per session.
        match state.try_finish() {
            Ok(Some(record)) => {
                info!(
                    "Workout '{}' complete after {}s",
                    record.name, record.duration_sec
                );
                if let Err(e) = sink.record(&record) {
                    error!("Failed to record completed workout: {}", e);
                }
                break;
            }
            Ok(None) => {}
            Err(e) => error!("Failed to check for completion: {}", e),
        }
    }

    info!("Session task finished");
}
