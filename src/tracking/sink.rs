//! Session-tracking sinks
//!
//! The session task receives its sink as a constructor parameter, so hosts
//! decide where completed-workout records go without the engine knowing.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use super::record::CompletedWorkout;

/// Errors raised while emitting a completed-workout record
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write completed workout: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize completed workout: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for completed-workout records
pub trait SessionSink: Send + Sync {
    fn record(&self, workout: &CompletedWorkout) -> Result<(), SinkError>;
}

/// Appends each record as one JSON line to a file
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionSink for JsonlSink {
    fn record(&self, workout: &CompletedWorkout) -> Result<(), SinkError> {
        let line = serde_json::to_string(workout)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        info!("Recorded completed workout to {}", self.path.display());
        Ok(())
    }
}

/// Logs the record instead of persisting it
pub struct LogSink;

impl SessionSink for LogSink {
    fn record(&self, workout: &CompletedWorkout) -> Result<(), SinkError> {
        info!(
            "Completed workout '{}' (template {}): {}s, {} - {}",
            workout.name,
            workout.template_id,
            workout.duration_sec,
            workout.started_at,
            workout.ended_at
        );
        Ok(())
    }
}
