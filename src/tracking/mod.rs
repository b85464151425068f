//! Session tracking module
//!
//! This module contains the completed-workout record and the sinks it is
//! delivered to when a session finishes.

pub mod record;
pub mod sink;

// Re-export main types
pub use record::CompletedWorkout;
pub use sink::{JsonlSink, LogSink, SessionSink, SinkError};
