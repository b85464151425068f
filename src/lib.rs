//! Workout Timer - a state-machine driven interval timer
//!
//! This library provides a pure workout timer engine (template model,
//! event-driven state transitions, display formatting) and a tokio-based
//! session host that drives it with one-second ticks and emits a
//! completed-workout record when the session finishes.

pub mod config;
pub mod engine;
pub mod session;
pub mod tracking;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{Event, Phase, TimerState, WorkoutTemplate};
pub use session::{session_ticker_task, SessionCommand, SessionState};
pub use tracking::{CompletedWorkout, SessionSink};
pub use utils::signals::shutdown_signal;
