//! Session hosting module
//!
//! This module contains the shared session state and the background task
//! that drives the timer engine with one-second ticks.

pub mod state;
pub mod ticker;

// Re-export main types
pub use state::{SessionState, TimerSnapshot};
pub use ticker::{session_ticker_task, SessionCommand};
