//! Utility functions module
//!
//! Host-side helpers that are not part of the timer engine.

pub mod signals;

// Re-export main functions
pub use signals::shutdown_signal;
