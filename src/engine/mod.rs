//! Interval timer engine
//!
//! This module contains the workout template model, the pure timer state
//! machine, and the display formatting helpers.

pub mod format;
pub mod template;
pub mod timer;

// Re-export main types
pub use format::{format_time, format_total_time};
pub use template::{StepKind, TemplateError, WorkoutStep, WorkoutTemplate};
pub use timer::{Event, Phase, TimerState, PREPARATION_SEC};
