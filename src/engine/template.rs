//! Workout template input model
//!
//! Templates arrive as camelCase JSON documents produced by the backend
//! (`durationSec`, `restDurationSec`, Mongo-style `_id`). Sparse step
//! definitions are accepted: missing durations default to zero and a
//! missing rep count defaults to one.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a workout template
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("workout template has no steps")]
    EmptySteps,
    #[error("failed to read template file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse template: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Kind of a workout step. Stretch behaves identically to exercise for
/// timing purposes; rest steps run without a preparation countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Exercise,
    Stretch,
    Rest,
}

/// One item of a workout template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStep {
    pub name: String,
    pub kind: StepKind,
    /// Active duration per rep (total duration for a standalone rest step)
    #[serde(default)]
    pub duration_sec: u32,
    /// Repetition count; ignored for rest steps
    #[serde(default = "default_reps")]
    pub reps: u32,
    /// Rest inserted between consecutive reps of this step
    #[serde(default)]
    pub rest_duration_sec: u32,
    /// Free text shown during the active phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_reps() -> u32 {
    1
}

impl WorkoutStep {
    /// Effective rep count: rest steps always run once, and a zero rep
    /// count on an exercise/stretch step is treated as one.
    pub fn rep_count(&self) -> u32 {
        if self.kind == StepKind::Rest {
            1
        } else {
            self.reps.max(1)
        }
    }

    /// Check if this is a standalone rest step
    pub fn is_rest(&self) -> bool {
        self.kind == StepKind::Rest
    }
}

/// A named, ordered sequence of workout steps. Owned by the caller and
/// read-only to the timer engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub steps: Vec<WorkoutStep>,
}

impl WorkoutTemplate {
    /// Validate the template for use with the timer engine
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.steps.is_empty() {
            return Err(TemplateError::EmptySteps);
        }
        Ok(())
    }

    /// Load and validate a template from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, TemplateError> {
        let contents = std::fs::read_to_string(path)?;
        let template: Self = serde_json::from_str(&contents)?;
        template.validate()?;
        Ok(template)
    }

    /// Number of steps in the template
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}
