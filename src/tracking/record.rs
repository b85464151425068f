//! Completed-workout record

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::WorkoutTemplate;

/// Record emitted once per finished session to the session-tracking
/// collaborator. Field names match the backend's session documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedWorkout {
    pub template_id: String,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_sec: u64,
}

impl CompletedWorkout {
    /// Build a record for a session that just finished. The start time is
    /// derived from the ticks actually consumed, so paused time is not
    /// counted in the recorded span.
    pub fn from_session(template: &WorkoutTemplate, total_elapsed_sec: u64) -> Self {
        let ended_at = Utc::now();
        let started_at = ended_at - Duration::seconds(total_elapsed_sec as i64);
        Self {
            template_id: template.id.clone().unwrap_or_default(),
            name: template.name.clone(),
            started_at,
            ended_at,
            duration_sec: total_elapsed_sec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{StepKind, WorkoutStep};

    fn template() -> WorkoutTemplate {
        WorkoutTemplate {
            id: Some("abc123".to_string()),
            name: "Morning".to_string(),
            steps: vec![WorkoutStep {
                name: "Squats".to_string(),
                kind: StepKind::Exercise,
                duration_sec: 30,
                reps: 1,
                rest_duration_sec: 0,
                notes: None,
            }],
        }
    }

    #[test]
    fn start_time_is_derived_from_elapsed_ticks() {
        let record = CompletedWorkout::from_session(&template(), 125);
        assert_eq!(record.template_id, "abc123");
        assert_eq!(record.name, "Morning");
        assert_eq!(record.duration_sec, 125);
        assert_eq!(
            (record.ended_at - record.started_at).num_seconds(),
            125
        );
    }

    #[test]
    fn serializes_with_backend_field_names() {
        let record = CompletedWorkout::from_session(&template(), 60);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("templateId").is_some());
        assert!(json.get("startedAt").is_some());
        assert!(json.get("endedAt").is_some());
        assert_eq!(json["durationSec"], 60);
    }
}
