//! Shared session state management

use std::sync::Mutex;

use serde::Serialize;
use tokio::sync::watch;
use tracing::warn;

use crate::engine::{
    format_time, format_total_time, Event, Phase, TemplateError, TimerState, WorkoutTemplate,
};
use crate::tracking::CompletedWorkout;

/// Read-only view of the timer published after every transition
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub step_index: usize,
    pub step_count: usize,
    pub step_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub current_rep: u32,
    pub rep_count: u32,
    pub phase: Phase,
    pub time_remaining_sec: u32,
    pub total_elapsed_sec: u64,
    pub running: bool,
    pub paused: bool,
    pub complete: bool,
}

impl TimerSnapshot {
    /// Capture a snapshot of the timer state against its template
    pub fn capture(state: &TimerState, template: &WorkoutTemplate) -> Self {
        let step = &template.steps[state.current_step];
        Self {
            step_index: state.current_step,
            step_count: template.step_count(),
            step_name: step.name.clone(),
            notes: step.notes.clone(),
            current_rep: state.current_rep,
            rep_count: step.rep_count(),
            phase: state.phase,
            time_remaining_sec: state.time_remaining_sec,
            total_elapsed_sec: state.total_elapsed_sec,
            running: state.running,
            paused: state.paused,
            complete: state.is_complete(template),
        }
    }

    /// Label for the current window, matching the workout screen wording
    pub fn phase_label(&self) -> &str {
        match self.phase {
            Phase::Preparing => "Get Ready",
            Phase::Resting => "Rest",
            Phase::Active => &self.step_name,
        }
    }

    /// One-word session status
    pub fn status_word(&self) -> &'static str {
        if self.complete {
            "Complete"
        } else if !self.running {
            "Ready"
        } else if self.paused {
            "Paused"
        } else {
            "In Progress"
        }
    }

    /// Single-line display of the full timer state
    pub fn status_line(&self) -> String {
        format!(
            "[{}] {} | step {}/{} rep {}/{} | total {} | {}",
            self.phase_label(),
            format_time(self.time_remaining_sec),
            self.step_index + 1,
            self.step_count,
            self.current_rep,
            self.rep_count,
            format_total_time(self.total_elapsed_sec),
            self.status_word(),
        )
    }
}

/// Session state shared between the ticker task and the host
#[derive(Debug)]
pub struct SessionState {
    /// The workout being run; read-only for the whole session
    pub template: WorkoutTemplate,
    /// Timer state, mutated exclusively through `dispatch`
    timer: Mutex<TimerState>,
    /// Channel for display snapshot updates
    display_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _display_rx: watch::Receiver<TimerSnapshot>,
    /// Guards against emitting the completed-workout record twice
    completion_emitted: Mutex<bool>,
}

impl SessionState {
    /// Create session state for a template. Fails on an empty step list.
    pub fn new(template: WorkoutTemplate) -> Result<Self, TemplateError> {
        let timer = TimerState::new(&template)?;
        let (display_tx, display_rx) = watch::channel(TimerSnapshot::capture(&timer, &template));

        Ok(Self {
            template,
            timer: Mutex::new(timer),
            display_tx,
            _display_rx: display_rx,
            completion_emitted: Mutex::new(false),
        })
    }

    /// Subscribe to display snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.display_tx.subscribe()
    }

    /// Apply a control event to the timer and publish the new snapshot
    pub fn dispatch(&self, event: Event) -> Result<TimerSnapshot, String> {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let next = timer.apply(event, &self.template);
        *timer = next;
        let snapshot = TimerSnapshot::capture(&timer, &self.template);
        drop(timer); // Release the lock early

        // Notify display watchers
        if let Err(e) = self.display_tx.send(snapshot.clone()) {
            warn!("Failed to send display update: {}", e);
        }

        Ok(snapshot)
    }

    /// Get a snapshot of the current timer state
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer.lock()
            .map(|timer| TimerSnapshot::capture(&timer, &self.template))
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Detect terminal completion and, exactly once per session, disarm the
    /// ticker and build the completed-workout record.
    pub fn try_finish(&self) -> Result<Option<CompletedWorkout>, String> {
        let snapshot = self.snapshot()?;
        if !snapshot.complete {
            return Ok(None);
        }

        let mut emitted = self.completion_emitted.lock()
            .map_err(|e| format!("Failed to lock completion guard: {}", e))?;
        if *emitted {
            return Ok(None);
        }
        *emitted = true;
        drop(emitted);

        let snapshot = self.dispatch(Event::Complete)?;
        Ok(Some(CompletedWorkout::from_session(
            &self.template,
            snapshot.total_elapsed_sec,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{StepKind, WorkoutStep, PREPARATION_SEC};

    fn template() -> WorkoutTemplate {
        WorkoutTemplate {
            id: Some("template-1".to_string()),
            name: "Test Workout".to_string(),
            steps: vec![WorkoutStep {
                name: "Squats".to_string(),
                kind: StepKind::Exercise,
                duration_sec: 10,
                reps: 1,
                rest_duration_sec: 0,
                notes: Some("keep your back straight".to_string()),
            }],
        }
    }

    #[test]
    fn dispatch_publishes_snapshots_to_watchers() {
        let state = SessionState::new(template()).unwrap();
        let rx = state.subscribe();
        assert_eq!(rx.borrow().phase, Phase::Preparing);

        state.dispatch(Event::Start).unwrap();
        assert!(rx.borrow().running);

        state.dispatch(Event::Skip).unwrap();
        assert_eq!(rx.borrow().phase, Phase::Active);
        assert_eq!(rx.borrow().time_remaining_sec, 10);
    }

    #[test]
    fn snapshot_carries_step_details() {
        let state = SessionState::new(template()).unwrap();
        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.step_name, "Squats");
        assert_eq!(snapshot.notes.as_deref(), Some("keep your back straight"));
        assert_eq!(snapshot.rep_count, 1);
        assert_eq!(snapshot.step_count, 1);
        assert_eq!(snapshot.phase_label(), "Get Ready");
        assert_eq!(snapshot.status_word(), "Ready");
    }

    #[test]
    fn status_line_formats_the_countdown() {
        let state = SessionState::new(template()).unwrap();
        let line = state.snapshot().unwrap().status_line();
        assert!(line.contains("00:05"), "unexpected status line: {}", line);
        assert!(line.contains("step 1/1"), "unexpected status line: {}", line);
    }

    #[test]
    fn try_finish_emits_the_record_exactly_once() {
        let state = SessionState::new(template()).unwrap();
        state.dispatch(Event::Start).unwrap();
        assert!(state.try_finish().unwrap().is_none());

        state.dispatch(Event::Skip).unwrap(); // prep -> active
        state.dispatch(Event::Skip).unwrap(); // active -> terminal

        let record = state.try_finish().unwrap();
        let record = record.expect("completed session should emit a record");
        assert_eq!(record.template_id, "template-1");
        assert_eq!(record.name, "Test Workout");

        // Subsequent checks must not re-emit
        assert!(state.try_finish().unwrap().is_none());
        assert!(!state.snapshot().unwrap().running);
    }

    #[test]
    fn go_back_floor_matches_the_initial_preparation_window() {
        let state = SessionState::new(template()).unwrap();
        state.dispatch(Event::Start).unwrap();
        state.dispatch(Event::Tick).unwrap();
        let snapshot = state.dispatch(Event::GoBack).unwrap();
        assert_eq!(snapshot.phase, Phase::Preparing);
        assert_eq!(snapshot.time_remaining_sec, PREPARATION_SEC);
        assert!(snapshot.paused);
        assert_eq!(snapshot.status_word(), "Paused");
    }
}
