//! Interval timer state machine
//!
//! The engine is a pure transition function: `TimerState::apply` consumes a
//! control event and the (read-only) workout template and returns the next
//! state. The host owns the one-second ticker and feeds `Event::Tick` while
//! the timer is running and not paused; all other events map to user
//! gestures. The engine performs no I/O and never mutates in place, so the
//! same inputs always yield the same output state.

use serde::{Deserialize, Serialize};

use super::template::{WorkoutStep, WorkoutTemplate};
use super::TemplateError;

/// Countdown shown before each active rep begins
pub const PREPARATION_SEC: u32 = 5;

/// Current window of the timer. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Get-ready countdown before an active rep
    Preparing,
    /// A standalone rest step, or rest between reps of the same step
    Resting,
    /// An exercise/stretch rep in progress
    Active,
}

/// Control events accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start,
    Pause,
    Resume,
    /// One elapsed second; dispatched by the host scheduler
    Tick,
    /// Forward skip to the next phase
    Skip,
    /// Backward navigation; always pauses
    GoBack,
    /// Internal: fired once by the host when the terminal state is detected
    Complete,
}

/// Mutable timer state for one workout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    /// Index into the template's step sequence
    pub current_step: usize,
    /// 1-based rep counter within the current step
    pub current_rep: u32,
    pub phase: Phase,
    /// Seconds left in the current window
    pub time_remaining_sec: u32,
    /// Whether the ticker is armed (false before start and after completion)
    pub running: bool,
    /// Ticking suspended while true
    pub paused: bool,
    /// Ticks consumed since session start; never decremented by navigation
    pub total_elapsed_sec: u64,
}

impl TimerState {
    /// Create the initial state for a template. Fails on an empty step
    /// sequence; the engine assumes at least one step from here on.
    pub fn new(template: &WorkoutTemplate) -> Result<Self, TemplateError> {
        let first = template.steps.first().ok_or(TemplateError::EmptySteps)?;
        // A workout that opens with a standalone rest step gets no
        // preparation countdown.
        let (phase, time_remaining_sec) = if first.is_rest() {
            (Phase::Resting, first.duration_sec)
        } else {
            (Phase::Preparing, PREPARATION_SEC)
        };
        Ok(Self {
            current_step: 0,
            current_rep: 1,
            phase,
            time_remaining_sec,
            running: false,
            paused: false,
            total_elapsed_sec: 0,
        })
    }

    /// Check if the current step is the last one in the template
    pub fn is_last_step(&self, template: &WorkoutTemplate) -> bool {
        self.current_step + 1 == template.steps.len()
    }

    /// Check if the current rep is the last rep of the current step
    pub fn is_last_rep(&self, template: &WorkoutTemplate) -> bool {
        self.current_rep == template.steps[self.current_step].rep_count()
    }

    /// Terminal condition: last rep of the last step has counted down
    pub fn is_complete(&self, template: &WorkoutTemplate) -> bool {
        self.is_last_step(template) && self.is_last_rep(template) && self.time_remaining_sec == 0
    }

    /// Apply a control event and return the next state
    pub fn apply(&self, event: Event, template: &WorkoutTemplate) -> TimerState {
        let step = &template.steps[self.current_step];
        let mut next = self.clone();

        match event {
            Event::Start => {
                next.running = true;
                next.paused = false;
                // Landing on a standalone rest step skips preparation
                if step.is_rest() {
                    next.phase = Phase::Resting;
                    next.time_remaining_sec = step.duration_sec;
                }
            }
            Event::Pause => next.paused = true,
            Event::Resume => next.paused = false,
            Event::Complete => {
                next.running = false;
                next.time_remaining_sec = 0;
            }
            Event::Tick => {
                if self.running && !self.paused {
                    next.tick(step, template);
                }
            }
            Event::Skip => next.skip(step, template),
            Event::GoBack => next.go_back(step, template),
        }

        debug_assert!(next.current_step < template.steps.len());
        debug_assert!(next.current_rep >= 1);
        debug_assert!(next.current_rep <= template.steps[next.current_step].rep_count());
        next
    }

    fn tick(&mut self, step: &WorkoutStep, template: &WorkoutTemplate) {
        self.total_elapsed_sec += 1;

        // An inter-rep rest flips into the preparation window once exactly
        // PREPARATION_SEC remain, so long rests end with a get-ready
        // countdown instead of a separate rest-then-prepare sequence. This
        // tick does not also decrement.
        if self.phase == Phase::Resting
            && !step.is_rest()
            && self.time_remaining_sec == PREPARATION_SEC
        {
            self.current_rep = (self.current_rep + 1).min(step.rep_count());
            self.phase = Phase::Preparing;
            self.time_remaining_sec = PREPARATION_SEC;
            return;
        }

        if self.time_remaining_sec <= 1 {
            match self.phase {
                Phase::Preparing => {
                    self.phase = Phase::Active;
                    self.time_remaining_sec = step.duration_sec;
                }
                Phase::Resting => {
                    if self.current_rep < step.rep_count() {
                        self.current_rep += 1;
                        self.phase = Phase::Preparing;
                        self.time_remaining_sec = PREPARATION_SEC;
                    } else if self.current_step + 1 == template.steps.len() {
                        self.running = false;
                        self.time_remaining_sec = 0;
                    } else {
                        self.enter_step(self.current_step + 1, template);
                    }
                }
                Phase::Active => {
                    if self.current_rep < step.rep_count() {
                        self.rest_or_prepare(step);
                    } else if self.current_step + 1 == template.steps.len() {
                        self.running = false;
                        self.time_remaining_sec = 0;
                    } else {
                        self.enter_step(self.current_step + 1, template);
                    }
                }
            }
            return;
        }

        self.time_remaining_sec -= 1;
    }

    /// Forward skip: the zero-boundary transitions, triggered on demand.
    /// Does not consume elapsed time.
    fn skip(&mut self, step: &WorkoutStep, template: &WorkoutTemplate) {
        match self.phase {
            Phase::Preparing => {
                self.phase = Phase::Active;
                self.time_remaining_sec = step.duration_sec;
            }
            Phase::Resting => {
                if self.current_rep < step.rep_count() {
                    self.current_rep += 1;
                    self.phase = Phase::Preparing;
                    self.time_remaining_sec = PREPARATION_SEC;
                } else if self.current_step + 1 == template.steps.len() {
                    self.time_remaining_sec = 0;
                } else {
                    self.enter_step(self.current_step + 1, template);
                }
            }
            Phase::Active => {
                if self.current_rep < step.rep_count() {
                    self.rest_or_prepare(step);
                } else if self.current_step + 1 == template.steps.len() {
                    self.time_remaining_sec = 0;
                } else {
                    self.enter_step(self.current_step + 1, template);
                }
            }
        }
    }

    /// Backward navigation. Always pauses; lands in the preparation window
    /// for the current rep, the previous rep, or the previous step's last
    /// rep, with the start of the workout as the floor.
    fn go_back(&mut self, step: &WorkoutStep, template: &WorkoutTemplate) {
        self.paused = true;

        if step.is_rest() {
            if self.current_step > 0 {
                self.current_step -= 1;
                self.current_rep = 1;
            }
            // No previous step: degenerate no-op reset on the rest step
            self.phase = Phase::Preparing;
            self.time_remaining_sec = PREPARATION_SEC;
            return;
        }

        match self.phase {
            Phase::Preparing => {
                if self.current_rep > 1 {
                    self.current_rep -= 1;
                    self.time_remaining_sec = PREPARATION_SEC;
                } else if self.current_step > 0 {
                    let prev = &template.steps[self.current_step - 1];
                    self.current_step -= 1;
                    self.current_rep = prev.rep_count();
                    if prev.is_rest() {
                        self.phase = Phase::Resting;
                        self.time_remaining_sec = prev.duration_sec;
                    } else {
                        self.time_remaining_sec = PREPARATION_SEC;
                    }
                } else {
                    // Beginning-of-workout floor
                    self.time_remaining_sec = PREPARATION_SEC;
                }
            }
            Phase::Resting | Phase::Active => {
                self.phase = Phase::Preparing;
                self.time_remaining_sec = PREPARATION_SEC;
            }
        }
    }

    /// Advance into the next rep of the same step: insert a rest window
    /// only when it is longer than the preparation countdown, otherwise
    /// collapse straight into preparation for the next rep.
    fn rest_or_prepare(&mut self, step: &WorkoutStep) {
        if step.rest_duration_sec > PREPARATION_SEC {
            self.phase = Phase::Resting;
            self.time_remaining_sec = step.rest_duration_sec;
        } else {
            self.current_rep += 1;
            self.phase = Phase::Preparing;
            self.time_remaining_sec = PREPARATION_SEC;
        }
    }

    /// Move to a step, landing directly in rest for standalone rest steps
    /// (no preparation countdown) and in preparation otherwise.
    fn enter_step(&mut self, index: usize, template: &WorkoutTemplate) {
        let step = &template.steps[index];
        self.current_step = index;
        self.current_rep = 1;
        if step.is_rest() {
            self.phase = Phase::Resting;
            self.time_remaining_sec = step.duration_sec;
        } else {
            self.phase = Phase::Preparing;
            self.time_remaining_sec = PREPARATION_SEC;
        }
    }
}
