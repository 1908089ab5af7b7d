//! Shared pacing machine that turns continuous frames into discrete actions.

use std::time::Duration;

use delve_core::{ActionState, Event};
use log::debug;

/// Seconds a single action takes to interpolate.
pub const SECONDS_PER_ACTION: f32 = 0.2;

/// Five-state pacing machine shared by every entity in a session.
///
/// `Starting` and `Restarting` are the frames on which entities perform their
/// discrete action tick; both hand over to `InProgress` within the same frame
/// and credit that frame's delta toward the new action.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionManager {
    state: ActionState,
    elapsed: f32,
}

impl ActionManager {
    /// Creates an idle manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ActionState {
        self.state
    }

    /// Fraction of the current action completed, in `[0, 1]`.
    #[must_use]
    pub fn decimal_complete(&self) -> f32 {
        (self.elapsed / SECONDS_PER_ACTION).clamp(0.0, 1.0)
    }

    /// Reports whether entities should perform an action tick this frame.
    #[must_use]
    pub const fn ticks_entities(&self) -> bool {
        matches!(self.state, ActionState::Starting | ActionState::Restarting)
    }

    /// Begins a fresh run of actions.
    pub fn start(&mut self, out_events: &mut Vec<Event>) {
        self.elapsed = 0.0;
        self.transition(ActionState::Starting, out_events);
    }

    /// Requests that no further actions begin; finalizes on the next tick.
    pub fn stop(&mut self, out_events: &mut Vec<Event>) {
        self.elapsed = SECONDS_PER_ACTION;
        self.transition(ActionState::Stopping, out_events);
    }

    /// Advances the machine by one frame.
    pub fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        match self.state {
            ActionState::Stopped => {}
            ActionState::Stopping => self.transition(ActionState::Stopped, out_events),
            ActionState::Starting | ActionState::Restarting => {
                self.elapsed = 0.0;
                self.transition(ActionState::InProgress, out_events);
                self.progress(dt, out_events);
            }
            ActionState::InProgress => self.progress(dt, out_events),
        }
    }

    fn progress(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.elapsed += dt.as_secs_f32();
        if self.elapsed >= SECONDS_PER_ACTION {
            self.elapsed = SECONDS_PER_ACTION;
            self.transition(ActionState::Restarting, out_events);
        }
    }

    fn transition(&mut self, to: ActionState, out_events: &mut Vec<Event>) {
        let from = self.state;
        debug!("action state {from:?} -> {to:?}");
        self.state = to;
        out_events.push(Event::ActionStateChanged { from, to });
    }
}
