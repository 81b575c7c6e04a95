//! Reverse maneuver: bounded, timed back-away when an obstacle is
//! immediately ahead.
//!
//! Entered only from the Blocked branch of the decision pipeline. The
//! maneuver emits exactly one reverse command, holds it for the configured
//! duration, then exits unconditionally; there is no retry and no sensor
//! re-check during the hold.

use std::time::Duration;

use super::safety::SafetyVerdict;
use crate::command::VelocityCommand;
use crate::error::Result;
use crate::transport::CommandSink;

/// How the reverse hold is performed.
///
/// The production timer blocks the dispatch path, so sensor frames arriving
/// during the hold are dropped by the transport. Tests inject a recording
/// timer instead of waiting on the wall clock.
pub trait HoldTimer {
    fn hold(&mut self, duration: Duration);
}

/// Blocking hold via `thread::sleep`.
pub struct SleepHold;

impl HoldTimer for SleepHold {
    fn hold(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Maneuver state, transient within one frame's processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManeuverState {
    /// Not reversing
    Inactive,
    /// Reverse command active, hold in progress
    Reversing,
}

/// The bounded reverse maneuver.
pub struct ReverseManeuver {
    reverse_distance: f32,
    reverse_speed: f32,
    duration: Duration,
    timer: Box<dyn HoldTimer>,
    state: ManeuverState,
}

impl ReverseManeuver {
    pub fn new(
        reverse_distance: f32,
        reverse_speed: f32,
        duration: Duration,
        timer: Box<dyn HoldTimer>,
    ) -> Self {
        Self {
            reverse_distance,
            reverse_speed,
            duration,
            timer,
            state: ManeuverState::Inactive,
        }
    }

    /// Entry condition: Blocked verdict and front reading strictly below the
    /// reverse distance. A reading exactly at the threshold does not enter.
    pub fn should_enter(&self, verdict: SafetyVerdict, front_range: f32) -> bool {
        verdict == SafetyVerdict::Blocked && front_range < self.reverse_distance
    }

    /// Run the maneuver: emit the reverse command, hold for the full
    /// duration, then return control for re-evaluation.
    pub fn execute(&mut self, sink: &mut dyn CommandSink) -> Result<()> {
        self.state = ManeuverState::Reversing;
        let result = self.run_hold(sink);
        // Exit is unconditional, including on a sink failure
        self.state = ManeuverState::Inactive;
        result
    }

    fn run_hold(&mut self, sink: &mut dyn CommandSink) -> Result<()> {
        sink.send(VelocityCommand::reverse(self.reverse_speed))?;
        self.timer.hold(self.duration);
        Ok(())
    }

    /// Current maneuver state.
    pub fn state(&self) -> ManeuverState {
        self.state
    }
}
