//! The per-frame decision pipeline.
//!
//! One scan frame in, one velocity command out (two when the reverse
//! maneuver fires): sample the monitored bearings, classify them against the
//! safety distance, optionally back away, re-evaluate, emit.

pub mod maneuver;
pub mod sampler;
pub mod safety;

pub use maneuver::{HoldTimer, ManeuverState, ReverseManeuver, SleepHold};
pub use safety::SafetyVerdict;

use crate::command::VelocityCommand;
use crate::config::{BearingConfig, PariharaConfig};
use crate::error::Result;
use crate::scan::ScanFrame;
use crate::transport::CommandSink;

/// Reactive obstacle-avoidance controller.
///
/// Stateless across frames apart from the transient reverse sub-state:
/// processing a frame always runs to completion before the next frame is
/// accepted, so no verdict or reading outlives one call.
pub struct AvoidanceController {
    bearings: BearingConfig,
    safety_distance: f32,
    forward_speed: f32,
    rotate_speed: f32,
    maneuver: ReverseManeuver,
}

impl AvoidanceController {
    /// Create a controller with the production (blocking) hold timer.
    pub fn new(config: &PariharaConfig) -> Self {
        Self::with_hold_timer(config, Box::new(SleepHold))
    }

    /// Create a controller with an injected hold timer (used by tests).
    pub fn with_hold_timer(config: &PariharaConfig, timer: Box<dyn HoldTimer>) -> Self {
        let maneuver = ReverseManeuver::new(
            config.thresholds.reverse_distance,
            config.speeds.reverse,
            config.thresholds.reverse_duration(),
            timer,
        );

        Self {
            bearings: config.bearings.clone(),
            safety_distance: config.thresholds.safety_distance,
            forward_speed: config.speeds.forward,
            rotate_speed: config.speeds.rotate,
            maneuver,
        }
    }

    /// Decide and emit the command for one scan frame.
    ///
    /// Emits exactly one command per frame, plus one extra reverse command
    /// iff the maneuver fires. A frame too short for the configured bearings
    /// fails closed: one stop command is emitted and the error returned.
    ///
    /// When the maneuver fires, the re-evaluation afterwards reads the same
    /// frame this call was given; the readings predate the maneuver and no
    /// fresh sensor data is consulted.
    pub fn process_frame(
        &mut self,
        frame: &ScanFrame,
        sink: &mut dyn CommandSink,
    ) -> Result<VelocityCommand> {
        let readings = match sampler::sample(frame, &self.bearings) {
            Ok(readings) => readings,
            Err(e) => {
                tracing::warn!("Rejecting scan frame, stopping: {}", e);
                let stop = VelocityCommand::stop();
                sink.send(stop)?;
                return Err(e);
            }
        };

        tracing::info!(
            front = readings.front,
            left_flank = readings.left_flank,
            right_flank = readings.right_flank,
            "Scan readings"
        );

        let verdict = safety::evaluate(&readings, self.safety_distance);

        let command = match verdict {
            SafetyVerdict::Clear => VelocityCommand::forward(self.forward_speed),
            SafetyVerdict::Blocked => {
                // Tentative: rotate in place, fixed counter-clockwise sign
                let mut command = VelocityCommand::rotate(self.rotate_speed);

                if self.maneuver.should_enter(verdict, readings.front) {
                    tracing::warn!(
                        front = readings.front,
                        "Too close to obstacle, reversing"
                    );
                    self.maneuver.execute(sink)?;
                }

                // Re-evaluate the same frame; already validated above
                let readings = sampler::sample(frame, &self.bearings)?;
                if safety::evaluate(&readings, self.safety_distance) == SafetyVerdict::Clear {
                    command = VelocityCommand::forward(self.forward_speed);
                }

                command
            }
        };

        sink.send(command)?;
        Ok(command)
    }

    /// Current reverse-maneuver state. Always `Inactive` between frames.
    pub fn maneuver_state(&self) -> ManeuverState {
        self.maneuver.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct RecordingSink(Arc<Mutex<Vec<VelocityCommand>>>);

    impl CommandSink for RecordingSink {
        fn send(&mut self, command: VelocityCommand) -> Result<()> {
            self.0.lock().unwrap().push(command);
            Ok(())
        }
    }

    struct RecordingHold(Arc<Mutex<Vec<Duration>>>);

    impl HoldTimer for RecordingHold {
        fn hold(&mut self, duration: Duration) {
            self.0.lock().unwrap().push(duration);
        }
    }

    fn test_controller() -> (
        AvoidanceController,
        Arc<Mutex<Vec<VelocityCommand>>>,
        Arc<Mutex<Vec<Duration>>>,
    ) {
        let holds = Arc::new(Mutex::new(Vec::new()));
        let commands = Arc::new(Mutex::new(Vec::new()));
        let controller = AvoidanceController::with_hold_timer(
            &PariharaConfig::default(),
            Box::new(RecordingHold(Arc::clone(&holds))),
        );
        (controller, commands, holds)
    }

    fn frame_with(front: f32, left: f32, right: f32) -> ScanFrame {
        let mut ranges = vec![5.0; 360];
        ranges[0] = front;
        ranges[15] = left;
        ranges[345] = right;
        ScanFrame::new(ranges)
    }

    #[test]
    fn test_clear_path_drives_forward() {
        let (mut controller, commands, holds) = test_controller();
        let mut sink = RecordingSink(Arc::clone(&commands));

        let cmd = controller
            .process_frame(&frame_with(1.0, 1.0, 1.0), &mut sink)
            .unwrap();

        assert_eq!(cmd, VelocityCommand::forward(0.5));
        assert_eq!(commands.lock().unwrap().as_slice(), &[cmd]);
        assert!(holds.lock().unwrap().is_empty());
    }

    #[test]
    fn test_blocked_flank_rotates_without_reversing() {
        let (mut controller, commands, holds) = test_controller();
        let mut sink = RecordingSink(Arc::clone(&commands));

        // Front clear enough to skip the maneuver, flank blocked
        let cmd = controller
            .process_frame(&frame_with(0.5, 0.6, 1.0), &mut sink)
            .unwrap();

        assert_eq!(cmd, VelocityCommand::rotate(0.5));
        assert_eq!(commands.lock().unwrap().as_slice(), &[cmd]);
        assert!(holds.lock().unwrap().is_empty());
    }

    #[test]
    fn test_close_obstacle_reverses_then_rotates() {
        let (mut controller, commands, holds) = test_controller();
        let mut sink = RecordingSink(Arc::clone(&commands));

        let cmd = controller
            .process_frame(&frame_with(0.2, 1.0, 1.0), &mut sink)
            .unwrap();

        // Stale frame still shows front = 0.2, so the final command rotates
        assert_eq!(cmd, VelocityCommand::rotate(0.5));
        assert_eq!(
            commands.lock().unwrap().as_slice(),
            &[VelocityCommand::reverse(0.5), VelocityCommand::rotate(0.5)]
        );
        assert_eq!(
            holds.lock().unwrap().as_slice(),
            &[Duration::from_secs_f32(2.0)]
        );
        assert_eq!(controller.maneuver_state(), ManeuverState::Inactive);
    }

    #[test]
    fn test_reverse_threshold_is_strict() {
        let (mut controller, commands, _) = test_controller();
        let mut sink = RecordingSink(Arc::clone(&commands));

        // Front exactly at reverse_distance: blocked, but no reverse
        let cmd = controller
            .process_frame(&frame_with(0.3, 1.0, 1.0), &mut sink)
            .unwrap();

        assert_eq!(cmd, VelocityCommand::rotate(0.5));
        assert_eq!(commands.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_idempotent_outside_reverse() {
        let (mut controller, commands, _) = test_controller();
        let mut sink = RecordingSink(Arc::clone(&commands));
        let frame = frame_with(0.5, 1.0, 1.0);

        let first = controller.process_frame(&frame, &mut sink).unwrap();
        let second = controller.process_frame(&frame, &mut sink).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_short_frame_fails_closed() {
        let (mut controller, commands, holds) = test_controller();
        let mut sink = RecordingSink(Arc::clone(&commands));

        let result = controller.process_frame(&ScanFrame::new(vec![1.0; 10]), &mut sink);

        assert!(matches!(
            result,
            Err(crate::error::PariharaError::MalformedScan { .. })
        ));
        // Exactly one stationary command, no maneuver
        assert_eq!(commands.lock().unwrap().as_slice(), &[VelocityCommand::stop()]);
        assert!(holds.lock().unwrap().is_empty());
    }
}
