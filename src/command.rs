//! Velocity command type

use serde::{Deserialize, Serialize};

/// A velocity command for a differential-drive base.
///
/// Value semantics only: a command is freshly constructed each decision and
/// has no identity beyond its two scalars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityCommand {
    /// Linear velocity along the heading in m/s (negative = reverse)
    pub linear: f32,
    /// Angular velocity about the vertical axis in rad/s (positive = CCW)
    pub angular: f32,
}

impl VelocityCommand {
    /// Drive straight ahead at `speed`
    pub fn forward(speed: f32) -> Self {
        Self {
            linear: speed,
            angular: 0.0,
        }
    }

    /// Rotate in place counter-clockwise at `speed`
    pub fn rotate(speed: f32) -> Self {
        Self {
            linear: 0.0,
            angular: speed,
        }
    }

    /// Back straight away at `speed` (the magnitude is applied negative here
    /// so callers pass the configured positive value)
    pub fn reverse(speed: f32) -> Self {
        Self {
            linear: -speed,
            angular: 0.0,
        }
    }

    /// Zero motion
    pub fn stop() -> Self {
        Self {
            linear: 0.0,
            angular: 0.0,
        }
    }

    /// Check if this command produces no motion
    pub fn is_stop(&self) -> bool {
        self.linear == 0.0 && self.angular == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_applies_negative_sign() {
        let cmd = VelocityCommand::reverse(0.5);
        assert_eq!(cmd.linear, -0.5);
        assert_eq!(cmd.angular, 0.0);
    }

    #[test]
    fn test_stop_is_stop() {
        assert!(VelocityCommand::stop().is_stop());
        assert!(!VelocityCommand::forward(0.5).is_stop());
        assert!(!VelocityCommand::rotate(0.5).is_stop());
    }
}
