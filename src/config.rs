//! Configuration loading for PariharaNav

use crate::error::{PariharaError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct PariharaConfig {
    #[serde(default)]
    pub bearings: BearingConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub speeds: SpeedConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

/// Angular bearing indices sampled from each scan frame.
///
/// Indices are positions in the frame's range array, one per degree on the
/// reference sensor: straight ahead plus two near-forward flanks.
#[derive(Clone, Debug, Deserialize)]
pub struct BearingConfig {
    /// Straight-ahead bearing index (default: 0)
    #[serde(default = "default_front")]
    pub front: usize,

    /// Left flank bearing index (default: 15)
    #[serde(default = "default_left_flank")]
    pub left_flank: usize,

    /// Right flank bearing index (default: 345)
    #[serde(default = "default_right_flank")]
    pub right_flank: usize,
}

impl BearingConfig {
    /// Minimum frame length required to sample all configured bearings.
    pub fn min_frame_len(&self) -> usize {
        self.front.max(self.left_flank).max(self.right_flank) + 1
    }
}

/// Safety thresholds
#[derive(Clone, Debug, Deserialize)]
pub struct ThresholdConfig {
    /// Minimum clear range on all bearings in meters (default: 0.8)
    #[serde(default = "default_safety_distance")]
    pub safety_distance: f32,

    /// Front range below which the robot backs away, in meters (default: 0.3)
    #[serde(default = "default_reverse_distance")]
    pub reverse_distance: f32,

    /// Hold time while reversing, in seconds (default: 2.0)
    #[serde(default = "default_reverse_duration")]
    pub reverse_duration_secs: f32,
}

impl ThresholdConfig {
    /// Reverse hold time as a `Duration`.
    pub fn reverse_duration(&self) -> Duration {
        Duration::from_secs_f32(self.reverse_duration_secs)
    }
}

/// Command magnitudes
#[derive(Clone, Debug, Deserialize)]
pub struct SpeedConfig {
    /// Linear speed when the path is clear, in m/s (default: 0.5)
    #[serde(default = "default_forward_speed")]
    pub forward: f32,

    /// Angular speed when blocked, in rad/s (default: 0.5, counter-clockwise)
    #[serde(default = "default_rotate_speed")]
    pub rotate: f32,

    /// Linear speed magnitude while reversing, in m/s (default: 0.5)
    #[serde(default = "default_reverse_speed")]
    pub reverse: f32,
}

/// Transport endpoints for the binary
#[derive(Clone, Debug, Deserialize)]
pub struct TransportConfig {
    /// UDP address to listen on for scan frames (default: 0.0.0.0:5577)
    #[serde(default = "default_scan_listen")]
    pub scan_listen: String,

    /// UDP address velocity commands are sent to (default: 127.0.0.1:5578)
    #[serde(default = "default_command_target")]
    pub command_target: String,
}

// Default value functions
fn default_front() -> usize {
    0
}
fn default_left_flank() -> usize {
    15
}
fn default_right_flank() -> usize {
    345
}
fn default_safety_distance() -> f32 {
    0.8
}
fn default_reverse_distance() -> f32 {
    0.3
}
fn default_reverse_duration() -> f32 {
    2.0
}
fn default_forward_speed() -> f32 {
    0.5
}
fn default_rotate_speed() -> f32 {
    0.5
}
fn default_reverse_speed() -> f32 {
    0.5
}
fn default_scan_listen() -> String {
    "0.0.0.0:5577".to_string()
}
fn default_command_target() -> String {
    "127.0.0.1:5578".to_string()
}

impl Default for BearingConfig {
    fn default() -> Self {
        Self {
            front: default_front(),
            left_flank: default_left_flank(),
            right_flank: default_right_flank(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            safety_distance: default_safety_distance(),
            reverse_distance: default_reverse_distance(),
            reverse_duration_secs: default_reverse_duration(),
        }
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            forward: default_forward_speed(),
            rotate: default_rotate_speed(),
            reverse: default_reverse_speed(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            scan_listen: default_scan_listen(),
            command_target: default_command_target(),
        }
    }
}

impl Default for PariharaConfig {
    fn default() -> Self {
        Self {
            bearings: BearingConfig::default(),
            thresholds: ThresholdConfig::default(),
            speeds: SpeedConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl PariharaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PariharaError::Config(format!("Failed to read config file: {}", e)))?;
        let config: PariharaConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds and speeds are physically sensible.
    pub fn validate(&self) -> Result<()> {
        if self.thresholds.safety_distance <= 0.0 {
            return Err(PariharaError::Config(
                "safety_distance must be positive".to_string(),
            ));
        }
        if self.thresholds.reverse_distance <= 0.0 {
            return Err(PariharaError::Config(
                "reverse_distance must be positive".to_string(),
            ));
        }
        if self.thresholds.reverse_distance >= self.thresholds.safety_distance {
            return Err(PariharaError::Config(format!(
                "reverse_distance ({}) must be below safety_distance ({})",
                self.thresholds.reverse_distance, self.thresholds.safety_distance
            )));
        }
        if self.thresholds.reverse_duration_secs <= 0.0 {
            return Err(PariharaError::Config(
                "reverse_duration_secs must be positive".to_string(),
            ));
        }
        if self.speeds.forward <= 0.0 || self.speeds.rotate <= 0.0 || self.speeds.reverse <= 0.0 {
            return Err(PariharaError::Config(
                "speeds must be positive magnitudes".to_string(),
            ));
        }
        Ok(())
    }
}
