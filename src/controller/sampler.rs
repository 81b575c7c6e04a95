//! Bearing sampler: extracts the monitored readings from a scan frame.

use crate::config::BearingConfig;
use crate::error::{PariharaError, Result};
use crate::scan::ScanFrame;

/// Range readings at the three monitored bearings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BearingReadings {
    /// Reading straight ahead
    pub front: f32,
    /// Reading at the left flank bearing
    pub left_flank: f32,
    /// Reading at the right flank bearing
    pub right_flank: f32,
}

/// Sample the configured bearings from a frame.
///
/// The frame length is validated against the highest configured bearing
/// index before any access; a short frame is a [`PariharaError::MalformedScan`],
/// never an unchecked read.
pub fn sample(frame: &ScanFrame, bearings: &BearingConfig) -> Result<BearingReadings> {
    let required = bearings.min_frame_len();
    if frame.len() < required {
        return Err(PariharaError::MalformedScan {
            required,
            actual: frame.len(),
        });
    }

    Ok(BearingReadings {
        front: frame.ranges[bearings.front],
        left_flank: frame.ranges[bearings.left_flank],
        right_flank: frame.ranges[bearings.right_flank],
    })
}
