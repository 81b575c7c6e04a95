//! Range scan frame type

use serde::{Deserialize, Serialize};

/// One full set of range readings from the planar range sensor.
///
/// Readings are non-negative distances in meters, one per angular bearing
/// index. A frame is owned by the controller only for the duration of one
/// decision and is not retained afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanFrame {
    /// Range readings indexed by bearing
    pub ranges: Vec<f32>,
}

impl ScanFrame {
    /// Create a frame from raw range readings
    pub fn new(ranges: Vec<f32>) -> Self {
        Self { ranges }
    }

    /// Number of readings in the frame
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the frame has no readings
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Reading at a bearing index, if within bounds
    pub fn range(&self, bearing: usize) -> Option<f32> {
        self.ranges.get(bearing).copied()
    }
}
