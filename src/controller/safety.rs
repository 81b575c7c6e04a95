//! Safety evaluator: Clear/Blocked classification of sampled readings.

use super::sampler::BearingReadings;

/// Verdict of one safety evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyVerdict {
    /// All monitored bearings strictly exceed the safety distance
    Clear,
    /// At least one monitored bearing is at or below the safety distance
    Blocked,
}

/// Classify readings against the safety distance.
///
/// Clear requires every reading to be strictly greater than
/// `safety_distance`; a reading exactly at the threshold is Blocked. No
/// hysteresis and no debounce, by contract.
pub fn evaluate(readings: &BearingReadings, safety_distance: f32) -> SafetyVerdict {
    if readings.front > safety_distance
        && readings.left_flank > safety_distance
        && readings.right_flank > safety_distance
    {
        SafetyVerdict::Clear
    } else {
        SafetyVerdict::Blocked
    }
}
