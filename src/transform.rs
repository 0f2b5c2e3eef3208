//! Display transforms applied to detection log channels.
//!
//! Temperatures are hard-limited to the physical sensor range. Detection
//! and manual results are on/off flags that get lifted into their own
//! vertical band on the chart; they are never clamped.

use crate::parsers::types::Channels;

/// Lowest temperature the sensors can report
pub const TEMP_MIN: f64 = 0.0;

/// Highest temperature the sensors can report
pub const TEMP_MAX: f64 = 125.0;

/// Multiplier for automatic detection results
pub const RESULT_SCALE: f64 = 10.0;

/// Multiplier for manually labeled results
pub const MANUAL_SCALE: f64 = 5.0;

/// Restrict a temperature reading to [`TEMP_MIN`, `TEMP_MAX`]; NaN passes through
#[inline]
pub fn clamp_temperature(value: f64) -> f64 {
    value.clamp(TEMP_MIN, TEMP_MAX)
}

/// Scale an automatic detection result for display
#[inline]
pub fn scale_result(value: f64) -> f64 {
    value * RESULT_SCALE
}

/// Scale a manual result for display
#[inline]
pub fn scale_manual(value: f64) -> f64 {
    value * MANUAL_SCALE
}

/// Clamp every channel of a temperature sample
pub fn clamp_channels(values: Channels) -> Channels {
    values.map(clamp_temperature)
}

/// Multiply every channel by the same factor
pub fn scale_channels(values: Channels, factor: f64) -> Channels {
    values.map(|v| v * factor)
}
