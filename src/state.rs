//! Chart constants and color palettes.
//!
//! This module contains the fixed chart layout and the colors assigned to
//! each of the sixteen plotted series.

use crate::parsers::types::{SeriesGroup, SeriesId};

// ============================================================================
// Constants
// ============================================================================

/// Lower bound of the vertical axis
pub const Y_MIN: f64 = -45.0;

/// Upper bound of the vertical axis
pub const Y_MAX: f64 = 125.0;

/// Chart title
pub const CHART_TITLE: &str = "Property of Skyleap Industries Inc.";

/// Horizontal axis label
pub const X_AXIS_LABEL: &str = "Epoch";

/// Vertical axis label
pub const Y_AXIS_LABEL: &str = "Temp";

/// Maximum points to render per series (for performance via LTTB downsampling)
pub const MAX_CHART_POINTS: usize = 4000;

/// Default line width in points
pub const DEFAULT_LINE_WIDTH: f32 = 1.0;

/// Temperature line colors (muted greens)
pub const TEMPERATURE_COLORS: [[u8; 3]; 4] = [
    [0x57, 0x5C, 0x55],
    [0x6C, 0x7D, 0x47],
    [0x96, 0xA1, 0x3A],
    [0x84, 0xA0, 0x7C],
];

/// Moving average color (red)
pub const SMA_COLOR: [u8; 3] = [255, 0, 0];

/// Detection result color (green)
pub const RESULT_COLOR: [u8; 3] = [0, 128, 0];

/// Manual result color (blue)
pub const MANUAL_COLOR: [u8; 3] = [0, 0, 255];

/// Colorblind-friendly palette (based on Wong's optimized palette)
/// Designed to be distinguishable for deuteranopia, protanopia, and tritanopia
pub const COLORBLIND_COLORS: &[[u8; 3]] = &[
    [0, 114, 178],   // Blue
    [230, 159, 0],   // Orange
    [0, 158, 115],   // Bluish green
    [204, 121, 167], // Reddish purple
    [86, 180, 233],  // Sky blue
    [213, 94, 0],    // Vermillion
    [240, 228, 66],  // Yellow
    [153, 153, 153], // Gray
];

/// Color for one series.
///
/// The default palette follows the SkySense group colors. In colorblind mode
/// temperatures take the first four Wong colors and every other group gets a
/// single distinct color.
pub fn series_color(id: SeriesId, color_blind_mode: bool) -> [u8; 3] {
    if color_blind_mode {
        return match id.group {
            SeriesGroup::Temperature => COLORBLIND_COLORS[id.sensor % 4],
            SeriesGroup::MovingAverage => COLORBLIND_COLORS[5],
            SeriesGroup::Detection => COLORBLIND_COLORS[6],
            SeriesGroup::Manual => COLORBLIND_COLORS[4],
        };
    }

    match id.group {
        SeriesGroup::Temperature => TEMPERATURE_COLORS[id.sensor % TEMPERATURE_COLORS.len()],
        SeriesGroup::MovingAverage => SMA_COLOR,
        SeriesGroup::Detection => RESULT_COLOR,
        SeriesGroup::Manual => MANUAL_COLOR,
    }
}
