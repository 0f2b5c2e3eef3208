//! SkySense - sensor-log grapher and on/off detector
//!
//! This library parses SkySense detection logs into typed records and
//! renders them as a multi-series time chart. It also contains the
//! detector that turns raw sensor captures into detection logs.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Detection log and raw capture parsers
//! - [`transform`] - Temperature clamping and result scaling
//! - [`detector`] - Moving-average slope detector
//! - [`app`] - Chart window state and eframe::App implementation
//! - [`state`] - Chart constants and color palettes
//! - [`settings`] - User settings persistence
//! - [`ui`] - User interface components

pub mod app;
pub mod detector;
pub mod parsers;
pub mod settings;
pub mod state;
pub mod transform;
pub mod ui;
