//! UI rendering modules for the SkySense grapher.
//!
//! - `chart` - Main chart rendering and series downsampling

pub mod chart;
