pub mod raw;
pub mod skysense;
pub mod types;

pub use raw::{ManualMark, RawCapture, RawSample};
pub use skysense::SkySense;
pub use types::{ParseError, Parseable, Record, SeriesCollection, SeriesGroup, SeriesId};
