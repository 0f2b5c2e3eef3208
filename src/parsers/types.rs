use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};
use thiserror::Error;

/// Number of sensor channels in every SkySense capture
pub const SENSOR_COUNT: usize = 4;

/// Number of whitespace-separated fields in one detection log record
pub const FIELD_COUNT: usize = 1 + 4 * SENSOR_COUNT;

/// One value per sensor channel
pub type Channels = [f64; SENSOR_COUNT];

// ============================================================================
// Error Types
// ============================================================================

/// Why a single line was rejected
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MalformedReason {
    /// Line did not split into the expected number of fields
    WrongTokenCount { expected: usize, found: usize },
    /// A field could not be parsed as a number
    InvalidNumber { field: usize, token: String },
    /// Line does not match the raw capture layout
    UnrecognizedLayout,
    /// Date or time fields do not form a valid calendar instant
    InvalidDate,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::WrongTokenCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
            MalformedReason::InvalidNumber { field, token } => {
                write!(f, "field {} is not a number: {:?}", field, token)
            }
            MalformedReason::UnrecognizedLayout => write!(f, "unrecognized line layout"),
            MalformedReason::InvalidDate => write!(f, "invalid date or time"),
        }
    }
}

/// Errors that can occur while loading a log file
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file does not exist or could not be read
    #[error("Failed to read {path}: {source}", path = .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No usable records in the input
    #[error("No records found in input")]
    EmptyInput,

    /// A line could not be parsed
    #[error("Line {line} is malformed ({reason}): {content:?}")]
    MalformedRecord {
        /// 1-based physical line number
        line: usize,
        content: String,
        reason: MalformedReason,
    },
}

impl ParseError {
    pub(crate) fn malformed(line_index: usize, content: &str, reason: MalformedReason) -> Self {
        ParseError::MalformedRecord {
            line: line_index + 1,
            content: content.to_string(),
            reason,
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// A single transformed sample from a detection log
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Record {
    /// Unix timestamp in seconds
    pub timestamp: i64,
    /// Raw temperatures, clamped to the sensor range
    pub temps: Channels,
    /// Simple moving averages, passed through unchanged
    pub sma: Channels,
    /// Automatic on/off results, scaled for display
    pub results: Channels,
    /// Manually labeled on/off results, scaled for display
    pub manual: Channels,
}

impl Record {
    /// Value of one channel group for a given sensor
    #[inline]
    pub fn value(&self, group: SeriesGroup, sensor: usize) -> f64 {
        let values = match group {
            SeriesGroup::Temperature => &self.temps,
            SeriesGroup::MovingAverage => &self.sma,
            SeriesGroup::Detection => &self.results,
            SeriesGroup::Manual => &self.manual,
        };
        values[sensor]
    }
}

/// The four channel groups of a detection log, in back-to-front draw order
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, PartialEq, Eq, Hash, Serialize)]
pub enum SeriesGroup {
    #[strum(serialize = "T")]
    Temperature,
    #[strum(serialize = "SMA")]
    MovingAverage,
    #[strum(serialize = "RS")]
    Detection,
    #[strum(serialize = "MRS")]
    Manual,
}

impl SeriesGroup {
    pub fn name(&self) -> &'static str {
        match self {
            SeriesGroup::Temperature => "Temperature",
            SeriesGroup::MovingAverage => "Moving average",
            SeriesGroup::Detection => "Detection result",
            SeriesGroup::Manual => "Manual result",
        }
    }

    /// Layer of the group on the chart; higher layers draw on top
    pub fn layer(&self) -> u8 {
        match self {
            SeriesGroup::Temperature => 1,
            SeriesGroup::MovingAverage => 2,
            SeriesGroup::Detection => 3,
            SeriesGroup::Manual => 4,
        }
    }
}

/// Identifies one of the 16 plotted series
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeriesId {
    pub group: SeriesGroup,
    /// Zero-based sensor index
    pub sensor: usize,
}

impl SeriesId {
    /// Legend label, e.g. `T1` or `MRS4`
    pub fn label(&self) -> String {
        format!("{}{}", self.group.as_ref(), self.sensor + 1)
    }

    /// All series in draw order: every temperature first, manual results last
    pub fn all() -> impl Iterator<Item = SeriesId> {
        SeriesGroup::iter()
            .flat_map(|group| (0..SENSOR_COUNT).map(move |sensor| SeriesId { group, sensor }))
    }
}

// ============================================================================
// Series collection
// ============================================================================

/// Ordered, non-empty set of records loaded from one detection log
#[derive(Clone, Debug, Serialize)]
pub struct SeriesCollection {
    records: Vec<Record>,
}

impl SeriesCollection {
    /// Wrap parsed records, rejecting an empty set
    pub fn new(records: Vec<Record>) -> Result<Self, ParseError> {
        if records.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; construction rejects empty input
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_timestamp(&self) -> i64 {
        self.records[0].timestamp
    }

    pub fn last_timestamp(&self) -> i64 {
        self.records[self.records.len() - 1].timestamp
    }

    /// Timestamp column
    pub fn timestamps(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.timestamp).collect()
    }

    /// Timestamp column as f64 for charting
    pub fn times_as_f64(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.timestamp as f64).collect()
    }

    /// Value column for one series
    pub fn channel(&self, id: SeriesId) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.value(id.group, id.sensor))
            .collect()
    }
}

/// Trait for log file parsers
pub trait Parseable {
    type Output;

    fn parse(&self, data: &str) -> Result<Self::Output, ParseError>;
}
