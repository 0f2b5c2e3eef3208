//! Parser for raw SkySense sensor captures.
//!
//! A capture line looks like:
//!
//! ```text
//! 01/05/20 14:03:07.250 C C T1=21.5 T2=22.0 T3=20.8 T4=21.1
//! ```
//!
//! Operators mark the moment they switched the device by inserting a line
//! with a run of tabs; the word `off` in that line marks a switch-off.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use regex::Regex;

use super::types::{Channels, MalformedReason, ParseError, Parseable, SENSOR_COUNT};

/// Lines shorter than this are treated as blank
const MIN_LINE_LEN: usize = 5;

/// Manual markers contain this run of tabs
const MANUAL_MARKER: &str = "\t\t\t\t\t\t\t\t\t";

/// Two-digit years in captures are offset from this year
const CENTURY: i32 = 2000;

/// Manual on/off label attached to a raw sample
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ManualMark {
    #[default]
    None,
    On,
    Off,
}

impl ManualMark {
    /// Numeric flag written to detection logs
    pub fn flag(&self) -> i32 {
        match self {
            ManualMark::None => 0,
            ManualMark::On => 1,
            ManualMark::Off => -1,
        }
    }
}

/// One sample from a raw capture
#[derive(Clone, Debug, PartialEq)]
pub struct RawSample {
    /// Wall-clock time the sample was recorded, including milliseconds
    pub recorded_at: NaiveDateTime,
    pub temps: Channels,
    pub manual: ManualMark,
}

impl RawSample {
    /// Whole-second Unix timestamp, interpreting the capture time as local time.
    ///
    /// Returns 0 for local times that do not exist (DST gaps).
    pub fn epoch_seconds(&self) -> i64 {
        let whole_seconds = self
            .recorded_at
            .with_nanosecond(0)
            .unwrap_or(self.recorded_at);

        match Local.from_local_datetime(&whole_seconds).earliest() {
            Some(local) => local.timestamp(),
            None => {
                tracing::warn!("Error converting timestamp {}", self.recorded_at);
                0
            }
        }
    }
}

/// Raw capture parser
pub struct RawCapture;

impl Parseable for RawCapture {
    type Output = Vec<RawSample>;

    fn parse(&self, file_contents: &str) -> Result<Vec<RawSample>, ParseError> {
        let regex = Regex::new(
            r"^\s*(?<day>\d{1,2})/(?<month>\d{1,2})/(?<year>\d{2})\s+(?<hour>\d{1,2}):(?<minute>\d{1,2}):(?<second>\d{1,2})(?:\.(?<ms>\d{1,3}))?\s+\S+\s+\S+\s+T1=(?<t1>\S+)\s+T2=(?<t2>\S+)\s+T3=(?<t3>\S+)\s+T4=(?<t4>\S+)",
        )
        .expect("Failed to compile regex");

        let mut samples: Vec<RawSample> = Vec::new();
        let mut ignored_marks = 0usize;

        for (index, line) in file_contents.lines().enumerate() {
            if line.len() < MIN_LINE_LEN {
                continue;
            }

            if line.contains(MANUAL_MARKER) {
                let mark = if line.contains("off") {
                    ManualMark::Off
                } else {
                    ManualMark::On
                };
                match samples.last_mut() {
                    Some(previous) => previous.manual = mark,
                    None => ignored_marks += 1,
                }
                continue;
            }

            let Some(captures) = regex.captures(line) else {
                return Err(ParseError::malformed(
                    index,
                    line,
                    MalformedReason::UnrecognizedLayout,
                ));
            };

            let field = |name: &str| -> u32 {
                captures
                    .name(name)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(0)
            };

            let recorded_at = NaiveDate::from_ymd_opt(
                CENTURY + field("year") as i32,
                field("month"),
                field("day"),
            )
            .and_then(|date| {
                date.and_hms_milli_opt(
                    field("hour"),
                    field("minute"),
                    field("second"),
                    field("ms"),
                )
            })
            .ok_or_else(|| ParseError::malformed(index, line, MalformedReason::InvalidDate))?;

            let mut temps = [0.0; SENSOR_COUNT];
            for (sensor, temp) in temps.iter_mut().enumerate() {
                let token = &captures[format!("t{}", sensor + 1).as_str()];
                *temp = token.parse::<f64>().map_err(|_| {
                    ParseError::malformed(
                        index,
                        line,
                        MalformedReason::InvalidNumber {
                            field: sensor + 1,
                            token: token.to_string(),
                        },
                    )
                })?;
            }

            samples.push(RawSample {
                recorded_at,
                temps,
                manual: ManualMark::None,
            });
        }

        if ignored_marks > 0 {
            tracing::warn!(
                "Ignored {} manual marker(s) found before the first sample",
                ignored_marks
            );
        }

        if samples.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        tracing::info!("Parsed {} raw samples", samples.len());

        Ok(samples)
    }
}
