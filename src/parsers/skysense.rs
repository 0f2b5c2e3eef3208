//! Parser for SkySense detection logs.
//!
//! Each line holds one sample as 17 whitespace-separated fields:
//!
//! ```text
//! ts t1 t2 t3 t4 sma1 sma2 sma3 sma4 rs1 rs2 rs3 rs4 mrs1 mrs2 mrs3 mrs4
//! ```
//!
//! Temperatures are clamped to the sensor range and the result channels
//! are scaled for display while parsing.

use std::fs;
use std::path::Path;

use super::types::{
    Channels, MalformedReason, ParseError, Parseable, Record, SeriesCollection, FIELD_COUNT,
    SENSOR_COUNT,
};
use crate::transform::{clamp_channels, scale_channels, MANUAL_SCALE, RESULT_SCALE};

/// SkySense detection log parser
pub struct SkySense;

impl Parseable for SkySense {
    type Output = SeriesCollection;

    fn parse(&self, file_contents: &str) -> Result<SeriesCollection, ParseError> {
        parse_and_transform(file_contents.lines())
    }
}

impl SkySense {
    /// Read and parse a detection log from disk
    pub fn load(&self, path: &Path) -> Result<SeriesCollection, ParseError> {
        let contents = fs::read_to_string(path).map_err(|source| ParseError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let collection = self.parse(&contents)?;

        tracing::info!(
            "Loaded {} records from {:?} ({}..{})",
            collection.len(),
            path,
            collection.first_timestamp(),
            collection.last_timestamp()
        );

        Ok(collection)
    }
}

/// Parse every line and apply the display transforms.
///
/// Blank lines are skipped. The first malformed line aborts the whole parse.
pub fn parse_and_transform<'a, I>(lines: I) -> Result<SeriesCollection, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut records = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_record(index, line)?);
    }

    SeriesCollection::new(records)
}

/// Parse a single line. `index` is the zero-based line number used in errors.
pub fn parse_record(index: usize, line: &str) -> Result<Record, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != FIELD_COUNT {
        return Err(ParseError::malformed(
            index,
            line,
            MalformedReason::WrongTokenCount {
                expected: FIELD_COUNT,
                found: tokens.len(),
            },
        ));
    }

    let timestamp = tokens[0].parse::<i64>().map_err(|_| {
        ParseError::malformed(
            index,
            line,
            MalformedReason::InvalidNumber {
                field: 0,
                token: tokens[0].to_string(),
            },
        )
    })?;

    let mut values = [0.0; FIELD_COUNT - 1];
    for (field, token) in tokens.iter().enumerate().skip(1) {
        values[field - 1] = token.parse::<f64>().map_err(|_| {
            ParseError::malformed(
                index,
                line,
                MalformedReason::InvalidNumber {
                    field,
                    token: token.to_string(),
                },
            )
        })?;
    }

    let group = |n: usize| -> Channels {
        let start = n * SENSOR_COUNT;
        let mut channels = [0.0; SENSOR_COUNT];
        channels.copy_from_slice(&values[start..start + SENSOR_COUNT]);
        channels
    };

    Ok(Record {
        timestamp,
        temps: clamp_channels(group(0)),
        sma: group(1),
        results: scale_channels(group(2), RESULT_SCALE),
        manual: scale_channels(group(3), MANUAL_SCALE),
    })
}
