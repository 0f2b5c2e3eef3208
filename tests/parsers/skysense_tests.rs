//! Tests for the SkySense detection log parser
//!
//! Tests cover:
//! - Field layout and the clamp/scale rules
//! - Length and order invariants
//! - Malformed and empty input rejection
//! - Fixture file parsing

#[path = "../common/mod.rs"]
mod common;

use common::assertions::*;
use common::example_files::*;
use common::float_cmp::*;
use common::read_example_file;
use common::synthetic::*;
use skysense::parsers::skysense::parse_and_transform;
use skysense::parsers::types::{MalformedReason, ParseError, Parseable};
use skysense::parsers::{SeriesGroup, SeriesId, SkySense};

// ============================================
// Transform Tests
// ============================================

#[test]
fn test_trivial_line_transforms() {
    let log = SkySense
        .parse("1000 5 130 -10 50 1 2 3 4 1 0 1 0 1 1 0 0")
        .expect("Should parse trivial line");

    assert_eq!(log.timestamps(), vec![1000]);
    let record = &log.records()[0];
    assert_eq!(record.temps, [5.0, 125.0, 0.0, 50.0]);
    assert_eq!(record.sma, [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(record.results, [10.0, 0.0, 10.0, 0.0]);
    assert_eq!(record.manual, [5.0, 5.0, 0.0, 0.0]);
}

#[test]
fn test_results_scaled_without_clamping() {
    let line = detection_line(1, [20.0; 4], [20.0; 4], [-3, 50, 1, -1], [-20, 40, 1, -1]);
    let log = SkySense.parse(&line).unwrap();
    let record = &log.records()[0];

    // Values far outside the chart's [-45, 125] band are kept as-is
    assert_eq!(record.results, [-30.0, 500.0, 10.0, -10.0]);
    assert_eq!(record.manual, [-100.0, 200.0, 5.0, -5.0]);
}

#[test]
fn test_clamp_per_channel_and_record() {
    let data = [
        detection_line(1, [-5.0, 0.0, 125.0, 200.0], [0.0; 4], [0; 4], [0; 4]),
        detection_line(2, [60.0, -0.001, 125.001, 124.999], [0.0; 4], [0; 4], [0; 4]),
    ]
    .join("\n");
    let log = SkySense.parse(&data).unwrap();

    assert_eq!(log.records()[0].temps, [0.0, 0.0, 125.0, 125.0]);
    assert_eq!(log.records()[1].temps, [60.0, 0.0, 125.0, 124.999]);
    assert_temps_in_range(&log);
}

#[test]
fn test_tabs_and_repeated_spaces_split() {
    let log = SkySense
        .parse("1000\t5  130 -10 50 1 2 3 4 1 0 1 0 1 1 0 0   ")
        .unwrap();
    assert_eq!(log.records()[0].temps, [5.0, 125.0, 0.0, 50.0]);
}

// ============================================
// Invariant Tests
// ============================================

#[test]
fn test_length_invariant() {
    for count in [1, 2, 17, 250] {
        let log = SkySense.parse(&rising_log(count)).unwrap();
        assert_eq!(log.len(), count);
        assert_aligned_series(&log);
    }
}

#[test]
fn test_order_preserved_without_sorting() {
    let data = [
        detection_line(300, [1.0; 4], [0.0; 4], [0; 4], [0; 4]),
        detection_line(100, [2.0; 4], [0.0; 4], [0; 4], [0; 4]),
        detection_line(200, [3.0; 4], [0.0; 4], [0; 4], [0; 4]),
    ]
    .join("\n");
    let log = SkySense.parse(&data).unwrap();

    assert_eq!(log.timestamps(), vec![300, 100, 200]);
    let t1 = log.channel(SeriesId {
        group: SeriesGroup::Temperature,
        sensor: 0,
    });
    assert_eq!(t1, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_element_i_matches_line_i() {
    let log = SkySense.parse(&rising_log(10)).unwrap();
    let t2 = log.channel(SeriesId {
        group: SeriesGroup::Temperature,
        sensor: 1,
    });
    let rs1 = log.channel(SeriesId {
        group: SeriesGroup::Detection,
        sensor: 0,
    });
    for i in 0..10 {
        assert_approx_eq(t2[i], 21.0 + i as f64 * 0.5, DEFAULT_TOLERANCE);
        assert_eq!(rs1[i], ((i % 2) * 10) as f64);
    }
}

// ============================================
// Error Handling Tests
// ============================================

#[test]
fn test_sixteen_tokens_rejected() {
    let result = SkySense.parse("1000 5 130 -10 50 1 2 3 4 1 0 1 0 1 1 0");
    match result {
        Err(ParseError::MalformedRecord { line, reason, .. }) => {
            assert_eq!(line, 1);
            assert_eq!(
                reason,
                MalformedReason::WrongTokenCount {
                    expected: 17,
                    found: 16
                }
            );
        }
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_non_numeric_token_rejected() {
    let data = format!(
        "{}\n1000 5 130 abc 50 1 2 3 4 1 0 1 0 1 1 0 0\n{}",
        rising_log(1),
        rising_log(1)
    );
    match SkySense.parse(&data) {
        Err(ParseError::MalformedRecord {
            line,
            content,
            reason,
        }) => {
            assert_eq!(line, 2);
            assert!(content.contains("abc"));
            assert_eq!(
                reason,
                MalformedReason::InvalidNumber {
                    field: 3,
                    token: "abc".to_string()
                }
            );
        }
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_first_error_halts_processing() {
    let data = "bad\n1000 5 130 -10 50 1 2 3 4 1 0 1 0 1 1 0 0\nalso bad";
    match SkySense.parse(data) {
        Err(ParseError::MalformedRecord { line, .. }) => assert_eq!(line, 1),
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_empty_input_rejected() {
    assert!(matches!(SkySense.parse(""), Err(ParseError::EmptyInput)));
    assert!(matches!(
        parse_and_transform(std::iter::empty()),
        Err(ParseError::EmptyInput)
    ));
}

// ============================================
// Fixture File Tests
// ============================================

#[test]
fn test_parse_fixture_file() {
    let content = read_example_file(DETECTION_SMALL);
    let log = SkySense.parse(&content).expect("Should parse fixture");

    // The blank line in the fixture is skipped
    assert_eq!(log.len(), 6);
    assert_aligned_series(&log);
    assert_monotonic_times(&log);
    assert_temps_in_range(&log);

    assert_eq!(log.first_timestamp(), 1588338187);
    assert_eq!(log.last_timestamp(), 1588338192);
    assert_eq!(log.records()[1].temps[1], 0.0);
    assert_eq!(log.records()[2].temps[2], 125.0);
    assert_eq!(log.records()[4].manual, [-5.0; 4]);
    assert_eq!(log.records()[5].results, [-10.0; 4]);
}
