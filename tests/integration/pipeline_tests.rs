//! Capture → detect → graph pipeline tests
//!
//! Detector output must load back through the grapher's parser with the
//! display transforms applied.

#[path = "../common/mod.rs"]
mod common;

use common::assertions::*;
use common::example_files::*;
use common::float_cmp::*;
use common::read_example_file;
use common::synthetic::*;
use skysense::detector::{Detector, DetectorConfig};
use skysense::parsers::types::Parseable;
use skysense::parsers::{RawCapture, SkySense};

fn to_log_text(config: DetectorConfig, capture: &str) -> String {
    let samples = RawCapture.parse(capture).expect("Should parse capture");
    Detector::run(config, &samples)
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_fixture_capture_round_trips_to_graph() {
    let capture = read_example_file(RAW_CAPTURE_SMALL);
    let text = to_log_text(DetectorConfig::default(), &capture);

    let log = SkySense.parse(&text).expect("Detector output should parse");
    assert_eq!(log.len(), 7);
    assert_aligned_series(&log);
    assert_monotonic_times(&log);

    // Manual markers are scaled by five on the chart
    assert_eq!(log.records()[2].manual, [5.0; 4]);
    assert_eq!(log.records()[5].manual, [-5.0; 4]);
    assert_eq!(log.records()[0].manual, [0.0; 4]);

    // Too few samples for any moving average
    assert!(log.records().iter().all(|r| r.sma == [0.0; 4]));
    assert_approx_eq(log.records()[4].temps[0], 22.5, DEFAULT_TOLERANCE);
}

#[test]
fn test_heating_capture_detected_on() {
    let capture: String = (0..40)
        .map(|i| {
            let t = 20.0 + i as f64;
            raw_line(i, [t, t + 0.5, t + 1.0, t + 1.5])
        })
        .collect::<Vec<_>>()
        .join("\n");

    let config = DetectorConfig {
        sma_window: 4,
        sampling_window: 5,
        ..DetectorConfig::default()
    };
    let log = SkySense.parse(&to_log_text(config, &capture)).unwrap();

    assert_eq!(log.len(), 40);
    // Off until the first full decision window, on afterwards
    assert_eq!(log.records()[9].results, [0.0; 4]);
    assert_eq!(log.records()[10].results, [10.0; 4]);
    assert_eq!(log.records()[39].results, [10.0; 4]);
    assert_temps_in_range(&log);
}
