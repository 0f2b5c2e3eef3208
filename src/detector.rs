//! On/off detection for SkySense captures.
//!
//! Each sensor's temperature is smoothed with a simple moving average. The
//! slope of that average is sampled over fixed windows; a window where
//! nearly every slope rises marks the sensor ON, one where nearly every
//! slope falls marks it OFF. The device is ON when enough sensors agree.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::parsers::raw::RawSample;
use crate::parsers::types::{Channels, SENSOR_COUNT};

/// Slopes with a magnitude below this count as flat (and therefore falling)
const DEFAULT_SLOPE_EPSILON: f64 = 0.001;

/// Errors loading a detector configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read detector config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse detector config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid detector config: {0}")]
    Invalid(String),
}

/// Tuning parameters for the detector
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Number of samples averaged by the SMA
    pub sma_window: usize,
    /// Number of slopes inspected per decision window
    pub sampling_window: usize,
    /// Fraction of slopes that must agree to flip a sensor
    pub threshold: f64,
    pub slope_epsilon: f64,
    /// Minimum sum of sensor results for the device to read ON
    pub quorum: i32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sma_window: 1200,
            sampling_window: 120,
            threshold: 0.98,
            slope_epsilon: DEFAULT_SLOPE_EPSILON,
            quorum: 3,
        }
    }
}

impl DetectorConfig {
    /// Load a configuration from a JSON file; missing keys use defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sma_window == 0 {
            return Err(ConfigError::Invalid("sma_window must be positive".into()));
        }
        if self.sampling_window == 0 {
            return Err(ConfigError::Invalid(
                "sampling_window must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Invalid(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Device state after processing a sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceState {
    Off,
    On,
}

/// A fully processed sample, ready to be written to a detection log
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedSample {
    pub timestamp: i64,
    pub temps: Channels,
    pub sma: Channels,
    pub slopes: Channels,
    /// Per-sensor result: 1 rising (ON), 0 undecided, -1 falling (OFF)
    pub results: [i32; SENSOR_COUNT],
    pub manual: [i32; SENSOR_COUNT],
}

impl fmt::Display for DetectedSample {
    /// Detection log line: `ts t1..t4 sma1..sma4 rs1..rs4 mrs1..mrs4`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.timestamp)?;
        for value in self.temps.iter().chain(self.sma.iter()) {
            write!(f, " {:.6}", value)?;
        }
        for value in self.results.iter().chain(self.manual.iter()) {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

/// Streaming on/off detector
pub struct Detector {
    config: DetectorConfig,
    /// Number of samples processed so far
    processed: usize,
    /// Most recent temperatures, at most `sma_window` entries
    temps: VecDeque<Channels>,
    temp_sums: Channels,
    /// Most recent slopes, at most `sampling_window` entries
    slopes: VecDeque<Channels>,
    previous: Option<DetectedSample>,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            temps: VecDeque::with_capacity(config.sma_window),
            slopes: VecDeque::with_capacity(config.sampling_window),
            config,
            processed: 0,
            temp_sums: [0.0; SENSOR_COUNT],
            previous: None,
        }
    }

    /// Process the next sample in capture order
    pub fn process(&mut self, raw: &RawSample) -> (DetectedSample, DeviceState) {
        self.process_reading(raw.epoch_seconds(), raw.temps, [raw.manual.flag(); SENSOR_COUNT])
    }

    /// Process a reading that already carries an epoch timestamp
    pub fn process_reading(
        &mut self,
        timestamp: i64,
        temps: Channels,
        manual: [i32; SENSOR_COUNT],
    ) -> (DetectedSample, DeviceState) {
        let index = self.processed;
        self.processed += 1;
        self.push_temps(temps);

        let Some(previous) = self.previous.take() else {
            // The first sample only seeds the history
            let sample = DetectedSample {
                timestamp,
                temps,
                sma: [0.0; SENSOR_COUNT],
                slopes: [0.0; SENSOR_COUNT],
                results: [0; SENSOR_COUNT],
                manual,
            };
            self.push_slopes(sample.slopes);
            self.previous = Some(sample.clone());
            return (sample, DeviceState::Off);
        };

        let sma = if index > self.config.sma_window {
            self.temp_sums.map(|sum| sum / self.config.sma_window as f64)
        } else {
            [0.0; SENSOR_COUNT]
        };

        let elapsed = (timestamp - previous.timestamp) as f64;
        let mut slopes = previous.slopes;
        if elapsed > 0.0 {
            for sensor in 0..SENSOR_COUNT {
                slopes[sensor] = (sma[sensor] - previous.sma[sensor]) / elapsed;
            }
        }
        self.push_slopes(slopes);

        let mut results = previous.results;
        let window = self.config.sampling_window;
        if index > window && index % window == 0 {
            for (sensor, result) in results.iter_mut().enumerate() {
                if let Some(decision) = self.window_decision(sensor) {
                    *result = decision;
                }
            }
            tracing::debug!("Window ending at sample {}: {:?}", index, results);
        }

        let state = if results.iter().sum::<i32>() >= self.config.quorum {
            results = [1; SENSOR_COUNT];
            DeviceState::On
        } else {
            DeviceState::Off
        };

        let sample = DetectedSample {
            timestamp,
            temps,
            sma,
            slopes,
            results,
            manual,
        };
        self.previous = Some(sample.clone());
        (sample, state)
    }

    /// Run the detector over a whole capture
    pub fn run(config: DetectorConfig, samples: &[RawSample]) -> Vec<DetectedSample> {
        let mut detector = Detector::new(config);
        let mut on_count = 0usize;

        let detected: Vec<DetectedSample> = samples
            .iter()
            .map(|raw| {
                let (sample, state) = detector.process(raw);
                if state == DeviceState::On {
                    on_count += 1;
                }
                sample
            })
            .collect();

        tracing::info!(
            "Processed {} samples, device ON in {}",
            detected.len(),
            on_count
        );

        detected
    }

    fn push_temps(&mut self, temps: Channels) {
        if self.temps.len() == self.config.sma_window {
            if let Some(oldest) = self.temps.pop_front() {
                for sensor in 0..SENSOR_COUNT {
                    self.temp_sums[sensor] -= oldest[sensor];
                }
            }
        }
        for sensor in 0..SENSOR_COUNT {
            self.temp_sums[sensor] += temps[sensor];
        }
        self.temps.push_back(temps);
    }

    fn push_slopes(&mut self, slopes: Channels) {
        if self.slopes.len() == self.config.sampling_window {
            self.slopes.pop_front();
        }
        self.slopes.push_back(slopes);
    }

    /// Verdict for one sensor over the current sampling window, if any
    fn window_decision(&self, sensor: usize) -> Option<i32> {
        let epsilon = self.config.slope_epsilon;
        let rising = self
            .slopes
            .iter()
            .filter(|slopes| slopes[sensor] > epsilon)
            .count();
        let falling = self.slopes.len() - rising;
        let required = self.config.sampling_window as f64 * self.config.threshold;

        if rising as f64 > required {
            Some(1)
        } else if falling as f64 > required {
            Some(-1)
        } else {
            None
        }
    }
}
