//! Benchmark result data models
//!
//! Contains the sample statistics, the mode-specific figures derived
//! from them, and the final report printed at the end of a run.

use crate::config::{BenchmarkConfig, MeasurementMode};
use crate::util::units::{nanos_to_millis, peak_throughput_mb_per_s, throughput_mb_per_s};
use crate::Z_95;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Aggregate statistics over a set of timing samples, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of samples
    pub samples: usize,
    /// Arithmetic mean
    pub mean_ns: f64,
    /// Population standard deviation
    pub std_dev_ns: f64,
    /// Half-width of the 95% confidence interval around the mean
    pub half_width_ns: f64,
    /// Fastest sample
    pub min_ns: u64,
}

/// Mode-specific figures shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Measurement {
    Latency {
        mean_ms: f64,
        error_ms: f64,
        lowest_ms: f64,
    },
    Throughput {
        mean_mb_s: f64,
        error_mb_s: f64,
        max_mb_s: f64,
        bytes_per_file: u64,
    },
}

/// What the warm-up phase did before measurement began
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarmupSummary {
    pub iterations: u64,
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,
}

/// Complete benchmark report
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    /// When the measurement finished
    pub timestamp: DateTime<Utc>,
    /// Configuration used for this run
    pub config: BenchmarkConfig,
    /// Number of measured files (warm-up file excluded)
    pub file_count: usize,
    /// Length of each measured file
    pub file_len: u64,
    pub warmup: WarmupSummary,
    pub statistics: Statistics,
    pub measurement: Measurement,
}

impl Statistics {
    /// Compute statistics over `samples`. Returns `None` for an empty slice.
    ///
    /// Samples shorter than one nanosecond are counted as one nanosecond.
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let nanos: Vec<u64> = samples
            .iter()
            .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX).max(1))
            .collect();
        let n = nanos.len() as f64;

        let mean_ns = nanos.iter().map(|&x| x as f64).sum::<f64>() / n;
        let squared_difference_sum: f64 = nanos
            .iter()
            .map(|&x| {
                let diff = x as f64 - mean_ns;
                diff * diff
            })
            .sum();
        let std_dev_ns = (squared_difference_sum / n).sqrt();
        let half_width_ns = Z_95 * std_dev_ns / n.sqrt();
        let min_ns = nanos.iter().copied().min().unwrap_or(1);

        Some(Self {
            samples: nanos.len(),
            mean_ns,
            std_dev_ns,
            half_width_ns,
            min_ns,
        })
    }

    pub fn mean_ms(&self) -> f64 {
        nanos_to_millis(self.mean_ns)
    }

    pub fn std_dev_ms(&self) -> f64 {
        nanos_to_millis(self.std_dev_ns)
    }

    /// Confidence half-width in milliseconds
    pub fn error_ms(&self) -> f64 {
        nanos_to_millis(self.half_width_ns)
    }

    pub fn min_ms(&self) -> f64 {
        nanos_to_millis(self.min_ns as f64)
    }
}

impl Measurement {
    /// Derive the user-facing figures for `mode`. `bytes_per_file` is only
    /// used in throughput mode.
    pub fn derive(mode: MeasurementMode, stats: &Statistics, bytes_per_file: u64) -> Self {
        match mode {
            MeasurementMode::Latency => Measurement::Latency {
                mean_ms: stats.mean_ms(),
                error_ms: stats.error_ms(),
                lowest_ms: stats.min_ms(),
            },
            MeasurementMode::Throughput => {
                let mean_ms = stats.mean_ms();
                let mean_mb_s = throughput_mb_per_s(bytes_per_file, mean_ms);
                // relative error carries over from time to speed
                let error_mb_s = if mean_ms > 0.0 {
                    mean_mb_s * (stats.error_ms() / mean_ms)
                } else {
                    0.0
                };
                Measurement::Throughput {
                    mean_mb_s,
                    error_mb_s,
                    max_mb_s: peak_throughput_mb_per_s(bytes_per_file, stats.min_ns),
                    bytes_per_file,
                }
            }
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Latency {
                mean_ms,
                error_ms,
                lowest_ms,
            } => {
                writeln!(f, "Mean latency: {:.4} +- {:.4} ms", mean_ms, error_ms)?;
                writeln!(f, "Lowest latency: {:.4} ms", lowest_ms)
            }
            Measurement::Throughput {
                mean_mb_s,
                error_mb_s,
                max_mb_s,
                ..
            } => {
                writeln!(f, "Mean speed: {:.2} +- {:.2} MB/s", mean_mb_s, error_mb_s)?;
                writeln!(f, "Max speed:  {:.2} MB/s", max_mb_s)
            }
        }
    }
}

impl BenchmarkReport {
    pub fn mode(&self) -> MeasurementMode {
        match self.measurement {
            Measurement::Latency { .. } => MeasurementMode::Latency,
            Measurement::Throughput { .. } => MeasurementMode::Throughput,
        }
    }

    /// One-line summary used in logs
    pub fn summary(&self) -> String {
        format!(
            "{} - {} files of {} bytes - {} samples - {} warm-up reads",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.file_count,
            self.file_len,
            self.statistics.samples,
            self.warmup.iterations
        )
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        write!(f, "{}", self.measurement)
    }
}

mod duration_serde {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
    }
}
