//! Benchmark configuration
//!
//! Holds the run context threaded through every stage of the benchmark
//! and the measurement mode selected from the warm-up file.

use crate::{
    ReadBenchError, Result, DEFAULT_MIN_FILES, LATENCY_THRESHOLD_BYTES, READ_CAP_BYTES,
    WARMUP_MILLIS,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Benchmark configuration structure containing all run parameters
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkConfig {
    /// Folder holding the identical test files
    pub folder: PathBuf,
    /// Minimum number of files, warm-up file included
    pub min_files: usize,
    /// Files shorter than this are measured for latency
    pub latency_threshold: u64,
    /// Maximum bytes read per file in throughput mode
    pub read_cap: u64,
    /// Wall-clock length of the warm-up phase
    #[serde(serialize_with = "serialize_humantime")]
    pub warmup_duration: Duration,
}

/// How each file is read and what the report shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MeasurementMode {
    /// Read one byte per file, report milliseconds
    Latency,
    /// Read the whole file (up to the cap), report MB/s
    Throughput,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            min_files: DEFAULT_MIN_FILES,
            latency_threshold: LATENCY_THRESHOLD_BYTES,
            read_cap: READ_CAP_BYTES,
            warmup_duration: Duration::from_millis(WARMUP_MILLIS),
        }
    }
}

impl BenchmarkConfig {
    /// Create a configuration for the given folder with default tunables
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self::default().with_folder(folder)
    }

    /// Validate the configuration and the folder it points at
    pub fn validate(&self) -> Result<()> {
        if self.min_files < 2 {
            return Err(ReadBenchError::Config(format!(
                "min_files must be at least 2 (one warm-up file and one measured file), got {}",
                self.min_files
            )));
        }

        if self.read_cap == 0 {
            return Err(ReadBenchError::Config(
                "read_cap must be greater than 0".to_string(),
            ));
        }

        if self.warmup_duration.is_zero() {
            return Err(ReadBenchError::Config(
                "warmup_duration must be greater than 0".to_string(),
            ));
        }

        if !self.folder.exists() {
            return Err(ReadBenchError::NotFound(self.folder.clone()));
        }

        if !self.folder.is_dir() {
            return Err(ReadBenchError::NotADirectory(self.folder.clone()));
        }

        Ok(())
    }

    /// Set the folder to benchmark
    pub fn with_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Set the minimum file count
    pub fn with_min_files(mut self, count: usize) -> Self {
        self.min_files = count;
        self
    }

    /// Set the latency/throughput boundary in bytes
    pub fn with_latency_threshold(mut self, bytes: u64) -> Self {
        self.latency_threshold = bytes;
        self
    }

    /// Set the per-file read cap for throughput mode
    pub fn with_read_cap(mut self, bytes: u64) -> Self {
        self.read_cap = bytes;
        self
    }

    /// Set the warm-up duration
    pub fn with_warmup_duration(mut self, duration: Duration) -> Self {
        self.warmup_duration = duration;
        self
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }
}

impl MeasurementMode {
    /// Pick the mode from the warm-up file length. The threshold itself
    /// selects throughput.
    pub fn select(warmup_len: u64, latency_threshold: u64) -> Self {
        if warmup_len < latency_threshold {
            MeasurementMode::Latency
        } else {
            MeasurementMode::Throughput
        }
    }

    /// Number of bytes one timed read should transfer for a file of `file_len`
    pub fn read_len(&self, file_len: u64, read_cap: u64) -> u64 {
        match self {
            MeasurementMode::Latency => 1,
            MeasurementMode::Throughput => file_len.min(read_cap),
        }
    }

    pub fn is_latency(&self) -> bool {
        matches!(self, MeasurementMode::Latency)
    }

    /// Notice printed once the mode is fixed
    pub fn description(&self) -> &'static str {
        match self {
            MeasurementMode::Latency => "Measuring latency because every file < 1 MB",
            MeasurementMode::Throughput => "Measuring speed because every file >= 1 MB",
        }
    }
}

// Serialized as a humantime string ("4s")
fn serialize_humantime<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&humantime::format_duration(*duration).to_string())
}
