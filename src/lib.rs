//! readbench - disk read benchmark
//!
//! Measures read latency (small files) or read throughput (large files)
//! over a folder of identically sized files, and reports the mean with a
//! 95% confidence interval.

use std::path::PathBuf;
use thiserror::Error;

pub mod bench;
pub mod config;
pub mod io;
pub mod models;
pub mod util;

/// Errors raised while validating the input folder or timing reads
#[derive(Debug, Error)]
pub enum ReadBenchError {
    /// The folder does not exist
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    /// The path exists but is not a folder
    #[error("{} is not a folder", .0.display())]
    NotADirectory(PathBuf),
    /// Too few files to produce a meaningful measurement
    #[error("{} must contain at least {required} identical files (found {found})", .folder.display())]
    InsufficientFiles {
        folder: PathBuf,
        found: usize,
        required: usize,
    },
    /// Measured files differ in length
    #[error("All files in the folder must be identical: {} is {actual} bytes, expected {expected}", .path.display())]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
    /// Benchmark configuration built through the library is unusable
    #[error("Configuration error: {0}")]
    Config(String),
    /// A timed read failed
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A timed read hit end-of-file before the expected length
    #[error("Short read on {}: got {actual} of {expected} bytes", .path.display())]
    ShortRead {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
    /// Listing or metadata failure outside the timed region
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for readbench operations
pub type Result<T> = std::result::Result<T, ReadBenchError>;

/// Error classification helpers used at the process boundary
pub mod error {
    use super::ReadBenchError;

    /// True for failures the user can fix by changing the folder they pass in
    pub fn is_user_input_error(error: &ReadBenchError) -> bool {
        matches!(
            error,
            ReadBenchError::NotFound(_)
                | ReadBenchError::NotADirectory(_)
                | ReadBenchError::InsufficientFiles { .. }
                | ReadBenchError::SizeMismatch { .. }
                | ReadBenchError::Config(_)
        )
    }

    /// Convert error to a message suitable for stderr
    pub fn user_friendly_message(error: &ReadBenchError) -> String {
        match error {
            ReadBenchError::InsufficientFiles { .. } | ReadBenchError::SizeMismatch { .. } => {
                format!(
                    "{}\nFill the folder with copies of one file, e.g. {} files of 100 MB.",
                    error,
                    super::DEFAULT_MIN_FILES
                )
            }
            ReadBenchError::Read { .. } | ReadBenchError::ShortRead { .. } => {
                format!("{}\nThe benchmark was aborted; no results were produced.", error)
            }
            _ => error.to_string(),
        }
    }

    /// Process exit status for a fatal error
    pub fn exit_code(_error: &ReadBenchError) -> u8 {
        1
    }
}

pub const APP_NAME: &str = "benchmark";
/// Minimum number of regular files in the folder, warm-up file included
pub const DEFAULT_MIN_FILES: usize = 6;
/// Files below this length are measured for latency
pub const LATENCY_THRESHOLD_BYTES: u64 = 1_000_000;
/// Upper bound on bytes read per file in throughput mode
pub const READ_CAP_BYTES: u64 = 2_000_000_000;
pub const WARMUP_MILLIS: u64 = 4000;
/// z-score for a two-sided 95% confidence interval
pub const Z_95: f64 = 1.96;
