//! Data models module
//!
//! Sample statistics and the benchmark report.

pub mod result;

pub use result::{BenchmarkReport, Measurement, Statistics, WarmupSummary};
