//! Benchmark engine module
//!
//! Contains the folder scan, warm-up and measurement stages.

pub mod runner;

pub use runner::{BenchmarkRunner, FileSet, RunPlan};
