//! Utility functions module
//!
//! Unit conversions and human-readable formatting.

pub mod units;

pub use units::{
    format_bytes, format_duration, nanos_to_millis, peak_throughput_mb_per_s,
    throughput_mb_per_s,
};
