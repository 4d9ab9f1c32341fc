//! Units formatting and conversion utilities
//!
//! Conversions between nanosecond samples, milliseconds and MB/s, plus
//! human-readable formatting of sizes and durations for notices.

use byte_unit::{Byte, UnitType};
use std::time::Duration;

pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Convert nanoseconds to milliseconds
///
/// # Examples
/// ```
/// use readbench::util::units::nanos_to_millis;
///
/// assert_eq!(nanos_to_millis(1_500_000.0), 1.5);
/// ```
pub fn nanos_to_millis(nanos: f64) -> f64 {
    nanos / NANOS_PER_MILLI
}

/// Throughput in MB/s (decimal megabytes) for `bytes` read in `millis` milliseconds
///
/// # Examples
/// ```
/// use readbench::util::units::throughput_mb_per_s;
///
/// // 10 MB in 100 ms
/// assert!((throughput_mb_per_s(10_000_000, 100.0) - 100.0).abs() < 1e-9);
/// ```
pub fn throughput_mb_per_s(bytes: u64, millis: f64) -> f64 {
    if millis <= 0.0 {
        return 0.0;
    }
    bytes as f64 / 1000.0 / millis
}

/// Peak throughput in MB/s for `bytes` read in `nanos` nanoseconds
pub fn peak_throughput_mb_per_s(bytes: u64, nanos: u64) -> f64 {
    if nanos == 0 {
        return 0.0;
    }
    bytes as f64 * 1000.0 / nanos as f64
}

/// Format a byte count with decimal units
///
/// # Examples
/// ```
/// use readbench::util::units::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Decimal);
    let value = adjusted.get_value();
    if value.fract() == 0.0 {
        format!("{:.0} {}", value, adjusted.get_unit())
    } else {
        format!("{:.2} {}", value, adjusted.get_unit())
    }
}

/// Format a duration the way humantime does ("4s", "1s 500ms")
pub fn format_duration(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nanos_to_millis() {
        assert_eq!(nanos_to_millis(0.0), 0.0);
        assert_eq!(nanos_to_millis(200.0), 0.0002);
        assert_eq!(nanos_to_millis(3_000_000.0), 3.0);
    }

    #[test]
    fn test_throughput_mb_per_s() {
        assert!((throughput_mb_per_s(2_000_000_000, 1000.0) - 2000.0).abs() < 1e-9);
        assert_eq!(throughput_mb_per_s(1000, 0.0), 0.0);
    }

    #[test]
    fn test_peak_throughput_mb_per_s() {
        // 10 MB in 5 ms
        assert!((peak_throughput_mb_per_s(10_000_000, 5_000_000) - 2000.0).abs() < 1e-9);
        assert_eq!(peak_throughput_mb_per_s(10, 0), 0.0);
    }

    #[test]
    fn test_mean_and_peak_agree_for_one_sample() {
        let nanos = 12_345_678u64;
        let mean = throughput_mb_per_s(1_000_000, nanos_to_millis(nanos as f64));
        let peak = peak_throughput_mb_per_s(1_000_000, nanos);
        assert!((mean - peak).abs() < 1e-9);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1_000_000), "1 MB");
        assert_eq!(format_bytes(2_000_000_000), "2 GB");
        assert_eq!(format_bytes(1_500_000), "1.50 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(4000)), "4s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1s 500ms");
    }
}
