use proptest::prelude::*;
use readbench::config::MeasurementMode;
use readbench::models::{Measurement, Statistics};
use std::time::Duration;

fn durations(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|&v| Duration::from_nanos(v)).collect()
}

proptest! {
    #[test]
    fn mean_lies_between_min_and_max(values in prop::collection::vec(1u64..10_000_000_000, 1..64)) {
        let stats = Statistics::from_samples(&durations(&values)).unwrap();
        let min = *values.iter().min().unwrap() as f64;
        let max = *values.iter().max().unwrap() as f64;
        prop_assert!(stats.mean_ns >= min - 1e-3);
        prop_assert!(stats.mean_ns <= max + 1e-3);
        prop_assert_eq!(stats.min_ns as f64, min);
        prop_assert_eq!(stats.samples, values.len());
    }

    #[test]
    fn spread_is_non_negative(values in prop::collection::vec(1u64..10_000_000_000, 1..64)) {
        let stats = Statistics::from_samples(&durations(&values)).unwrap();
        prop_assert!(stats.std_dev_ns >= 0.0);
        prop_assert!(stats.half_width_ns >= 0.0);
        let expected = 1.96 * stats.std_dev_ns / (values.len() as f64).sqrt();
        prop_assert!((stats.half_width_ns - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn constant_samples_have_no_error(v in 1u64..10_000_000_000, n in 1usize..32) {
        let stats = Statistics::from_samples(&durations(&vec![v; n])).unwrap();
        prop_assert_eq!(stats.std_dev_ns, 0.0);
        prop_assert_eq!(stats.half_width_ns, 0.0);
        prop_assert!((stats.mean_ms() - v as f64 / 1_000_000.0).abs() <= 1e-9 * stats.mean_ms());
    }

    #[test]
    fn max_speed_never_below_mean_speed(values in prop::collection::vec(1_000u64..1_000_000_000, 1..32)) {
        let stats = Statistics::from_samples(&durations(&values)).unwrap();
        match Measurement::derive(MeasurementMode::Throughput, &stats, 10_000_000) {
            Measurement::Throughput { mean_mb_s, max_mb_s, error_mb_s, .. } => {
                prop_assert!(max_mb_s >= mean_mb_s * (1.0 - 1e-12));
                prop_assert!(error_mb_s >= 0.0);
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
