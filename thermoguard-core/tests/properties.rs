//! Property tests for the detection core
//!
//! Invariants that must hold for any finite temperature stream, not just the
//! hand-picked scenarios in `detection_integration.rs`.

use proptest::prelude::*;

use thermoguard_core::{
    select, HourTracker, MonitorConfig, SensorReading, StatisticsEngine, TemperatureMonitor,
    Thresholds, WarningLevel,
};

fn temperatures(max_len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-60.0f32..120.0, 1..max_len)
}

/// Population mean / std dev over `values`, summed in slot order
fn reference_stats(values: &[f32]) -> (f32, f32) {
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;
    (mean, var.sqrt())
}

proptest! {
    #[test]
    fn std_dev_is_finite_and_non_negative(temps in temperatures(200), capacity in 1usize..=60) {
        let mut engine: StatisticsEngine = StatisticsEngine::new(capacity, 2.5).unwrap();
        for t in temps {
            let result = engine.process(t);
            prop_assert!(result.std_dev >= 0.0);
            prop_assert!(result.std_dev.is_finite());
            prop_assert!(result.mean.is_finite());
        }
    }

    #[test]
    fn constant_stream_never_flags(t in -60.0f32..120.0, n in 1usize..300, capacity in 1usize..=60) {
        let mut engine: StatisticsEngine = StatisticsEngine::new(capacity, 2.5).unwrap();
        for _ in 0..n {
            let result = engine.process(t);
            prop_assert!(!result.is_anomalous);
            prop_assert_eq!(result.mean, 0.0);
            prop_assert_eq!(result.std_dev, 0.0);
        }
    }

    #[test]
    fn stats_match_reference_ring(temps in temperatures(150), capacity in 1usize..=20) {
        let mut engine: StatisticsEngine = StatisticsEngine::new(capacity, 2.5).unwrap();
        let mut ring = vec![0.0f32; capacity];
        let mut pos = 0;

        engine.process(temps[0]);
        for pair in temps.windows(2) {
            let rate = pair[1] - pair[0];
            ring[pos] = rate;
            pos = (pos + 1) % capacity;

            let result = engine.process(pair[1]);
            let (mean, std_dev) = reference_stats(&ring);
            prop_assert!((result.mean - mean).abs() <= 1e-3 * (1.0 + mean.abs()));
            prop_assert!((result.std_dev - std_dev).abs() <= 1e-3 * (1.0 + std_dev));
        }
    }

    #[test]
    fn non_finite_samples_are_invisible(temps in temperatures(100), every in 2usize..6) {
        let mut clean: StatisticsEngine = StatisticsEngine::new(8, 2.5).unwrap();
        let mut noisy: StatisticsEngine = StatisticsEngine::new(8, 2.5).unwrap();

        for (i, &t) in temps.iter().enumerate() {
            if i % every == 0 {
                noisy.process(f32::NAN);
                noisy.process(f32::INFINITY);
            }
            prop_assert_eq!(noisy.process(t), clean.process(t));
        }
    }

    #[test]
    fn tracker_validity_is_monotonic(temps in temperatures(300), rollover in 1u32..50) {
        let mut tracker = HourTracker::new(rollover).unwrap();
        let mut seen_valid = false;

        for (i, &t) in temps.iter().enumerate() {
            tracker.update(t);
            let stats = tracker.get_stats();

            prop_assert_eq!(stats.valid, i + 1 >= rollover as usize);
            prop_assert!(!seen_valid || stats.valid);
            prop_assert!(stats.min <= stats.max);
            seen_valid = stats.valid;
        }
    }

    #[test]
    fn tracker_reports_current_window_extremes(temps in temperatures(300), rollover in 1u32..50) {
        let mut tracker = HourTracker::new(rollover).unwrap();
        let n = rollover as usize;

        for (i, &t) in temps.iter().enumerate() {
            tracker.update(t);

            // Samples of the window this update belonged to
            let start = i - i % n;
            let window = &temps[start..=i];
            let min = window.iter().cloned().fold(f32::INFINITY, f32::min);
            let max = window.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

            let stats = tracker.get_stats();
            prop_assert_eq!((stats.min, stats.max), (min, max));
        }
    }

    #[test]
    fn anomaly_always_wins(t in -200.0f32..200.0, low in -50.0f32..10.0, span in 0.1f32..60.0) {
        let thresholds = Thresholds { low, high: low + span };
        prop_assert_eq!(select(t, true, &thresholds), WarningLevel::Anomalous);

        let level = select(t, false, &thresholds);
        let expected = if t > thresholds.high {
            WarningLevel::High
        } else if t < thresholds.low {
            WarningLevel::Low
        } else {
            WarningLevel::Normal
        };
        prop_assert_eq!(level, expected);
    }

    #[test]
    fn monitor_warning_is_consistent(temps in temperatures(200)) {
        let config = MonitorConfig::default();
        let mut monitor = TemperatureMonitor::new(config).unwrap();

        for t in temps {
            let report = monitor.tick(SensorReading::temperature_only(t));
            prop_assert!(report.sample_accepted);
            prop_assert_eq!(
                report.warning,
                select(t, report.anomaly.is_anomalous, &config.thresholds())
            );
        }
    }
}
