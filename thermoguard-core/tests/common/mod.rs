//! Common test utilities for integration tests
//!
//! This module provides:
//! - Deterministic temperature generators (flat, alternating, noisy drift)
//! - Pre-built room scenarios with known anomaly positions
//! - Helpers to run a whole series through a monitor

#![allow(dead_code)]

use thermoguard_core::{MonitorConfig, SensorReading, TemperatureMonitor, TickReport};

pub mod generators;
pub mod scenarios;

/// Run every temperature through a fresh monitor and collect the reports
pub fn run_series(config: MonitorConfig, temperatures: &[f32]) -> Vec<TickReport> {
    let mut monitor = TemperatureMonitor::new(config).expect("test config must be valid");
    temperatures
        .iter()
        .map(|&t| monitor.tick(SensorReading::temperature_only(t)))
        .collect()
}

/// Ticks (1-based) that were flagged anomalous
pub fn anomalous_ticks(reports: &[TickReport]) -> Vec<u64> {
    reports
        .iter()
        .filter(|r| r.anomaly.is_anomalous)
        .map(|r| r.tick)
        .collect()
}

/// Assert two floats agree within `tolerance`
pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}
