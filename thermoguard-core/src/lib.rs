//! Core detection engine for ThermoGuard
//!
//! Turns a periodic temperature stream into three per-tick outputs:
//! - an adaptive anomaly verdict on the rate of change (z-score against a
//!   rolling window of first differences)
//! - rolling hourly min/max aggregates with an explicit validity flag
//! - a single warning level combining both with fixed thresholds
//!
//! Key constraints:
//! - Fixed memory, no heap allocation anywhere in the tick path
//! - Single-threaded, synchronous, one tick fully processed before the next
//! - Degenerate numeric states (cold start, zero variance, partial window)
//!   are defined states, never errors
//!
//! ```no_run
//! use thermoguard_core::{MonitorConfig, SensorReading, TemperatureMonitor, WarningLevel};
//!
//! let mut monitor = TemperatureMonitor::new(MonitorConfig::default())?;
//!
//! let report = monitor.tick(SensorReading::temperature_only(21.5));
//! if report.warning != WarningLevel::Normal {
//!     // drive the warning LED, publish an alert, ...
//! }
//! # Ok::<(), thermoguard_core::MonitorError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod anomaly;
pub mod buffer;
pub mod config;
pub mod constants;
pub mod display;
pub mod errors;
pub mod monitor;
pub mod reading;
pub mod tracker;
pub mod traits;
pub mod warnings;

// Public API
pub use anomaly::{AnomalyResult, StatisticsEngine};
pub use config::{MonitorConfig, WarmupPolicy};
pub use errors::{MonitorError, MonitorResult};
pub use monitor::{TemperatureMonitor, TickReport};
pub use reading::SensorReading;
pub use tracker::{HourStats, HourTracker};
pub use traits::SensorSource;
pub use warnings::{select, BlinkPattern, Thresholds, WarningLevel};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
