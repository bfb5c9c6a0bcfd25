//! Constants for ThermoGuard Core
//!
//! Centralized defaults for the detection model, the warning thresholds and
//! the sampling cadence. Every default in [`crate::config::MonitorConfig`]
//! comes from here.
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include units in names where they apply
//! 3. Document where a value comes from when it is not obvious

/// Rate-of-change model parameters.
pub mod detection;

/// Absolute temperature warning thresholds.
pub mod thresholds;

/// Sampling cadence and time conversions.
pub mod time;

/// Warning LED blink timings.
pub mod warnings;

pub use detection::{
    DEFAULT_WINDOW_CAPACITY, DEFAULT_Z_SCORE_THRESHOLD, MAX_WINDOW_CAPACITY, STD_DEV_EPSILON,
};

pub use thresholds::{DEFAULT_HIGH_THRESHOLD_C, DEFAULT_LOW_THRESHOLD_C};

pub use time::{DEFAULT_SAMPLES_PER_HOUR, DEFAULT_SAMPLE_INTERVAL_MS, MS_PER_SECOND};
