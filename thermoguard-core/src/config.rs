//! Monitor configuration
//!
//! Everything the core needs is supplied once, at construction, and never
//! changes for the lifetime of the monitor. There is no runtime
//! reconfiguration API: build a new monitor instead.
//!
//! With the `serde` feature the configuration can be loaded from any serde
//! format. Missing fields fall back to the defaults in [`crate::constants`].

use crate::{
    constants::{
        DEFAULT_HIGH_THRESHOLD_C, DEFAULT_LOW_THRESHOLD_C, DEFAULT_SAMPLES_PER_HOUR,
        DEFAULT_WINDOW_CAPACITY, DEFAULT_Z_SCORE_THRESHOLD, MAX_WINDOW_CAPACITY,
    },
    errors::{MonitorError, MonitorResult},
    warnings::Thresholds,
};

/// When the statistics engine is allowed to flag anomalies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WarmupPolicy {
    /// Flag as soon as the window's standard deviation clears the epsilon
    /// floor, even if part of the window is still the zero pre-fill.
    #[default]
    ZeroVariance,
    /// Additionally wait until `window_capacity` real rates have been
    /// observed, so the pre-fill zeros never take part in a verdict.
    FullWindow,
}

/// Immutable configuration for one sensor stream
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonitorConfig {
    /// Below this temperature (°C) the warning level is `Low`
    pub low_threshold: f32,

    /// Above this temperature (°C) the warning level is `High`
    pub high_threshold: f32,

    /// A rate is anomalous when `|z| > z_score_threshold`
    pub z_score_threshold: f32,

    /// Number of rate samples in the model window (1..=60)
    pub window_capacity: usize,

    /// Samples per hourly aggregation window
    pub samples_per_rollover: u32,

    /// Whether the zero pre-fill counts as training data
    pub warmup_policy: WarmupPolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            low_threshold: DEFAULT_LOW_THRESHOLD_C,
            high_threshold: DEFAULT_HIGH_THRESHOLD_C,
            z_score_threshold: DEFAULT_Z_SCORE_THRESHOLD,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            samples_per_rollover: DEFAULT_SAMPLES_PER_HOUR,
            warmup_policy: WarmupPolicy::ZeroVariance,
        }
    }
}

impl MonitorConfig {
    /// Server rooms and equipment closets: tight band, longer model window
    pub fn server_room() -> Self {
        Self {
            low_threshold: 15.0,
            high_threshold: 27.0,
            window_capacity: 30,
            ..Self::default()
        }
    }

    /// Unheated outdoor enclosures: wide band, stricter z-score
    pub fn outdoor() -> Self {
        Self {
            low_threshold: -10.0,
            high_threshold: 40.0,
            z_score_threshold: 3.0,
            ..Self::default()
        }
    }

    /// Thresholds used by the warning selector
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            low: self.low_threshold,
            high: self.high_threshold,
        }
    }

    /// Check the configuration before building a monitor from it
    pub fn validate(&self) -> MonitorResult<()> {
        if !self.low_threshold.is_finite() || !self.high_threshold.is_finite() {
            return Err(MonitorError::InvalidConfig {
                reason: "thresholds must be finite",
            });
        }

        if self.low_threshold >= self.high_threshold {
            return Err(MonitorError::InvalidConfig {
                reason: "low_threshold must be below high_threshold",
            });
        }

        validate_z_score_threshold(self.z_score_threshold)?;
        validate_window_capacity(self.window_capacity)?;
        validate_samples_per_rollover(self.samples_per_rollover)?;

        Ok(())
    }
}

pub(crate) fn validate_z_score_threshold(threshold: f32) -> MonitorResult<()> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(MonitorError::InvalidConfig {
            reason: "z_score_threshold must be a positive finite number",
        });
    }
    Ok(())
}

pub(crate) fn validate_window_capacity(capacity: usize) -> MonitorResult<()> {
    if capacity == 0 {
        return Err(MonitorError::InvalidConfig {
            reason: "window_capacity must be at least 1",
        });
    }
    if capacity > MAX_WINDOW_CAPACITY {
        return Err(MonitorError::InvalidConfig {
            reason: "window_capacity exceeds MAX_WINDOW_CAPACITY",
        });
    }
    Ok(())
}

pub(crate) fn validate_samples_per_rollover(samples: u32) -> MonitorResult<()> {
    if samples == 0 {
        return Err(MonitorError::InvalidConfig {
            reason: "samples_per_rollover must be at least 1",
        });
    }
    Ok(())
}
