//! Error types for the detection core
//!
//! ## What is (and is not) an error
//!
//! The per-tick path has no failure modes. Every degenerate numeric state has a
//! defined outcome instead:
//!
//! - **Cold start**: no previous reading, so no rate. The engine returns a
//!   non-anomalous result with zeroed statistics.
//! - **Untrained model**: the rate window has (near) zero variance. Anomaly
//!   flagging is suppressed.
//! - **Partial hour**: min/max are reported with `valid = false`.
//! - **Malformed sample**: NaN or infinite temperatures are rejected. State is
//!   left untouched and the previous verdict is reported again.
//!
//! Errors only surface where a caller hands the core something it cannot
//! work with at all: an unusable configuration at construction time, or a
//! single value that fails the finite-number check when validated explicitly.
//!
//! Like the rest of the core, errors are `Copy`, carry only `&'static str`
//! context and never allocate.
//!
//! ```rust
//! use thermoguard_core::{MonitorConfig, MonitorError, TemperatureMonitor};
//!
//! let config = MonitorConfig { window_capacity: 0, ..MonitorConfig::default() };
//! match TemperatureMonitor::new(config) {
//!     Err(MonitorError::InvalidConfig { reason }) => {
//!         // refuse to start, report `reason`
//!         # let _ = reason;
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for fallible core operations
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Core errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MonitorError {
    /// Configuration rejected at construction time
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which constraint the configuration violated
        reason: &'static str,
    },

    /// Value makes no physical sense (NaN, infinity)
    #[error("Invalid value: not a finite number")]
    InvalidValue,
}

#[cfg(feature = "defmt")]
impl defmt::Format for MonitorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_small() {
        assert!(core::mem::size_of::<MonitorError>() <= 24);
    }

    #[cfg(feature = "std")]
    #[test]
    fn error_messages() {
        let err = MonitorError::InvalidConfig { reason: "window_capacity must be at least 1" };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: window_capacity must be at least 1"
        );
        assert_eq!(
            MonitorError::InvalidValue.to_string(),
            "Invalid value: not a finite number"
        );
    }
}
