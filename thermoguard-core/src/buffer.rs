//! Fixed-Size Ring of Rate Samples
//!
//! ## Overview
//!
//! The statistics engine models the *rate of change* of temperature, so it
//! needs the last `N` first differences and their mean/standard deviation.
//! This module provides that window: a ring buffer of `f32` with a capacity
//! chosen at construction, backed by a `heapless::Vec` whose upper bound is a
//! compile-time constant.
//!
//! ## Design Rationale
//!
//! ### Always Full
//!
//! Unlike a history buffer that grows until it is full, the rate window holds
//! exactly `capacity` values from the moment it is created. It starts out
//! pre-filled with `0.0` and every push overwrites the oldest slot:
//!
//! ```text
//! RateWindow capacity = 4, after new():
//! ┌─────┬─────┬─────┬─────┐
//! │ 0.0 │ 0.0 │ 0.0 │ 0.0 │
//! └─────┴─────┴─────┴─────┘
//!    ↑
//!    └── write_pos = 0
//!
//! after push(0.3), push(-0.1):
//! ┌─────┬──────┬─────┬─────┐
//! │ 0.3 │ -0.1 │ 0.0 │ 0.0 │
//! └─────┴──────┴─────┴─────┘
//!                 ↑
//!                 └── write_pos = 2
//! ```
//!
//! The statistics are therefore always over `capacity` values with divisor
//! `capacity`, including pre-fill zeros that have not been overwritten yet.
//! [`RateWindow::observed`] counts real pushes for callers that want to tell
//! the two apart.
//!
//! ### Full Recompute
//!
//! [`RateWindow::stats`] recomputes mean and population standard deviation
//! from scratch in slot order on every call. For windows of at most 60 values
//! this costs a few hundred flops and keeps results bit-for-bit reproducible:
//! there is no running sum that accumulates rounding error over days of
//! uptime.
//!
//! ### Memory Layout
//!
//! ```text
//! RateWindow<60>:
//! ├── data: heapless::Vec<f32, 60>  = 240 bytes + len
//! ├── write_pos: usize
//! └── observed: usize
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use thermoguard_core::buffer::RateWindow;
//!
//! let mut window: RateWindow = RateWindow::new(3)?;
//! window.push(1.0);
//! window.push(-1.0);
//!
//! // [1.0, -1.0, 0.0]
//! let stats = window.stats();
//! assert_eq!(stats.mean, 0.0);
//! # Ok::<(), thermoguard_core::MonitorError>(())
//! ```

use heapless::Vec;

use crate::{
    config::validate_window_capacity,
    constants::MAX_WINDOW_CAPACITY,
    errors::{MonitorError, MonitorResult},
};

/// Mean and population standard deviation of a rate window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelStats {
    /// Arithmetic mean of the window
    pub mean: f32,
    /// Population standard deviation (divisor = capacity), never negative
    pub std_dev: f32,
}

/// Ring buffer of rate samples with a runtime capacity of at most `N`
///
/// ## Internal Invariants
///
/// - `data.len() == capacity` at all times
/// - `write_pos < capacity`
/// - `observed <= capacity`
#[derive(Debug, Clone)]
pub struct RateWindow<const N: usize = MAX_WINDOW_CAPACITY> {
    /// Slot storage, pre-filled with zeros
    data: Vec<f32, N>,

    /// Slot the next push overwrites
    write_pos: usize,

    /// Real samples pushed so far, saturating at capacity
    observed: usize,
}

impl<const N: usize> RateWindow<N> {
    /// Creates a window of `capacity` zeros
    ///
    /// Fails if `capacity` is zero or larger than `N` or
    /// [`MAX_WINDOW_CAPACITY`].
    pub fn new(capacity: usize) -> MonitorResult<Self> {
        validate_window_capacity(capacity)?;

        let mut data = Vec::new();
        for _ in 0..capacity {
            data.push(0.0).map_err(|_| MonitorError::InvalidConfig {
                reason: "window_capacity exceeds buffer size",
            })?;
        }

        Ok(Self {
            data,
            write_pos: 0,
            observed: 0,
        })
    }

    /// Overwrites the oldest slot with `rate`
    pub fn push(&mut self, rate: f32) {
        self.data[self.write_pos] = rate;
        self.write_pos = (self.write_pos + 1) % self.data.len();

        if self.observed < self.data.len() {
            self.observed += 1;
        }
    }

    /// Number of slots in the window
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Real samples pushed so far, capped at capacity
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// True once every pre-fill zero has been overwritten by a real sample
    pub fn is_saturated(&self) -> bool {
        self.observed == self.data.len()
    }

    /// Raw slot contents in storage order
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Arithmetic mean over all slots
    pub fn mean(&self) -> f32 {
        let sum: f32 = self.data.iter().sum();
        sum / self.data.len() as f32
    }

    /// Recompute mean and population standard deviation over all slots
    pub fn stats(&self) -> ModelStats {
        let mean = self.mean();

        let sum_sq_diff: f32 = self
            .data
            .iter()
            .map(|&rate| {
                let diff = rate - mean;
                diff * diff
            })
            .sum();

        ModelStats {
            mean,
            std_dev: libm::sqrtf(sum_sq_diff / self.data.len() as f32),
        }
    }
}
