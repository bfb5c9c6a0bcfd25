//! Hourly Min/Max Aggregation
//!
//! Tracks the lowest and highest temperature seen in the current "hour",
//! where an hour is a fixed number of samples rather than wall-clock time.
//! The tracker never looks at a clock: at the default 2 s cadence 1800
//! samples is one hour.
//!
//! ## Window Lifecycle
//!
//! ```text
//!  update #1            update #2..n-1          update #n (rollover)   update #n+1
//! ┌──────────────┐     ┌──────────────────┐    ┌──────────────────┐   ┌──────────────┐
//! │ seed min=max │ ──► │ min/max widen    │ ─► │ widen, count=0,  │ ─►│ reseed from  │
//! │ seeded=true  │     │                  │    │ seeded=false,    │   │ this sample  │
//! └──────────────┘     └──────────────────┘    │ completed=true   │   └──────────────┘
//!                                              └──────────────────┘
//! ```
//!
//! Seeding from the first sample of each window avoids ±infinity sentinels
//! entirely. After a rollover the closed window's min/max stay readable until
//! the next sample reseeds them, so a consumer reading right after the
//! rollover tick sees the completed hour rather than placeholders.
//!
//! `valid` flips to true on the first rollover and never flips back. Before
//! that, min/max describe a partial hour and should not drive decisions.

use crate::{
    config::{validate_samples_per_rollover, MonitorConfig},
    errors::MonitorResult,
    traits::Validatable,
};

/// Snapshot of the hourly aggregates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourStats {
    /// Lowest temperature in the current (or just closed) window
    pub min: f32,
    /// Highest temperature in the current (or just closed) window
    pub max: f32,
    /// At least one full window has completed
    pub valid: bool,
}

/// Mutable state of the aggregation window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HourWindow {
    /// Lowest temperature since the window was seeded
    pub running_min: f32,
    /// Highest temperature since the window was seeded
    pub running_max: f32,
    /// Samples taken in the current window
    pub sample_count: u32,
    /// Sticky: a window has rolled over at least once
    pub has_completed_one_window: bool,
    /// The current window has received its first sample
    pub window_seeded: bool,
}

/// Rolling min/max over fixed-length sample windows
#[derive(Debug, Clone)]
pub struct HourTracker {
    window: HourWindow,
    samples_per_rollover: u32,
    completed_windows: u32,
}

impl HourTracker {
    /// Create a tracker that rolls over every `samples_per_rollover` samples
    pub fn new(samples_per_rollover: u32) -> MonitorResult<Self> {
        validate_samples_per_rollover(samples_per_rollover)?;

        Ok(Self {
            window: HourWindow::default(),
            samples_per_rollover,
            completed_windows: 0,
        })
    }

    /// Create a tracker from a monitor config
    pub fn from_config(config: &MonitorConfig) -> MonitorResult<Self> {
        Self::new(config.samples_per_rollover)
    }

    /// Fold one temperature into the current window
    ///
    /// Non-finite temperatures are ignored and do not count as a sample.
    pub fn update(&mut self, current_temperature: f32) {
        if !current_temperature.is_valid() {
            log_warn!(
                "ignoring non-finite temperature {} in hourly window",
                current_temperature
            );
            return;
        }

        let window = &mut self.window;

        if window.window_seeded {
            window.running_min = window.running_min.min(current_temperature);
            window.running_max = window.running_max.max(current_temperature);
        } else {
            window.running_min = current_temperature;
            window.running_max = current_temperature;
            window.window_seeded = true;
        }

        window.sample_count += 1;

        if window.sample_count >= self.samples_per_rollover {
            window.has_completed_one_window = true;
            window.sample_count = 0;
            window.window_seeded = false;
            self.completed_windows = self.completed_windows.saturating_add(1);

            log_debug!(
                "hourly window {} closed: min {} max {}",
                self.completed_windows,
                window.running_min,
                window.running_max
            );
        }
    }

    /// Current aggregates
    pub fn get_stats(&self) -> HourStats {
        HourStats {
            min: self.window.running_min,
            max: self.window.running_max,
            valid: self.window.has_completed_one_window,
        }
    }

    /// Raw window state
    pub fn window(&self) -> HourWindow {
        self.window
    }

    /// Configured window length in samples
    pub fn samples_per_rollover(&self) -> u32 {
        self.samples_per_rollover
    }

    /// Number of windows closed since construction
    pub fn completed_windows(&self) -> u32 {
        self.completed_windows
    }
}
