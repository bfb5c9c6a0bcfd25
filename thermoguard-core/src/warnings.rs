//! Warning State Selection
//!
//! Collapses the anomaly verdict and the absolute thresholds into exactly one
//! warning level per tick. The check order is the priority order:
//!
//! 1. `Anomalous` - the statistical model flagged the rate of change
//! 2. `High` - temperature above the high threshold
//! 3. `Low` - temperature below the low threshold
//! 4. `Normal`
//!
//! A statistical anomaly overrides a threshold breach: a sudden jump while
//! already hot is reported as the jump. Because `High` is checked before
//! `Low`, overlapping thresholds (`low >= high`) resolve to `High`;
//! [`crate::MonitorConfig::validate`] rejects such configurations up front.

use crate::constants::warnings::{
    ANOMALY_BLINK_PERIOD_MS, HIGH_BLINK_PERIOD_MS, IDLE_BLINK_PERIOD_MS, LOW_BLINK_PERIOD_MS,
};

/// Absolute temperature thresholds in °C
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    /// Below this the level is `Low`
    pub low: f32,
    /// Above this the level is `High`
    pub high: f32,
}

/// Visible warning state, exactly one active per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum WarningLevel {
    /// Within thresholds and behaving as usual
    #[default]
    Normal = 0,
    /// Below the low threshold
    Low = 1,
    /// Above the high threshold
    High = 2,
    /// Unusual rate of change, regardless of absolute temperature
    Anomalous = 3,
}

impl WarningLevel {
    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            WarningLevel::Normal => "normal",
            WarningLevel::Low => "low",
            WarningLevel::High => "high",
            WarningLevel::Anomalous => "anomalous",
        }
    }

    /// Blink pattern for the warning LED
    pub const fn blink_pattern(&self) -> BlinkPattern {
        match self {
            WarningLevel::Anomalous => BlinkPattern::square(ANOMALY_BLINK_PERIOD_MS),
            WarningLevel::High => BlinkPattern::square(HIGH_BLINK_PERIOD_MS),
            WarningLevel::Low => BlinkPattern::square(LOW_BLINK_PERIOD_MS),
            WarningLevel::Normal => BlinkPattern::OFF,
        }
    }
}

impl core::fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WarningLevel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

/// PWM settings for the warning LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPattern {
    /// PWM period in milliseconds
    pub period_ms: u32,
    /// On-time per period in milliseconds, 0 = off
    pub pulse_width_ms: u32,
}

impl BlinkPattern {
    /// LED dark
    pub const OFF: Self = Self {
        period_ms: IDLE_BLINK_PERIOD_MS,
        pulse_width_ms: 0,
    };

    /// 50 % duty cycle at the given period
    pub const fn square(period_ms: u32) -> Self {
        Self {
            period_ms,
            pulse_width_ms: period_ms / 2,
        }
    }

    /// Whether the LED lights at all
    pub const fn is_off(&self) -> bool {
        self.pulse_width_ms == 0
    }

    /// Duty cycle in 0.0..=1.0
    pub fn duty_cycle(&self) -> f32 {
        if self.period_ms == 0 {
            return 0.0;
        }
        self.pulse_width_ms as f32 / self.period_ms as f32
    }
}

/// Pick the warning level for one tick
pub fn select(current_temperature: f32, is_anomalous: bool, thresholds: &Thresholds) -> WarningLevel {
    if is_anomalous {
        WarningLevel::Anomalous
    } else if current_temperature > thresholds.high {
        WarningLevel::High
    } else if current_temperature < thresholds.low {
        WarningLevel::Low
    } else {
        WarningLevel::Normal
    }
}
