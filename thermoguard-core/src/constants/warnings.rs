//! Warning LED Blink Timings
//!
//! Period and pulse width for each warning level, 50 % duty cycle throughout.
//! Faster blinking means more urgent.

/// Anomaly: 10 Hz.
pub const ANOMALY_BLINK_PERIOD_MS: u32 = 100;

/// High temperature: 2 Hz.
pub const HIGH_BLINK_PERIOD_MS: u32 = 500;

/// Low temperature: 1 Hz.
pub const LOW_BLINK_PERIOD_MS: u32 = 1000;

/// Period the LED idles at while off.
pub const IDLE_BLINK_PERIOD_MS: u32 = 1000;
