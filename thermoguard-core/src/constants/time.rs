//! Time-Related Constants
//!
//! Sampling cadence and the conversions used to size the hourly window.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u32 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: u32 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;

/// Milliseconds per hour.
pub const MS_PER_HOUR: u32 = MS_PER_SECOND * SECONDS_PER_HOUR;

// ===== SAMPLING =====

/// Default sensor sampling interval (milliseconds).
///
/// One reading every two seconds. Fast enough to catch a door left open or
/// a heater switching on, slow enough that the HTS221/LPS22HB pair settles
/// between reads.
pub const DEFAULT_SAMPLE_INTERVAL_MS: u32 = 2000;

/// Samples in one hour at the default interval.
///
/// 3600 s / 2 s = 1800. This is the default hourly rollover length.
pub const DEFAULT_SAMPLES_PER_HOUR: u32 = MS_PER_HOUR / DEFAULT_SAMPLE_INTERVAL_MS;

/// Number of samples that make up one hour at the given interval.
///
/// Returns at least 1 so the result is always a usable rollover length.
pub const fn samples_per_hour(sample_interval_ms: u32) -> u32 {
    if sample_interval_ms == 0 || sample_interval_ms >= MS_PER_HOUR {
        return 1;
    }
    MS_PER_HOUR / sample_interval_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_at_default_interval() {
        assert_eq!(DEFAULT_SAMPLES_PER_HOUR, 1800);
        assert_eq!(samples_per_hour(DEFAULT_SAMPLE_INTERVAL_MS), 1800);
    }

    #[test]
    fn degenerate_intervals_still_roll_over() {
        assert_eq!(samples_per_hour(0), 1);
        assert_eq!(samples_per_hour(MS_PER_HOUR * 2), 1);
        assert_eq!(samples_per_hour(1000), 3600);
    }
}
