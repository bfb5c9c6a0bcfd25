//! Temperature Warning Thresholds
//!
//! Fixed thresholds for the absolute warning levels. All values in °C.

/// Above this the warning state is `High`.
pub const DEFAULT_HIGH_THRESHOLD_C: f32 = 30.0;

/// Below this the warning state is `Low`.
///
/// 5 °C is the point where pipes and plants in an unheated room need
/// attention.
pub const DEFAULT_LOW_THRESHOLD_C: f32 = 5.0;

