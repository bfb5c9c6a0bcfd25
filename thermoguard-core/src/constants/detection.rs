//! Anomaly Detection Constants
//!
//! Parameters of the rate-of-change model. The model is a population z-score
//! over a ring of first differences, so the only knobs are the ring length,
//! the z-score cut-off and the variance floor below which the model is
//! considered untrained.

/// Variance floor for the z-score test (°C per sample).
///
/// Below this standard deviation the window is treated as degenerate (all
/// zeros after boot, or a perfectly flat signal) and no anomaly is flagged.
/// 0.001 °C is an order of magnitude below the HTS221 resolution, so any real
/// movement in the window lifts the model above it.
pub const STD_DEV_EPSILON: f32 = 0.001;

/// Default z-score threshold.
///
/// 2.5 sigma: roughly 1 in 80 samples of a normal distribution would cross it,
/// which is rare enough at a 2 s cadence without hiding genuine jumps.
pub const DEFAULT_Z_SCORE_THRESHOLD: f32 = 2.5;

/// Default number of rate samples in the model window.
///
/// Ten differences at 2 s = the last 20 seconds of behaviour. Short enough to
/// adapt to slow ambient drift.
pub const DEFAULT_WINDOW_CAPACITY: usize = 10;

/// Upper bound on the model window.
///
/// Sets the size of the fixed backing array: 60 × 4 bytes = 240 bytes per
/// engine. The O(N) recompute per sample stays cheap at this size.
pub const MAX_WINDOW_CAPACITY: usize = 60;
