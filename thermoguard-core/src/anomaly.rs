//! Rate-of-Change Anomaly Detection
//!
//! ## Overview
//!
//! A fixed threshold on temperature cannot tell a sunny afternoon from a
//! failing air conditioner. This engine watches the *rate of change* instead
//! and learns what "normal" movement looks like for the spot the sensor is in.
//!
//! Every tick:
//!
//! ```text
//! rate = T(now) - T(previous)
//!
//!        ┌──────────────┐  classify   ┌───────────┐
//! rate ─►│ z = (rate-μ)/σ├────────────►│ |z| > k ? │─► is_anomalous
//!        └──────────────┘             └───────────┘
//!               │ then learn
//!               ▼
//!        ┌──────────────┐
//!        │ RateWindow   │─► recompute μ, σ (population)
//!        └──────────────┘
//! ```
//!
//! ## Evaluate, Then Learn
//!
//! The new rate is classified against the statistics of the *previous*
//! window and only afterwards written into it. A sample never influences its
//! own verdict, so a single large jump cannot inflate σ enough to hide
//! itself.
//!
//! ## Degenerate States
//!
//! - **Cold start**: the first reading has nothing to be differenced
//!   against. It is stored and a quiet result with zero statistics returned.
//! - **Untrained model**: while σ ≤ [`STD_DEV_EPSILON`] the z-score is
//!   meaningless (division by ~0) and nothing is flagged. This covers the
//!   all-zero window after boot and perfectly flat signals.
//! - **Warm-up**: with [`WarmupPolicy::FullWindow`] flagging additionally
//!   waits until the whole window holds real rates.
//! - **Malformed input**: NaN or infinite temperatures are dropped without
//!   touching any state and the previous result is returned again. A single
//!   NaN in the window would otherwise poison μ and σ for `capacity` ticks.

use crate::{
    buffer::{ModelStats, RateWindow},
    config::{validate_z_score_threshold, MonitorConfig, WarmupPolicy},
    constants::{MAX_WINDOW_CAPACITY, STD_DEV_EPSILON},
    errors::MonitorResult,
    traits::Validatable,
};

/// Verdict for one tick, with the statistics that produced it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnomalyResult {
    /// The rate of change was unusual for this window
    pub is_anomalous: bool,
    /// Window mean after this tick's update
    pub mean: f32,
    /// Window population standard deviation after this tick's update
    pub std_dev: f32,
}

impl AnomalyResult {
    /// The model statistics carried by this result
    pub fn stats(&self) -> ModelStats {
        ModelStats {
            mean: self.mean,
            std_dev: self.std_dev,
        }
    }
}

/// Differencing state between ticks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineState {
    /// Last accepted temperature
    pub last_temperature: f32,
    /// A first reading has been stored and rates can be computed
    pub has_seen_first_reading: bool,
}

/// Rolling z-score detector over first differences of temperature
#[derive(Debug, Clone)]
pub struct StatisticsEngine<const N: usize = MAX_WINDOW_CAPACITY> {
    window: RateWindow<N>,
    stats: ModelStats,
    state: EngineState,
    z_score_threshold: f32,
    warmup_policy: WarmupPolicy,
    last_result: AnomalyResult,
}

impl<const N: usize> StatisticsEngine<N> {
    /// Create an engine with a window of `window_capacity` rates
    pub fn new(window_capacity: usize, z_score_threshold: f32) -> MonitorResult<Self> {
        validate_z_score_threshold(z_score_threshold)?;

        Ok(Self {
            window: RateWindow::new(window_capacity)?,
            stats: ModelStats::default(),
            state: EngineState::default(),
            z_score_threshold,
            warmup_policy: WarmupPolicy::default(),
            last_result: AnomalyResult::default(),
        })
    }

    /// Create an engine from the detection fields of a monitor config
    pub fn from_config(config: &MonitorConfig) -> MonitorResult<Self> {
        Ok(Self::new(config.window_capacity, config.z_score_threshold)?
            .with_warmup_policy(config.warmup_policy))
    }

    /// Replace the warm-up policy
    pub fn with_warmup_policy(mut self, policy: WarmupPolicy) -> Self {
        self.warmup_policy = policy;
        self
    }

    /// Feed one temperature and classify its rate of change
    pub fn process(&mut self, current_temperature: f32) -> AnomalyResult {
        if !current_temperature.is_valid() {
            log_warn!(
                "rejecting non-finite temperature {}, keeping previous model",
                current_temperature
            );
            return self.last_result;
        }

        if !self.state.has_seen_first_reading {
            self.state.last_temperature = current_temperature;
            self.state.has_seen_first_reading = true;
            self.last_result = AnomalyResult::default();
            return self.last_result;
        }

        let rate = current_temperature - self.state.last_temperature;
        self.state.last_temperature = current_temperature;

        // Judge against the previous window before the rate joins it
        let is_anomalous = self.classify(rate);

        self.window.push(rate);
        self.stats = self.window.stats();

        if is_anomalous {
            log_info!(
                "anomalous rate {} (mean {}, std_dev {})",
                rate,
                self.stats.mean,
                self.stats.std_dev
            );
        }

        self.last_result = AnomalyResult {
            is_anomalous,
            mean: self.stats.mean,
            std_dev: self.stats.std_dev,
        };
        self.last_result
    }

    /// Z-score of `rate` against the current window
    ///
    /// `None` while the window's spread is at or below the epsilon floor.
    pub fn z_score(&self, rate: f32) -> Option<f32> {
        if self.stats.std_dev > STD_DEV_EPSILON {
            Some((rate - self.stats.mean) / self.stats.std_dev)
        } else {
            None
        }
    }

    /// Whether the model may flag anomalies yet
    pub fn is_trained(&self) -> bool {
        let warmed_up = match self.warmup_policy {
            WarmupPolicy::ZeroVariance => true,
            WarmupPolicy::FullWindow => self.window.is_saturated(),
        };
        warmed_up && self.stats.std_dev > STD_DEV_EPSILON
    }

    fn classify(&self, rate: f32) -> bool {
        if !self.is_trained() {
            return false;
        }

        match self.z_score(rate) {
            Some(z) => libm::fabsf(z) > self.z_score_threshold,
            None => false,
        }
    }

    /// Current model statistics
    pub fn stats(&self) -> ModelStats {
        self.stats
    }

    /// Differencing state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The rate window backing the model
    pub fn window(&self) -> &RateWindow<N> {
        &self.window
    }

    /// Result of the most recent accepted tick
    pub fn last_result(&self) -> AnomalyResult {
        self.last_result
    }

    /// Configured z-score cut-off
    pub fn z_score_threshold(&self) -> f32 {
        self.z_score_threshold
    }

    /// Configured warm-up policy
    pub fn warmup_policy(&self) -> WarmupPolicy {
        self.warmup_policy
    }
}
