//! Per-tick orchestration
//!
//! [`TemperatureMonitor`] owns one statistics engine, one hourly tracker and
//! the immutable configuration for a single sensor stream. Each call to
//! [`TemperatureMonitor::tick`] runs the full sequence for one sample:
//!
//! ```text
//! SensorReading ─► StatisticsEngine::process ─┐
//!              └─► HourTracker::update ───────┤
//!                                             ▼
//!                        select(temperature, is_anomalous)
//!                                             │
//!                                             ▼
//!                                        TickReport ─► display / LED / telemetry
//! ```
//!
//! The report is a plain `Copy` value. Whatever the consumers do with it,
//! including failing to publish it, cannot reach back into monitor state.
//!
//! Samples whose temperature is flagged invalid by the sensor, or is not a
//! finite number, are rejected as a whole: neither the engine nor the tracker
//! sees them and the report repeats the previous verdict with
//! `sample_accepted = false`.

use crate::{
    anomaly::{AnomalyResult, StatisticsEngine},
    config::MonitorConfig,
    errors::MonitorResult,
    reading::SensorReading,
    tracker::{HourStats, HourTracker},
    traits::SensorSource,
    warnings::{select, Thresholds, WarningLevel},
};

/// Everything computed for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// 1-based tick counter, rejected samples included
    pub tick: u64,
    /// The raw reading, passed through untouched
    pub reading: SensorReading,
    /// Rate-of-change verdict
    pub anomaly: AnomalyResult,
    /// Hourly min/max
    pub hour_stats: HourStats,
    /// Selected warning level
    pub warning: WarningLevel,
    /// Thresholds the warning level was selected against
    pub thresholds: Thresholds,
    /// False when the temperature was rejected and the verdict repeated
    pub sample_accepted: bool,
}

/// Detection pipeline for one temperature stream
#[derive(Debug, Clone)]
pub struct TemperatureMonitor {
    config: MonitorConfig,
    engine: StatisticsEngine,
    tracker: HourTracker,
    last_warning: WarningLevel,
    last_report: Option<TickReport>,
    ticks: u64,
}

impl TemperatureMonitor {
    /// Validate `config` and build a monitor from it
    pub fn new(config: MonitorConfig) -> MonitorResult<Self> {
        config.validate()?;

        let engine = StatisticsEngine::from_config(&config)?;
        let tracker = HourTracker::from_config(&config)?;

        log_info!(
            "temperature monitor ready: window {} rates, z > {}, rollover every {} samples",
            config.window_capacity,
            config.z_score_threshold,
            config.samples_per_rollover
        );

        Ok(Self {
            config,
            engine,
            tracker,
            last_warning: WarningLevel::Normal,
            last_report: None,
            ticks: 0,
        })
    }

    /// Process one reading
    pub fn tick(&mut self, reading: SensorReading) -> TickReport {
        self.ticks += 1;

        let report = if reading.has_usable_temperature() {
            self.accept(reading)
        } else {
            log_warn!(
                "tick {}: rejecting temperature {} (sensor valid: {})",
                self.ticks,
                reading.temperature,
                reading.temperature_valid
            );
            self.repeat(reading)
        };

        self.last_report = Some(report);
        report
    }

    /// Read one sample from `source` and process it
    ///
    /// `WouldBlock` and driver errors are passed through without touching
    /// any state.
    pub fn poll<S: SensorSource>(&mut self, source: &mut S) -> nb::Result<TickReport, S::Error> {
        let reading = source.read()?;
        Ok(self.tick(reading))
    }

    fn accept(&mut self, reading: SensorReading) -> TickReport {
        let temperature = reading.temperature;

        let anomaly = self.engine.process(temperature);
        self.tracker.update(temperature);

        let thresholds = self.config.thresholds();
        let warning = select(temperature, anomaly.is_anomalous, &thresholds);

        if warning != self.last_warning {
            log_info!(
                "tick {}: warning level {} -> {} at {} C",
                self.ticks,
                self.last_warning,
                warning,
                temperature
            );
            self.last_warning = warning;
        }

        TickReport {
            tick: self.ticks,
            reading,
            anomaly,
            hour_stats: self.tracker.get_stats(),
            warning,
            thresholds,
            sample_accepted: true,
        }
    }

    fn repeat(&self, reading: SensorReading) -> TickReport {
        TickReport {
            tick: self.ticks,
            reading,
            anomaly: self.engine.last_result(),
            hour_stats: self.tracker.get_stats(),
            warning: self.last_warning,
            thresholds: self.config.thresholds(),
            sample_accepted: false,
        }
    }

    /// Configuration the monitor was built with
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// The statistics engine
    pub fn engine(&self) -> &StatisticsEngine {
        &self.engine
    }

    /// The hourly tracker
    pub fn tracker(&self) -> &HourTracker {
        &self.tracker
    }

    /// Report from the most recent tick
    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }

    /// Ticks processed so far, rejected samples included
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
