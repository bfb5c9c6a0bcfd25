//! JSON payloads published for each tick
//!
//! Numeric fields are rounded to two decimals, which is the resolution the
//! sensors deliver anyway and keeps messages short. Non-finite values (a
//! rejected sample's raw temperature) serialize as `null`.

use serde::{Deserialize, Serialize};
use thermoguard_core::{TickReport, WarningLevel};

/// Round to two decimals for the wire
fn round2(value: f32) -> f64 {
    (value as f64 * 100.0).round() / 100.0
}

/// Per-tick telemetry on the data topic
///
/// ```json
/// {"temp":21.4,"humidity":38.2,"pressure":1011.9,"min_1h":19.8,"max_1h":23.1,
///  "stats_valid":true,"anomaly":false,"warning":"normal"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPayload {
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub min_1h: f64,
    pub max_1h: f64,
    /// False until the first full hour has completed
    pub stats_valid: bool,
    pub anomaly: bool,
    pub warning: WarningLevel,
}

impl From<&TickReport> for TelemetryPayload {
    fn from(report: &TickReport) -> Self {
        Self {
            temp: round2(report.reading.temperature),
            humidity: round2(report.reading.humidity),
            pressure: round2(report.reading.pressure),
            min_1h: round2(report.hour_stats.min),
            max_1h: round2(report.hour_stats.max),
            stats_valid: report.hour_stats.valid,
            anomaly: report.anomaly.is_anomalous,
            warning: report.warning,
        }
    }
}

/// Detail published on the anomaly topic when a tick is flagged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyPayload {
    pub tick: u64,
    pub temp: f64,
    /// Rate-window mean after the flagged sample joined it
    pub rate_mean: f64,
    /// Rate-window standard deviation after the flagged sample joined it
    pub rate_std_dev: f64,
}

impl From<&TickReport> for AnomalyPayload {
    fn from(report: &TickReport) -> Self {
        Self {
            tick: report.tick,
            temp: round2(report.reading.temperature),
            rate_mean: (report.anomaly.mean as f64 * 1000.0).round() / 1000.0,
            rate_std_dev: (report.anomaly.std_dev as f64 * 1000.0).round() / 1000.0,
        }
    }
}

/// Lifecycle message on the status topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

impl StatusPayload {
    pub const BOOTED: &'static str = "System Booted";
    pub const RECONNECTED: &'static str = "System Reconnected";

    pub fn new(status: impl Into<String>) -> Self {
        Self { status: status.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermoguard_core::{MonitorConfig, SensorReading, TemperatureMonitor};

    fn report_for(readings: &[SensorReading]) -> TickReport {
        let config = MonitorConfig {
            samples_per_rollover: 2,
            ..MonitorConfig::default()
        };
        let mut monitor = TemperatureMonitor::new(config).unwrap();
        let mut last = None;
        for &reading in readings {
            last = Some(monitor.tick(reading));
        }
        last.unwrap()
    }

    #[test]
    fn telemetry_fields() {
        let report = report_for(&[
            SensorReading::new(19.8, 40.0, 1012.0),
            SensorReading::new(23.1, 38.2, 1011.9),
        ]);
        let payload = TelemetryPayload::from(&report);

        assert_eq!(payload.temp, 23.1);
        assert_eq!(payload.humidity, 38.2);
        assert_eq!(payload.pressure, 1011.9);
        assert_eq!(payload.min_1h, 19.8);
        assert_eq!(payload.max_1h, 23.1);
        assert!(payload.stats_valid);
        assert!(!payload.anomaly);
        assert_eq!(payload.warning, WarningLevel::Normal);
    }

    #[test]
    fn telemetry_json_shape() {
        let report = report_for(&[SensorReading::new(21.456, 38.0, 1000.0)]);
        let json = serde_json::to_value(TelemetryPayload::from(&report)).unwrap();

        assert_eq!(json["temp"], 21.46);
        assert_eq!(json["anomaly"], false);
        assert_eq!(json["stats_valid"], false);
        assert_eq!(json["warning"], "normal");
        for key in ["temp", "humidity", "pressure", "min_1h", "max_1h", "anomaly"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn status_json() {
        let json = serde_json::to_string(&StatusPayload::new(StatusPayload::BOOTED)).unwrap();
        assert_eq!(json, r#"{"status":"System Booted"}"#);
    }
}
