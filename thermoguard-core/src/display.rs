//! Human-readable snapshot of a tick
//!
//! `TickReport` renders through `core::fmt::Display`, so the same code
//! prints to a serial console, a `heapless::String` or a host terminal:
//!
//! ```text
//! --- Temperature Monitor ---
//!
//! Current Readings:
//!   Temp:     21.40 C
//!   Humidity: 38.20 %
//!   Pressure: 1011.90 hPa
//!
//! Stats (Last Hour):
//!   Max Temp: 23.10 C
//!   Min Temp: 19.80 C
//!
//! System Status:
//!   Anomaly:  normal
//!   Warning:  normal
//!   Model:    mean=0.001 sd=0.042
//!
//! ---------------------------
//! Thresholds: Low=5.0 C / High=30.0 C
//! ```
//!
//! Clearing the screen between snapshots is left to the terminal driver.

use core::fmt;

use crate::monitor::TickReport;

const RULE: &str = "---------------------------";

fn validity_marker(valid: bool) -> &'static str {
    if valid {
        ""
    } else {
        " (Invalid)"
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reading = &self.reading;

        writeln!(f, "--- Temperature Monitor ---")?;
        writeln!(f)?;

        writeln!(f, "Current Readings:")?;
        writeln!(
            f,
            "  Temp:     {:.2} C{}",
            reading.temperature,
            validity_marker(reading.temperature_valid)
        )?;
        writeln!(
            f,
            "  Humidity: {:.2} %{}",
            reading.humidity,
            validity_marker(reading.humidity_valid)
        )?;
        writeln!(
            f,
            "  Pressure: {:.2} hPa{}",
            reading.pressure,
            validity_marker(reading.pressure_valid)
        )?;
        writeln!(f)?;

        writeln!(f, "Stats (Last Hour):")?;
        if self.hour_stats.valid {
            writeln!(f, "  Max Temp: {:.2} C", self.hour_stats.max)?;
            writeln!(f, "  Min Temp: {:.2} C", self.hour_stats.min)?;
        } else {
            writeln!(f, "  (Waiting for first hour to complete)")?;
        }
        writeln!(f)?;

        writeln!(f, "System Status:")?;
        let status = if self.anomaly.is_anomalous {
            "ANOMALY DETECTED"
        } else {
            "normal"
        };
        writeln!(f, "  Anomaly:  {}", status)?;
        writeln!(f, "  Warning:  {}", self.warning)?;
        writeln!(
            f,
            "  Model:    mean={:.3} sd={:.3}",
            self.anomaly.mean, self.anomaly.std_dev
        )?;
        if !self.sample_accepted {
            writeln!(f, "  Sample rejected, showing previous verdict")?;
        }
        writeln!(f)?;

        writeln!(f, "{}", RULE)?;
        write!(
            f,
            "Thresholds: Low={:.1} C / High={:.1} C",
            self.thresholds.low, self.thresholds.high
        )
    }
}
