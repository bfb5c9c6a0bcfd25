//! Simulated Monitor Example
//!
//! Drives a `TemperatureMonitor` from a synthetic sensor: a slow warm-up with
//! a little noise, a door opening (sudden drop) and a heater fault (sudden
//! rise past the high threshold).
//!
//! ## What You'll Learn
//!
//! - Implementing `SensorSource` for your own driver
//! - Polling the monitor with `nb` semantics
//! - Reading the per-tick report: anomaly verdict, hourly stats, warning level
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example simulated_monitor
//! ```

use thermoguard_core::{
    MonitorConfig, SensorReading, SensorSource, TemperatureMonitor, WarningLevel,
};

/// Deterministic room simulator
struct SimulatedRoom {
    tick: u32,
    seed: u32,
    sensor_busy: bool,
}

impl SimulatedRoom {
    fn new() -> Self {
        Self { tick: 0, seed: 42, sensor_busy: false }
    }

    /// Linear congruential generator, ±amplitude
    fn noise(&mut self, amplitude: f32) -> f32 {
        self.seed = self.seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let unit = (self.seed >> 16) as f32 / 65_535.0;
        (unit * 2.0 - 1.0) * amplitude
    }

    fn temperature_at(&mut self, tick: u32) -> f32 {
        let base = 20.0 + tick as f32 * 0.005;
        let event = match tick {
            120..=125 => -6.0,        // door open
            300.. => 12.0,            // heater stuck on
            _ => 0.0,
        };
        base + event + self.noise(0.05)
    }
}

impl SensorSource for SimulatedRoom {
    type Error = core::convert::Infallible;

    fn read(&mut self) -> nb::Result<SensorReading, Self::Error> {
        // Every other poll the conversion is still running
        self.sensor_busy = !self.sensor_busy;
        if self.sensor_busy {
            return Err(nb::Error::WouldBlock);
        }

        self.tick += 1;
        let temperature = self.temperature_at(self.tick);
        let humidity = 40.0 + self.noise(2.0);
        let pressure = 1013.0 + self.noise(0.5);
        Ok(SensorReading::new(temperature, humidity, pressure))
    }
}

fn main() {
    println!("ThermoGuard Simulated Monitor Example");
    println!("=====================================\n");

    // One "hour" every 60 samples keeps the output short
    let config = MonitorConfig {
        samples_per_rollover: 60,
        ..MonitorConfig::default()
    };

    let mut monitor = match TemperatureMonitor::new(config) {
        Ok(monitor) => monitor,
        Err(e) => {
            eprintln!("Refusing to start: {}", e);
            return;
        }
    };

    let mut room = SimulatedRoom::new();
    let mut last_warning = WarningLevel::Normal;
    let mut anomalies = 0;

    while monitor.ticks() < 360 {
        let report = match monitor.poll(&mut room) {
            Ok(report) => report,
            Err(nb::Error::WouldBlock) => continue,
            Err(nb::Error::Other(never)) => match never {},
        };

        if report.anomaly.is_anomalous {
            anomalies += 1;
        }

        if report.warning != last_warning {
            println!(
                "tick {:3}: {:>9} -> {:<9} at {:.2} C (blink {:?})",
                report.tick,
                last_warning,
                report.warning,
                report.reading.temperature,
                report.warning.blink_pattern()
            );
            last_warning = report.warning;
        }

        if report.tick % 60 == 0 {
            println!("\n{}\n", report);
        }
    }

    println!("\nSummary:");
    println!("  Ticks processed:   {}", monitor.ticks());
    println!("  Anomalous ticks:   {}", anomalies);
    println!("  Hours completed:   {}", monitor.tracker().completed_windows());
}
