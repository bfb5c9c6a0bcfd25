//! MQTT Publisher Example
//!
//! Runs a monitor on a synthetic temperature series and publishes every tick
//! to an MQTT broker, the way the device firmware does.
//!
//! ## Running the Example
//!
//! ```bash
//! # Any local broker works, e.g. mosquitto
//! THERMOGUARD_BROKER=localhost cargo run -p thermoguard-connectors --example mqtt_publisher
//!
//! # Watch the traffic
//! mosquitto_sub -t 'iot-temp-monitor/#' -v
//! ```

use std::thread;
use std::time::Duration;

use thermoguard_connectors::{MqttConfig, MqttConnector, TelemetryPublisher};
use thermoguard_core::{MonitorConfig, SensorReading, TemperatureMonitor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host = std::env::var("THERMOGUARD_BROKER").unwrap_or_else(|_| "localhost".into());
    let config = MqttConfig::new(host).client_id("thermoguard_example");
    let topics = config.topic_set();

    let connector = MqttConnector::connect(config)?;

    // Give the event loop a moment to get the ConnAck
    for _ in 0..20 {
        if thermoguard_connectors::Connector::is_connected(&connector) {
            break;
        }
        thread::sleep(Duration::from_millis(100));
    }

    let mut publisher = TelemetryPublisher::new(connector, topics);
    if let Err(e) = publisher.announce_boot() {
        println!("boot status deferred until connected: {}", e);
    }

    let mut monitor = TemperatureMonitor::new(MonitorConfig::default())?;

    for tick in 0..120u32 {
        let jump = if tick >= 90 { 9.0 } else { 0.0 };
        let wobble = if tick % 2 == 0 { 0.1 } else { -0.1 };
        let reading = SensorReading::new(22.0 + wobble + jump, 45.0, 1013.2);

        let report = monitor.tick(reading);
        match publisher.publish_report(&report) {
            Ok(()) => println!("tick {:>3}: {:.1} C {}", report.tick, reading.temperature, report.warning),
            Err(e) => println!("tick {:>3}: publish failed: {}", report.tick, e),
        }

        thread::sleep(Duration::from_millis(250));
    }

    let stats = publisher.stats();
    println!(
        "\nsent {} messages ({} bytes), {} failed",
        stats.messages_sent, stats.bytes_sent, stats.messages_failed
    );
    Ok(())
}
