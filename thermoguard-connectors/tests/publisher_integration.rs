//! End-to-end publishing tests
//!
//! Drives a real `TemperatureMonitor` and publishes every tick through a
//! `MemoryConnector`, then inspects what reached each topic.

use serde_json::Value;
use thermoguard_connectors::{
    ConnectorError, MemoryConnector, StatusPayload, TelemetryPayload, TelemetryPublisher, Topics,
};
use thermoguard_core::{
    MonitorConfig, SensorReading, TemperatureMonitor, WarmupPolicy, WarningLevel,
};

/// Default monitor that only flags once its rate window is full
fn config() -> MonitorConfig {
    MonitorConfig {
        warmup_policy: WarmupPolicy::FullWindow,
        ..MonitorConfig::default()
    }
}

/// Room alternating 21.8 / 22.2 °C with one abrupt 10 °C jump at `jump_at` (1-based)
fn room_with_jump(len: usize, jump_at: usize) -> Vec<f32> {
    (1..=len)
        .map(|tick| {
            let base = 22.0 + if tick % 2 == 0 { 0.2 } else { -0.2 };
            if tick >= jump_at {
                base + 10.0
            } else {
                base
            }
        })
        .collect()
}

fn json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("payload must be JSON")
}

#[test]
fn anomaly_topic_only_sees_flagged_ticks() {
    let mut monitor = TemperatureMonitor::new(config()).unwrap();
    let mut publisher = TelemetryPublisher::new(MemoryConnector::new(), Topics::default());
    publisher.announce_boot().unwrap();

    let mut flagged = Vec::new();
    for t in room_with_jump(60, 40) {
        let report = monitor.tick(SensorReading::new(t, 45.0, 1013.0));
        if report.anomaly.is_anomalous {
            flagged.push(report.tick);
        }
        publisher.publish_report(&report).unwrap();
    }

    assert_eq!(flagged, [40u64]);

    let mem = publisher.connector();
    assert_eq!(mem.messages_on("iot-temp-monitor/status").count(), 1);
    assert_eq!(mem.messages_on("iot-temp-monitor/data").count(), 60);

    let events: Vec<_> = mem.messages_on("iot-temp-monitor/anomaly").collect();
    assert_eq!(events.len(), 1);
    assert_eq!(json(&events[0].payload)["tick"], 40);

    let data: Vec<Value> = mem
        .messages_on("iot-temp-monitor/data")
        .map(|m| json(&m.payload))
        .collect();
    assert_eq!(data[39]["anomaly"], true);
    assert_eq!(data[39]["warning"], "anomalous");
    assert_eq!(data[40]["anomaly"], false);
    assert_eq!(data[40]["warning"], "high");
}

#[test]
fn data_payload_parses_back() {
    let mut monitor = TemperatureMonitor::new(config()).unwrap();
    let mut publisher = TelemetryPublisher::new(MemoryConnector::new(), Topics::default());

    let report = monitor.tick(SensorReading::new(3.456, 80.0, 990.0));
    publisher.publish_report(&report).unwrap();

    let data = publisher
        .connector()
        .messages_on("iot-temp-monitor/data")
        .next()
        .unwrap();
    let payload: TelemetryPayload = serde_json::from_slice(&data.payload).unwrap();
    assert_eq!(payload.temp, 3.46);
    assert_eq!(payload.warning, WarningLevel::Low);
    assert!(!payload.stats_valid);
}

#[test]
fn publish_failures_leave_the_monitor_alone() {
    let temperatures = room_with_jump(60, 40);

    let mut reference = TemperatureMonitor::new(config()).unwrap();
    let mut monitor = TemperatureMonitor::new(config()).unwrap();
    // Boot status plus ten data messages fit
    let mut publisher =
        TelemetryPublisher::new(MemoryConnector::with_capacity(11), Topics::default());
    publisher.announce_boot().unwrap();

    let mut failures = 0;
    for t in temperatures {
        let expected = reference.tick(SensorReading::temperature_only(t));
        let report = monitor.tick(SensorReading::temperature_only(t));

        if let Err(e) = publisher.publish_report(&report) {
            assert_eq!(e, ConnectorError::BufferFull);
            failures += 1;
        }
        assert_eq!(report.anomaly, expected.anomaly);
        assert_eq!(report.warning, expected.warning);
    }

    assert_eq!(failures, 50);
    assert_eq!(publisher.stats().messages_sent, 11);
    assert_eq!(publisher.stats().messages_failed, 50);
}

#[test]
fn outage_and_recovery() {
    let mut monitor = TemperatureMonitor::new(config()).unwrap();
    let mut publisher = TelemetryPublisher::new(MemoryConnector::new(), Topics::with_prefix("lab"));
    publisher.announce_boot().unwrap();

    for (i, t) in room_with_jump(30, 100).into_iter().enumerate() {
        let online = !(10..20).contains(&i);
        publisher.connector_mut().set_connected(online);

        let report = monitor.tick(SensorReading::temperature_only(t));
        let result = publisher.publish_report(&report);
        assert_eq!(result.is_ok(), online, "tick {}", report.tick);
    }

    let mem = publisher.connector();
    let statuses: Vec<_> = mem
        .messages_on("lab/status")
        .map(|m| json(&m.payload)["status"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(statuses, [StatusPayload::BOOTED, StatusPayload::RECONNECTED]);
    assert_eq!(mem.messages_on("lab/data").count(), 20);
    assert_eq!(publisher.stats().reconnections, 1);
}

#[test]
fn late_broker_gets_boot_not_reconnect() {
    let mut connector = MemoryConnector::new();
    connector.set_connected(false);
    let mut monitor = TemperatureMonitor::new(config()).unwrap();
    let mut publisher = TelemetryPublisher::new(connector, Topics::default());

    // Broker has not acknowledged yet
    assert_eq!(publisher.announce_boot(), Err(ConnectorError::NotConnected));

    for (i, t) in room_with_jump(5, 100).into_iter().enumerate() {
        publisher.connector_mut().set_connected(i >= 2);
        let report = monitor.tick(SensorReading::temperature_only(t));
        assert_eq!(publisher.publish_report(&report).is_ok(), i >= 2);
    }

    let statuses: Vec<_> = publisher
        .connector()
        .messages_on("iot-temp-monitor/status")
        .map(|m| json(&m.payload)["status"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(statuses, [StatusPayload::BOOTED]);
    assert_eq!(publisher.stats().reconnections, 0);
}
