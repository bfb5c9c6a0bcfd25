//! Telemetry Connectors for Edge-to-Broker Communication
//!
//! ## Overview
//!
//! The detection core produces one `TickReport` per sample. This crate turns
//! those reports into JSON messages and pushes them to a message bus. It sits
//! strictly downstream of the core: a failed publish is counted and returned
//! to the driving loop, and nothing here can mutate detection state.
//!
//! ```text
//! TemperatureMonitor ──TickReport──► TelemetryPublisher ──bytes──► Connector
//!                                        │                            │
//!                                   payload.rs                  mqtt.rs / memory.rs
//! ```
//!
//! ## Topics
//!
//! Three topics, matching the device firmware layout:
//!
//! | Topic                       | Payload                | Retained |
//! |-----------------------------|------------------------|----------|
//! | `iot-temp-monitor/data`     | every accepted tick    | no       |
//! | `iot-temp-monitor/anomaly`  | anomalous ticks only   | no       |
//! | `iot-temp-monitor/status`   | boot / reconnect       | yes      |
//!
//! ## MQTT
//!
//! **When to use:**
//! - Reliable networks (WiFi, Ethernet)
//! - Several consumers for the same sensor (dashboard, alerting, archive)
//!
//! **Characteristics:**
//! - QoS 0: telemetry is periodic, a lost sample is replaced 2 s later
//! - Status messages are retained so late subscribers see the device state
//! - Reconnects are handled by the client's event loop in the background
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use thermoguard_connectors::{TelemetryPublisher, Topics};
//! use thermoguard_connectors::mqtt::{MqttConfig, MqttConnector};
//! use thermoguard_core::{MonitorConfig, SensorReading, TemperatureMonitor};
//!
//! let config = MqttConfig::new("192.168.1.20").client_id("temp_monitor_001");
//! let connector = MqttConnector::connect(config)?;
//! let mut publisher = TelemetryPublisher::new(connector, Topics::default());
//! // Retried with the first telemetry if the broker has not answered yet
//! publisher.announce_boot().ok();
//!
//! let mut monitor = TemperatureMonitor::new(MonitorConfig::default())?;
//! let report = monitor.tick(SensorReading::new(21.3, 41.0, 1012.4));
//!
//! if let Err(e) = publisher.publish_report(&report) {
//!     log::warn!("telemetry dropped: {}", e);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod memory;
pub mod payload;
pub mod publisher;

#[cfg(feature = "mqtt")]
pub mod mqtt;

// Re-export common types
pub use memory::MemoryConnector;
pub use payload::{AnomalyPayload, StatusPayload, TelemetryPayload};
pub use publisher::{TelemetryPublisher, Topics};

#[cfg(feature = "mqtt")]
pub use mqtt::{MqttConfig, MqttConnector, MqttError};

use thiserror::Error;

/// Common connector errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConnectorError {
    #[error("Not connected")]
    NotConnected,

    #[error("Buffer full")]
    BufferFull,

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ConnectorError {
    fn from(e: serde_json::Error) -> Self {
        ConnectorError::Serialization(e.to_string())
    }
}

/// Trait for all protocol connectors
pub trait Connector {
    type Error;

    /// Send a message
    fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error>;

    /// Send a message the broker keeps for late subscribers
    ///
    /// Protocols without retention fall back to a plain send.
    fn send_retained(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error> {
        self.send(topic, data)
    }

    /// Check if connected
    fn is_connected(&self) -> bool;
}

/// Connection statistics common to all connectors
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConnectionStats {
    /// Total messages sent successfully
    pub messages_sent: u64,
    /// Total messages failed to send
    pub messages_failed: u64,
    /// Total bytes sent
    pub bytes_sent: u64,
    /// Number of reconnections
    pub reconnections: u32,
    /// Last error message
    pub last_error: Option<String>,
}

impl ConnectionStats {
    pub(crate) fn record_sent(&mut self, bytes: usize) {
        self.messages_sent += 1;
        self.bytes_sent += bytes as u64;
    }

    pub(crate) fn record_failure(&mut self, error: &ConnectorError) {
        self.messages_failed += 1;
        self.last_error = Some(error.to_string());
    }
}
