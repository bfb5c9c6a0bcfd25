//! MQTT Connector for ThermoGuard
//!
//! ## Overview
//!
//! Publishes telemetry to an MQTT broker through `rumqttc`'s synchronous
//! client. The client hands requests to an event loop, which runs on a
//! dedicated thread and owns the socket, keep-alives and reconnects. The
//! sampling loop never blocks on the network: `send` only queues a request.
//!
//! ## Delivery
//!
//! - QoS 0 for everything. A lost sample is superseded two seconds later.
//! - Status messages are retained so a dashboard that subscribes late still
//!   sees whether the device is up.
//! - While the link is down `send` fails fast with `NotConnected` instead of
//!   filling the request queue with stale readings.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use thermoguard_connectors::{Connector, MqttConfig, MqttConnector};
//!
//! let config = MqttConfig::new("broker.local")
//!     .port(1883)
//!     .client_id("temp_monitor_lab")
//!     .credentials("device", "secret")
//!     .keep_alive_secs(30);
//!
//! let mut mqtt = MqttConnector::connect(config)?;
//! mqtt.send("iot-temp-monitor/data", br#"{"temp":21.5}"#)?;
//! # Ok::<(), thermoguard_connectors::MqttError>(())
//! ```

use crate::publisher::{
    Topics, DEFAULT_ANOMALY_TOPIC, DEFAULT_DATA_TOPIC, DEFAULT_STATUS_TOPIC,
};
use crate::{ConnectionStats, Connector, ConnectorError};
use rumqttc::{Client, Connection, Event, MqttOptions, Packet, QoS};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

/// Default broker port
pub const DEFAULT_PORT: u16 = 1883;
/// Default client identifier
pub const DEFAULT_CLIENT_ID: &str = "temp_monitor_device_001";
/// Default keep-alive interval in seconds
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 60;

/// Request queue depth between client and event loop
const REQUEST_CAPACITY: usize = 16;

/// MQTT-specific errors
#[derive(Debug, Error)]
pub enum MqttError {
    /// Broker link is down
    #[error("Not connected to broker")]
    NotConnected,

    /// Client request queue rejected the message
    #[error("Client error: {0}")]
    Client(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Event loop thread could not be started
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rumqttc::ClientError> for MqttError {
    fn from(e: rumqttc::ClientError) -> Self {
        MqttError::Client(e.to_string())
    }
}

impl From<MqttError> for ConnectorError {
    fn from(e: MqttError) -> Self {
        match e {
            MqttError::NotConnected => ConnectorError::NotConnected,
            MqttError::Client(msg) => ConnectorError::ProtocolError(msg),
            MqttError::Config(msg) => ConnectorError::ConfigError(msg),
            MqttError::Io(e) => ConnectorError::ProtocolError(e.to_string()),
        }
    }
}

/// MQTT configuration
#[derive(Debug, Clone)]
pub struct MqttConfig {
    /// Broker host name or address
    pub host: String,
    /// Broker port
    pub port: u16,
    /// Client identifier, unique per broker
    pub client_id: String,
    /// Optional user name
    pub username: Option<String>,
    /// Optional password, only sent with a user name
    pub password: Option<String>,
    /// Keep-alive interval in seconds
    pub keep_alive_secs: u64,
    /// Delay before the event loop retries after a connection error
    pub reconnect_delay: Duration,
    pub data_topic: String,
    pub status_topic: String,
    pub anomaly_topic: String,
}

impl MqttConfig {
    /// Create new configuration for a broker host
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            client_id: DEFAULT_CLIENT_ID.into(),
            username: None,
            password: None,
            keep_alive_secs: DEFAULT_KEEP_ALIVE_SECS,
            reconnect_delay: Duration::from_secs(5),
            data_topic: DEFAULT_DATA_TOPIC.into(),
            status_topic: DEFAULT_STATUS_TOPIC.into(),
            anomaly_topic: DEFAULT_ANOMALY_TOPIC.into(),
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = id.into();
        self
    }

    /// Set user name and password
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn keep_alive_secs(mut self, secs: u64) -> Self {
        self.keep_alive_secs = secs;
        self
    }

    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Override all three topics
    pub fn topics(mut self, topics: Topics) -> Self {
        self.data_topic = topics.data;
        self.status_topic = topics.status;
        self.anomaly_topic = topics.anomaly;
        self
    }

    /// Topic set for [`crate::TelemetryPublisher`]
    pub fn topic_set(&self) -> Topics {
        Topics {
            data: self.data_topic.clone(),
            status: self.status_topic.clone(),
            anomaly: self.anomaly_topic.clone(),
        }
    }

    /// Check the configuration before connecting
    pub fn validate(&self) -> Result<(), MqttError> {
        if self.host.trim().is_empty() {
            return Err(MqttError::Config("broker host is empty".into()));
        }
        if self.port == 0 {
            return Err(MqttError::Config("broker port must be non-zero".into()));
        }
        if self.client_id.is_empty() {
            return Err(MqttError::Config("client id is empty".into()));
        }
        // rumqttc rejects keep-alives below one second
        if self.keep_alive_secs == 0 {
            return Err(MqttError::Config("keep-alive must be at least 1 s".into()));
        }
        if self.password.is_some() && self.username.is_none() {
            return Err(MqttError::Config("password set without user name".into()));
        }
        for topic in [&self.data_topic, &self.status_topic, &self.anomaly_topic] {
            if topic.is_empty() || topic.contains(['+', '#']) {
                return Err(MqttError::Config(format!("invalid publish topic '{}'", topic)));
            }
        }
        Ok(())
    }

    fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(&self.client_id, &self.host, self.port);
        options.set_keep_alive(Duration::from_secs(self.keep_alive_secs));
        options.set_clean_session(true);
        if let Some(username) = &self.username {
            options.set_credentials(username, self.password.as_deref().unwrap_or(""));
        }
        options
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self::new("localhost")
    }
}

/// MQTT connector backed by a background event loop
pub struct MqttConnector {
    config: MqttConfig,
    client: Client,
    connected: Arc<AtomicBool>,
    stats: Arc<Mutex<ConnectionStats>>,
    event_loop: Option<JoinHandle<()>>,
}

impl MqttConnector {
    /// Validate the configuration and start the event loop
    ///
    /// Returns immediately; the connection is established in the background
    /// and [`Connector::is_connected`] turns true on the broker's ConnAck.
    pub fn connect(config: MqttConfig) -> Result<Self, MqttError> {
        config.validate()?;

        let (client, connection) = Client::new(config.options(), REQUEST_CAPACITY);
        let connected = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(Mutex::new(ConnectionStats::default()));

        let event_loop = thread::Builder::new()
            .name(format!("mqtt-{}", config.client_id))
            .spawn({
                let connected = Arc::clone(&connected);
                let stats = Arc::clone(&stats);
                let delay = config.reconnect_delay;
                move || run_event_loop(connection, connected, stats, delay)
            })?;

        log::info!(
            "MQTT client '{}' connecting to {}:{}",
            config.client_id,
            config.host,
            config.port
        );

        Ok(Self {
            config,
            client,
            connected,
            stats,
            event_loop: Some(event_loop),
        })
    }

    pub fn config(&self) -> &MqttConfig {
        &self.config
    }

    /// Snapshot of connection statistics
    pub fn stats(&self) -> ConnectionStats {
        lock_stats(&self.stats).clone()
    }

    fn publish(&mut self, topic: &str, data: &[u8], retain: bool) -> Result<(), MqttError> {
        let result = if !self.is_connected() {
            Err(MqttError::NotConnected)
        } else {
            self.client
                .try_publish(topic, QoS::AtMostOnce, retain, data.to_vec())
                .map_err(MqttError::from)
        };

        let mut stats = lock_stats(&self.stats);
        match &result {
            Ok(()) => stats.record_sent(data.len()),
            Err(e) => {
                stats.messages_failed += 1;
                stats.last_error = Some(e.to_string());
            }
        }
        result
    }
}

impl Connector for MqttConnector {
    type Error = MqttError;

    fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error> {
        self.publish(topic, data, false)
    }

    fn send_retained(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error> {
        self.publish(topic, data, true)
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}

impl Drop for MqttConnector {
    fn drop(&mut self) {
        if let Err(e) = self.client.try_disconnect() {
            log::debug!("MQTT disconnect request failed: {}", e);
        }
        let Some(handle) = self.event_loop.take() else {
            return;
        };
        // A loop still waiting on the broker exits once the disconnect goes
        // out or the request channel closes; it is not joined here.
        if !handle.is_finished() {
            log::debug!("MQTT event loop still running, detaching");
            return;
        }
        if handle.join().is_err() {
            log::error!("MQTT event loop thread panicked");
        }
    }
}

/// Lock the shared stats, recovering them if a holder panicked
fn lock_stats(stats: &Mutex<ConnectionStats>) -> MutexGuard<'_, ConnectionStats> {
    stats.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Drive the connection until the client is dropped
fn run_event_loop(
    mut connection: Connection,
    connected: Arc<AtomicBool>,
    stats: Arc<Mutex<ConnectionStats>>,
    reconnect_delay: Duration,
) {
    let mut ever_connected = false;

    for notification in connection.iter() {
        match notification {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                connected.store(true, Ordering::Release);
                if ever_connected {
                    lock_stats(&stats).reconnections += 1;
                    log::info!("MQTT reconnected");
                } else {
                    log::info!("MQTT connected");
                }
                ever_connected = true;
            }
            Ok(Event::Incoming(Packet::Disconnect)) => {
                connected.store(false, Ordering::Release);
                log::warn!("MQTT broker closed the session");
            }
            Ok(_) => {}
            Err(e) => {
                if connected.swap(false, Ordering::AcqRel) {
                    log::warn!("MQTT connection lost: {}", e);
                } else {
                    log::debug!("MQTT connect attempt failed: {}", e);
                }
                lock_stats(&stats).last_error = Some(e.to_string());
                thread::sleep(reconnect_delay);
            }
        }
    }

    connected.store(false, Ordering::Release);
    log::debug!("MQTT event loop stopped");
}
