//! Tick-to-topic publishing
//!
//! [`TelemetryPublisher`] owns a [`Connector`] and maps each `TickReport` to
//! the messages the dashboard expects. It keeps its own [`ConnectionStats`]
//! and watches the connector's link state: the first connection is announced
//! as "System Booted", a re-established one as "System Reconnected", both on
//! the status topic before the next telemetry message.

use crate::payload::{AnomalyPayload, StatusPayload, TelemetryPayload};
use crate::{ConnectionStats, Connector, ConnectorError};
use serde::Serialize;
use thermoguard_core::TickReport;

/// Default topic for per-tick telemetry
pub const DEFAULT_DATA_TOPIC: &str = "iot-temp-monitor/data";
/// Default topic for lifecycle messages
pub const DEFAULT_STATUS_TOPIC: &str = "iot-temp-monitor/status";
/// Default topic for anomaly events
pub const DEFAULT_ANOMALY_TOPIC: &str = "iot-temp-monitor/anomaly";

/// Topic names used by the publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    pub data: String,
    pub status: String,
    pub anomaly: String,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            data: DEFAULT_DATA_TOPIC.into(),
            status: DEFAULT_STATUS_TOPIC.into(),
            anomaly: DEFAULT_ANOMALY_TOPIC.into(),
        }
    }
}

impl Topics {
    /// All three topics under a common prefix, e.g. `"lab-3"` gives `lab-3/data`
    pub fn with_prefix(prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        Self {
            data: format!("{}/data", prefix),
            status: format!("{}/status", prefix),
            anomaly: format!("{}/anomaly", prefix),
        }
    }
}

/// Publishes monitor output through a connector
///
/// The first time the link is up "System Booted" goes out on the status
/// topic, unless [`announce_boot`](Self::announce_boot) already sent it.
/// Every later transition from down to up is announced as "System
/// Reconnected". A status message that fails to send is retried on the next
/// publish.
pub struct TelemetryPublisher<C: Connector> {
    connector: C,
    topics: Topics,
    stats: ConnectionStats,
    /// Link state at the last successful status check
    link_up: bool,
    boot_announced: bool,
}

impl<C> TelemetryPublisher<C>
where
    C: Connector,
    C::Error: Into<ConnectorError>,
{
    pub fn new(connector: C, topics: Topics) -> Self {
        Self {
            connector,
            topics,
            stats: ConnectionStats::default(),
            link_up: false,
            boot_announced: false,
        }
    }

    /// Retained "System Booted" status
    ///
    /// Fails with the connector's error while the link is down; the boot
    /// message is then sent with the first telemetry after the link comes up.
    pub fn announce_boot(&mut self) -> Result<(), ConnectorError> {
        self.publish_status(StatusPayload::BOOTED)?;
        self.boot_announced = true;
        self.link_up = true;
        Ok(())
    }

    /// Whether "System Booted" has gone out
    pub fn boot_announced(&self) -> bool {
        self.boot_announced
    }

    /// Retained status message on the status topic
    pub fn publish_status(&mut self, status: &str) -> Result<(), ConnectorError> {
        let topic = self.topics.status.clone();
        self.send_json(&topic, &StatusPayload::new(status), true)
    }

    /// Publish one tick
    ///
    /// Rejected samples are skipped. Telemetry goes to the data topic and, for
    /// anomalous ticks, a second message goes to the anomaly topic. The first
    /// error aborts the remaining sends for this tick.
    pub fn publish_report(&mut self, report: &TickReport) -> Result<(), ConnectorError> {
        if !report.sample_accepted {
            log::debug!("tick {}: sample rejected, nothing published", report.tick);
            return Ok(());
        }

        self.announce_link_state()?;

        let data_topic = self.topics.data.clone();
        self.send_json(&data_topic, &TelemetryPayload::from(report), false)?;

        if report.anomaly.is_anomalous {
            log::info!(
                "tick {}: anomaly at {:.2} C, publishing event",
                report.tick,
                report.reading.temperature
            );
            let anomaly_topic = self.topics.anomaly.clone();
            self.send_json(&anomaly_topic, &AnomalyPayload::from(report), false)?;
        }

        Ok(())
    }

    /// Send boot or reconnect status when the link has come up
    fn announce_link_state(&mut self) -> Result<(), ConnectorError> {
        if !self.connector.is_connected() {
            if self.link_up {
                log::warn!("connection lost");
            }
            self.link_up = false;
            return Ok(());
        }

        if self.link_up {
            return Ok(());
        }

        if self.boot_announced {
            self.publish_status(StatusPayload::RECONNECTED)?;
            self.stats.reconnections += 1;
            log::info!("connection re-established ({} total)", self.stats.reconnections);
        } else {
            self.publish_status(StatusPayload::BOOTED)?;
            self.boot_announced = true;
            log::info!("connected, boot announced");
        }

        self.link_up = true;
        Ok(())
    }

    fn send_json<T: Serialize>(
        &mut self,
        topic: &str,
        payload: &T,
        retained: bool,
    ) -> Result<(), ConnectorError> {
        let bytes = match serde_json::to_vec(payload) {
            Ok(bytes) => bytes,
            Err(e) => {
                let error = ConnectorError::from(e);
                self.stats.record_failure(&error);
                return Err(error);
            }
        };

        let result = if retained {
            self.connector.send_retained(topic, &bytes)
        } else {
            self.connector.send(topic, &bytes)
        };

        match result {
            Ok(()) => {
                self.stats.record_sent(bytes.len());
                Ok(())
            }
            Err(e) => {
                let error = e.into();
                log::warn!("publish to {} failed: {}", topic, error);
                self.stats.record_failure(&error);
                Err(error)
            }
        }
    }

    /// Publisher-side statistics
    pub fn stats(&self) -> &ConnectionStats {
        &self.stats
    }

    pub fn topics(&self) -> &Topics {
        &self.topics
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn connector_mut(&mut self) -> &mut C {
        &mut self.connector
    }

    /// Consume the publisher, returning the connector
    pub fn into_inner(self) -> C {
        self.connector
    }
}
