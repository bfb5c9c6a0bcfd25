//! In-memory connector
//!
//! Records every message instead of sending it. Used for offline runs and as
//! the test double for [`crate::TelemetryPublisher`].

use crate::{ConnectionStats, Connector, ConnectorError};

/// A message captured by [`MemoryConnector`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMessage {
    pub topic: String,
    pub payload: Vec<u8>,
    pub retained: bool,
}

impl RecordedMessage {
    /// Payload decoded as UTF-8 text
    pub fn payload_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.payload).ok()
    }
}

/// Connector that keeps messages in a bounded in-memory log
#[derive(Debug, Clone)]
pub struct MemoryConnector {
    messages: Vec<RecordedMessage>,
    capacity: Option<usize>,
    connected: bool,
    stats: ConnectionStats,
}

impl Default for MemoryConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConnector {
    /// Unbounded, connected
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            capacity: None,
            connected: true,
            stats: ConnectionStats::default(),
        }
    }

    /// Reject sends with `BufferFull` once `capacity` messages are held
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    /// Simulate link loss or recovery
    pub fn set_connected(&mut self, connected: bool) {
        if connected && !self.connected {
            self.stats.reconnections += 1;
        }
        self.connected = connected;
    }

    pub fn messages(&self) -> &[RecordedMessage] {
        &self.messages
    }

    /// Messages sent to one topic, oldest first
    pub fn messages_on<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a RecordedMessage> {
        self.messages.iter().filter(move |m| m.topic == topic)
    }

    /// Remove and return all recorded messages
    pub fn drain(&mut self) -> Vec<RecordedMessage> {
        std::mem::take(&mut self.messages)
    }

    pub fn stats(&self) -> &ConnectionStats {
        &self.stats
    }

    fn record(&mut self, topic: &str, data: &[u8], retained: bool) -> Result<(), ConnectorError> {
        let result = if !self.connected {
            Err(ConnectorError::NotConnected)
        } else if self.capacity.is_some_and(|cap| self.messages.len() >= cap) {
            Err(ConnectorError::BufferFull)
        } else {
            Ok(())
        };

        match result {
            Ok(()) => {
                self.messages.push(RecordedMessage {
                    topic: topic.to_string(),
                    payload: data.to_vec(),
                    retained,
                });
                self.stats.record_sent(data.len());
                Ok(())
            }
            Err(e) => {
                self.stats.record_failure(&e);
                Err(e)
            }
        }
    }
}

impl Connector for MemoryConnector {
    type Error = ConnectorError;

    fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error> {
        self.record(topic, data, false)
    }

    fn send_retained(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error> {
        self.record(topic, data, true)
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut mem = MemoryConnector::new();
        mem.send("a", b"1").unwrap();
        mem.send_retained("b", b"22").unwrap();

        assert_eq!(mem.messages().len(), 2);
        assert_eq!(mem.messages()[1].payload_str(), Some("22"));
        assert!(mem.messages()[1].retained);
        assert_eq!(mem.messages_on("a").count(), 1);
        assert_eq!(mem.stats().bytes_sent, 3);
    }

    #[test]
    fn capacity_limit() {
        let mut mem = MemoryConnector::with_capacity(1);
        mem.send("a", b"x").unwrap();
        assert_eq!(mem.send("a", b"y"), Err(ConnectorError::BufferFull));

        mem.drain();
        assert!(mem.send("a", b"z").is_ok());
        assert_eq!(mem.stats().messages_failed, 1);
    }

    #[test]
    fn disconnected_rejects() {
        let mut mem = MemoryConnector::new();
        mem.set_connected(false);
        assert_eq!(mem.send("a", b"x"), Err(ConnectorError::NotConnected));

        mem.set_connected(true);
        assert!(mem.send("a", b"x").is_ok());
        assert_eq!(mem.stats().reconnections, 1);
    }
}
