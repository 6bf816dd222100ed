//! Connection state.

use crate::feed::ConnectionRecord;

/// Latest connection snapshot.
#[derive(Debug, Clone, Default)]
pub struct ConnectionState {
    /// Most recent record, if any arrived yet.
    pub record: Option<ConnectionRecord>,
    /// Whether the status is loading.
    pub loading: bool,
    /// Number of records received.
    pub updates: u64,
}

impl ConnectionState {
    /// Replace the snapshot.
    pub fn update(&mut self, record: ConnectionRecord) {
        self.record = Some(record);
        self.loading = false;
        self.updates += 1;
    }

    /// Whether the last snapshot reported a live connection.
    pub fn is_connected(&self) -> bool {
        self.record.as_ref().is_some_and(|r| r.connected)
    }

    /// Latency of a live connection.
    pub fn latency_ms(&self) -> Option<u32> {
        self.record
            .as_ref()
            .filter(|r| r.connected)
            .map(|r| r.latency_ms)
    }
}
