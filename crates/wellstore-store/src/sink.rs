//! Fire-and-forget change notifications.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wellstore_model::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Add,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub kind: ChangeKind,
    pub address: Address,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, address: Address) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind,
            address,
        }
    }
}

/// Receives change events. Publishing never fails the write that caused it.
pub trait ChangeSink: Send + Sync {
    fn publish(&self, event: ChangeEvent);
}

/// Logs every event at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ChangeSink for TracingSink {
    fn publish(&self, event: ChangeEvent) {
        tracing::info!(
            id = %event.id,
            kind = ?event.kind,
            address = %event.address,
            "object changed"
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ChangeSink for NullSink {
    fn publish(&self, _event: ChangeEvent) {}
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ChangeEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.lock().clone()
    }

    pub fn kinds(&self) -> Vec<ChangeKind> {
        self.events.lock().iter().map(|e| e.kind).collect()
    }
}

impl ChangeSink for RecordingSink {
    fn publish(&self, event: ChangeEvent) {
        self.events.lock().push(event);
    }
}
