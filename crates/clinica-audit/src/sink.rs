use std::sync::Mutex;

use crate::events::AuditEvent;

/// Where audit events go.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent);
}

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn record(&self, event: AuditEvent) {
        event.emit();
    }
}

/// Logs like [`TracingSink`] and also keeps the events for inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl AuditSink for RecordingSink {
    fn record(&self, event: AuditEvent) {
        event.emit();
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
