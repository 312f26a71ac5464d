//! Event emission seam.

use crate::domain::PoolEvent;

/// Receives events after each committed pool operation.
///
/// The pool calls [`emit`](Self::emit) only once a call has fully
/// committed, so a sink never sees events from rejected calls.
pub trait EventSink {
    /// Records one event.
    fn emit(&mut self, event: PoolEvent);
}

/// In-memory sink that keeps every event in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<PoolEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// The most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&PoolEvent> {
        self.events.last()
    }

    /// Removes and returns every recorded event.
    pub fn drain(&mut self) -> Vec<PoolEvent> {
        core::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: PoolEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_drains() {
        let mut log = EventLog::new();
        log.emit(PoolEvent::EmergencyModeActivated);
        assert_eq!(log.events().len(), 1);
        assert_eq!(log.last(), Some(&PoolEvent::EmergencyModeActivated));
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.events().is_empty());
    }
}
