//! Event logging for observability and replay.
//!
//! The presentation layer does not poll the engine; it redraws on state
//! changes. Every mutation the collaborator would react to is logged
//! here with the tick it happened on. With a fixed RNG seed the event
//! log is reproducible run to run.

use crate::core::slots::SlotId;
use crate::models::provider::ProviderId;

/// Engine event capturing a state change.
///
/// All events include a tick number for temporal ordering. Events are
/// logged in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Driver entered Running from Idle
    Started { tick: usize },

    /// Driver suspended; iteration timer frozen
    Paused { tick: usize },

    /// Driver resumed from Paused
    Resumed { tick: usize },

    /// Explicit stop; store and marker sets cleared
    Stopped { tick: usize },

    /// No eligible assignment remained; driver went Idle on its own
    AutoStopped { tick: usize },

    /// A new iteration passed its guard and sampled its stages
    IterationStarted { tick: usize },

    /// One stage of the iteration selected an assignment (now pending)
    StageSelected {
        tick: usize,
        stage: u8,
        provider: ProviderId,
        slot: SlotId,
    },

    /// A pending selection was finalized into the store
    Committed {
        tick: usize,
        provider: ProviderId,
        slot: SlotId,
    },

    /// A pending selection was abandoned because the slot was taken by
    /// another provider before its commit step
    CommitSkipped {
        tick: usize,
        provider: ProviderId,
        slot: SlotId,
    },

    /// Manual toggle from the collaborator; `committed` is the new state
    ManualToggle {
        tick: usize,
        provider: ProviderId,
        slot: SlotId,
        committed: bool,
    },

    /// Weights changed; the store was cleared
    WeightsChanged {
        tick: usize,
        freshness: f64,
        scarcity: f64,
    },
}

impl Event {
    /// Tick the event occurred on
    pub fn tick(&self) -> usize {
        match self {
            Event::Started { tick }
            | Event::Paused { tick }
            | Event::Resumed { tick }
            | Event::Stopped { tick }
            | Event::AutoStopped { tick }
            | Event::IterationStarted { tick }
            | Event::StageSelected { tick, .. }
            | Event::Committed { tick, .. }
            | Event::CommitSkipped { tick, .. }
            | Event::ManualToggle { tick, .. }
            | Event::WeightsChanged { tick, .. } => *tick,
        }
    }
}

/// Append-only log of engine events
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_and_query_by_tick() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        log.log(Event::Started { tick: 0 });
        log.log(Event::IterationStarted { tick: 0 });
        log.log(Event::Committed {
            tick: 3,
            provider: 1,
            slot: SlotId::new(9, 0),
        });

        assert_eq!(log.len(), 3);
        assert_eq!(log.events_at_tick(0).len(), 2);
        assert_eq!(log.events_at_tick(3).len(), 1);
        assert_eq!(log.events()[2].tick(), 3);
    }
}
