//! Bounded event log surfaced to the UI layer.
//!
//! Keeps only the most recent entries; the renderer shows the latest line
//! and may scroll the retained tail.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What happened
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    SafeModeEnded,
    Death,
    Storm,
    BreedingSuccess,
    BreedingFailure,
    Hatched,
    HatchFailed,
    Matured,
    MaturationFailed,
    PredatorArrived,
    MigrationStarted,
    MigrationBlocked,
    MigrationCompleted,
    Hiding,
    Extinction,
}

/// One log entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    /// Tick at which the event occurred
    pub tick: u64,
    pub kind: EventKind,
    pub message: String,
}

/// Ring buffer of the most recent events
#[derive(Clone, Debug)]
pub struct EventLog {
    entries: VecDeque<Event>,
    capacity: usize,
}

impl EventLog {
    /// Create a log retaining at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append an entry, evicting the oldest once full.
    pub fn push(&mut self, tick: u64, kind: EventKind, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Event {
            tick,
            kind,
            message: message.into(),
        });
    }

    /// Most recent entry, if any.
    pub fn latest(&self) -> Option<&Event> {
        self.entries.back()
    }

    /// The retained entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter()
    }

    /// Up to `n` most recent entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<Event> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_caps_at_capacity() {
        let mut log = EventLog::new(5);
        for i in 0..20 {
            log.push(i, EventKind::Storm, format!("storm {}", i));
        }
        assert_eq!(log.len(), 5);
        assert_eq!(log.iter().next().unwrap().tick, 15);
        assert_eq!(log.latest().unwrap().tick, 19);
    }

    #[test]
    fn test_latest_on_empty_log() {
        let log = EventLog::new(10);
        assert!(log.latest().is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn test_recent_tail() {
        let mut log = EventLog::new(10);
        for i in 0..8 {
            log.push(i, EventKind::Hatched, "hatched");
        }
        let tail = log.recent(3);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].tick, 5);
        assert_eq!(tail[2].tick, 7);
    }
}
