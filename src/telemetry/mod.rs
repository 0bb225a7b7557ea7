//! Controller telemetry.
//!
//! The history keeps a bounded window of recent controller events plus
//! running totals, so a UI or CLI can poll a summary without holding on to
//! every tick report.

use std::collections::{BTreeMap, VecDeque};

pub mod events;

pub use events::ControllerEvent;

/// Snapshot of history state for CLI reporting
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HistorySnapshot {
    pub recent: Vec<ControllerEvent>,
    pub total_events: u64,
    pub dropped_events: u64,
    /// Dispatch counts keyed by action name
    pub actions: BTreeMap<String, u64>,
    pub state_changes: u64,
    pub activated: bool,
}

/// Bounded history of controller events
pub struct EventHistory {
    recent: VecDeque<ControllerEvent>,
    capacity: usize,
    total_events: u64,
    dropped_events: u64,
    actions: BTreeMap<String, u64>,
    state_changes: u64,
    activated: bool,
}

impl EventHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
            total_events: 0,
            dropped_events: 0,
            actions: BTreeMap::new(),
            state_changes: 0,
            activated: false,
        }
    }

    pub fn record(&mut self, event: &ControllerEvent) {
        self.total_events += 1;
        match event {
            ControllerEvent::ActionDispatched { action } => {
                *self.actions.entry(action.name().to_string()).or_insert(0) += 1;
            }
            ControllerEvent::StateChanged { .. } => self.state_changes += 1,
            ControllerEvent::Activated { .. } => self.activated = true,
            _ => {}
        }

        if self.capacity == 0 {
            self.dropped_events += 1;
            return;
        }
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
            self.dropped_events += 1;
        }
        self.recent.push_back(event.clone());
    }

    pub fn record_all<'a>(&mut self, events: impl IntoIterator<Item = &'a ControllerEvent>) {
        for event in events {
            self.record(event);
        }
    }

    pub fn action_count(&self, name: &str) -> u64 {
        self.actions.get(name).copied().unwrap_or(0)
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            recent: self.recent.iter().cloned().collect(),
            total_events: self.total_events,
            dropped_events: self.dropped_events,
            actions: self.actions.clone(),
            state_changes: self.state_changes,
            activated: self.activated,
        }
    }
}

impl Default for EventHistory {
    fn default() -> Self {
        Self::new(64)
    }
}
