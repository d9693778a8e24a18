//! Event Types
//!
//! Things that happen during a drill. Events are produced per tick and handed
//! to the caller; nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::snapshot::PointRecord;
use crate::SimTimestamp;

/// Event type categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    AlarmRaised,
    HazardIgnited,
    HazardSpread,
    AgentEvacuated,
}

impl EventKind {
    /// Returns all event kinds.
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::AlarmRaised,
            EventKind::HazardIgnited,
            EventKind::HazardSpread,
            EventKind::AgentEvacuated,
        ]
    }

    /// Stable snake_case name, used as a map key in statistics output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::AlarmRaised => "alarm_raised",
            EventKind::HazardIgnited => "hazard_ignited",
            EventKind::HazardSpread => "hazard_spread",
            EventKind::AgentEvacuated => "agent_evacuated",
        }
    }
}

/// A single simulation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    /// The evacuation alarm was switched on.
    AlarmRaised { at: SimTimestamp },
    /// The hazard was ignited at `origin`.
    HazardIgnited { at: SimTimestamp, origin: PointRecord },
    /// A new hazard cell was appended.
    HazardSpread {
        at: SimTimestamp,
        cell: PointRecord,
        /// Total cells after this spread
        cell_count: usize,
    },
    /// An agent reached an exit.
    AgentEvacuated {
        at: SimTimestamp,
        agent_id: u32,
        /// Index into the configured exit list
        exit_index: usize,
        panic: f64,
    },
}

impl SimEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SimEvent::AlarmRaised { .. } => EventKind::AlarmRaised,
            SimEvent::HazardIgnited { .. } => EventKind::HazardIgnited,
            SimEvent::HazardSpread { .. } => EventKind::HazardSpread,
            SimEvent::AgentEvacuated { .. } => EventKind::AgentEvacuated,
        }
    }

    pub fn timestamp(&self) -> SimTimestamp {
        match self {
            SimEvent::AlarmRaised { at }
            | SimEvent::HazardIgnited { at, .. }
            | SimEvent::HazardSpread { at, .. }
            | SimEvent::AgentEvacuated { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let at = SimTimestamp::new(4, 0.4);
        let event = SimEvent::HazardSpread {
            at,
            cell: PointRecord { x: 10.0, y: 20.0 },
            cell_count: 2,
        };
        assert_eq!(event.kind(), EventKind::HazardSpread);
        assert_eq!(event.timestamp(), at);
    }

    #[test]
    fn test_tagged_serialization() {
        let event = SimEvent::AgentEvacuated {
            at: SimTimestamp::new(9, 0.9),
            agent_id: 3,
            exit_index: 1,
            panic: 0.25,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "agent_evacuated");
        assert_eq!(json["agent_id"], 3);
        assert_eq!(json["exit_index"], 1);
    }

    #[test]
    fn test_kind_names_unique() {
        let mut names: Vec<_> = EventKind::all().iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), EventKind::all().len());
    }
}
