//! Snapshot Types
//!
//! Serialization structs for world snapshots.
//!
//! A snapshot is the read-only view a renderer draws from: agent positions,
//! panic levels and evacuation flags, the hazard cells, alarm state and the
//! fixed layout.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::SimTimestamp;

/// Panic at or above this is drawn as alarmed
pub const ALARMED_THRESHOLD: f64 = 0.4;
/// Panic at or above this is drawn as panicked
pub const PANICKED_THRESHOLD: f64 = 0.8;

/// A point in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

/// An axis-aligned rectangle in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectRecord {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Coarse panic band for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanicLevel {
    Calm,
    Alarmed,
    Panicked,
}

impl From<f64> for PanicLevel {
    fn from(panic: f64) -> Self {
        if panic < ALARMED_THRESHOLD {
            PanicLevel::Calm
        } else if panic < PANICKED_THRESHOLD {
            PanicLevel::Alarmed
        } else {
            PanicLevel::Panicked
        }
    }
}

/// Agent state at snapshot time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: u32,
    pub position: PointRecord,
    pub base_speed: f64,
    pub panic: f64,
    pub panic_level: PanicLevel,
    pub evacuated: bool,
}

/// Hazard state at snapshot time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HazardSnapshot {
    pub active: bool,
    /// In insertion order, which is also temporal order
    pub cells: Vec<PointRecord>,
}

/// Complete world snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Changes whenever the world is reset
    pub session_id: Uuid,
    pub timestamp: SimTimestamp,
    pub arena_width: f64,
    pub arena_height: f64,
    pub alarm_on: bool,
    pub agents: Vec<AgentSnapshot>,
    pub hazard: HazardSnapshot,
    pub exits: Vec<PointRecord>,
    pub obstacles: Vec<RectRecord>,
    pub evacuated_count: usize,
}

impl WorldSnapshot {
    /// Agents still inside the arena
    pub fn remaining(&self) -> impl Iterator<Item = &AgentSnapshot> {
        self.agents.iter().filter(|a| !a.evacuated)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(agent_id: u32, evacuated: bool) -> AgentSnapshot {
        AgentSnapshot {
            agent_id,
            position: PointRecord { x: 1.0, y: 2.0 },
            base_speed: 1.0,
            panic: 0.0,
            panic_level: PanicLevel::Calm,
            evacuated,
        }
    }

    #[test]
    fn test_panic_level_bands() {
        assert_eq!(PanicLevel::from(0.0), PanicLevel::Calm);
        assert_eq!(PanicLevel::from(0.39), PanicLevel::Calm);
        assert_eq!(PanicLevel::from(0.4), PanicLevel::Alarmed);
        assert_eq!(PanicLevel::from(0.79), PanicLevel::Alarmed);
        assert_eq!(PanicLevel::from(0.8), PanicLevel::Panicked);
        assert_eq!(PanicLevel::from(1.0), PanicLevel::Panicked);
    }

    #[test]
    fn test_remaining_skips_evacuated() {
        let snapshot = WorldSnapshot {
            session_id: Uuid::nil(),
            timestamp: SimTimestamp::start(),
            arena_width: 900.0,
            arena_height: 650.0,
            alarm_on: true,
            agents: vec![agent(0, true), agent(1, false), agent(2, false)],
            hazard: HazardSnapshot::default(),
            exits: vec![],
            obstacles: vec![],
            evacuated_count: 1,
        };
        let ids: Vec<u32> = snapshot.remaining().map(|a| a.agent_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_json_contains_panic_level() {
        let json = serde_json::to_value(agent(7, false)).unwrap();
        assert_eq!(json["panic_level"], "calm");
        assert_eq!(json["agent_id"], 7);
    }
}
