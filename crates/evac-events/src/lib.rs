//! Shared event types and serialization for the evacuation drill simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Renderers and analysis tools depend on it without pulling in the engine.

pub mod event;
pub mod snapshot;
pub mod timestamp;

pub use timestamp::SimTimestamp;

pub use event::{EventKind, SimEvent};

pub use snapshot::{
    AgentSnapshot, HazardSnapshot, PanicLevel, PointRecord, RectRecord, WorldSnapshot,
};
