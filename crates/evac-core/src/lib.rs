//! Evacuation drill simulation engine.
//!
//! Discrete-time crowd evacuation under a spreading hazard. Agents head for
//! the nearest exit once the alarm sounds, panicking (and speeding up) near
//! hazard cells and stopping dead against obstacles.

pub mod agent;
pub mod clock;
pub mod config;
pub mod drill;
pub mod geometry;
pub mod hazard;
pub mod layout;
pub mod rng;
pub mod stats;
pub mod world;

pub use agent::{Agent, AgentStep, AgentTuning};
pub use clock::SimClock;
pub use config::{AgentConfig, ArenaConfig, ClockConfig, ConfigError, HazardConfig, SimConfig};
pub use drill::{DrillAction, DrillScript, ScheduledAction};
pub use geometry::{distance, intersects, Point2D, Rect};
pub use hazard::{HazardProcess, SpreadRules};
pub use layout::Layout;
pub use rng::{RandomSource, SequenceRng, SimRng};
pub use stats::{SessionSummary, StatsCollector};
pub use world::{StepCounts, TickReport, World};
