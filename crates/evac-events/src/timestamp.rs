//! Simulation Timestamp Types
//!
//! Virtual time is a tick counter paired with the elapsed virtual time units.
//! It is independent of any wall clock or frame rate used by a renderer.
//!
//! # Example
//!
//! ```
//! use evac_events::SimTimestamp;
//!
//! let ts = SimTimestamp::new(20, 2.0);
//! assert_eq!(ts.tick, 20);
//! assert_eq!(ts.to_string(), "tick_20@2.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimTimestamp {
    /// Monotonically increasing simulation tick.
    pub tick: u64,
    /// Elapsed virtual time units at this tick.
    pub time: f64,
}

impl SimTimestamp {
    /// Creates a new SimTimestamp.
    pub fn new(tick: u64, time: f64) -> Self {
        Self { tick, time }
    }

    /// Creates a timestamp for the start of a session.
    pub fn start() -> Self {
        Self::default()
    }
}

impl fmt::Display for SimTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick_{}@{:.2}", self.tick, self.time)
    }
}
