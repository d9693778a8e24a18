//! Virtual clock
//!
//! Time advances by a fixed step per tick regardless of how fast the caller
//! drives `tick()`. Elapsed time is derived from the tick count rather than
//! accumulated, so it does not drift.

use evac_events::SimTimestamp;

#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    tick: u64,
    time_step: f64,
}

impl SimClock {
    pub fn new(time_step: f64) -> Self {
        Self { tick: 0, time_step }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Elapsed virtual time
    pub fn now(&self) -> f64 {
        self.tick as f64 * self.time_step
    }

    pub fn timestamp(&self) -> SimTimestamp {
        SimTimestamp::new(self.tick, self.now())
    }

    /// Advance one step and return the new time
    pub fn advance(&mut self) -> SimTimestamp {
        self.tick += 1;
        self.timestamp()
    }
}
