//! Agents
//!
//! An agent waits for the alarm, then walks straight at its nearest exit.
//! Nearby hazard cells raise its panic, panic makes it faster, and an obstacle
//! in the way simply stops it for the tick. There is no path planning.

use evac_events::{AgentSnapshot, PanicLevel};

use crate::config::AgentConfig;
use crate::geometry::{distance, Point2D, Rect};
use crate::layout::Layout;

/// Behaviour constants shared by every agent in a session
#[derive(Debug, Clone, PartialEq)]
pub struct AgentTuning {
    pub panic_multiplier: f64,
    pub panic_increment: f64,
    pub panic_ceiling: f64,
    pub hazard_proximity_radius: f64,
    pub arrival_radius: f64,
    pub collision_box_size: f64,
}

impl From<&AgentConfig> for AgentTuning {
    fn from(config: &AgentConfig) -> Self {
        Self {
            panic_multiplier: config.panic_multiplier,
            panic_increment: config.panic_increment,
            panic_ceiling: config.panic_ceiling,
            hazard_proximity_radius: config.hazard_proximity_radius,
            arrival_radius: config.arrival_radius,
            collision_box_size: config.collision_box_size,
        }
    }
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self::from(&AgentConfig::default())
    }
}

/// What an agent did during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStep {
    /// Alarm off or already evacuated
    Idle,
    Moved,
    /// The candidate position collided with an obstacle
    Blocked,
    /// Moved and arrived at the exit with this index
    Evacuated { exit_index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    id: u32,
    position: Point2D,
    base_speed: f64,
    panic: f64,
    evacuated: bool,
}

impl Agent {
    pub fn new(id: u32, position: Point2D, base_speed: f64) -> Self {
        Self {
            id,
            position,
            base_speed,
            panic: 0.0,
            evacuated: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    pub fn base_speed(&self) -> f64 {
        self.base_speed
    }

    pub fn panic(&self) -> f64 {
        self.panic
    }

    pub fn panic_level(&self) -> PanicLevel {
        PanicLevel::from(self.panic)
    }

    pub fn is_evacuated(&self) -> bool {
        self.evacuated
    }

    /// Movement per tick at the current panic level
    pub fn effective_speed(&self, tuning: &AgentTuning) -> f64 {
        self.base_speed * (1.0 + self.panic * tuning.panic_multiplier)
    }

    /// Advance this agent by one tick.
    ///
    /// Every hazard cell strictly within the proximity radius adds one panic
    /// increment, so several close cells stack within a single tick. Panic
    /// gained is kept even if the move is then blocked.
    pub fn update(
        &mut self,
        hazard_cells: &[Point2D],
        alarm_on: bool,
        layout: &Layout,
        tuning: &AgentTuning,
    ) -> AgentStep {
        if !alarm_on || self.evacuated {
            return AgentStep::Idle;
        }

        for cell in hazard_cells {
            if distance(self.position, *cell) < tuning.hazard_proximity_radius {
                self.panic = (self.panic + tuning.panic_increment).min(tuning.panic_ceiling);
            }
        }

        let Some((exit_index, exit)) = layout.nearest_exit(self.position) else {
            return AgentStep::Idle;
        };

        let speed = self.effective_speed(tuning);
        let dx = exit.x - self.position.x;
        let dy = exit.y - self.position.y;
        let mut length = dx.hypot(dy);
        if length == 0.0 {
            length = 1.0;
        }
        let candidate = Point2D::new(
            self.position.x + speed * dx / length,
            self.position.y + speed * dy / length,
        );

        if layout.is_blocked(&Rect::centered(candidate, tuning.collision_box_size)) {
            return AgentStep::Blocked;
        }

        self.position = candidate;
        if distance(self.position, exit) < tuning.arrival_radius {
            self.evacuated = true;
            return AgentStep::Evacuated { exit_index };
        }
        AgentStep::Moved
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            agent_id: self.id,
            position: self.position.into(),
            base_speed: self.base_speed,
            panic: self.panic,
            panic_level: self.panic_level(),
            evacuated: self.evacuated,
        }
    }
}
