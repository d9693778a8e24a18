//! World
//!
//! One drill session: agents, hazard, alarm and the fixed layout. The caller
//! owns the world and drives it with `tick()`. Resetting builds a brand-new
//! world from the same configuration instead of mutating this one.

use evac_events::{SimEvent, SimTimestamp, WorldSnapshot};
use tracing::{debug, info};
use uuid::Uuid;

use crate::agent::{Agent, AgentStep, AgentTuning};
use crate::clock::SimClock;
use crate::config::{ConfigError, SimConfig};
use crate::geometry::{Point2D, Rect};
use crate::hazard::{HazardProcess, SpreadRules};
use crate::layout::Layout;
use crate::rng::{RandomSource, SimRng};

/// How many agents did what during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepCounts {
    pub idle: usize,
    pub moved: usize,
    pub blocked: usize,
    pub evacuated: usize,
}

impl StepCounts {
    fn record(&mut self, step: AgentStep) {
        match step {
            AgentStep::Idle => self.idle += 1,
            AgentStep::Moved => self.moved += 1,
            AgentStep::Blocked => self.blocked += 1,
            AgentStep::Evacuated { .. } => self.evacuated += 1,
        }
    }
}

/// Everything that happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub timestamp: SimTimestamp,
    /// Includes alarm/ignition events recorded since the previous tick
    pub events: Vec<SimEvent>,
    pub steps: StepCounts,
}

#[derive(Debug)]
pub struct World<R = SimRng> {
    session_id: Uuid,
    config: SimConfig,
    clock: SimClock,
    layout: Layout,
    tuning: AgentTuning,
    spread: SpreadRules,
    agents: Vec<Agent>,
    hazard: HazardProcess,
    alarm_on: bool,
    pending: Vec<SimEvent>,
    rng: R,
}

impl World<SimRng> {
    /// Build a world driven by a seeded `SmallRng`
    pub fn seeded(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, SimRng::seeded(seed))
    }
}

impl<R: RandomSource> World<R> {
    /// Build a fresh world: randomized agents, inert hazard, alarm off.
    ///
    /// Draw order per agent is x, y, speed multiplier.
    pub fn new(config: SimConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let agents = spawn_agents(&config, &mut rng);
        let world = Self {
            session_id: Uuid::new_v4(),
            clock: SimClock::new(config.clock.time_step),
            layout: Layout::from_config(&config.arena),
            tuning: AgentTuning::from(&config.agents),
            spread: SpreadRules::from_config(&config),
            agents,
            hazard: HazardProcess::new(),
            alarm_on: false,
            pending: Vec::new(),
            rng,
            config,
        };
        info!(
            session = %world.session_id,
            agents = world.agents.len(),
            exits = world.layout.exits().len(),
            obstacles = world.layout.obstacles().len(),
            "World created"
        );
        Ok(world)
    }

    /// Discard this world and build a new one from `config`, reusing the
    /// random source.
    pub fn reset(self, config: SimConfig) -> Result<Self, ConfigError> {
        info!(
            session = %self.session_id,
            tick = self.clock.tick(),
            evacuated = self.evacuated_count(),
            "Resetting world"
        );
        World::new(config, self.rng)
    }

    /// Reset with this world's own configuration
    pub fn restart(self) -> Result<Self, ConfigError> {
        let config = self.config.clone();
        self.reset(config)
    }

    /// Switch the alarm on. Returns false if it was already on.
    pub fn set_alarm(&mut self) -> bool {
        if self.alarm_on {
            return false;
        }
        self.alarm_on = true;
        info!(tick = self.clock.tick(), "Alarm raised");
        self.pending.push(SimEvent::AlarmRaised {
            at: self.clock.timestamp(),
        });
        true
    }

    /// Ignite the hazard at `origin`. Returns false if it is already burning.
    pub fn start_hazard(&mut self, origin: Point2D) -> bool {
        if self.hazard.is_active() {
            return false;
        }
        let at = self.clock.timestamp();
        if !self.hazard.ignite(origin, at.time) {
            return false;
        }
        info!(tick = at.tick, x = origin.x, y = origin.y, "Hazard ignited");
        self.pending.push(SimEvent::HazardIgnited {
            at,
            origin: origin.into(),
        });
        true
    }

    /// Ignite at the configured ignition point
    pub fn start_hazard_at_ignition(&mut self) -> bool {
        let origin = self.config.hazard.ignition;
        self.start_hazard(origin)
    }

    /// Advance one step.
    ///
    /// The hazard timer is evaluated first, then every agent is updated in
    /// order against the same cell list.
    pub fn tick(&mut self) -> TickReport {
        let timestamp = self.clock.advance();
        let mut events = std::mem::take(&mut self.pending);

        let added = self.hazard.advance(timestamp.time, &self.spread, &mut self.rng);
        let first_count = self.hazard.cell_count() - added.len();
        for (i, cell) in added.into_iter().enumerate() {
            events.push(SimEvent::HazardSpread {
                at: timestamp,
                cell: cell.into(),
                cell_count: first_count + i + 1,
            });
        }

        let cells = self.hazard.cells();
        let mut steps = StepCounts::default();
        for agent in &mut self.agents {
            let step = agent.update(cells, self.alarm_on, &self.layout, &self.tuning);
            steps.record(step);
            if let AgentStep::Evacuated { exit_index } = step {
                debug!(agent = agent.id(), exit = exit_index, tick = timestamp.tick, "Agent evacuated");
                events.push(SimEvent::AgentEvacuated {
                    at: timestamp,
                    agent_id: agent.id(),
                    exit_index,
                    panic: agent.panic(),
                });
            }
        }

        if steps.evacuated > 0 && self.all_evacuated() {
            info!(tick = timestamp.tick, time = timestamp.time, "All agents evacuated");
        }

        TickReport {
            timestamp,
            events,
            steps,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn timestamp(&self) -> SimTimestamp {
        self.clock.timestamp()
    }

    pub fn alarm_on(&self) -> bool {
        self.alarm_on
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn hazard(&self) -> &HazardProcess {
        &self.hazard
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn exits(&self) -> &[Point2D] {
        self.layout.exits()
    }

    pub fn obstacles(&self) -> &[Rect] {
        self.layout.obstacles()
    }

    pub fn tuning(&self) -> &AgentTuning {
        &self.tuning
    }

    pub fn evacuated_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_evacuated()).count()
    }

    pub fn remaining_count(&self) -> usize {
        self.agents.len() - self.evacuated_count()
    }

    pub fn all_evacuated(&self) -> bool {
        self.agents.iter().all(Agent::is_evacuated)
    }

    pub fn active_hazard_cell_count(&self) -> usize {
        self.hazard.cell_count()
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            session_id: self.session_id,
            timestamp: self.clock.timestamp(),
            arena_width: self.layout.width,
            arena_height: self.layout.height,
            alarm_on: self.alarm_on,
            agents: self.agents.iter().map(Agent::snapshot).collect(),
            hazard: evac_events::HazardSnapshot {
                active: self.hazard.is_active(),
                cells: self.hazard.cells().iter().map(|c| (*c).into()).collect(),
            },
            exits: self.layout.exits().iter().map(|e| (*e).into()).collect(),
            obstacles: self.layout.obstacles().iter().map(|o| (*o).into()).collect(),
            evacuated_count: self.evacuated_count(),
        }
    }

    /// Give back the random source, e.g. to inspect a scripted one
    pub fn into_rng(self) -> R {
        self.rng
    }
}

fn spawn_agents<R: RandomSource>(config: &SimConfig, rng: &mut R) -> Vec<Agent> {
    let spawn = &config.agents;
    let (min, max) = (spawn.spawn_min, spawn.spawn_max);
    let (low, high) = (1.0 - spawn.speed_jitter, 1.0 + spawn.speed_jitter);

    (0..spawn.count)
        .map(|i| {
            let x = rng.int_in_range(min.x.ceil() as i64, max.x.floor() as i64) as f64;
            let y = rng.int_in_range(min.y.ceil() as i64, max.y.floor() as i64) as f64;
            let speed = spawn.base_speed * rng.real_in_range(low, high);
            let position = Point2D::new(x.clamp(min.x, max.x), y.clamp(min.y, max.y));
            Agent::new(i as u32, position, speed)
        })
        .collect()
}
