//! Drill Scripts
//!
//! A headless run has no control panel, so the buttons an operator would press
//! are scheduled up front. `at_tick` counts ticks since the start of the run,
//! not since the last reset, so a scripted reset never re-triggers itself.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ConfigError;
use crate::geometry::Point2D;
use crate::rng::RandomSource;
use crate::world::World;

/// An operator action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrillAction {
    /// Sound the evacuation alarm
    RaiseAlarm,
    /// Ignite the hazard, at the configured ignition point when `origin` is absent
    StartHazard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        origin: Option<Point2D>,
    },
    /// Throw the world away and start over with the same configuration
    Reset,
}

impl DrillAction {
    /// Apply this action, returning the world to keep running.
    ///
    /// Only `Reset` replaces the world; it can fail only if the world's own
    /// configuration has become invalid.
    pub fn apply<R: RandomSource>(&self, mut world: World<R>) -> Result<World<R>, ConfigError> {
        match *self {
            DrillAction::RaiseAlarm => {
                world.set_alarm();
                Ok(world)
            }
            DrillAction::StartHazard { origin } => {
                let origin = origin.unwrap_or(world.config().hazard.ignition);
                world.start_hazard(origin);
                Ok(world)
            }
            DrillAction::Reset => world.restart(),
        }
    }
}

/// An action pinned to a run tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAction {
    pub at_tick: u64,
    pub action: DrillAction,
}

/// Ordered list of scheduled actions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillScript {
    pub actions: Vec<ScheduledAction>,
}

impl DrillScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append
    pub fn with(mut self, at_tick: u64, action: DrillAction) -> Self {
        self.schedule(at_tick, action);
        self
    }

    pub fn schedule(&mut self, at_tick: u64, action: DrillAction) {
        self.actions.push(ScheduledAction { at_tick, action });
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions due at `tick`, in declaration order
    pub fn due(&self, tick: u64) -> impl Iterator<Item = &DrillAction> + '_ {
        self.actions
            .iter()
            .filter(move |s| s.at_tick == tick)
            .map(|s| &s.action)
    }

    /// Last tick with a scheduled action
    pub fn last_tick(&self) -> Option<u64> {
        self.actions.iter().map(|s| s.at_tick).max()
    }

    /// Apply every action due at `tick` to `world`
    pub fn run_due<R: RandomSource>(
        &self,
        tick: u64,
        mut world: World<R>,
    ) -> Result<World<R>, ConfigError> {
        for action in self.due(tick) {
            info!(tick, ?action, "Drill action");
            world = action.apply(world)?;
        }
        Ok(world)
    }
}
