//! Configuration System
//!
//! Loads drill parameters from a TOML tuning file. Every constant the engine
//! uses lives here so scenarios can be run at any scale.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::drill::{DrillAction, DrillScript};
use crate::geometry::{Point2D, Rect};

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "drill.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub arena: ArenaConfig,
    pub agents: AgentConfig,
    pub hazard: HazardConfig,
    pub clock: ClockConfig,
    pub drill: DrillScript,
}

/// Simulated area and its fixed layout.
///
/// `width` covers only the habitable area; any side panel a renderer draws
/// is outside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    /// Hazard cells are kept at least this far inside every edge
    pub hazard_margin: f64,
    pub exits: Vec<Point2D>,
    pub obstacles: Vec<Rect>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 650.0,
            hazard_margin: 50.0,
            exits: vec![Point2D::new(850.0, 120.0), Point2D::new(850.0, 530.0)],
            obstacles: vec![
                Rect::new(250.0, 0.0, 30.0, 450.0),
                Rect::new(500.0, 200.0, 30.0, 450.0),
                Rect::new(100.0, 350.0, 200.0, 30.0),
            ],
        }
    }
}

impl ArenaConfig {
    pub fn contains(&self, point: Point2D) -> bool {
        point.is_finite()
            && point.x >= 0.0
            && point.x <= self.width
            && point.y >= 0.0
            && point.y <= self.height
    }
}

/// Agent spawning and behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub count: usize,
    /// Movement per tick before jitter and panic
    pub base_speed: f64,
    /// Each agent's speed is `base_speed * U(1 - jitter, 1 + jitter)`
    pub speed_jitter: f64,
    /// Spawn positions are integers drawn from `[spawn_min, spawn_max]`
    pub spawn_min: Point2D,
    pub spawn_max: Point2D,
    pub panic_multiplier: f64,
    /// Added once per nearby hazard cell per tick
    pub panic_increment: f64,
    pub panic_ceiling: f64,
    pub hazard_proximity_radius: f64,
    pub arrival_radius: f64,
    /// Side of the square used for obstacle collision
    pub collision_box_size: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            count: 45,
            base_speed: 1.1,
            speed_jitter: 0.2,
            spawn_min: Point2D::new(50.0, 50.0),
            spawn_max: Point2D::new(700.0, 600.0),
            panic_multiplier: 1.8,
            panic_increment: 0.025,
            panic_ceiling: 1.0,
            hazard_proximity_radius: 90.0,
            arrival_radius: 12.0,
            collision_box_size: 10.0,
        }
    }
}

/// Hazard spread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Virtual time units between spread steps
    pub spread_interval: f64,
    /// New cells are offset by an integer in `[-spread_jitter, spread_jitter]` per axis
    pub spread_jitter: i64,
    /// Where `start_hazard` ignites when no position is given
    pub ignition: Point2D,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            spread_interval: 2.0,
            spread_jitter: 50,
            ignition: Point2D::new(450.0, 300.0),
        }
    }
}

/// Virtual clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Virtual time units per tick
    pub time_step: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { time_step: 0.1 }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::from_file(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            warn!("Could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }

    /// Check every precondition the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        let agents = &self.agents;

        positive("arena.width", arena.width)?;
        positive("arena.height", arena.height)?;
        non_negative("arena.hazard_margin", arena.hazard_margin)?;
        if 2.0 * arena.hazard_margin > arena.width || 2.0 * arena.hazard_margin > arena.height {
            return Err(ConfigError::ArenaTooSmall {
                width: arena.width,
                height: arena.height,
                margin: arena.hazard_margin,
            });
        }

        if arena.exits.is_empty() {
            return Err(ConfigError::NoExits);
        }
        for (index, exit) in arena.exits.iter().enumerate() {
            if !arena.contains(*exit) {
                return Err(ConfigError::ExitOutsideArena {
                    index,
                    x: exit.x,
                    y: exit.y,
                });
            }
        }
        for (index, obstacle) in arena.obstacles.iter().enumerate() {
            if !(obstacle.width > 0.0 && obstacle.height > 0.0)
                || !obstacle.x.is_finite()
                || !obstacle.y.is_finite()
            {
                return Err(ConfigError::DegenerateObstacle {
                    index,
                    width: obstacle.width,
                    height: obstacle.height,
                });
            }
        }

        if agents.count == 0 {
            return Err(ConfigError::NoAgents);
        }
        positive("agents.base_speed", agents.base_speed)?;
        if !(0.0..1.0).contains(&agents.speed_jitter) {
            return Err(ConfigError::InvalidSpeedJitter(agents.speed_jitter));
        }
        let (min, max) = (agents.spawn_min, agents.spawn_max);
        if !(min.x <= max.x && min.y <= max.y && arena.contains(min) && arena.contains(max)) {
            return Err(ConfigError::InvalidSpawnRegion {
                min_x: min.x,
                min_y: min.y,
                max_x: max.x,
                max_y: max.y,
            });
        }
        non_negative("agents.panic_multiplier", agents.panic_multiplier)?;
        non_negative("agents.panic_increment", agents.panic_increment)?;
        if !(agents.panic_ceiling > 0.0 && agents.panic_ceiling <= 1.0) {
            return Err(ConfigError::InvalidPanicCeiling(agents.panic_ceiling));
        }
        non_negative("agents.hazard_proximity_radius", agents.hazard_proximity_radius)?;
        positive("agents.arrival_radius", agents.arrival_radius)?;
        positive("agents.collision_box_size", agents.collision_box_size)?;

        positive("hazard.spread_interval", self.hazard.spread_interval)?;
        if self.hazard.spread_jitter < 0 {
            return Err(ConfigError::Negative {
                field: "hazard.spread_jitter",
                value: self.hazard.spread_jitter as f64,
            });
        }
        if !arena.contains(self.hazard.ignition) {
            return Err(ConfigError::IgnitionOutsideArena {
                x: self.hazard.ignition.x,
                y: self.hazard.ignition.y,
            });
        }

        positive("clock.time_step", self.clock.time_step)?;

        for scheduled in &self.drill.actions {
            if let DrillAction::StartHazard {
                origin: Some(origin),
            } = scheduled.action
            {
                if !arena.contains(origin) {
                    return Err(ConfigError::DrillTargetOutsideArena {
                        tick: scheduled.at_tick,
                        x: origin.x,
                        y: origin.y,
                    });
                }
            }
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails this comparison too
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("agent count must be at least 1")]
    NoAgents,
    #[error("at least one exit is required")]
    NoExits,
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("arena {width}x{height} leaves no room inside hazard margin {margin}")]
    ArenaTooSmall { width: f64, height: f64, margin: f64 },
    #[error("spawn region ({min_x}, {min_y})..({max_x}, {max_y}) must be ordered and inside the arena")]
    InvalidSpawnRegion {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
    #[error("speed jitter must be in [0, 1), got {0}")]
    InvalidSpeedJitter(f64),
    #[error("panic ceiling must be in (0, 1], got {0}")]
    InvalidPanicCeiling(f64),
    #[error("exit {index} at ({x}, {y}) lies outside the arena")]
    ExitOutsideArena { index: usize, x: f64, y: f64 },
    #[error("obstacle {index} has non-positive size {width}x{height}")]
    DegenerateObstacle { index: usize, width: f64, height: f64 },
    #[error("ignition point ({x}, {y}) lies outside the arena")]
    IgnitionOutsideArena { x: f64, y: f64 },
    #[error("drill action at tick {tick} targets ({x}, {y}) outside the arena")]
    DrillTargetOutsideArena { tick: u64, x: f64, y: f64 },
}
