//! Hazard Process
//!
//! The fire is a growing list of cells. Once ignited it spreads on a fixed
//! virtual-time cadence: each step copies a random existing cell, nudges it
//! by a random integer offset and clamps it inside the hazard margin.
//! Growth is unbounded and cells are never removed or de-duplicated.

use tracing::debug;

use crate::config::SimConfig;
use crate::geometry::Point2D;
use crate::rng::RandomSource;

/// Tolerance for comparing elapsed virtual time against the spread interval
const TIME_EPSILON: f64 = 1e-9;

/// Spread cadence and bounds, derived from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadRules {
    pub interval: f64,
    pub jitter: i64,
    /// Inclusive clamp bounds for new cells
    pub min: Point2D,
    pub max: Point2D,
}

impl SpreadRules {
    pub fn from_config(config: &SimConfig) -> Self {
        let margin = config.arena.hazard_margin;
        Self {
            interval: config.hazard.spread_interval,
            jitter: config.hazard.spread_jitter,
            min: Point2D::new(margin, margin),
            max: Point2D::new(config.arena.width - margin, config.arena.height - margin),
        }
    }

    fn clamp(&self, p: Point2D) -> Point2D {
        Point2D::new(p.x.clamp(self.min.x, self.max.x), p.y.clamp(self.min.y, self.max.y))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HazardProcess {
    active: bool,
    cells: Vec<Point2D>,
    /// Virtual time of the last spread, or of ignition
    last_spread_at: f64,
}

impl HazardProcess {
    /// An inert hazard with no cells
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cells in insertion order
    pub fn cells(&self) -> &[Point2D] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Ignite at `origin`. Returns false, changing nothing, if already active.
    pub fn ignite(&mut self, origin: Point2D, now: f64) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.cells.push(origin);
        self.last_spread_at = now;
        true
    }

    /// Run every spread step that has come due by `now`, returning the new cells.
    ///
    /// More than one step runs only if a single tick spans several intervals.
    pub fn advance<R: RandomSource + ?Sized>(
        &mut self,
        now: f64,
        rules: &SpreadRules,
        rng: &mut R,
    ) -> Vec<Point2D> {
        let mut added = Vec::new();
        if !self.active {
            return added;
        }
        while now - self.last_spread_at + TIME_EPSILON >= rules.interval {
            self.last_spread_at += rules.interval;
            let cell = self.spread_once(rules, rng);
            debug!(x = cell.x, y = cell.y, cells = self.cells.len(), "Hazard spread");
            added.push(cell);
        }
        added
    }

    fn spread_once<R: RandomSource + ?Sized>(&mut self, rules: &SpreadRules, rng: &mut R) -> Point2D {
        let source = self.cells[rng.pick_index(self.cells.len())];
        let dx = rng.int_in_range(-rules.jitter, rules.jitter) as f64;
        let dy = rng.int_in_range(-rules.jitter, rules.jitter) as f64;
        let cell = rules.clamp(Point2D::new(source.x + dx, source.y + dy));
        self.cells.push(cell);
        cell
    }
}
