//! Arena layout: bounds, exits and obstacles. Fixed for a session.

use crate::config::ArenaConfig;
use crate::geometry::{distance, Point2D, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    exits: Vec<Point2D>,
    obstacles: Vec<Rect>,
}

impl Layout {
    pub fn new(width: f64, height: f64, exits: Vec<Point2D>, obstacles: Vec<Rect>) -> Self {
        Self {
            width,
            height,
            exits,
            obstacles,
        }
    }

    pub fn from_config(arena: &ArenaConfig) -> Self {
        Self::new(
            arena.width,
            arena.height,
            arena.exits.clone(),
            arena.obstacles.clone(),
        )
    }

    pub fn exits(&self) -> &[Point2D] {
        &self.exits
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    /// Closest exit to `from`, with its index. Ties go to the earlier exit.
    pub fn nearest_exit(&self, from: Point2D) -> Option<(usize, Point2D)> {
        let mut best: Option<(usize, Point2D, f64)> = None;
        for (index, exit) in self.exits.iter().enumerate() {
            let d = distance(from, *exit);
            // strict less-than keeps the first minimum
            if best.map_or(true, |(_, _, best_d)| d < best_d) {
                best = Some((index, *exit, d));
            }
        }
        best.map(|(index, exit, _)| (index, exit))
    }

    /// True if `area` overlaps any obstacle
    pub fn is_blocked(&self, area: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.intersects(area))
    }
}
