//! Geometry primitives
//!
//! Points and axis-aligned rectangles in arena space, plus the two tests the
//! engine needs: Euclidean distance and rectangle overlap.

use evac_events::{PointRecord, RectRecord};
use serde::{Deserialize, Serialize};

/// A position in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point2D) -> f64 {
        distance(*self, other)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point2D> for PointRecord {
    fn from(p: Point2D) -> Self {
        PointRecord { x: p.x, y: p.y }
    }
}

impl From<PointRecord> for Point2D {
    fn from(p: PointRecord) -> Self {
        Point2D::new(p.x, p.y)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// Overlap is half-open: a rectangle covers `[x, x + width) × [y, y + height)`,
/// so two rectangles that only share an edge do not intersect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `size × size` square centered on `center`
    pub fn centered(center: Point2D, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }

    pub fn contains(&self, point: Point2D) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

impl From<Rect> for RectRecord {
    fn from(r: Rect) -> Self {
        RectRecord {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

/// Euclidean distance between two points
pub fn distance(a: Point2D, b: Point2D) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Half-open overlap test. Empty rectangles never intersect anything.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    if a.width <= 0.0 || a.height <= 0.0 || b.width <= 0.0 || b.height <= 0.0 {
        return false;
    }
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}
