//! Screen geometry in global display coordinates.
//!
//! Coordinates follow the window server convention: the origin is the
//! top-left corner of the main display and `y` grows downwards, so a
//! rectangle's `min_y` is its top edge and `max_y` its bottom edge.

use serde::{Deserialize, Serialize};

/// A point in global screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle (origin + size) in global screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
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

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Top edge
    pub fn min_y(&self) -> f64 {
        self.y
    }

    /// Bottom edge
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Whether `other` lies entirely inside this rectangle (edges inclusive)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }

    /// Whether the two rectangles share a region of non-zero area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    /// Whether the two rectangles share part of their vertical extent
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.min_y() < other.max_y() && other.min_y() < self.max_y()
    }

    /// Whether both rectangles span exactly the same vertical extent
    pub fn same_vertical_extent(&self, other: &Rect) -> bool {
        self.min_y() == other.min_y() && self.max_y() == other.max_y()
    }
}
