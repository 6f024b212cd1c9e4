//! Screen-space geometry types
//!
//! Native windowing systems report positions and sizes in whole pixels,
//! so everything here is integer based.

use serde::{Deserialize, Serialize};

/// A point in screen or window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise offset by a delta
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left corner
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Center point (rounded toward the top-left)
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Whether `p` lies inside the rectangle (right/bottom edges exclusive)
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.w && p.y < self.y + self.h
    }

    /// Whether only the size differs from `other`
    pub const fn same_size(&self, other: &Self) -> bool {
        self.w == other.w && self.h == other.h
    }

    /// Center a rectangle of this size inside `area`
    pub const fn centered_in(&self, area: &Self) -> Self {
        Self::new(
            area.x + (area.w - self.w) / 2,
            area.y + (area.h - self.h) / 2,
            self.w,
            self.h,
        )
    }
}
