//! Integer geometry in terminal cells.

use ratatui::layout::Size;
use serde::{Deserialize, Serialize};

/// A position or displacement measured in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Add `offset` and wrap toroidally inside `bounds`.
    ///
    /// A zero-sized axis is treated as one cell wide so the result is
    /// always well defined.
    pub fn wrapping_offset(self, offset: Point, bounds: Size) -> Point {
        let w = i32::from(bounds.width.max(1));
        let h = i32::from(bounds.height.max(1));
        Point {
            x: (self.x + offset.x).rem_euclid(w),
            y: (self.y + offset.y).rem_euclid(h),
        }
    }
}

/// Footprint of one star sprite, used to lay out the placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }
}

impl CellSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Number of whole cells that fit in `bounds` as `(cols, rows)`.
    pub fn grid(self, bounds: Size) -> (u16, u16) {
        (
            bounds.width / self.width.max(1),
            bounds.height / self.height.max(1),
        )
    }
}
