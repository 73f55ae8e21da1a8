//! Axis-aligned rectangles and viewport metrics
//!
//! Screen space: origin at the top-left corner, y grows downward.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Negative extents are clamped to zero
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Rectangle with its top-left corner at `pos`
    pub fn at(pos: DVec2, width: f64, height: f64) -> Self {
        Self::new(pos.x, pos.y, width, height)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Shift along x by `dx`
    pub fn translated_x(&self, dx: f64) -> Self {
        Self { x: self.x + dx, ..*self }
    }
}

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Tile edge length: the shorter canvas side split into `divisor` tiles
    pub fn tile_size(&self, divisor: f64) -> f64 {
        self.width.min(self.height) / divisor
    }

    /// Everything a level layout is measured against
    pub fn metrics(&self, divisor: f64) -> Metrics {
        Metrics {
            tile: self.tile_size(divisor),
            width: self.width,
            height: self.height,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Resolved units for laying out a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub tile: f64,
    pub width: f64,
    pub height: f64,
}

impl Metrics {
    /// Top edge of the floor row
    pub fn floor_y(&self) -> f64 {
        self.height - self.tile
    }
}
