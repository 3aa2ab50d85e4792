//! Rectangle geometry in page layout units.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with a top-left origin.
///
/// Coordinates are in layout units (points, 1/72 inch):
/// - `x0`: left edge
/// - `top`: top edge (distance from the top of the page)
/// - `x1`: right edge
/// - `bottom`: bottom edge (distance from the top of the page)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub top: f32,
    pub x1: f32,
    pub bottom: f32,
}

impl BBox {
    pub fn new(x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Grow `self` in place to cover `other`.
    pub fn extend(&mut self, other: &BBox) {
        *self = self.union(other);
    }

    /// Check whether `other` lies entirely inside `self` (edges inclusive).
    pub fn contains(&self, other: &BBox) -> bool {
        self.x0 <= other.x0
            && self.top <= other.top
            && self.x1 >= other.x1
            && self.bottom >= other.bottom
    }

    /// Check that every edge is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.x0, self.top, self.x1, self.bottom]
            .iter()
            .all(|v| v.is_finite())
    }

    /// A rectangle is valid when every edge is finite and it has positive area.
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && self.x1 > self.x0
            && self.bottom > self.top
    }

    /// Clip the rectangle to a `width` x `height` page.
    pub fn clamp_to(&self, width: f32, height: f32) -> BBox {
        BBox {
            x0: self.x0.max(0.0),
            top: self.top.max(0.0),
            x1: self.x1.min(width),
            bottom: self.bottom.min(height),
        }
    }
}
