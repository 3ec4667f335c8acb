//! Proportional fit of a packed layout into a target rectangle.

use serde::{Deserialize, Serialize};

use crate::packer::PackedLayout;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Uniform scale plus translation mapping packed coordinates into a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    /// Uniform scale factor applied to packed coordinates and sizes
    pub scale: f64,
    /// Horizontal origin of the scaled layout inside the target
    pub offset_x: f64,
    /// Vertical origin of the scaled layout inside the target
    pub offset_y: f64,
}

impl FitTransform {
    /// Map a packed-space point to target-space coordinates
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }
}

/// Compute the transform that scales `packed` proportionally to fill as
/// much of `target` as possible and centers it on both axes.
///
/// A degenerate zero-size layout maps with scale 1.0.
pub fn fit_into<M>(packed: &PackedLayout<M>, target: &Rect) -> FitTransform {
    let mut scale = (target.width / packed.width).min(target.height / packed.height);
    if !scale.is_finite() {
        scale = 1.0;
    }
    let offset_x = target.x + (target.width - packed.width * scale) / 2.0;
    let offset_y = target.y + (target.height - packed.height * scale) / 2.0;
    FitTransform {
        scale,
        offset_x,
        offset_y,
    }
}
