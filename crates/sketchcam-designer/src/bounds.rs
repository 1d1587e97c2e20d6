//! Bounding box over a set of captured shapes.

use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use sketchcam_core::GenerationError;

/// Axis-aligned box in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

impl From<(f64, f64, f64, f64)> for BoundingBox {
    fn from((min_x, min_y, max_x, max_y): (f64, f64, f64, f64)) -> Self {
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }
}

/// Union of every shape's bounds.
///
/// Fails with [`GenerationError::EmptyInput`] when there is nothing to bound,
/// so no transform is ever derived from an undefined box.
pub fn compute_bounding_box(shapes: &[Shape]) -> Result<BoundingBox, GenerationError> {
    let mut iter = shapes.iter().map(|s| BoundingBox::from(s.bounding_box()));
    let first = iter.next().ok_or(GenerationError::EmptyInput)?;
    Ok(iter.fold(first, |acc, b| acc.union(&b)))
}
