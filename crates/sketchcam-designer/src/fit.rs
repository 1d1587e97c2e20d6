//! Fit transform from canvas space into the machine envelope.
//!
//! One scale factor is used for both axes (the smaller of the two fit ratios)
//! so the drawing keeps its aspect ratio, and the scaled drawing is centered
//! on the machine origin.

use crate::bounds::BoundingBox;
use crate::shapes::Point;
use serde::{Deserialize, Serialize};
use sketchcam_core::constants::GEOMETRY_EPSILON;
use sketchcam_core::{GenerationError, MachineEnvelope};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitTransform {
    scale: f64,
    origin: Point,
    width: f64,
    height: f64,
}

impl FitTransform {
    /// Uniform scale factor, machine units per canvas unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a canvas point into machine space.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.origin.x) * self.scale - self.width * self.scale / 2.0,
            (p.y - self.origin.y) * self.scale - self.height * self.scale / 2.0,
        )
    }

    /// Maps a canvas length (e.g. a radius) into machine units.
    pub fn scale_length(&self, length: f64) -> f64 {
        length * self.scale
    }
}

/// Derives the transform that fits `bbox` inside `envelope`.
///
/// A box with zero (or non-finite) width or height has no finite fit ratio on
/// that axis and is rejected as [`GenerationError::DegenerateDrawing`].
pub fn build_transform(
    bbox: &BoundingBox,
    envelope: &MachineEnvelope,
) -> Result<FitTransform, GenerationError> {
    envelope.validate()?;

    let width = bbox.width();
    let height = bbox.height();
    let usable = |w: f64| w.is_finite() && w > GEOMETRY_EPSILON;
    if !usable(width) || !usable(height) {
        return Err(GenerationError::DegenerateDrawing { width, height });
    }

    let scale_x = envelope.usable_x() / width;
    let scale_y = envelope.usable_y() / height;
    let scale = scale_x.min(scale_y);
    tracing::debug!(
        "Fit {:.3} x {:.3} drawing into {} x {} envelope: scale {:.4}",
        width,
        height,
        envelope.x_range,
        envelope.y_range,
        scale
    );

    Ok(FitTransform {
        scale,
        origin: Point::new(bbox.min_x, bbox.min_y),
        width,
        height,
    })
}
