//! Machine envelope and cutting parameters.

use crate::constants::{
    DEFAULT_CUT_FEED, DEFAULT_CUT_Z, DEFAULT_MARGIN, DEFAULT_PLUNGE_FEED, DEFAULT_SAFE_Z,
    DEFAULT_X_RANGE, DEFAULT_Y_RANGE,
};
use crate::error::GenerationError;
use crate::units::Units;
use serde::{Deserialize, Serialize};

/// Physical travel available to a drawing.
///
/// Each range is centered on the machine origin, so the default 20 unit range
/// spans -10..10. The margin is removed from both ends of each axis before the
/// drawing is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineEnvelope {
    pub x_range: f64,
    pub y_range: f64,
    pub margin: f64,
}

impl Default for MachineEnvelope {
    fn default() -> Self {
        Self {
            x_range: DEFAULT_X_RANGE,
            y_range: DEFAULT_Y_RANGE,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl MachineEnvelope {
    /// Square envelope with the same range on both axes.
    pub fn square(axis_range: f64, margin: f64) -> Self {
        Self {
            x_range: axis_range,
            y_range: axis_range,
            margin,
        }
    }

    /// X travel left after both margins.
    pub fn usable_x(&self) -> f64 {
        self.x_range - 2.0 * self.margin
    }

    /// Y travel left after both margins.
    pub fn usable_y(&self) -> f64 {
        self.y_range - 2.0 * self.margin
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if !self.x_range.is_finite() || !self.y_range.is_finite() || !self.margin.is_finite() {
            return Err(GenerationError::InvalidEnvelope {
                reason: "ranges and margin must be finite".to_string(),
            });
        }
        if self.margin < 0.0 {
            return Err(GenerationError::InvalidEnvelope {
                reason: format!("margin must be >= 0, got {}", self.margin),
            });
        }
        if self.usable_x() <= 0.0 || self.usable_y() <= 0.0 {
            return Err(GenerationError::InvalidEnvelope {
                reason: format!(
                    "margin {} leaves no usable travel in {} x {}",
                    self.margin, self.x_range, self.y_range
                ),
            });
        }
        Ok(())
    }
}

/// Heights and feeds used for every cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutParameters {
    /// Retract height, above the stock
    pub safe_z: f64,
    /// Cut depth, below the stock top
    pub cut_z: f64,
    /// Feed rate for plunges
    pub plunge_feed: f64,
    /// Feed rate for cutting moves
    pub cut_feed: f64,
    pub units: Units,
}

impl Default for CutParameters {
    fn default() -> Self {
        Self {
            safe_z: DEFAULT_SAFE_Z,
            cut_z: DEFAULT_CUT_Z,
            plunge_feed: DEFAULT_PLUNGE_FEED,
            cut_feed: DEFAULT_CUT_FEED,
            units: Units::Millimeters,
        }
    }
}

impl CutParameters {
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            ("safe Z", self.safe_z),
            ("cut Z", self.cut_z),
            ("plunge feed", self.plunge_feed),
            ("cut feed", self.cut_feed),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{} must be finite, got {}", name, value));
        }
        if self.safe_z <= self.cut_z {
            return Err(format!(
                "safe Z ({}) must be above cut Z ({})",
                self.safe_z, self.cut_z
            ));
        }
        if self.plunge_feed <= 0.0 || self.cut_feed <= 0.0 {
            return Err("feed rates must be > 0".to_string());
        }
        Ok(())
    }
}
