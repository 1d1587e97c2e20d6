//! Program units
//!
//! The emitted dialect always selects its unit system up front.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length units of an emitted program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Millimeters (G21)
    #[default]
    #[serde(alias = "mm")]
    Millimeters,
    /// Inches (G20)
    #[serde(alias = "in", alias = "inch")]
    Inches,
}

impl Units {
    /// The G-code word that selects these units.
    pub fn gcode_word(self) -> &'static str {
        match self {
            Self::Millimeters => "G21",
            Self::Inches => "G20",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeters => write!(f, "mm"),
            Self::Inches => write!(f, "in"),
        }
    }
}
