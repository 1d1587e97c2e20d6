//! # SketchCAM Core
//!
//! Core types shared by every SketchCAM crate: error kinds, the machine
//! envelope and cutting parameters, program units, and the vocabulary of the
//! machine-control hand-off.

pub mod constants;
pub mod data;
pub mod error;
pub mod machine;
pub mod units;

pub use data::{CutParameters, MachineEnvelope};
pub use error::{
    ControllerError, Error, GenerationError, HandoffError, UnsupportedShapeError,
};
pub use machine::{Axis, HandoffStep, MachineMode, MachineState};
pub use units::Units;
