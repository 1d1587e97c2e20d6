//! Error handling for SketchCAM
//!
//! Provides error types for all layers of the compiler and its hand-off:
//! - Generation errors (empty or degenerate drawings, bad envelopes)
//! - Unsupported shape errors (a single shape skipped during emission)
//! - Controller errors (machine-control connection)
//! - Hand-off errors (which step of the hand-off sequence failed)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::machine::HandoffStep;
use thiserror::Error;

/// Errors that halt program generation before any motion is emitted.
///
/// None of these are fatal to the process: the captured shapes are left
/// untouched and the caller can retry after editing the drawing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// No shapes were captured
    #[error("No valid shapes to generate G-code")]
    EmptyInput,

    /// The bounding box has zero width or zero height
    #[error("Drawing is degenerate ({width:.2} x {height:.2}); cannot scale to the machine envelope")]
    DegenerateDrawing {
        /// Bounding box width in canvas units.
        width: f64,
        /// Bounding box height in canvas units.
        height: f64,
    },

    /// The usable envelope (range minus both margins) is not positive
    #[error("Invalid machine envelope: {reason}")]
    InvalidEnvelope {
        /// What is wrong with the envelope.
        reason: String,
    },
}

/// Reason a single shape produced no toolpath.
///
/// Emission continues with the remaining shapes; these are collected in the
/// emission report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnsupportedShapeError {
    /// A circle whose enclosing rectangle is not square
    #[error("Circle is not round: enclosing rectangle is {width:.2} x {height:.2}")]
    NonSquareCircle {
        /// Enclosing rectangle width.
        width: f64,
        /// Enclosing rectangle height.
        height: f64,
    },

    /// Ellipses are captured and bounded but never cut
    #[error("Ellipse toolpaths are not generated")]
    EllipseNotEmitted,

    /// Geometry collapses to a point or a line where an area or length is needed
    #[error("Degenerate {kind}: {reason}")]
    Degenerate {
        /// The shape kind name.
        kind: String,
        /// Why the geometry cannot be cut.
        reason: String,
    },
}

/// Controller error type
///
/// Represents errors reported by (or while talking to) the machine-control
/// collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControllerError {
    /// Controller is not connected
    #[error("Controller not connected")]
    NotConnected,

    /// Controller operation timed out
    #[error("Controller operation timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Command was rejected by controller
    #[error("Command rejected: {reason}")]
    CommandRejected {
        /// The reason the command was rejected.
        reason: String,
    },

    /// The controller answered with something we do not understand
    #[error("Unexpected controller reply: {reply}")]
    UnexpectedReply {
        /// The raw reply line.
        reply: String,
    },

    /// Transport failure
    #[error("Controller I/O error: {reason}")]
    Io {
        /// The underlying I/O failure.
        reason: String,
    },
}

impl From<std::io::Error> for ControllerError {
    fn from(err: std::io::Error) -> Self {
        ControllerError::Io {
            reason: err.to_string(),
        }
    }
}

/// A failed hand-off to the machine-control collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Hand-off failed at step '{step}': {reason}")]
pub struct HandoffError {
    /// The step that failed; later steps were not attempted.
    pub step: HandoffStep,
    /// Human readable cause.
    pub reason: String,
}

impl HandoffError {
    pub fn new(step: HandoffStep, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
        }
    }
}

/// Main error type for SketchCAM
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Generation error
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Unsupported shape
    #[error(transparent)]
    UnsupportedShape(#[from] UnsupportedShapeError),

    /// Controller error
    #[error(transparent)]
    Controller(#[from] ControllerError),

    /// Hand-off error
    #[error(transparent)]
    Handoff(#[from] HandoffError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
