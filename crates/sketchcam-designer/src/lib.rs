//! # SketchCAM Designer
//!
//! Compiles a hand-drawn sketch of simple shapes into a G-code program that
//! fits a fixed machine envelope.
//!
//! ## Architecture
//!
//! Data flows strictly forward:
//!
//! ```text
//! Capture (events → ShapeStore)
//!   └── Bounding box (union of shape bounds)
//!         └── Fit transform (uniform scale, centered on origin)
//!               └── Toolpath emitter (per-shape cut cycles)
//!                     └── G-code text
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sketchcam_designer::{GcodePipeline, Point, Rectangle, Shape};
//!
//! let shapes: Vec<Shape> = vec![Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0).into()];
//! let generation = GcodePipeline::default().generate(&shapes).unwrap();
//! assert!(generation.gcode().contains("G0 X-9.00 Y-9.00"));
//! ```

pub mod bounds;
pub mod capture;
pub mod file_io;
pub mod fit;
pub mod gcode_gen;
pub mod pipeline;
pub mod shape_store;
pub mod shapes;
pub mod toolpath;

pub use bounds::{compute_bounding_box, BoundingBox};
pub use capture::{CaptureEvent, CaptureOutcome, CaptureSession, CaptureState, DrawingMode};
pub use file_io::{load_program, load_sketch, save_program, save_sketch, Sketch};
pub use fit::{build_transform, FitTransform};
pub use gcode_gen::format_value;
pub use pipeline::{GcodePipeline, Generation};
pub use shape_store::{ShapeId, ShapeStore, SharedShapeStore};
pub use shapes::{Circle, Ellipse, Point, Polyline, Rectangle, Segment, Shape, ShapeError, ShapeType};
pub use toolpath::{
    ArcDirection, Emission, EmissionReport, MotionCommand, SkippedShape, ToolpathEmitter,
    ToolpathProgram,
};
