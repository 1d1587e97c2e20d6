//! Capture snapshot → bounding box → fit transform → toolpath.
//!
//! Every stage is a plain function over explicit inputs; the pipeline only
//! bundles the machine envelope and cutting parameters so callers do not have
//! to thread them through by hand.

use crate::bounds::{compute_bounding_box, BoundingBox};
use crate::fit::{build_transform, FitTransform};
use crate::shape_store::SharedShapeStore;
use crate::shapes::Shape;
use crate::toolpath::{EmissionReport, ToolpathEmitter, ToolpathProgram};
use sketchcam_core::{CutParameters, GenerationError, MachineEnvelope};

/// Result of a successful generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub bounding_box: BoundingBox,
    pub transform: FitTransform,
    pub program: ToolpathProgram,
    pub report: EmissionReport,
}

impl Generation {
    pub fn gcode(&self) -> String {
        self.program.to_gcode()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GcodePipeline {
    envelope: MachineEnvelope,
    emitter: ToolpathEmitter,
}

impl GcodePipeline {
    pub fn new(envelope: MachineEnvelope, params: CutParameters) -> Self {
        Self {
            envelope,
            emitter: ToolpathEmitter::new(params),
        }
    }

    pub fn envelope(&self) -> &MachineEnvelope {
        &self.envelope
    }

    /// Compiles `shapes` into a program.
    ///
    /// Halts with [`GenerationError::EmptyInput`] before building a transform
    /// when there are no shapes, and with
    /// [`GenerationError::DegenerateDrawing`] before emission when the drawing
    /// has no area. Individual unsupported shapes do not fail the run; they
    /// are listed in the report.
    pub fn generate(&self, shapes: &[Shape]) -> Result<Generation, GenerationError> {
        let bounding_box = compute_bounding_box(shapes)?;
        let transform = build_transform(&bounding_box, &self.envelope)?;
        let emission = self.emitter.emit(shapes, &transform);
        tracing::info!(
            "Generated {} commands from {} shapes ({} skipped)",
            emission.program.len(),
            shapes.len(),
            emission.report.skipped.len()
        );
        Ok(Generation {
            bounding_box,
            transform,
            program: emission.program,
            report: emission.report,
        })
    }

    /// Compiles a snapshot of a store that may still be receiving shapes.
    pub fn generate_from_store(
        &self,
        store: &SharedShapeStore,
    ) -> Result<Generation, GenerationError> {
        let shapes = store.snapshot();
        self.generate(&shapes)
    }
}
