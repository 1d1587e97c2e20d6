//! Sketch and program files.
//!
//! A sketch is JSON holding shapes, a recorded capture-event list, or both.
//! Shapes are added first, then events are replayed through a fresh capture
//! session, so a sketch can describe either a finished drawing or the clicks
//! that produced it.

use crate::capture::{replay, CaptureEvent};
use crate::shape_store::ShapeStore;
use crate::shapes::Shape;
use crate::toolpath::ToolpathProgram;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<CaptureEvent>,
}

impl Sketch {
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self {
            shapes,
            events: Vec::new(),
        }
    }

    /// Builds a store from the shapes and the replayed events.
    pub fn to_store(&self) -> ShapeStore {
        let mut store = ShapeStore::new();
        for shape in &self.shapes {
            store.add_shape(shape.clone());
        }
        replay(&self.events, &mut store);
        store
    }
}

pub fn load_sketch(path: &Path) -> Result<Sketch> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sketch {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid sketch file {}", path.display()))
}

pub fn save_sketch(path: &Path, sketch: &Sketch) -> Result<()> {
    let content = serde_json::to_string_pretty(sketch).context("Failed to serialize sketch")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write sketch {}", path.display()))
}

/// Writes program text followed by a final newline.
pub fn save_program(path: &Path, program: &ToolpathProgram) -> Result<()> {
    let mut text = program.to_gcode();
    text.push('\n');
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write program {}", path.display()))?;
    tracing::info!("Saved program to {}", path.display());
    Ok(())
}

/// Reads an existing program file as text.
pub fn load_program(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read program {}", path.display()))
}
