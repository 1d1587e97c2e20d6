//! Owned, id-indexed collection of captured shapes.
//!
//! Shapes are kept in capture order; ids are never reused within a store, so
//! an id handed to the rendering layer stays valid until that shape is removed
//! or the store is cleared.

use crate::shapes::Shape;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable identifier of a captured shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    entries: Vec<(ShapeId, Shape)>,
    next_id: u64,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a shape as-is and returns its id. Degenerate geometry is accepted.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        let shape = shape.into();
        tracing::debug!("Captured {} {}", shape.shape_type(), id);
        self.entries.push((id, shape));
        id
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, shape)| shape)
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Moves a shape by (dx, dy). Returns false if the id is unknown.
    pub fn move_shape(&mut self, id: ShapeId, dx: f64, dy: f64) -> bool {
        match self.entries.iter_mut().find(|(entry_id, _)| *entry_id == id) {
            Some((_, shape)) => {
                shape.translate(dx, dy);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shapes with their ids, in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.entries.iter().map(|(id, shape)| (*id, shape))
    }

    pub fn ids(&self) -> Vec<ShapeId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    /// Owned copy of the shapes in capture order, for emission.
    pub fn snapshot(&self) -> Vec<Shape> {
        self.entries.iter().map(|(_, shape)| shape.clone()).collect()
    }
}

/// Store shared between a capture context and an emission context.
///
/// Writers take the write lock for a whole capture event, so a reader never
/// sees a half-added shape; emission works on [`SharedShapeStore::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SharedShapeStore {
    inner: Arc<RwLock<ShapeStore>>,
}

impl SharedShapeStore {
    pub fn new(store: ShapeStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn add_shape(&self, shape: impl Into<Shape>) -> ShapeId {
        self.inner.write().add_shape(shape)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Shape> {
        self.inner.read().snapshot()
    }

    /// Runs `f` with exclusive access, e.g. to feed a capture session.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut ShapeStore) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }
}
