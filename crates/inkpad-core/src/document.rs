//! Document state: the arena of shapes and their stacking order.

use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A drawing document: all shapes keyed by id, stacked in insertion order
/// (back to front).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// All shapes in the document, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Stacking order of shapes (back to front); also the insertion order.
    order: Vec<ShapeId>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of the stack.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Remove the most recently inserted shape. No-op on an empty document.
    pub fn undo_last(&mut self) -> Option<Shape> {
        let id = self.order.pop()?;
        self.shapes.remove(&id)
    }

    /// Clear all shapes from the document.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.order.clear();
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Whether a shape with this ID exists.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Get shapes in stacking order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Stacking order of shape IDs (back to front).
    pub fn order(&self) -> &[ShapeId] {
        &self.order
    }

    /// Find the topmost shape hit at a point.
    pub fn top_shape_at(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.order
            .iter()
            .rev()
            .find(|&&id| {
                self.shapes
                    .get(&id)
                    .is_some_and(|s| s.hit_test(point, tolerance))
            })
            .copied()
    }

    /// Get the bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for shape in self.shapes.values() {
            let bounds = shape.bounds();
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}
