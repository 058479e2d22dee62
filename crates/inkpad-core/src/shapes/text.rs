//! Text shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A static text run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Baseline start position.
    pub position: Point,
    /// The text content. Never empty: empty input cancels creation upstream.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Text {
    /// Font size applied to every placed text run.
    pub const FONT_SIZE: f64 = 16.0;

    /// Average glyph advance as a fraction of the font size, for approximate
    /// bounds without a text layout engine.
    const GLYPH_ADVANCE: f64 = 0.6;

    /// Create a new text shape.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size: Self::FONT_SIZE,
            style: ShapeStyle::default(),
        }
    }

    fn approx_width(&self) -> f64 {
        self.content.chars().count() as f64 * self.font_size * Self::GLYPH_ADVANCE
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        // Approximate: baseline at position.y, ascent of one font size
        Rect::new(
            self.position.x,
            self.position.y - self.font_size,
            self.position.x + self.approx_width(),
            self.position.y,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        // Glyph outlines belong to the renderer; the bounding box stands in
        self.bounds().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate_by(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
