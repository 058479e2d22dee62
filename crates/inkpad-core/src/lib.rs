//! inkpad core library
//!
//! Headless engine for a vector drawing editor: shapes, the document arena,
//! and the gesture state machine that turns pointer events into shape
//! creation, selection, dragging, and canvas lifecycle operations.

pub mod document;
pub mod editor;
pub mod input;
pub mod shapes;
pub mod tools;

pub use document::Document;
pub use editor::{Editor, HIT_TOLERANCE, SelectionRecord, TextRequest, Theme};
pub use input::{Key, PointerEvent};
pub use shapes::{
    Circle, Color, Freehand, Line, PathCmd, PathData, Rectangle, Shape, ShapeId, ShapeStyle,
    ShapeTrait, Text, translate_str,
};
pub use tools::ToolKind;
