//! inkpad SVG backend
//!
//! Renders an inkpad document to a typed SVG node tree and serializes it to
//! standalone markup, including the canvas background grid and the selection
//! highlight; also writes the flat `drawing.svg` export.

pub mod export;
pub mod node;
pub mod writer;

pub use export::{EXPORT_FILE_NAME, ExportError, export_drawing};
pub use node::{SvgNode, is_selectable};
pub use writer::{GRID_PATTERN_ID, RenderOptions, build_nodes, write_svg};
