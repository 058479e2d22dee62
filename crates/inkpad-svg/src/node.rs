//! Typed SVG node tree, built by the writer before serialization.
//!
//! The document root (`<svg>`) is not a node: the writer emits it around the
//! tree, so the root can never enter hit-testing or selection.

use inkpad_core::shapes::fmt_num;
use std::fmt;

/// An attribute length: device pixels or a percentage of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{}", fmt_num(*v)),
            Length::Percent(v) => write!(f, "{}%", fmt_num(*v)),
        }
    }
}

/// `<rect>` element.
#[derive(Debug, Clone, Default)]
pub struct SvgRect {
    pub x: f64,
    pub y: f64,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub class: Option<String>,
    pub style: Option<String>,
}

/// `<circle>` element.
#[derive(Debug, Clone, Default)]
pub struct SvgCircle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub class: Option<String>,
    pub style: Option<String>,
}

/// `<line>` element.
#[derive(Debug, Clone, Default)]
pub struct SvgLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub class: Option<String>,
    pub style: Option<String>,
}

/// `<path>` element.
#[derive(Debug, Clone, Default)]
pub struct SvgPath {
    pub d: String,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_linecap: Option<String>,
    pub stroke_linejoin: Option<String>,
    pub class: Option<String>,
    pub style: Option<String>,
}

/// `<text>` element.
#[derive(Debug, Clone, Default)]
pub struct SvgText {
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub fill: Option<String>,
    pub class: Option<String>,
    pub style: Option<String>,
    pub content: String,
}

/// `<pattern>` container.
#[derive(Debug, Clone)]
pub struct SvgPattern {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub children: Vec<SvgNode>,
}

/// One node of the document tree.
#[derive(Debug, Clone)]
pub enum SvgNode {
    Rect(SvgRect),
    Circle(SvgCircle),
    Line(SvgLine),
    Path(SvgPath),
    Text(SvgText),
    Defs(Vec<SvgNode>),
    Pattern(SvgPattern),
}

/// Classify a node as selectable by pointer interaction.
///
/// A node qualifies only if its kind is one of rect/circle/line/path/text
/// AND it is not structural: not a defs/pattern container, not filled by a
/// pattern reference (the background grid), and not sized full-width. The
/// canvas background is itself made of nodes, and those must never be
/// selectable or draggable.
pub fn is_selectable(node: &SvgNode) -> bool {
    match node {
        SvgNode::Defs(_) | SvgNode::Pattern(_) => false,
        SvgNode::Rect(rect) => {
            !fill_is_pattern_ref(rect.fill.as_deref()) && !is_full_width(rect.width)
        }
        SvgNode::Circle(circle) => !fill_is_pattern_ref(circle.fill.as_deref()),
        SvgNode::Path(path) => !fill_is_pattern_ref(path.fill.as_deref()),
        SvgNode::Line(_) | SvgNode::Text(_) => true,
    }
}

fn fill_is_pattern_ref(fill: Option<&str>) -> bool {
    fill.is_some_and(|f| f.trim_start().starts_with("url("))
}

fn is_full_width(width: Option<Length>) -> bool {
    matches!(width, Some(Length::Percent(p)) if p >= 100.0)
}
