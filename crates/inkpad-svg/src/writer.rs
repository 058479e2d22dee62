//! SVG document generation.
//!
//! Builds the typed node tree for a document (background grid first, then
//! every shape in stacking order) and serializes it to standalone markup.

use crate::node::{
    Length, SvgCircle, SvgLine, SvgNode, SvgPath, SvgPattern, SvgRect, SvgText,
};
use inkpad_core::editor::{SelectionRecord, Theme};
use inkpad_core::shapes::{Shape, ShapeStyle, fmt_num};
use inkpad_core::Document;
use kurbo::Size;
use log::debug;

/// Id of the background grid pattern.
pub const GRID_PATTERN_ID: &str = "canvas-grid";

/// Highlight applied to selected shapes.
const HIGHLIGHT_STYLE: &str = "filter: drop-shadow(0 0 4px #4a90d9)";

/// Options for rendering a document to SVG.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Canvas size in device pixels.
    pub size: Size,
    /// Grid cell size in device pixels.
    pub grid_spacing: f64,
    /// Light/dark flag, selects background and grid colors.
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: Size::new(800.0, 600.0),
            grid_spacing: 20.0,
            theme: Theme::Light,
        }
    }
}

struct ThemeColors {
    background: &'static str,
    grid: &'static str,
}

fn theme_colors(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Light => ThemeColors {
            background: "#ffffff",
            grid: "#e0e0e0",
        },
        Theme::Dark => ThemeColors {
            background: "#1e1e2e",
            grid: "#36364a",
        },
    }
}

/// Build the node tree for a document: grid pattern defs, the structural
/// background nodes, then every shape in stacking order.
pub fn build_nodes(
    document: &Document,
    selection: &[SelectionRecord],
    options: &RenderOptions,
) -> Vec<SvgNode> {
    let colors = theme_colors(options.theme);
    let spacing = options.grid_spacing;

    let grid_cell = SvgNode::Path(SvgPath {
        d: format!("M {} 0 L 0 0 L 0 {}", fmt_num(spacing), fmt_num(spacing)),
        fill: Some("none".to_string()),
        stroke: Some(colors.grid.to_string()),
        stroke_width: Some(1.0),
        ..SvgPath::default()
    });

    let mut nodes = vec![
        SvgNode::Defs(vec![SvgNode::Pattern(SvgPattern {
            id: GRID_PATTERN_ID.to_string(),
            width: spacing,
            height: spacing,
            children: vec![grid_cell],
        })]),
        // Solid backdrop, then the repeating grid on top of it
        SvgNode::Rect(SvgRect {
            width: Some(Length::Percent(100.0)),
            height: Some(Length::Percent(100.0)),
            fill: Some(colors.background.to_string()),
            ..SvgRect::default()
        }),
        SvgNode::Rect(SvgRect {
            width: Some(Length::Percent(100.0)),
            height: Some(Length::Percent(100.0)),
            fill: Some(format!("url(#{GRID_PATTERN_ID})")),
            ..SvgRect::default()
        }),
    ];

    for shape in document.shapes_ordered() {
        let selected = selection.iter().any(|rec| rec.id == shape.id());
        nodes.push(shape_node(shape, selected));
    }
    nodes
}

fn fill_css(style: &ShapeStyle) -> String {
    style
        .fill_color
        .map(|c| c.to_css())
        .unwrap_or_else(|| "none".to_string())
}

fn shape_class(selected: bool) -> Option<String> {
    Some(if selected { "shape selected" } else { "shape" }.to_string())
}

fn highlight(selected: bool) -> Option<String> {
    selected.then(|| HIGHLIGHT_STYLE.to_string())
}

/// Render one shape to its SVG node, with the selection highlight applied
/// atomically from selection membership.
fn shape_node(shape: &Shape, selected: bool) -> SvgNode {
    let style = shape.style();
    let class = shape_class(selected);
    let extra = highlight(selected);
    match shape {
        Shape::Rectangle(rect) => SvgNode::Rect(SvgRect {
            x: rect.position.x,
            y: rect.position.y,
            width: Some(Length::Px(rect.width)),
            height: Some(Length::Px(rect.height)),
            fill: Some(fill_css(style)),
            stroke: Some(style.stroke_color.to_css()),
            stroke_width: Some(style.stroke_width),
            class,
            style: extra,
        }),
        Shape::Circle(circle) => SvgNode::Circle(SvgCircle {
            cx: circle.center.x,
            cy: circle.center.y,
            r: circle.radius,
            fill: Some(fill_css(style)),
            stroke: Some(style.stroke_color.to_css()),
            stroke_width: Some(style.stroke_width),
            class,
            style: extra,
        }),
        Shape::Line(line) => SvgNode::Line(SvgLine {
            x1: line.start.x,
            y1: line.start.y,
            x2: line.end.x,
            y2: line.end.y,
            stroke: Some(style.stroke_color.to_css()),
            stroke_width: Some(style.stroke_width),
            class,
            style: extra,
        }),
        Shape::Freehand(stroke) => SvgNode::Path(SvgPath {
            d: stroke.data.to_string(),
            fill: Some("none".to_string()),
            stroke: Some(style.stroke_color.to_css()),
            stroke_width: Some(style.stroke_width),
            stroke_linecap: Some("round".to_string()),
            stroke_linejoin: Some("round".to_string()),
            class,
            style: extra,
        }),
        Shape::Text(text) => SvgNode::Text(SvgText {
            x: text.position.x,
            y: text.position.y,
            font_size: text.font_size,
            fill: Some(
                style
                    .fill_color
                    .unwrap_or(style.stroke_color)
                    .to_css(),
            ),
            class,
            style: extra,
            content: text.content.clone(),
        }),
    }
}

/// Serialize a document to a standalone SVG string.
pub fn write_svg(
    document: &Document,
    selection: &[SelectionRecord],
    options: &RenderOptions,
) -> String {
    let nodes = build_nodes(document, selection, options);
    let w = fmt_num(options.size.width);
    let h = fmt_num(options.size.height);

    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
         viewBox=\"0 0 {w} {h}\">\n"
    ));
    for node in &nodes {
        serialize_node(&mut out, node, 1);
    }
    out.push_str("</svg>\n");

    debug!(
        "rendered {} shapes to {} bytes of svg",
        document.len(),
        out.len()
    );
    out
}

/// Escape text for XML attribute values and content.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!(" {name}=\"{}\"", xml_escape(value)));
}

fn push_opt_attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(v) = value {
        push_attr(out, name, v);
    }
}

fn push_num_attr(out: &mut String, name: &str, value: f64) {
    push_attr(out, name, &fmt_num(value));
}

fn serialize_node(out: &mut String, node: &SvgNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        SvgNode::Rect(rect) => {
            out.push_str(&format!("{indent}<rect"));
            push_num_attr(out, "x", rect.x);
            push_num_attr(out, "y", rect.y);
            push_opt_attr(out, "width", rect.width.map(|l| l.to_string()).as_deref());
            push_opt_attr(out, "height", rect.height.map(|l| l.to_string()).as_deref());
            push_opt_attr(out, "fill", rect.fill.as_deref());
            push_opt_attr(out, "stroke", rect.stroke.as_deref());
            push_opt_attr(
                out,
                "stroke-width",
                rect.stroke_width.map(fmt_num).as_deref(),
            );
            push_opt_attr(out, "class", rect.class.as_deref());
            push_opt_attr(out, "style", rect.style.as_deref());
            out.push_str("/>\n");
        }
        SvgNode::Circle(circle) => {
            out.push_str(&format!("{indent}<circle"));
            push_num_attr(out, "cx", circle.cx);
            push_num_attr(out, "cy", circle.cy);
            push_num_attr(out, "r", circle.r);
            push_opt_attr(out, "fill", circle.fill.as_deref());
            push_opt_attr(out, "stroke", circle.stroke.as_deref());
            push_opt_attr(
                out,
                "stroke-width",
                circle.stroke_width.map(fmt_num).as_deref(),
            );
            push_opt_attr(out, "class", circle.class.as_deref());
            push_opt_attr(out, "style", circle.style.as_deref());
            out.push_str("/>\n");
        }
        SvgNode::Line(line) => {
            out.push_str(&format!("{indent}<line"));
            push_num_attr(out, "x1", line.x1);
            push_num_attr(out, "y1", line.y1);
            push_num_attr(out, "x2", line.x2);
            push_num_attr(out, "y2", line.y2);
            push_opt_attr(out, "stroke", line.stroke.as_deref());
            push_opt_attr(
                out,
                "stroke-width",
                line.stroke_width.map(fmt_num).as_deref(),
            );
            push_opt_attr(out, "class", line.class.as_deref());
            push_opt_attr(out, "style", line.style.as_deref());
            out.push_str("/>\n");
        }
        SvgNode::Path(path) => {
            out.push_str(&format!("{indent}<path"));
            push_attr(out, "d", &path.d);
            push_opt_attr(out, "fill", path.fill.as_deref());
            push_opt_attr(out, "stroke", path.stroke.as_deref());
            push_opt_attr(
                out,
                "stroke-width",
                path.stroke_width.map(fmt_num).as_deref(),
            );
            push_opt_attr(out, "stroke-linecap", path.stroke_linecap.as_deref());
            push_opt_attr(out, "stroke-linejoin", path.stroke_linejoin.as_deref());
            push_opt_attr(out, "class", path.class.as_deref());
            push_opt_attr(out, "style", path.style.as_deref());
            out.push_str("/>\n");
        }
        SvgNode::Text(text) => {
            out.push_str(&format!("{indent}<text"));
            push_num_attr(out, "x", text.x);
            push_num_attr(out, "y", text.y);
            push_num_attr(out, "font-size", text.font_size);
            push_opt_attr(out, "fill", text.fill.as_deref());
            push_opt_attr(out, "class", text.class.as_deref());
            push_opt_attr(out, "style", text.style.as_deref());
            out.push_str(&format!(">{}</text>\n", xml_escape(&text.content)));
        }
        SvgNode::Defs(children) => {
            out.push_str(&format!("{indent}<defs>\n"));
            for child in children {
                serialize_node(out, child, depth + 1);
            }
            out.push_str(&format!("{indent}</defs>\n"));
        }
        SvgNode::Pattern(pattern) => {
            out.push_str(&format!("{indent}<pattern"));
            push_attr(out, "id", &pattern.id);
            push_num_attr(out, "width", pattern.width);
            push_num_attr(out, "height", pattern.height);
            push_attr(out, "patternUnits", "userSpaceOnUse");
            out.push_str(">\n");
            for child in &pattern.children {
                serialize_node(out, child, depth + 1);
            }
            out.push_str(&format!("{indent}</pattern>\n"));
        }
    }
}
