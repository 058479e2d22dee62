//! Path data restricted to absolute move/line commands.
//!
//! Freehand strokes are stored as a command sequence rather than a raw `d`
//! string, so translation rewrites coordinates without re-parsing. Parsing is
//! best-effort: any run of text that is not an absolute `M x y` / `L x y`
//! command is carried as an opaque segment and survives formatting and
//! translation byte-for-byte.

use kurbo::{Point, Vec2};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// One command in a path data sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathCmd {
    /// Absolute move command.
    MoveTo(Point),
    /// Absolute line command.
    LineTo(Point),
    /// Unrecognized path syntax, preserved verbatim.
    Other(String),
}

/// A sequence of path commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    cmds: Vec<PathCmd>,
}

/// Matches an absolute move/line command with a signed, possibly fractional
/// coordinate pair.
fn command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([ML])\s*(-?\d*\.?\d+)[\s,]+(-?\d*\.?\d+)").expect("valid pattern")
    })
}

impl PathData {
    /// Create an empty command sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a `d` string for absolute move/line commands.
    ///
    /// Text between recognized commands is kept as opaque segments; runs of
    /// whitespace and comma separators are dropped. Never fails: a string
    /// with no commands at all becomes a single opaque segment.
    pub fn parse(d: &str) -> Self {
        let mut cmds = Vec::new();
        let mut cursor = 0;
        for caps in command_pattern().captures_iter(d) {
            let m = caps.get(0).expect("whole match");
            push_opaque(&mut cmds, &d[cursor..m.start()]);
            cursor = m.end();

            // The pattern guarantees both coordinates parse.
            let x: f64 = caps[2].parse().unwrap_or(0.0);
            let y: f64 = caps[3].parse().unwrap_or(0.0);
            let point = Point::new(x, y);
            cmds.push(match &caps[1] {
                "M" => PathCmd::MoveTo(point),
                _ => PathCmd::LineTo(point),
            });
        }
        push_opaque(&mut cmds, &d[cursor..]);
        Self { cmds }
    }

    /// Append an absolute move command.
    pub fn move_to(&mut self, point: Point) {
        self.cmds.push(PathCmd::MoveTo(point));
    }

    /// Append an absolute line command.
    pub fn line_to(&mut self, point: Point) {
        self.cmds.push(PathCmd::LineTo(point));
    }

    /// Offset every move/line coordinate pair by the delta.
    /// Opaque segments pass through untouched.
    pub fn translate(&mut self, delta: Vec2) {
        for cmd in &mut self.cmds {
            match cmd {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) => *p += delta,
                PathCmd::Other(_) => {}
            }
        }
    }

    /// The command sequence.
    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    /// Coordinates of every move/line command, in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cmds.iter().filter_map(|cmd| match cmd {
            PathCmd::MoveTo(p) | PathCmd::LineTo(p) => Some(*p),
            PathCmd::Other(_) => None,
        })
    }

    /// Whether any opaque segment is present.
    pub fn has_opaque(&self) -> bool {
        self.cmds
            .iter()
            .any(|cmd| matches!(cmd, PathCmd::Other(_)))
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    /// Replace the recognized commands with a fresh move/line sequence over
    /// the given points, keeping no opaque segments.
    pub(crate) fn set_points(&mut self, points: &[Point]) {
        self.cmds.clear();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.cmds.push(PathCmd::MoveTo(*first));
            for p in iter {
                self.cmds.push(PathCmd::LineTo(*p));
            }
        }
    }
}

fn push_opaque(cmds: &mut Vec<PathCmd>, gap: &str) {
    let trimmed = gap.trim_matches(|c: char| c.is_whitespace() || c == ',');
    if !trimmed.is_empty() {
        cmds.push(PathCmd::Other(trimmed.to_string()));
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.cmds.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match cmd {
                PathCmd::MoveTo(p) => write!(f, "M {} {}", fmt_num(p.x), fmt_num(p.y))?,
                PathCmd::LineTo(p) => write!(f, "L {} {}", fmt_num(p.x), fmt_num(p.y))?,
                PathCmd::Other(raw) => write!(f, "{raw}")?,
            }
        }
        Ok(())
    }
}

/// Translate a raw `d` string by a delta: every absolute move/line coordinate
/// pair is offset, all other path syntax is left untouched. Malformed input is
/// returned with only its recognized commands rewritten, never an error.
pub fn translate_str(d: &str, delta: Vec2) -> String {
    let mut data = PathData::parse(d);
    data.translate(delta);
    data.to_string()
}

/// Format a number matching C's %g (6 significant figures, trailing zeros
/// trimmed). Used for path data and for SVG attribute values.
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let sig_figs = 6;
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{rounded:.decimals$}");
    let s = s.trim_end_matches('0');
    s.trim_end_matches('.').to_string()
}
