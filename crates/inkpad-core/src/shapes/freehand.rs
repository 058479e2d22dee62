//! Freehand stroke shape.

use super::{PathCmd, PathData, ShapeId, ShapeStyle, ShapeTrait, point_to_segment_dist};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand stroke stored as absolute move/line path commands.
///
/// Strokes built by the editor are always one leading move command followed
/// by line commands; strokes parsed from foreign path data may additionally
/// carry opaque segments, which pass through rendering and translation
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Freehand {
    pub(crate) id: ShapeId,
    /// Path command sequence.
    pub data: PathData,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Freehand {
    /// Start a stroke with a single move command at the given point.
    pub fn begin(point: Point) -> Self {
        let mut data = PathData::new();
        data.move_to(point);
        Self {
            id: Uuid::new_v4(),
            data,
            style: ShapeStyle::default(),
        }
    }

    /// Create from existing path data.
    pub fn from_data(data: PathData) -> Self {
        Self {
            id: Uuid::new_v4(),
            data,
            style: ShapeStyle::default(),
        }
    }

    /// Append a line command to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.data.line_to(point);
    }

    /// Coordinates of every command, in order.
    pub fn points(&self) -> Vec<Point> {
        self.data.points().collect()
    }

    /// Remove redundant points with Ramer-Douglas-Peucker.
    ///
    /// Skipped when the path carries opaque segments: reducing around syntax
    /// this module does not understand could reorder it.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.data.has_opaque() {
            return;
        }
        let points = self.points();
        if points.len() < 3 {
            return;
        }
        let simplified = rdp_simplify(&points, tolerance);
        self.data.set_points(&simplified);
    }
}

/// Ramer-Douglas-Peucker line simplification.
fn rdp_simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;
    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = point_to_segment_dist(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > tolerance {
        let mut left = rdp_simplify(&points[..=max_index], tolerance);
        let right = rdp_simplify(&points[max_index..], tolerance);
        // Drop the duplicate point at the junction
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let mut points = self.data.points();
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        let mut bounds = Rect::from_points(first, first);
        for p in points {
            bounds = bounds.union_pt(p);
        }
        bounds
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + self.style.stroke_width / 2.0;
        let points = self.points();
        if points.len() < 2 {
            return points
                .first()
                .is_some_and(|p| p.distance(point) <= reach);
        }
        points
            .windows(2)
            .any(|w| point_to_segment_dist(point, w[0], w[1]) <= reach)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for cmd in self.data.cmds() {
            match cmd {
                PathCmd::MoveTo(p) => path.move_to(*p),
                PathCmd::LineTo(p) => path.line_to(*p),
                PathCmd::Other(_) => {}
            }
        }
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate_by(&mut self, delta: Vec2) {
        self.data.translate(delta);
    }
}
