//! Tool kinds and the per-kind shape create/update factories.

use crate::shapes::{Circle, Freehand, Line, Rectangle, Shape, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Circle,
    Line,
    Pencil,
    Text,
}

/// Create the initial shape for a drawing tool at the gesture start point,
/// baking in the current style.
///
/// Select has no shape; Text goes through the prompt request instead of this
/// factory. Pencil strokes are stroked-only regardless of the current fill.
pub fn create_shape(tool: ToolKind, point: Point, style: &ShapeStyle) -> Option<Shape> {
    let shape = match tool {
        ToolKind::Rectangle => {
            let mut rect = Rectangle::new(point, 0.0, 0.0);
            rect.style = style.clone();
            Shape::Rectangle(rect)
        }
        ToolKind::Circle => {
            let mut circle = Circle::new(point, 0.0);
            circle.style = style.clone();
            Shape::Circle(circle)
        }
        ToolKind::Line => {
            let mut line = Line::new(point, point);
            line.style = style.clone();
            Shape::Line(line)
        }
        ToolKind::Pencil => {
            let mut stroke = Freehand::begin(point);
            stroke.style = ShapeStyle {
                fill_color: None,
                ..style.clone()
            };
            Shape::Freehand(stroke)
        }
        ToolKind::Select | ToolKind::Text => return None,
    };
    Some(shape)
}

/// Apply a pointer-move update to an in-progress shape.
///
/// `start` is the gesture's anchor point, `current` the pointer position.
pub fn update_shape(shape: &mut Shape, start: Point, current: Point) {
    match shape {
        Shape::Rectangle(rect) => rect.set_corners(start, current),
        Shape::Circle(circle) => circle.set_radius_to(current),
        Shape::Line(line) => line.end = current,
        Shape::Freehand(stroke) => stroke.add_point(current),
        // Text has no update phase
        Shape::Text(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Color;

    #[test]
    fn test_create_bakes_in_current_style() {
        let style = ShapeStyle {
            stroke_color: Color::from_hex("#ff0000"),
            stroke_width: 5.0,
            fill_color: Some(Color::from_hex("#00ff00")),
        };
        let shape = create_shape(ToolKind::Rectangle, Point::new(1.0, 2.0), &style).unwrap();
        assert_eq!(shape.style().stroke_width, 5.0);
        assert_eq!(shape.style().fill_color, Some(Color::from_hex("#00ff00")));
    }

    #[test]
    fn test_pencil_is_never_filled() {
        let style = ShapeStyle {
            fill_color: Some(Color::black()),
            ..ShapeStyle::default()
        };
        let shape = create_shape(ToolKind::Pencil, Point::ZERO, &style).unwrap();
        assert!(shape.style().fill_color.is_none());
    }

    #[test]
    fn test_select_and_text_have_no_factory_shape() {
        let style = ShapeStyle::default();
        assert!(create_shape(ToolKind::Select, Point::ZERO, &style).is_none());
        assert!(create_shape(ToolKind::Text, Point::ZERO, &style).is_none());
    }

    #[test]
    fn test_rectangle_update_normalizes_reverse_drag() {
        let style = ShapeStyle::default();
        let mut shape = create_shape(ToolKind::Rectangle, Point::new(100.0, 100.0), &style).unwrap();
        update_shape(&mut shape, Point::new(100.0, 100.0), Point::new(40.0, 60.0));
        let Shape::Rectangle(rect) = &shape else {
            panic!("expected rectangle");
        };
        assert_eq!(rect.position, Point::new(40.0, 60.0));
        assert!((rect.width - 60.0).abs() < f64::EPSILON);
        assert!((rect.height - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_update_sets_distance_radius() {
        let style = ShapeStyle::default();
        let start = Point::new(10.0, 10.0);
        let mut shape = create_shape(ToolKind::Circle, start, &style).unwrap();
        update_shape(&mut shape, start, Point::new(13.0, 14.0));
        let Shape::Circle(circle) = &shape else {
            panic!("expected circle");
        };
        assert!((circle.radius - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_line_update_moves_only_endpoint() {
        let style = ShapeStyle::default();
        let start = Point::new(1.0, 1.0);
        let mut shape = create_shape(ToolKind::Line, start, &style).unwrap();
        update_shape(&mut shape, start, Point::new(50.0, 60.0));
        let Shape::Line(line) = &shape else {
            panic!("expected line");
        };
        assert_eq!(line.start, start);
        assert_eq!(line.end, Point::new(50.0, 60.0));
    }

    #[test]
    fn test_pencil_update_appends_line_commands() {
        let style = ShapeStyle::default();
        let start = Point::new(0.0, 0.0);
        let mut shape = create_shape(ToolKind::Pencil, start, &style).unwrap();
        update_shape(&mut shape, start, Point::new(1.0, 1.0));
        update_shape(&mut shape, start, Point::new(2.0, 0.0));
        let Shape::Freehand(stroke) = &shape else {
            panic!("expected freehand");
        };
        assert_eq!(stroke.data.to_string(), "M 0 0 L 1 1 L 2 0");
    }
}
