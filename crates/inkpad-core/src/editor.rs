//! The gesture editor: routes pointer and key events to shape creation,
//! selection, dragging, and canvas lifecycle operations.

use crate::document::Document;
use crate::input::{Key, PointerEvent};
use crate::shapes::{Shape, ShapeId, ShapeStyle, Text};
use crate::tools::{self, ToolKind};
use kurbo::Point;
use log::debug;
use serde::{Deserialize, Serialize};

/// Hit-test slack in canvas pixels.
pub const HIT_TOLERANCE: f64 = 4.0;

/// Point-reduction tolerance applied when stroke simplification is enabled.
const SIMPLIFY_TOLERANCE: f64 = 1.0;

/// Light/dark flag. Cosmetic only; consulted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// One entry in the selection set.
///
/// The set is a vector, but every editor operation maintains at most one
/// record (single-selection design).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub id: ShapeId,
}

/// A pending request for text content, surfaced when the text tool is used.
///
/// The caller resolves it with [`Editor::submit_text`]; until then the
/// gesture state machine is frozen (no new shape creation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRequest {
    /// Where the text run will be placed.
    pub at: Point,
}

/// State of the in-progress gesture.
#[derive(Debug, Clone, PartialEq)]
enum GestureState {
    /// No gesture active.
    Idle,
    /// A drawing tool is mutating a shape already inserted in the document.
    Drawing { shape: ShapeId, start: Point },
    /// The select tool is dragging the selection; `offset` is the reference
    /// point for the next incremental delta.
    Dragging { offset: Point },
    /// Waiting for the text prompt to resolve.
    AwaitingText { at: Point },
}

/// The drawing editor.
#[derive(Debug, Clone)]
pub struct Editor {
    /// The document being edited.
    pub document: Document,
    /// Currently active tool.
    tool: ToolKind,
    /// Style baked into newly created shapes.
    pub style: ShapeStyle,
    /// Current selection (at most one record).
    selection: Vec<SelectionRecord>,
    /// In-progress gesture.
    gesture: GestureState,
    /// Light/dark flag.
    theme: Theme,
    /// Run point reduction on pencil strokes at release.
    simplify_strokes: bool,
    /// Last pointer position, used to finalize on pointer-leave.
    last_pointer: Point,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor with an empty document.
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            tool: ToolKind::default(),
            style: ShapeStyle::default(),
            selection: Vec::new(),
            gesture: GestureState::Idle,
            theme: Theme::default(),
            simplify_strokes: false,
            last_pointer: Point::ZERO,
        }
    }

    /// Single event funnel; dispatches to the pointer handlers.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<TextRequest> {
        match event {
            PointerEvent::Down(p) => return self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up(p) => self.pointer_up(p),
            PointerEvent::Leave => self.pointer_leave(),
        }
        None
    }

    /// Begin a gesture. Returns a [`TextRequest`] when the text tool needs
    /// content from the caller.
    pub fn pointer_down(&mut self, point: Point) -> Option<TextRequest> {
        if matches!(self.gesture, GestureState::AwaitingText { .. }) {
            // Frozen until the text prompt resolves
            return None;
        }
        self.last_pointer = point;

        match self.tool {
            ToolKind::Select => {
                match self.document.top_shape_at(point, HIT_TOLERANCE) {
                    Some(id) => {
                        self.select_shape(id);
                        self.gesture = GestureState::Dragging { offset: point };
                    }
                    // Pointer-down on empty canvas deselects
                    None => self.clear_selection(),
                }
                None
            }
            ToolKind::Text => {
                self.gesture = GestureState::AwaitingText { at: point };
                Some(TextRequest { at: point })
            }
            tool => {
                if let Some(shape) = tools::create_shape(tool, point, &self.style) {
                    debug!("begin {} gesture at ({}, {})", shape.kind(), point.x, point.y);
                    let id = self.document.add_shape(shape);
                    self.gesture = GestureState::Drawing { shape: id, start: point };
                }
                None
            }
        }
    }

    /// Update the in-progress gesture. No-op when idle.
    pub fn pointer_move(&mut self, point: Point) {
        self.last_pointer = point;
        match self.gesture {
            GestureState::Drawing { shape, start } => {
                // The document may have been cleared mid-gesture
                if let Some(s) = self.document.get_shape_mut(shape) {
                    tools::update_shape(s, start, point);
                }
            }
            GestureState::Dragging { .. } => self.drag_selected(point),
            GestureState::Idle | GestureState::AwaitingText { .. } => {}
        }
    }

    /// End the gesture. The in-progress shape stays in the document
    /// (commit on release); only the session state is cleared.
    pub fn pointer_up(&mut self, point: Point) {
        self.last_pointer = point;
        match std::mem::replace(&mut self.gesture, GestureState::Idle) {
            GestureState::Drawing { shape, .. } => {
                if self.simplify_strokes {
                    if let Some(Shape::Freehand(stroke)) = self.document.get_shape_mut(shape) {
                        stroke.simplify(SIMPLIFY_TOLERANCE);
                    }
                }
                debug!("commit gesture, document has {} shapes", self.document.len());
            }
            GestureState::Dragging { .. } | GestureState::Idle => {}
            // The text prompt outlives the pointer gesture
            awaiting @ GestureState::AwaitingText { .. } => self.gesture = awaiting,
        }
    }

    /// Treated identically to pointer-up at the last known position, so a
    /// pointer leaving the canvas never leaves a stuck drawing session.
    pub fn pointer_leave(&mut self) {
        self.pointer_up(self.last_pointer);
    }

    /// Handle a key press.
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Delete | Key::Backspace => {
                if self.tool == ToolKind::Select {
                    self.delete_selected();
                }
            }
            Key::Escape => self.cancel_gesture(),
        }
    }

    /// Abort the in-progress gesture: an unfinished shape is removed from the
    /// document, a pending text request is dropped.
    pub fn cancel_gesture(&mut self) {
        match std::mem::replace(&mut self.gesture, GestureState::Idle) {
            GestureState::Drawing { shape, .. } => {
                self.document.remove_shape(shape);
                debug!("cancelled drawing gesture");
            }
            GestureState::AwaitingText { .. } => debug!("cancelled text request"),
            GestureState::Dragging { .. } | GestureState::Idle => {}
        }
    }

    /// Resolve a pending text request. `None` or an empty string cancels
    /// cleanly: no primitive is created.
    pub fn submit_text(&mut self, response: Option<String>) -> Option<ShapeId> {
        let GestureState::AwaitingText { at } = self.gesture else {
            return None;
        };
        self.gesture = GestureState::Idle;
        match response {
            Some(content) if !content.is_empty() => {
                let mut text = Text::new(at, content);
                text.style = self.style.clone();
                Some(self.document.add_shape(Shape::Text(text)))
            }
            _ => None,
        }
    }

    /// Position of the pending text request, if any.
    pub fn awaiting_text(&self) -> Option<Point> {
        match self.gesture {
            GestureState::AwaitingText { at } => Some(at),
            _ => None,
        }
    }

    /// True between pointer-down and pointer-up of any gesture.
    pub fn is_drawing(&self) -> bool {
        matches!(
            self.gesture,
            GestureState::Drawing { .. } | GestureState::Dragging { .. }
        )
    }

    /// True only during a select-tool drag session.
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, GestureState::Dragging { .. })
    }

    /// Set the active tool. An in-progress gesture is cancelled first.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.cancel_gesture();
        self.tool = tool;
    }

    /// The active tool.
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Select a shape, replacing any prior selection. An absent target is
    /// treated as a deselect.
    pub fn select_shape(&mut self, id: ShapeId) {
        self.clear_selection();
        if self.document.contains(id) {
            self.selection.push(SelectionRecord { id });
        }
    }

    /// Empty the selection set.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The selection set (at most one record).
    pub fn selection(&self) -> &[SelectionRecord] {
        &self.selection
    }

    /// Check if a shape is selected.
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.iter().any(|rec| rec.id == id)
    }

    /// Remove every selected shape from the document and empty the set.
    pub fn delete_selected(&mut self) {
        for rec in self.selection.drain(..) {
            self.document.remove_shape(rec.id);
        }
    }

    /// Remove the most recently inserted shape. A selection record pointing
    /// at it is purged so the set never dangles. No-op on an empty canvas.
    pub fn undo_last(&mut self) {
        if let Some(removed) = self.document.undo_last() {
            let id = removed.id();
            self.selection.retain(|rec| rec.id != id);
            debug!("undo removed {} shape", removed.kind());
        }
    }

    /// Remove every shape and empty the selection set.
    pub fn clear(&mut self) {
        self.document.clear();
        self.selection.clear();
        debug!("canvas cleared");
    }

    /// The current theme flag.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the dark/light flag.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Enable point reduction on pencil strokes at release.
    pub fn set_simplify_strokes(&mut self, enabled: bool) {
        self.simplify_strokes = enabled;
    }

    /// Translate every selected shape by the delta from the drag reference
    /// point, then rebase the reference to the current point. Deltas are
    /// incremental per move event, never cumulative from the drag start.
    fn drag_selected(&mut self, point: Point) {
        let GestureState::Dragging { offset } = &mut self.gesture else {
            return;
        };
        let delta = point - *offset;
        for rec in &self.selection {
            if let Some(shape) = self.document.get_shape_mut(rec.id) {
                shape.translate_by(delta);
            }
        }
        *offset = point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;
    use kurbo::Point;

    fn draw_rect(editor: &mut Editor, from: Point, to: Point) -> ShapeId {
        editor.set_tool(ToolKind::Rectangle);
        editor.pointer_down(from);
        editor.pointer_move(to);
        editor.pointer_up(to);
        *editor.document.order().last().expect("rect committed")
    }

    #[test]
    fn test_rectangle_gesture_all_quadrants() {
        let start = Point::new(100.0, 100.0);
        for end in [
            Point::new(160.0, 140.0),
            Point::new(40.0, 140.0),
            Point::new(160.0, 60.0),
            Point::new(40.0, 60.0),
        ] {
            let mut editor = Editor::new();
            let id = draw_rect(&mut editor, start, end);
            let Some(Shape::Rectangle(rect)) = editor.document.get_shape(id) else {
                panic!("expected rectangle");
            };
            assert_eq!(rect.position, Point::new(start.x.min(end.x), start.y.min(end.y)));
            assert!((rect.width - (end.x - start.x).abs()).abs() < f64::EPSILON);
            assert!((rect.height - (end.y - start.y).abs()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_circle_gesture_radius() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Circle);
        editor.pointer_down(Point::new(10.0, 10.0));
        editor.pointer_move(Point::new(13.0, 14.0));
        editor.pointer_up(Point::new(13.0, 14.0));
        let shape = editor.document.shapes_ordered().next().unwrap();
        let Shape::Circle(circle) = shape else {
            panic!("expected circle");
        };
        assert!((circle.radius - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_drag_applies_incremental_deltas() {
        let mut editor = Editor::new();
        let id = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(50.0, 50.0));

        editor.set_tool(ToolKind::Select);
        // Grab the border at (50, 25)
        editor.pointer_down(Point::new(50.0, 25.0));
        assert!(editor.is_dragging());
        editor.pointer_move(Point::new(60.0, 30.0)); // d1 = (10, 5)
        editor.pointer_move(Point::new(75.0, 20.0)); // d2 = (15, -10)
        editor.pointer_up(Point::new(75.0, 20.0));

        let Some(Shape::Rectangle(rect)) = editor.document.get_shape(id) else {
            panic!("expected rectangle");
        };
        // Total displacement is d1 + d2 = (25, -5), not re-based from start
        assert_eq!(rect.position, Point::new(25.0, -5.0));
    }

    #[test]
    fn test_background_click_deselects() {
        let mut editor = Editor::new();
        let id = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(50.0, 50.0));

        editor.set_tool(ToolKind::Select);
        editor.pointer_down(Point::new(50.0, 25.0));
        editor.pointer_up(Point::new(50.0, 25.0));
        assert!(editor.is_selected(id));

        editor.pointer_down(Point::new(400.0, 400.0));
        editor.pointer_up(Point::new(400.0, 400.0));
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_delete_key_removes_selection() {
        let mut editor = Editor::new();
        draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(50.0, 50.0));

        editor.set_tool(ToolKind::Select);
        editor.pointer_down(Point::new(50.0, 25.0));
        editor.pointer_up(Point::new(50.0, 25.0));

        editor.key_down(Key::Delete);
        assert!(editor.document.is_empty());
        assert!(editor.selection().is_empty());

        // Delete with nothing selected is a no-op
        editor.key_down(Key::Backspace);
        assert!(editor.document.is_empty());
    }

    #[test]
    fn test_delete_key_ignored_outside_select_tool() {
        let mut editor = Editor::new();
        let id = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        editor.set_tool(ToolKind::Select);
        editor.pointer_down(Point::new(50.0, 25.0));
        editor.pointer_up(Point::new(50.0, 25.0));
        assert!(editor.is_selected(id));

        editor.set_tool(ToolKind::Pencil);
        editor.key_down(Key::Delete);
        assert_eq!(editor.document.len(), 1);
    }

    #[test]
    fn test_undo_removes_last_and_purges_selection() {
        let mut editor = Editor::new();
        let id1 = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let id2 = draw_rect(&mut editor, Point::new(20.0, 20.0), Point::new(30.0, 30.0));
        let id3 = draw_rect(&mut editor, Point::new(40.0, 40.0), Point::new(50.0, 50.0));

        editor.select_shape(id3);
        editor.undo_last();
        assert_eq!(editor.document.order(), &[id1, id2]);
        assert!(editor.selection().is_empty());

        editor.undo_last();
        editor.undo_last();
        // Undo on an empty canvas is a no-op
        editor.undo_last();
        assert!(editor.document.is_empty());
    }

    #[test]
    fn test_clear_mid_gesture_makes_updates_noop() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Pencil);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.clear();
        // The in-progress shape is gone; further updates must not recreate it
        editor.pointer_move(Point::new(10.0, 10.0));
        editor.pointer_up(Point::new(10.0, 10.0));
        assert!(editor.document.is_empty());
    }

    #[test]
    fn test_pencil_commit_on_release() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Pencil);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.pointer_move(Point::new(5.0, 5.0));
        editor.pointer_up(Point::new(5.0, 5.0));
        assert_eq!(editor.document.len(), 1);

        // The session ended: further moves must not extend the stroke
        editor.pointer_move(Point::new(50.0, 50.0));
        let Shape::Freehand(stroke) = editor.document.shapes_ordered().next().unwrap() else {
            panic!("expected freehand");
        };
        assert_eq!(stroke.data.to_string(), "M 0 0 L 5 5");
    }

    #[test]
    fn test_pointer_leave_commits_like_up() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Line);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.pointer_move(Point::new(30.0, 40.0));
        editor.pointer_leave();
        assert!(!editor.is_drawing());

        let Shape::Line(line) = editor.document.shapes_ordered().next().unwrap() else {
            panic!("expected line");
        };
        assert_eq!(line.end, Point::new(30.0, 40.0));
    }

    #[test]
    fn test_text_request_flow() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Text);
        let request = editor.pointer_down(Point::new(25.0, 30.0)).expect("request");
        assert_eq!(request.at, Point::new(25.0, 30.0));
        assert_eq!(editor.awaiting_text(), Some(Point::new(25.0, 30.0)));

        // Gesture state is frozen while awaiting input
        assert!(editor.pointer_down(Point::new(90.0, 90.0)).is_none());
        assert!(editor.document.is_empty());

        let id = editor.submit_text(Some("hello".to_string())).expect("created");
        let Some(Shape::Text(text)) = editor.document.get_shape(id) else {
            panic!("expected text");
        };
        assert_eq!(text.position, Point::new(25.0, 30.0));
        assert_eq!(text.content, "hello");
        assert!(editor.awaiting_text().is_none());
    }

    #[test]
    fn test_text_cancel_and_empty_are_noops() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Text);

        editor.pointer_down(Point::new(0.0, 0.0));
        assert!(editor.submit_text(None).is_none());
        assert!(editor.document.is_empty());
        assert!(editor.awaiting_text().is_none());

        editor.pointer_down(Point::new(0.0, 0.0));
        assert!(editor.submit_text(Some(String::new())).is_none());
        assert!(editor.document.is_empty());

        // submit_text with no pending request is a no-op
        assert!(editor.submit_text(Some("stray".to_string())).is_none());
        assert!(editor.document.is_empty());
    }

    #[test]
    fn test_escape_cancels_drawing() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Rectangle);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.pointer_move(Point::new(30.0, 30.0));
        editor.key_down(Key::Escape);
        assert!(editor.document.is_empty());
        assert!(!editor.is_drawing());
    }

    #[test]
    fn test_style_is_read_at_creation_time() {
        use crate::shapes::Color;
        let mut editor = Editor::new();
        editor.style.stroke_color = Color::from_hex("#ff0000");
        let id = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(10.0, 10.0));

        // Later style changes do not retroactively affect the shape
        editor.style.stroke_color = Color::from_hex("#0000ff");
        let shape = editor.document.get_shape(id).unwrap();
        assert_eq!(shape.style().stroke_color, Color::from_hex("#ff0000"));
    }

    #[test]
    fn test_simplify_strokes_on_release() {
        let mut editor = Editor::new();
        editor.set_simplify_strokes(true);
        editor.set_tool(ToolKind::Pencil);
        editor.pointer_down(Point::new(0.0, 0.0));
        for i in 1..=10 {
            editor.pointer_move(Point::new(f64::from(i) * 10.0, 0.1 * f64::from(i % 2)));
        }
        editor.pointer_up(Point::new(100.0, 0.0));

        let Shape::Freehand(stroke) = editor.document.shapes_ordered().next().unwrap() else {
            panic!("expected freehand");
        };
        let points = stroke.points();
        assert!(points.len() < 11);
        assert_eq!(points[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_tool_selection() {
        let mut editor = Editor::new();
        assert_eq!(editor.tool(), ToolKind::Select);
        editor.set_tool(ToolKind::Pencil);
        assert_eq!(editor.tool(), ToolKind::Pencil);
    }

    #[test]
    fn test_theme_toggle() {
        let mut editor = Editor::new();
        assert_eq!(editor.theme(), Theme::Light);
        editor.toggle_theme();
        assert_eq!(editor.theme(), Theme::Dark);
        editor.toggle_theme();
        assert_eq!(editor.theme(), Theme::Light);
    }

    #[test]
    fn test_selecting_new_shape_replaces_prior() {
        let mut editor = Editor::new();
        let id1 = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let id2 = draw_rect(&mut editor, Point::new(20.0, 20.0), Point::new(30.0, 30.0));

        editor.select_shape(id1);
        editor.select_shape(id2);
        assert_eq!(editor.selection().len(), 1);
        assert!(editor.is_selected(id2));
        assert!(!editor.is_selected(id1));
    }

    #[test]
    fn test_select_absent_target_deselects() {
        let mut editor = Editor::new();
        let id = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        editor.select_shape(id);

        let gone = Rectangle::new(Point::ZERO, 1.0, 1.0);
        editor.select_shape(gone.id);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_handle_pointer_event_funnel() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Line);
        editor.handle_pointer_event(PointerEvent::Down(Point::new(0.0, 0.0)));
        assert!(editor.is_drawing());
        editor.handle_pointer_event(PointerEvent::Move(Point::new(5.0, 5.0)));
        editor.handle_pointer_event(PointerEvent::Leave);
        assert!(!editor.is_drawing());
        assert_eq!(editor.document.len(), 1);
    }
}
