//! Shape capture state machine.
//!
//! Turns a stream of discrete pointer events into shapes in a [`ShapeStore`].
//! The session never touches rendering; a front end feeds it events and draws
//! whatever the returned [`CaptureOutcome`] says was created.
//!
//! ```text
//!                 press                    release
//!   Idle ───────────────────▶ AwaitingSecondPoint ──────────▶ Idle (+shape)
//!     │
//!     │ press (polyline)          press
//!     └──────────────▶ CollectingPolylinePoints ◀──┐
//!                          │          └────────────┘
//!                          │ finish / tool change
//!                          ▼
//!                        Idle (+polyline if ≥ 2 points)
//! ```

use crate::shape_store::{ShapeId, ShapeStore};
use crate::shapes::{Circle, Ellipse, Point, Polyline, Rectangle, Segment, Shape};
use serde::{Deserialize, Serialize};

/// Drawing tool currently selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    Line,
    Rectangle,
    Circle,
    Ellipse,
    Polyline,
}

/// Progress of the shape currently being drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    AwaitingSecondPoint {
        start: Point,
    },
    CollectingPolylinePoints {
        points: Vec<Point>,
    },
}

/// A discrete input from the capture surface, in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CaptureEvent {
    SelectTool { mode: DrawingMode },
    Press { at: Point },
    Release { at: Point },
    FinishPolyline,
    Clear,
}

/// What a capture event did.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// A shape was added to the store
    Created { id: ShapeId, label: String },
    /// The tool changed; a pending polyline may have been committed
    ToolSelected { committed: Option<ShapeId> },
    /// The event advanced the shape in progress
    Pending,
    /// The store was emptied
    Cleared { removed: usize },
    /// The event had no effect in the current state
    Ignored,
}

impl CaptureOutcome {
    pub fn created_id(&self) -> Option<ShapeId> {
        match self {
            CaptureOutcome::Created { id, .. } => Some(*id),
            CaptureOutcome::ToolSelected { committed } => *committed,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaptureSession {
    mode: Option<DrawingMode>,
    state: CaptureState,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Option<DrawingMode> {
        self.mode
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// Applies one event, mutating `store` only when a shape is committed or cleared.
    pub fn handle(&mut self, event: CaptureEvent, store: &mut ShapeStore) -> CaptureOutcome {
        match event {
            CaptureEvent::SelectTool { mode } => {
                let committed = self.commit_polyline(store);
                self.mode = Some(mode);
                self.state = CaptureState::Idle;
                CaptureOutcome::ToolSelected { committed }
            }
            CaptureEvent::Press { at } => self.press(at),
            CaptureEvent::Release { at } => self.release(at, store),
            CaptureEvent::FinishPolyline => match self.commit_polyline(store) {
                Some(id) => created(id, store),
                None => CaptureOutcome::Ignored,
            },
            CaptureEvent::Clear => {
                let removed = store.len();
                store.clear();
                self.state = CaptureState::Idle;
                CaptureOutcome::Cleared { removed }
            }
        }
    }

    fn press(&mut self, at: Point) -> CaptureOutcome {
        match self.mode {
            None => CaptureOutcome::Ignored,
            Some(DrawingMode::Polyline) => {
                if let CaptureState::CollectingPolylinePoints { points } = &mut self.state {
                    points.push(at);
                } else {
                    self.state = CaptureState::CollectingPolylinePoints { points: vec![at] };
                }
                CaptureOutcome::Pending
            }
            Some(_) => {
                self.state = CaptureState::AwaitingSecondPoint { start: at };
                CaptureOutcome::Pending
            }
        }
    }

    fn release(&mut self, at: Point, store: &mut ShapeStore) -> CaptureOutcome {
        let CaptureState::AwaitingSecondPoint { start } = self.state else {
            return CaptureOutcome::Ignored;
        };
        let Some(shape) = self.mode.and_then(|mode| drag_shape(mode, start, at)) else {
            return CaptureOutcome::Ignored;
        };
        self.state = CaptureState::Idle;
        let id = store.add_shape(shape);
        created(id, store)
    }

    /// Commits the pending polyline if it has at least two points; otherwise drops it.
    fn commit_polyline(&mut self, store: &mut ShapeStore) -> Option<ShapeId> {
        if !matches!(self.state, CaptureState::CollectingPolylinePoints { .. }) {
            return None;
        }
        let CaptureState::CollectingPolylinePoints { points } = std::mem::take(&mut self.state)
        else {
            return None;
        };
        match Polyline::new(points) {
            Ok(polyline) => Some(store.add_shape(polyline)),
            Err(err) => {
                tracing::debug!("Dropping unfinished polyline: {}", err);
                None
            }
        }
    }
}

fn created(id: ShapeId, store: &ShapeStore) -> CaptureOutcome {
    let label = store
        .get(id)
        .map(Shape::dimension_label)
        .unwrap_or_default();
    CaptureOutcome::Created { id, label }
}

/// Shape produced by dragging from `start` to `end` with a two-point tool.
///
/// Circles take the smaller of the two drag extents as their diameter and
/// grow from the press point, whichever way the pointer moved.
pub fn drag_shape(mode: DrawingMode, start: Point, end: Point) -> Option<Shape> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    match mode {
        DrawingMode::Line => Some(Segment::new(start, end).into()),
        DrawingMode::Rectangle => Some(Rectangle::new(start, dx, dy).into()),
        DrawingMode::Circle => Some(Circle::new(start, dx.abs().min(dy.abs())).into()),
        DrawingMode::Ellipse => Some(Ellipse::new(start, dx, dy).into()),
        DrawingMode::Polyline => None,
    }
}

/// Replays a recorded event list into `store` with a fresh session.
pub fn replay(events: &[CaptureEvent], store: &mut ShapeStore) -> Vec<CaptureOutcome> {
    let mut session = CaptureSession::new();
    let mut outcomes: Vec<CaptureOutcome> = events
        .iter()
        .cloned()
        .map(|event| session.handle(event, store))
        .collect();
    if let Some(id) = session.commit_polyline(store) {
        outcomes.push(created(id, store));
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeType;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_press_without_tool_is_ignored() {
        let mut store = ShapeStore::new();
        let mut session = CaptureSession::new();
        let outcome = session.handle(CaptureEvent::Press { at: pt(1.0, 1.0) }, &mut store);
        assert_eq!(outcome, CaptureOutcome::Ignored);
        assert_eq!(session.state(), &CaptureState::Idle);
    }

    #[test]
    fn test_drag_rectangle() {
        let mut store = ShapeStore::new();
        let mut session = CaptureSession::new();
        session.handle(
            CaptureEvent::SelectTool {
                mode: DrawingMode::Rectangle,
            },
            &mut store,
        );
        assert_eq!(
            session.handle(CaptureEvent::Press { at: pt(10.0, 10.0) }, &mut store),
            CaptureOutcome::Pending
        );
        assert_eq!(
            session.state(),
            &CaptureState::AwaitingSecondPoint { start: pt(10.0, 10.0) }
        );

        let outcome = session.handle(CaptureEvent::Release { at: pt(4.0, 20.0) }, &mut store);
        let CaptureOutcome::Created { id, label } = outcome else {
            panic!("expected a shape, got {:?}", outcome);
        };
        assert_eq!(label, "6.00x10.00 mm");
        assert_eq!(
            store.get(id),
            Some(&Shape::Rectangle(Rectangle::new(pt(10.0, 10.0), -6.0, 10.0)))
        );
        assert_eq!(session.state(), &CaptureState::Idle);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut store = ShapeStore::new();
        let mut session = CaptureSession::new();
        session.handle(
            CaptureEvent::SelectTool {
                mode: DrawingMode::Line,
            },
            &mut store,
        );
        let outcome = session.handle(CaptureEvent::Release { at: pt(1.0, 1.0) }, &mut store);
        assert_eq!(outcome, CaptureOutcome::Ignored);
        assert!(store.is_empty());
    }

    #[test]
    fn test_circle_uses_smaller_extent() {
        let shape = drag_shape(DrawingMode::Circle, pt(0.0, 0.0), pt(-8.0, 5.0));
        assert_eq!(shape, Some(Shape::Circle(Circle::new(pt(0.0, 0.0), 5.0))));
    }

    #[test]
    fn test_polyline_commits_on_finish() {
        let mut store = ShapeStore::new();
        let mut session = CaptureSession::new();
        session.handle(
            CaptureEvent::SelectTool {
                mode: DrawingMode::Polyline,
            },
            &mut store,
        );
        for p in [pt(0.0, 0.0), pt(5.0, 0.0), pt(5.0, 5.0)] {
            session.handle(CaptureEvent::Press { at: p }, &mut store);
        }
        assert!(matches!(
            session.state(),
            CaptureState::CollectingPolylinePoints { points } if points.len() == 3
        ));
        // Releases do not end a polyline.
        assert_eq!(
            session.handle(CaptureEvent::Release { at: pt(5.0, 5.0) }, &mut store),
            CaptureOutcome::Ignored
        );

        let outcome = session.handle(CaptureEvent::FinishPolyline, &mut store);
        assert!(outcome.created_id().is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].shape_type(), ShapeType::Polyline);
    }

    #[test]
    fn test_tool_change_commits_polyline() {
        let mut store = ShapeStore::new();
        let mut session = CaptureSession::new();
        session.handle(
            CaptureEvent::SelectTool {
                mode: DrawingMode::Polyline,
            },
            &mut store,
        );
        session.handle(CaptureEvent::Press { at: pt(0.0, 0.0) }, &mut store);
        session.handle(CaptureEvent::Press { at: pt(1.0, 1.0) }, &mut store);
        let outcome = session.handle(
            CaptureEvent::SelectTool {
                mode: DrawingMode::Line,
            },
            &mut store,
        );
        assert!(outcome.created_id().is_some());
        assert_eq!(session.mode(), Some(DrawingMode::Line));
    }

    #[test]
    fn test_single_point_polyline_dropped() {
        let mut store = ShapeStore::new();
        let mut session = CaptureSession::new();
        session.handle(
            CaptureEvent::SelectTool {
                mode: DrawingMode::Polyline,
            },
            &mut store,
        );
        session.handle(CaptureEvent::Press { at: pt(0.0, 0.0) }, &mut store);
        let outcome = session.handle(CaptureEvent::FinishPolyline, &mut store);
        assert_eq!(outcome, CaptureOutcome::Ignored);
        assert!(store.is_empty());
        assert_eq!(session.state(), &CaptureState::Idle);
    }

    #[test]
    fn test_clear_empties_store_and_resets() {
        let mut store = ShapeStore::new();
        store.add_shape(Circle::new(pt(0.0, 0.0), 1.0));
        store.add_shape(Circle::new(pt(2.0, 0.0), 1.0));
        let mut session = CaptureSession::new();
        session.handle(
            CaptureEvent::SelectTool {
                mode: DrawingMode::Ellipse,
            },
            &mut store,
        );
        session.handle(CaptureEvent::Press { at: pt(0.0, 0.0) }, &mut store);

        assert_eq!(
            session.handle(CaptureEvent::Clear, &mut store),
            CaptureOutcome::Cleared { removed: 2 }
        );
        assert!(store.is_empty());
        assert_eq!(session.state(), &CaptureState::Idle);
        assert_eq!(session.mode(), Some(DrawingMode::Ellipse));
    }

    #[test]
    fn test_replay_commits_trailing_polyline() {
        let events = vec![
            CaptureEvent::SelectTool {
                mode: DrawingMode::Polyline,
            },
            CaptureEvent::Press { at: pt(0.0, 0.0) },
            CaptureEvent::Press { at: pt(3.0, 4.0) },
        ];
        let mut store = ShapeStore::new();
        let outcomes = replay(&events, &mut store);
        assert_eq!(store.len(), 1);
        assert!(outcomes.last().and_then(CaptureOutcome::created_id).is_some());
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"[
            {"event": "select_tool", "mode": "circle"},
            {"event": "press", "at": {"x": 0.0, "y": 0.0}},
            {"event": "release", "at": {"x": 10.0, "y": 10.0}}
        ]"#;
        let events: Vec<CaptureEvent> = serde_json::from_str(json).unwrap();
        let mut store = ShapeStore::new();
        replay(&events, &mut store);
        assert_eq!(
            store.snapshot(),
            vec![Shape::Circle(Circle::new(pt(0.0, 0.0), 10.0))]
        );
    }
}
