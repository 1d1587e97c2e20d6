//! Geometric shapes captured from the canvas.
//!
//! All coordinates are canvas units (device scale, Y pointing down). Nothing
//! here knows about the machine; the fit transform maps shapes into machine
//! space at emission time.

use serde::{Deserialize, Serialize};
use sketchcam_core::constants::GEOMETRY_EPSILON;
use thiserror::Error;

/// Represents a 2D point with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Sum of the absolute axis deltas to another point.
    pub fn manhattan_distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Normalises an anchor plus signed size into (min_x, min_y, max_x, max_y).
fn normalized_rect(anchor: Point, width: f64, height: f64) -> (f64, f64, f64, f64) {
    let (x1, x2) = (anchor.x, anchor.x + width);
    let (y1, y2) = (anchor.y, anchor.y + height);
    (x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
}

/// Errors raised while building a shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("Polyline needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}

/// Types of shapes that can be drawn on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Segment,
    Rectangle,
    Circle,
    Ellipse,
    Polyline,
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Segment => write!(f, "segment"),
            Self::Rectangle => write!(f, "rectangle"),
            Self::Circle => write!(f, "circle"),
            Self::Ellipse => write!(f, "ellipse"),
            Self::Polyline => write!(f, "polyline"),
        }
    }
}

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        (
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.start = self.start.translated(dx, dy);
        self.end = self.end.translated(dx, dy);
    }
}

/// An axis-aligned rectangle given by one corner and a signed size.
///
/// Negative width or height means the opposite corner lies left of or above
/// the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub corner: Point,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(corner: Point, width: f64, height: f64) -> Self {
        Self {
            corner,
            width,
            height,
        }
    }

    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        normalized_rect(self.corner, self.width, self.height)
    }

    /// Corners in a fixed winding: (min, min), (max, min), (max, max), (min, max).
    pub fn corners(&self) -> [Point; 4] {
        let (min_x, min_y, max_x, max_y) = self.bounding_box();
        [
            Point::new(min_x, min_y),
            Point::new(max_x, min_y),
            Point::new(max_x, max_y),
            Point::new(min_x, max_y),
        ]
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.corner = self.corner.translated(dx, dy);
    }
}

/// A circle stored as its enclosing rectangle.
///
/// Only a square enclosing rectangle describes a real circle; anything else is
/// kept as captured and rejected when the toolpath is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub anchor: Point,
    pub width: f64,
    pub height: f64,
}

impl Circle {
    /// Circle of the given diameter whose enclosing square starts at `anchor`.
    pub fn new(anchor: Point, diameter: f64) -> Self {
        Self {
            anchor,
            width: diameter,
            height: diameter,
        }
    }

    pub fn from_rect(anchor: Point, width: f64, height: f64) -> Self {
        Self {
            anchor,
            width,
            height,
        }
    }

    pub fn is_round(&self) -> bool {
        (self.width.abs() - self.height.abs()).abs() <= GEOMETRY_EPSILON
    }

    pub fn radius(&self) -> f64 {
        self.width.abs() / 2.0
    }

    pub fn center(&self) -> Point {
        let (min_x, min_y, max_x, max_y) = self.bounding_box();
        Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
    }

    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        normalized_rect(self.anchor, self.width, self.height)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.anchor = self.anchor.translated(dx, dy);
    }
}

/// An axis-aligned ellipse stored as its enclosing rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub anchor: Point,
    pub width: f64,
    pub height: f64,
}

impl Ellipse {
    pub fn new(anchor: Point, width: f64, height: f64) -> Self {
        Self {
            anchor,
            width,
            height,
        }
    }

    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        normalized_rect(self.anchor, self.width, self.height)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.anchor = self.anchor.translated(dx, dy);
    }
}

#[derive(Deserialize)]
struct PolylineData {
    points: Vec<Point>,
}

impl TryFrom<PolylineData> for Polyline {
    type Error = ShapeError;

    fn try_from(data: PolylineData) -> Result<Self, Self::Error> {
        Polyline::new(data.points)
    }
}

/// An open chain of straight segments through at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolylineData")]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Result<Self, ShapeError> {
        if points.len() < 2 {
            return Err(ShapeError::TooFewPoints(points.len()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consecutive point pairs as segments sharing endpoints.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        self.points.iter().fold(
            (
                f64::INFINITY,
                f64::INFINITY,
                f64::NEG_INFINITY,
                f64::NEG_INFINITY,
            ),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        )
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            *p = p.translated(dx, dy);
        }
    }
}

/// Enum wrapper for all drawable shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Segment(Segment),
    Rectangle(Rectangle),
    Circle(Circle),
    Ellipse(Ellipse),
    Polyline(Polyline),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Segment(_) => ShapeType::Segment,
            Shape::Rectangle(_) => ShapeType::Rectangle,
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Ellipse(_) => ShapeType::Ellipse,
            Shape::Polyline(_) => ShapeType::Polyline,
        }
    }

    /// Axis-aligned bounds as (min_x, min_y, max_x, max_y).
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Segment(s) => s.bounding_box(),
            Shape::Rectangle(s) => s.bounding_box(),
            Shape::Circle(s) => s.bounding_box(),
            Shape::Ellipse(s) => s.bounding_box(),
            Shape::Polyline(s) => s.bounding_box(),
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Segment(s) => s.translate(dx, dy),
            Shape::Rectangle(s) => s.translate(dx, dy),
            Shape::Circle(s) => s.translate(dx, dy),
            Shape::Ellipse(s) => s.translate(dx, dy),
            Shape::Polyline(s) => s.translate(dx, dy),
        }
    }

    /// Text shown next to a freshly drawn shape.
    pub fn dimension_label(&self) -> String {
        match self {
            Shape::Segment(s) => {
                format!("{:.2} mm", s.start.manhattan_distance_to(&s.end))
            }
            Shape::Rectangle(Rectangle { width, height, .. })
            | Shape::Ellipse(Ellipse { width, height, .. }) => {
                format!("{:.2}x{:.2} mm", width.abs(), height.abs())
            }
            Shape::Circle(c) => format!("R={:.2} mm", c.radius()),
            Shape::Polyline(p) => format!("{:.2} mm", p.length()),
        }
    }
}

impl From<Segment> for Shape {
    fn from(s: Segment) -> Self {
        Shape::Segment(s)
    }
}

impl From<Rectangle> for Shape {
    fn from(s: Rectangle) -> Self {
        Shape::Rectangle(s)
    }
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Shape::Circle(s)
    }
}

impl From<Ellipse> for Shape {
    fn from(s: Ellipse) -> Self {
        Shape::Ellipse(s)
    }
}

impl From<Polyline> for Shape {
    fn from(s: Polyline) -> Self {
        Shape::Polyline(s)
    }
}
