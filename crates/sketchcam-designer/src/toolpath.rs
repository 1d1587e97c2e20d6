//! Toolpath emission from captured shapes.
//!
//! Every cut follows the same cycle: rapid to the start point at safe height,
//! plunge to cut depth, cut, retract. Shapes are emitted in capture order and
//! the program is framed by unit/mode setup and a program end.

use crate::fit::FitTransform;
use crate::shapes::{Circle, Point, Polyline, Rectangle, Segment, Shape, ShapeType};
use sketchcam_core::constants::GEOMETRY_EPSILON;
use sketchcam_core::{CutParameters, UnsupportedShapeError, Units};

/// Direction of a circular interpolation move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    /// G2
    Clockwise,
    /// G3
    CounterClockwise,
}

/// A single motion or modal command of a toolpath program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionCommand {
    SetUnits(Units),
    SetAbsoluteMode,
    /// Non-cutting XY travel at the current (safe) height
    RapidMove(Point),
    /// Feed-controlled move along Z into the material
    Plunge { z: f64, feed: f64 },
    /// Cutting move in XY; `feed` is omitted when it is already modal
    LinearMove { to: Point, feed: Option<f64> },
    /// Circular cut to `to` around `start + offset`
    ArcMove {
        direction: ArcDirection,
        to: Point,
        offset: Point,
    },
    /// Rapid move up to `z`
    Retract(f64),
    ProgramEnd,
}

/// An immutable, ordered list of motion commands.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolpathProgram {
    commands: Vec<MotionCommand>,
}

impl ToolpathProgram {
    pub fn commands(&self) -> &[MotionCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of commands that move the tool in XY below safe height.
    pub fn cutting_moves(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    MotionCommand::LinearMove { .. } | MotionCommand::ArcMove { .. }
                )
            })
            .count()
    }
}

/// A shape that produced no toolpath, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedShape {
    /// Position of the shape in the emitted sequence
    pub index: usize,
    pub shape_type: ShapeType,
    pub reason: UnsupportedShapeError,
}

/// What emission did with each shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmissionReport {
    pub emitted: usize,
    pub skipped: Vec<SkippedShape>,
}

impl EmissionReport {
    /// True when the program contains framing only.
    pub fn nothing_to_cut(&self) -> bool {
        self.emitted == 0
    }
}

/// A freshly emitted program plus its report.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub program: ToolpathProgram,
    pub report: EmissionReport,
}

/// Emits plunge-cut-retract cycles for each shape.
#[derive(Debug, Clone, Default)]
pub struct ToolpathEmitter {
    params: CutParameters,
}

impl ToolpathEmitter {
    pub fn new(params: CutParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CutParameters {
        &self.params
    }

    /// Emits a framed program for `shapes`, skipping (and reporting) any shape
    /// that cannot be cut.
    pub fn emit(&self, shapes: &[Shape], transform: &FitTransform) -> Emission {
        let mut commands = vec![
            MotionCommand::SetUnits(self.params.units),
            MotionCommand::SetAbsoluteMode,
            MotionCommand::Retract(self.params.safe_z),
        ];
        let mut report = EmissionReport::default();

        for (index, shape) in shapes.iter().enumerate() {
            match self.shape_commands(shape, transform) {
                Ok(cuts) => {
                    tracing::debug!(
                        "Shape {} ({}): {} commands",
                        index,
                        shape.shape_type(),
                        cuts.len()
                    );
                    commands.extend(cuts);
                    report.emitted += 1;
                }
                Err(reason) => {
                    tracing::warn!("Skipping shape {} ({}): {}", index, shape.shape_type(), reason);
                    report.skipped.push(SkippedShape {
                        index,
                        shape_type: shape.shape_type(),
                        reason,
                    });
                }
            }
        }

        commands.push(MotionCommand::ProgramEnd);
        if report.nothing_to_cut() {
            tracing::warn!("Nothing to cut: program contains setup and program end only");
        }

        Emission {
            program: ToolpathProgram { commands },
            report,
        }
    }

    fn shape_commands(
        &self,
        shape: &Shape,
        transform: &FitTransform,
    ) -> Result<Vec<MotionCommand>, UnsupportedShapeError> {
        match shape {
            Shape::Segment(s) => self.segment_commands(s, transform),
            Shape::Rectangle(r) => self.rectangle_commands(r, transform),
            Shape::Circle(c) => self.circle_commands(c, transform),
            Shape::Ellipse(_) => Err(UnsupportedShapeError::EllipseNotEmitted),
            Shape::Polyline(p) => self.polyline_commands(p, transform),
        }
    }

    fn plunge(&self) -> MotionCommand {
        MotionCommand::Plunge {
            z: self.params.cut_z,
            feed: self.params.plunge_feed,
        }
    }

    fn retract(&self) -> MotionCommand {
        MotionCommand::Retract(self.params.safe_z)
    }

    /// Rapid to the first point, plunge, cut through the rest, retract.
    fn cut_through(&self, points: &[Point]) -> Vec<MotionCommand> {
        let mut commands = Vec::with_capacity(points.len() + 2);
        let Some((first, rest)) = points.split_first() else {
            return commands;
        };
        commands.push(MotionCommand::RapidMove(*first));
        commands.push(self.plunge());
        for (i, to) in rest.iter().enumerate() {
            let feed = (i == 0).then_some(self.params.cut_feed);
            commands.push(MotionCommand::LinearMove { to: *to, feed });
        }
        commands.push(self.retract());
        commands
    }

    fn segment_commands(
        &self,
        segment: &Segment,
        transform: &FitTransform,
    ) -> Result<Vec<MotionCommand>, UnsupportedShapeError> {
        if segment.length() <= GEOMETRY_EPSILON {
            return Err(degenerate(ShapeType::Segment, "start and end points coincide"));
        }
        Ok(self.cut_through(&[transform.apply(segment.start), transform.apply(segment.end)]))
    }

    fn rectangle_commands(
        &self,
        rect: &Rectangle,
        transform: &FitTransform,
    ) -> Result<Vec<MotionCommand>, UnsupportedShapeError> {
        if rect.width.abs() <= GEOMETRY_EPSILON || rect.height.abs() <= GEOMETRY_EPSILON {
            return Err(degenerate(ShapeType::Rectangle, "zero width or height"));
        }
        let [a, b, c, d] = rect.corners().map(|p| transform.apply(p));
        Ok(self.cut_through(&[a, b, c, d, a]))
    }

    fn circle_commands(
        &self,
        circle: &Circle,
        transform: &FitTransform,
    ) -> Result<Vec<MotionCommand>, UnsupportedShapeError> {
        if !circle.is_round() {
            return Err(UnsupportedShapeError::NonSquareCircle {
                width: circle.width,
                height: circle.height,
            });
        }
        if circle.radius() <= GEOMETRY_EPSILON {
            return Err(degenerate(ShapeType::Circle, "zero radius"));
        }

        // The center goes through the full transform; the radius is a length
        // and only picks up the scale.
        let center = transform.apply(circle.center());
        let radius = transform.scale_length(circle.radius());
        let top = Point::new(center.x, center.y + radius);
        let bottom = Point::new(center.x, center.y - radius);

        Ok(vec![
            MotionCommand::RapidMove(top),
            self.plunge(),
            MotionCommand::ArcMove {
                direction: ArcDirection::CounterClockwise,
                to: bottom,
                offset: Point::new(0.0, -radius),
            },
            MotionCommand::ArcMove {
                direction: ArcDirection::CounterClockwise,
                to: top,
                offset: Point::new(0.0, radius),
            },
            self.retract(),
        ])
    }

    fn polyline_commands(
        &self,
        polyline: &Polyline,
        transform: &FitTransform,
    ) -> Result<Vec<MotionCommand>, UnsupportedShapeError> {
        let commands: Vec<MotionCommand> = polyline
            .segments()
            .filter(|s| s.length() > GEOMETRY_EPSILON)
            .flat_map(|s| self.cut_through(&[transform.apply(s.start), transform.apply(s.end)]))
            .collect();
        if commands.is_empty() {
            return Err(degenerate(ShapeType::Polyline, "all points coincide"));
        }
        Ok(commands)
    }
}

fn degenerate(kind: ShapeType, reason: &str) -> UnsupportedShapeError {
    UnsupportedShapeError::Degenerate {
        kind: kind.to_string(),
        reason: reason.to_string(),
    }
}
