use sketchcam_core::{CutParameters, GenerationError, MachineEnvelope, UnsupportedShapeError};
use sketchcam_designer::{
    Circle, DrawingMode, Ellipse, GcodePipeline, MotionCommand, Point, Rectangle, Segment, Shape,
    ShapeStore, SharedShapeStore,
};
use sketchcam_designer::{CaptureEvent, CaptureSession};

#[test]
fn test_empty_collection_yields_empty_input() {
    let store = SharedShapeStore::default();
    let result = GcodePipeline::default().generate_from_store(&store);
    assert_eq!(result, Err(GenerationError::EmptyInput));
}

#[test]
fn test_horizontal_segment_is_degenerate() {
    let shapes: Vec<Shape> = vec![Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).into()];
    let result = GcodePipeline::default().generate(&shapes);
    assert_eq!(
        result,
        Err(GenerationError::DegenerateDrawing {
            width: 10.0,
            height: 0.0
        })
    );
}

#[test]
fn test_rectangle_corners_symmetric() {
    let shapes: Vec<Shape> = vec![Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0).into()];
    let generation = GcodePipeline::default().generate(&shapes).unwrap();
    assert!((generation.transform.scale() - 1.8).abs() < 1e-12);

    let lines = generation.program.lines();
    assert_eq!(
        lines,
        vec![
            "G21",
            "G90",
            "G0 Z0.10",
            "G0 X-9.00 Y-9.00",
            "G1 Z-1.00 F100.00",
            "G1 X9.00 Y-9.00 F300.00",
            "G1 X9.00 Y9.00",
            "G1 X-9.00 Y9.00",
            "G1 X-9.00 Y-9.00",
            "G0 Z0.10",
            "M30",
        ]
    );
}

#[test]
fn test_circle_two_opposite_arcs() {
    let shapes: Vec<Shape> = vec![Circle::new(Point::new(0.0, 0.0), 10.0).into()];
    let generation = GcodePipeline::default().generate(&shapes).unwrap();
    let commands = generation.program.commands();

    let plunges = commands
        .iter()
        .filter(|c| matches!(c, MotionCommand::Plunge { .. }))
        .count();
    let retracts = commands
        .iter()
        .filter(|c| matches!(c, MotionCommand::Retract(_)))
        .count();
    let j_offsets: Vec<f64> = commands
        .iter()
        .filter_map(|c| match c {
            MotionCommand::ArcMove { offset, .. } => Some(offset.y),
            _ => None,
        })
        .collect();

    assert_eq!(plunges, 1);
    // The framing retract plus the one after the circle.
    assert_eq!(retracts, 2);
    assert_eq!(j_offsets.len(), 2);
    assert!((j_offsets[0] + j_offsets[1]).abs() < 1e-12);
    assert!((j_offsets[0].abs() - 9.0).abs() < 1e-12);

    let text = generation.gcode();
    assert!(text.contains("G0 X0.00 Y9.00\nG1 Z-1.00 F100.00\nG3 X0.00 Y-9.00 I0.00 J-9.00\nG3 X0.00 Y9.00 I0.00 J9.00\nG0 Z0.10\nM30"));
}

#[test]
fn test_ellipse_flagged_with_no_motion() {
    let shapes: Vec<Shape> = vec![Ellipse::new(Point::new(0.0, 0.0), 10.0, 4.0).into()];
    let generation = GcodePipeline::default().generate(&shapes).unwrap();
    assert!(generation.report.nothing_to_cut());
    assert_eq!(generation.program.cutting_moves(), 0);
    assert_eq!(generation.program.lines(), vec!["G21", "G90", "G0 Z0.10", "M30"]);
    assert_eq!(
        generation.report.skipped[0].reason,
        UnsupportedShapeError::EllipseNotEmitted
    );
}

#[test]
fn test_ellipse_still_counts_toward_bounds() {
    let shapes: Vec<Shape> = vec![
        Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0).into(),
        Ellipse::new(Point::new(10.0, 0.0), 10.0, 10.0).into(),
    ];
    let generation = GcodePipeline::default().generate(&shapes).unwrap();
    assert!((generation.transform.scale() - 0.9).abs() < 1e-12);
    assert_eq!(generation.report.emitted, 1);
}

#[test]
fn test_shapes_emitted_in_capture_order() {
    let mut store = ShapeStore::new();
    let mut session = CaptureSession::new();
    let events = [
        CaptureEvent::SelectTool {
            mode: DrawingMode::Line,
        },
        CaptureEvent::Press {
            at: Point::new(0.0, 0.0),
        },
        CaptureEvent::Release {
            at: Point::new(10.0, 10.0),
        },
        CaptureEvent::SelectTool {
            mode: DrawingMode::Circle,
        },
        CaptureEvent::Press {
            at: Point::new(0.0, 0.0),
        },
        CaptureEvent::Release {
            at: Point::new(10.0, 10.0),
        },
    ];
    for event in events {
        session.handle(event, &mut store);
    }

    let generation = GcodePipeline::default().generate(&store.snapshot()).unwrap();
    let kinds: Vec<&str> = generation
        .program
        .commands()
        .iter()
        .filter_map(|c| match c {
            MotionCommand::LinearMove { .. } => Some("line"),
            MotionCommand::ArcMove { .. } => Some("arc"),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, vec!["line", "arc", "arc"]);
}

#[test]
fn test_custom_envelope_and_parameters() {
    let pipeline = GcodePipeline::new(
        MachineEnvelope::square(100.0, 5.0),
        CutParameters {
            safe_z: 2.0,
            cut_z: -0.25,
            plunge_feed: 60.0,
            cut_feed: 600.0,
            ..CutParameters::default()
        },
    );
    let shapes: Vec<Shape> = vec![Segment::new(Point::new(0.0, 0.0), Point::new(30.0, 45.0)).into()];
    let generation = pipeline.generate(&shapes).unwrap();
    assert!((generation.transform.scale() - 2.0).abs() < 1e-12);
    assert_eq!(
        generation.program.lines(),
        vec![
            "G21",
            "G90",
            "G0 Z2.00",
            "G0 X-30.00 Y-45.00",
            "G1 Z-0.25 F60.00",
            "G1 X30.00 Y45.00 F600.00",
            "G0 Z2.00",
            "M30",
        ]
    );
}
