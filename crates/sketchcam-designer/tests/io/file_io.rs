use sketchcam_designer::{
    load_program, load_sketch, save_program, save_sketch, CaptureEvent, Circle, DrawingMode,
    GcodePipeline, Point, Rectangle, Sketch,
};
use tempfile::TempDir;

#[test]
fn test_sketch_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drawing.json");

    let sketch = Sketch {
        shapes: vec![Rectangle::new(Point::new(0.0, 0.0), 10.0, 5.0).into()],
        events: vec![
            CaptureEvent::SelectTool {
                mode: DrawingMode::Circle,
            },
            CaptureEvent::Press {
                at: Point::new(2.0, 2.0),
            },
            CaptureEvent::Release {
                at: Point::new(4.0, 5.0),
            },
        ],
    };
    save_sketch(&path, &sketch).unwrap();
    let loaded = load_sketch(&path).unwrap();
    assert_eq!(loaded, sketch);

    let store = loaded.to_store();
    assert_eq!(store.len(), 2);
    assert_eq!(
        store.snapshot()[1],
        Circle::new(Point::new(2.0, 2.0), 2.0).into()
    );
}

#[test]
fn test_program_saved_with_trailing_newline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.ngc");

    let shapes = vec![Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0).into()];
    let generation = GcodePipeline::default().generate(&shapes).unwrap();
    save_program(&path, &generation.program).unwrap();

    let text = load_program(&path).unwrap();
    assert_eq!(text, format!("{}\n", generation.gcode()));
}

#[test]
fn test_missing_sketch_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.json");
    let err = load_sketch(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("nope.json"));
}

#[test]
fn test_invalid_polyline_in_sketch_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"shapes": [{"kind": "polyline", "points": [{"x": 1.0, "y": 1.0}]}]}"#,
    )
    .unwrap();
    assert!(load_sketch(&path).is_err());
}
