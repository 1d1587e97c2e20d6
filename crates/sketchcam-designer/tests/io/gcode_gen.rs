use sketchcam_designer::{
    build_transform, compute_bounding_box, Circle, Point, Polyline, Rectangle, Segment, Shape,
    ToolpathEmitter,
};

fn sample_shapes() -> Vec<Shape> {
    vec![
        Segment::new(Point::new(12.3, 45.6), Point::new(78.9, 10.1)).into(),
        Rectangle::new(Point::new(100.0, 80.0), -40.0, 25.0).into(),
        Circle::new(Point::new(33.3, 66.6), 17.7).into(),
        Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(20.0, 5.0),
            Point::new(40.0, 0.0),
        ])
        .unwrap()
        .into(),
    ]
}

#[test]
fn test_emit_is_byte_identical() {
    let shapes = sample_shapes();
    let bbox = compute_bounding_box(&shapes).unwrap();
    let transform = build_transform(&bbox, &Default::default()).unwrap();
    let emitter = ToolpathEmitter::default();

    let first = emitter.emit(&shapes, &transform).program.to_gcode();
    let second = emitter.emit(&shapes, &transform).program.to_gcode();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_every_number_has_two_decimals() {
    let shapes = sample_shapes();
    let bbox = compute_bounding_box(&shapes).unwrap();
    let transform = build_transform(&bbox, &Default::default()).unwrap();
    let text = ToolpathEmitter::default()
        .emit(&shapes, &transform)
        .program
        .to_gcode();

    for line in text.lines() {
        for word in line.split_whitespace().skip(1) {
            let value = &word[1..];
            let (_, decimals) = value
                .split_once('.')
                .unwrap_or_else(|| panic!("word {} in '{}' has no decimals", word, line));
            assert_eq!(decimals.len(), 2, "word {} in '{}'", word, line);
        }
    }
}

#[test]
fn test_program_framing() {
    let shapes = sample_shapes();
    let bbox = compute_bounding_box(&shapes).unwrap();
    let transform = build_transform(&bbox, &Default::default()).unwrap();
    let program = ToolpathEmitter::default().emit(&shapes, &transform).program;
    let lines = program.lines();

    assert_eq!(&lines[..3], &["G21", "G90", "G0 Z0.10"]);
    assert_eq!(lines.last().map(String::as_str), Some("M30"));
    assert_eq!(lines.iter().filter(|l| *l == "M30").count(), 1);
    assert_eq!(program.to_string(), program.to_gcode());
}
