use sketchcam::commands;
use sketchcam::designer::{save_sketch, CaptureEvent, DrawingMode, Point, Rectangle};
use sketchcam::{Config, NoOpController, Sketch};
use tempfile::TempDir;

fn press_release(mode: DrawingMode, from: (f64, f64), to: (f64, f64)) -> Vec<CaptureEvent> {
    vec![
        CaptureEvent::SelectTool { mode },
        CaptureEvent::Press {
            at: Point::new(from.0, from.1),
        },
        CaptureEvent::Release {
            at: Point::new(to.0, to.1),
        },
    ]
}

#[test]
fn test_generate_from_recorded_clicks() {
    let dir = TempDir::new().unwrap();
    let sketch_path = dir.path().join("sketch.json");
    let sketch = Sketch {
        shapes: Vec::new(),
        events: press_release(DrawingMode::Rectangle, (0.0, 0.0), (10.0, 10.0)),
    };
    save_sketch(&sketch_path, &sketch).unwrap();

    let generation = commands::generate_from_sketch(&sketch_path, &Config::default()).unwrap();
    let lines = generation.program.lines();
    assert_eq!(lines[3], "G0 X-9.00 Y-9.00");
    assert_eq!(lines.last().map(String::as_str), Some("M30"));
}

#[test]
fn test_empty_sketch_reports_no_shapes() {
    let dir = TempDir::new().unwrap();
    let sketch_path = dir.path().join("sketch.json");
    save_sketch(&sketch_path, &Sketch::default()).unwrap();

    let err = commands::generate_from_sketch(&sketch_path, &Config::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("No valid shapes to generate G-code"));
}

#[tokio::test]
async fn test_dry_run_send_writes_program() {
    let dir = TempDir::new().unwrap();
    let sketch_path = dir.path().join("sketch.json");
    save_sketch(
        &sketch_path,
        &Sketch::from_shapes(vec![Rectangle::new(Point::new(0.0, 0.0), 4.0, 2.0).into()]),
    )
    .unwrap();

    let mut config = Config::default();
    config.output.program_path = dir.path().join("gui_output.ngc");

    let program = commands::program_text(&sketch_path, &config).unwrap();
    let mut controller = NoOpController::new();
    commands::send_program(&mut controller, &program, &config)
        .await
        .unwrap();

    let written = std::fs::read_to_string(&config.output.program_path).unwrap();
    assert_eq!(written, format!("{}\n", program));
    assert_eq!(controller.program(), Some(config.output.program_path.as_path()));
}

#[tokio::test]
async fn test_send_refuses_empty_program() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.output.program_path = dir.path().join("gui_output.ngc");

    let mut controller = NoOpController::new();
    let err = commands::send_program(&mut controller, "", &config)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No G-code to send"));
    assert!(!config.output.program_path.exists());
}
