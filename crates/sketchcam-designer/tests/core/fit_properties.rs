use proptest::prelude::*;
use sketchcam_core::MachineEnvelope;
use sketchcam_designer::{build_transform, compute_bounding_box, Point, Rectangle, Segment, Shape};

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let coord = -500.0f64..500.0;
    prop_oneof![
        (coord.clone(), coord.clone(), coord.clone(), coord.clone())
            .prop_map(|(x1, y1, x2, y2)| {
                Shape::from(Segment::new(Point::new(x1, y1), Point::new(x2, y2)))
            }),
        (coord.clone(), coord.clone(), -200.0f64..200.0, -200.0f64..200.0)
            .prop_map(|(x, y, w, h)| Shape::from(Rectangle::new(Point::new(x, y), w, h))),
    ]
}

proptest! {
    #[test]
    fn transformed_bounds_centered_and_inside(
        shapes in prop::collection::vec(shape_strategy(), 1..8),
        range in 5.0f64..500.0,
        margin in 0.0f64..2.0,
    ) {
        let bbox = compute_bounding_box(&shapes).unwrap();
        prop_assume!(bbox.width() > 1e-6 && bbox.height() > 1e-6);

        let envelope = MachineEnvelope::square(range, margin);
        let transform = build_transform(&bbox, &envelope).unwrap();
        prop_assert!(transform.scale() > 0.0);

        let lo = transform.apply(Point::new(bbox.min_x, bbox.min_y));
        let hi = transform.apply(Point::new(bbox.max_x, bbox.max_y));
        let tol = 1e-6 * range;
        prop_assert!((lo.x + hi.x).abs() < tol);
        prop_assert!((lo.y + hi.y).abs() < tol);

        let half = range / 2.0 - margin;
        prop_assert!(hi.x <= half + tol && hi.y <= half + tol);
        prop_assert!(lo.x >= -half - tol && lo.y >= -half - tol);
        // One axis always touches the usable envelope.
        prop_assert!((hi.x - half).abs() < tol || (hi.y - half).abs() < tol);
    }

    #[test]
    fn aspect_ratio_is_preserved(
        w in 0.5f64..300.0,
        h in 0.5f64..300.0,
    ) {
        let shapes: Vec<Shape> = vec![Rectangle::new(Point::new(0.0, 0.0), w, h).into()];
        let bbox = compute_bounding_box(&shapes).unwrap();
        let transform = build_transform(&bbox, &MachineEnvelope::default()).unwrap();
        let lo = transform.apply(Point::new(0.0, 0.0));
        let hi = transform.apply(Point::new(w, h));
        let ratio_in = w / h;
        let ratio_out = (hi.x - lo.x) / (hi.y - lo.y);
        prop_assert!((ratio_in - ratio_out).abs() < 1e-9 * ratio_in.max(1.0));
    }
}
