//! Property tests for the point engine and transformer.

use proptest::prelude::*;
use scribbles::{
    path_length, LengthBudget, Point, PointTransformer, ScribbleGenerator, TransformOp, Variant,
};

fn variant() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::Linear), Just(Variant::Bunched), Just(Variant::Curvy)]
}

fn point() -> impl Strategy<Value = Point> {
    (-1000.0..1000.0f64, -1000.0..1000.0f64).prop_map(|(x, y)| Point::new(x, y))
}

/// Any op except clipping, which is the only one allowed to drop points.
fn non_clip_op() -> impl Strategy<Value = TransformOp> {
    prop_oneof![
        (-100.0..100.0f64, -100.0..100.0f64).prop_map(|(dx, dy)| TransformOp::Translate { dx, dy }),
        (-5.0..5.0f64, -5.0..5.0f64).prop_map(|(sx, sy)| TransformOp::Scale { sx, sy }),
        (-720.0..720.0f64).prop_map(|degrees| TransformOp::Rotate { degrees }),
        Just(TransformOp::MirrorHorizontal),
        Just(TransformOp::MirrorVertical),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_starts_at_the_seed_point(
        variant in variant(),
        seed in any::<u64>(),
        origin in point(),
        radius in -50.0..50.0f64,
        max_length in -10.0..500.0f64,
    ) {
        let points = ScribbleGenerator::seeded(variant, origin, seed).get_points(radius, max_length);
        prop_assert!(!points.is_empty());
        prop_assert!(points[0].approx_eq(origin.offset(radius, 0.0), 1e-9));
        if max_length <= 0.0 {
            prop_assert_eq!(points.len(), 1);
        }
    }

    #[test]
    fn overshoot_stops_within_one_segment_of_the_budget(
        variant in variant(),
        seed in any::<u64>(),
        radius in 1.0..30.0f64,
        max_length in 1.0..1500.0f64,
    ) {
        let trace = ScribbleGenerator::seeded(variant, Point::ORIGIN, seed).trace(radius, max_length);
        prop_assume!(!trace.capped);
        let n = trace.points.len();
        prop_assert!(n >= 2);
        let last_step = trace.points[n - 2].distance(trace.points[n - 1]);
        prop_assert!(trace.length >= max_length);
        prop_assert!(trace.length - last_step < max_length);
    }

    #[test]
    fn truncate_never_exceeds_the_budget(
        variant in variant(),
        seed in any::<u64>(),
        radius in 1.0..30.0f64,
        max_length in 1.0..1500.0f64,
    ) {
        let points = ScribbleGenerator::seeded(variant, Point::ORIGIN, seed)
            .with_budget(LengthBudget::Truncate)
            .get_points(radius, max_length);
        prop_assert!(path_length(&points) <= max_length + 1e-9);
    }

    #[test]
    fn transforms_without_clipping_keep_every_point(
        points in prop::collection::vec(point(), 0..50),
        ops in prop::collection::vec(non_clip_op(), 0..6),
    ) {
        let transformer = PointTransformer::from(ops);
        prop_assert_eq!(transformer.transform(&points).len(), points.len());
    }

    #[test]
    fn mirroring_twice_is_identity(points in prop::collection::vec(point(), 0..50)) {
        let h = PointTransformer::new().mirror_horizontal().mirror_horizontal();
        let v = PointTransformer::new().mirror_vertical().mirror_vertical();
        prop_assert_eq!(h.transform(&points), points.clone());
        prop_assert_eq!(v.transform(&points), points);
    }

    #[test]
    fn clipped_points_all_lie_in_the_box(
        points in prop::collection::vec(point(), 0..50),
        half in 1.0..500.0f64,
    ) {
        let clipped = PointTransformer::new()
            .clip_to_box(-half, -half, half, half)
            .unwrap()
            .transform(&points);
        prop_assert!(clipped.len() <= points.len());
        prop_assert!(clipped.iter().all(|p| p.x.abs() <= half && p.y.abs() <= half));
    }
}
