//! Point transformations applied after generation.
//!
//! A [`PointTransformer`] is an ordered list of [`TransformOp`]s. Order
//! matters: translate-then-rotate is not rotate-then-translate.
//!
//! ## Rust Lesson #14: Builders by Value
//!
//! Each builder method takes `self` (not `&mut self`) and returns it, so
//! calls chain without a temporary:
//!
//! ```
//! use scribbles::{Point, PointTransformer};
//!
//! let t = PointTransformer::new().translate(10.0, 0.0).rotate(90.0);
//! let out = t.transform(&[Point::new(1.0, 0.0)]);
//! assert!(out[0].approx_eq(Point::new(0.0, 11.0), 1e-9));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ScribbleError;
use crate::geometry::{BoundingBox, Point};

/// One geometric operation.
///
/// Serialized with an `op` tag, so recipes read like
/// `{ op: rotate, degrees: 45 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOp {
    Translate { dx: f64, dy: f64 },
    Scale { sx: f64, sy: f64 },
    /// Counter-clockwise about (0, 0).
    Rotate { degrees: f64 },
    /// Reflect across the x axis (negate y).
    MirrorHorizontal,
    /// Reflect across the y axis (negate x).
    MirrorVertical,
    /// Drop points outside the box (bounds inclusive).
    ClipBox(BoundingBox),
    /// Pull points outside the box onto its edge.
    Clamp(BoundingBox),
}

impl TransformOp {
    /// Apply to one point; `None` means the point was clipped away.
    #[inline]
    pub fn apply(&self, p: Point) -> Option<Point> {
        match *self {
            TransformOp::Translate { dx, dy } => Some(p.offset(dx, dy)),
            TransformOp::Scale { sx, sy } => Some(Point::new(p.x * sx, p.y * sy)),
            TransformOp::Rotate { degrees } => {
                let (sin, cos) = degrees.to_radians().sin_cos();
                Some(Point::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos))
            }
            TransformOp::MirrorHorizontal => Some(Point::new(p.x, -p.y)),
            TransformOp::MirrorVertical => Some(Point::new(-p.x, p.y)),
            TransformOp::ClipBox(bbox) => bbox.contains(p).then_some(p),
            TransformOp::Clamp(bbox) => Some(bbox.clamp(p)),
        }
    }
}

/// An ordered pipeline of transform operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointTransformer {
    ops: Vec<TransformOp>,
}

impl PointTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        self.then(TransformOp::Translate { dx, dy })
    }

    /// Zero or negative factors are allowed (negative mirrors).
    pub fn scale(self, sx: f64, sy: f64) -> Self {
        self.then(TransformOp::Scale { sx, sy })
    }

    pub fn rotate(self, degrees: f64) -> Self {
        self.then(TransformOp::Rotate { degrees })
    }

    pub fn mirror_horizontal(self) -> Self {
        self.then(TransformOp::MirrorHorizontal)
    }

    pub fn mirror_vertical(self) -> Self {
        self.then(TransformOp::MirrorVertical)
    }

    /// Keep only points inside the box. Fails for inverted or non-finite bounds.
    pub fn clip_to_box(self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, ScribbleError> {
        let bbox = BoundingBox::new(min_x, min_y, max_x, max_y)?;
        Ok(self.clip_to(bbox))
    }

    pub fn clip_to(self, bbox: BoundingBox) -> Self {
        self.then(TransformOp::ClipBox(bbox))
    }

    pub fn clamp_to(self, bbox: BoundingBox) -> Self {
        self.then(TransformOp::Clamp(bbox))
    }

    pub fn then(mut self, op: TransformOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Run one point through every op; `None` if any clip rejects it.
    pub fn transform_point(&self, p: Point) -> Option<Point> {
        self.ops.iter().try_fold(p, |p, op| op.apply(p))
    }

    /// Transform a sequence. Without a clip op the output has one point per
    /// input point, in the same order.
    pub fn transform(&self, points: &[Point]) -> Vec<Point> {
        points.iter().filter_map(|p| self.transform_point(*p)).collect()
    }
}

impl From<Vec<TransformOp>> for PointTransformer {
    fn from(ops: Vec<TransformOp>) -> Self {
        Self { ops }
    }
}

impl FromIterator<TransformOp> for PointTransformer {
    fn from_iter<I: IntoIterator<Item = TransformOp>>(iter: I) -> Self {
        Self { ops: iter.into_iter().collect() }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_points(actual: &[Point], expected: &[Point]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!(a.approx_eq(*e, EPS), "{:?} vs {:?}", a, e);
        }
    }

    #[test]
    fn empty_transformer_is_identity() {
        let points = vec![Point::new(1.0, 2.0), Point::new(-3.0, 4.5)];
        let t = PointTransformer::new();
        assert!(t.is_empty());
        assert_eq!(t.transform(&points), points);
    }

    #[test]
    fn translate_then_rotate_differs_from_reverse() {
        let p = [Point::new(1.0, 0.0)];
        let a = PointTransformer::new().translate(10.0, 0.0).rotate(90.0).transform(&p);
        let b = PointTransformer::new().rotate(90.0).translate(10.0, 0.0).transform(&p);
        assert_points(&a, &[Point::new(0.0, 11.0)]);
        assert_points(&b, &[Point::new(10.0, 1.0)]);
    }

    #[test]
    fn rotation_is_counter_clockwise() {
        let t = PointTransformer::new().rotate(90.0);
        assert!(t.transform_point(Point::new(0.0, 1.0)).unwrap().approx_eq(Point::new(-1.0, 0.0), EPS));
    }

    #[test]
    fn mirrors_are_involutions() {
        let points = vec![Point::new(3.0, -7.0), Point::new(0.5, 2.0)];
        let h = PointTransformer::new().mirror_horizontal().mirror_horizontal();
        let v = PointTransformer::new().mirror_vertical().mirror_vertical();
        assert_eq!(h.transform(&points), points);
        assert_eq!(v.transform(&points), points);
    }

    #[test]
    fn mirror_axes() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(TransformOp::MirrorHorizontal.apply(p), Some(Point::new(3.0, -4.0)));
        assert_eq!(TransformOp::MirrorVertical.apply(p), Some(Point::new(-3.0, 4.0)));
    }

    #[test]
    fn scale_stretches_each_axis() {
        let t = PointTransformer::new().scale(3.0, 0.5);
        assert_eq!(t.transform(&[Point::new(2.0, 4.0)]), vec![Point::new(6.0, 2.0)]);
        let flip = PointTransformer::new().scale(-1.0, 1.0);
        assert_eq!(flip.transform(&[Point::new(2.0, 4.0)]), vec![Point::new(-2.0, 4.0)]);
    }

    #[test]
    fn clip_drops_outside_points_inclusively() {
        let t = PointTransformer::new().clip_to_box(0.0, 0.0, 5.0, 5.0).unwrap();
        let points = [Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(-1.0, -1.0)];
        assert_eq!(t.transform(&points), vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
    }

    #[test]
    fn clip_rejects_inverted_box() {
        let result = PointTransformer::new().clip_to_box(5.0, 0.0, 0.0, 5.0);
        assert!(matches!(result, Err(ScribbleError::InvalidClipBox { .. })));
    }

    #[test]
    fn clamp_keeps_every_point() {
        let bbox = BoundingBox::new(-10.0, -10.0, 10.0, 10.0).unwrap();
        let t = PointTransformer::new().clamp_to(bbox);
        let out = t.transform(&[Point::new(50.0, 0.0), Point::new(-3.0, -40.0)]);
        assert_eq!(out, vec![Point::new(10.0, 0.0), Point::new(-3.0, -10.0)]);
    }

    #[test]
    fn clip_after_translate_sees_translated_points() {
        let t = PointTransformer::new()
            .translate(10.0, 0.0)
            .clip_to_box(0.0, -1.0, 20.0, 1.0)
            .unwrap();
        let out = t.transform(&[Point::new(-5.0, 0.0), Point::new(-15.0, 0.0)]);
        assert_eq!(out, vec![Point::new(5.0, 0.0)]);
    }

    #[test]
    fn input_is_not_mutated() {
        let points = vec![Point::new(1.0, 1.0)];
        let _ = PointTransformer::new().translate(1.0, 1.0).transform(&points);
        assert_eq!(points, vec![Point::new(1.0, 1.0)]);
    }

    #[test]
    fn ops_deserialize_from_yaml() {
        let yaml = r#"
- { op: translate, dx: 10, dy: -2 }
- { op: rotate, degrees: 90 }
- op: mirror_vertical
- { op: clip_box, min_x: -5, min_y: -5, max_x: 5, max_y: 5 }
"#;
        let t: PointTransformer = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(t.ops().len(), 4);
        assert_eq!(t.ops()[1], TransformOp::Rotate { degrees: 90.0 });
        assert!(matches!(t.ops()[3], TransformOp::ClipBox(_)));
    }

    #[test]
    fn inverted_box_in_yaml_is_an_error() {
        let yaml = "- { op: clamp, min_x: 5, min_y: 0, max_x: -5, max_y: 1 }";
        assert!(serde_yaml::from_str::<PointTransformer>(yaml).is_err());
    }
}
