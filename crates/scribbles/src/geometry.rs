//! Core geometry types for scribbles.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! In JS you'd write: `const point = { x: 1.0, y: 2.0 }`
//! In Rust, we define a `struct` with explicit types.
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = like console.log, lets you print with `{:?}`
//! - `Clone` = can duplicate the value (like spread: `{...obj}`)
//! - `Copy` = can copy implicitly (small stack values only)
//! - `PartialEq` = can compare with `==`
//! - `Serialize`/`Deserialize` = serde can read/write it as JSON or YAML

use serde::{Deserialize, Serialize};

use crate::error::ScribbleError;

/// A 2D point with x,y coordinates.
///
/// Equality is exact coordinate equality; use [`Point::approx_eq`] when
/// comparing the output of trigonometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point. This is a common pattern instead of constructors.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    ///
    /// `&self` = borrow self (read-only access, like `this` in JS).
    /// Point is `Copy`, so `other` is implicitly copied, not moved.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Componentwise offset.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// True when both coordinates are within `tolerance`.
    #[inline]
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

// lyon_geom does the Bézier math; these let points cross the boundary.
impl From<Point> for lyon_geom::Point<f64> {
    fn from(p: Point) -> Self {
        lyon_geom::point(p.x, p.y)
    }
}

impl From<lyon_geom::Point<f64>> for Point {
    fn from(p: lyon_geom::Point<f64>) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Total length of a polyline: the sum of its consecutive segment lengths.
///
/// Zero for fewer than two points.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// The greatest distance of any point from `origin` (0 for no points).
pub fn max_distance(points: &[Point], origin: Point) -> f64 {
    points.iter().map(|p| origin.distance(*p)).fold(0.0, f64::max)
}

/// Get the bounding box of a point sequence.
///
/// ## Rust Lesson #6: Option<T>
///
/// Rust has no `null`. An empty slice has no bounds, so we return `None`
/// and the compiler makes every caller handle that case.
pub fn bounding_box(points: &[Point]) -> Option<BoundingBox> {
    if points.is_empty() {
        return None;
    }

    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    BoundingBox::new(min_x, min_y, max_x, max_y).ok()
}

/// An axis-aligned box with inclusive bounds.
///
/// Always satisfies `min_x <= max_x` and `min_y <= max_y`; the only way to
/// build one is [`BoundingBox::new`], which checks that (deserialization
/// goes through it too).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBox")]
pub struct BoundingBox {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, ScribbleError> {
        // NaN fails both comparisons, so it is rejected here too.
        let ordered = min_x <= max_x && min_y <= max_y;
        let finite = [min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite());
        if !ordered || !finite {
            return Err(ScribbleError::InvalidClipBox { min_x, min_y, max_x, max_y });
        }
        Ok(Self { min_x, min_y, max_x, max_y })
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Nearest point inside the box.
    #[inline]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(self.min_x, self.max_x), p.y.clamp(self.min_y, self.max_y))
    }

    /// Grow the box by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Result<Self, ScribbleError> {
        Self::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }
}

/// Unchecked wire form of [`BoundingBox`].
#[derive(Deserialize)]
struct RawBox {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl TryFrom<RawBox> for BoundingBox {
    type Error = ScribbleError;

    fn try_from(raw: RawBox) -> Result<Self, Self::Error> {
        BoundingBox::new(raw.min_x, raw.min_y, raw.max_x, raw.max_y)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(4.0, 3.0);
        assert_eq!(p1.distance(p2), 5.0); // 3-4-5 triangle
    }

    #[test]
    fn point_distance_floating_point() {
        let d = Point::new(3.0, 2.0).distance(Point::new(9.0, 7.0));
        assert!((d - 61f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn path_length_sums_segments() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 5.0),
            Point::new(20.0, 9.0),
            Point::new(-10.0, 9.0),
            Point::new(-5.0, -5.0),
        ];
        let expected = 34f64.sqrt() + (17f64 * 17.0 + 16.0).sqrt() + 30.0 + (25f64 + 196.0).sqrt();
        assert!((path_length(&points) - expected).abs() < 1e-9);
    }

    #[test]
    fn path_length_of_short_paths_is_zero() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[Point::new(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn max_distance_from_origin() {
        let y2 = -5.01;
        let points = vec![Point::new(5.0, 5.0), Point::new(-5.0, y2), Point::new(-5.0, 5.0)];
        let expected = (25.0 + y2 * y2).sqrt();
        assert!((max_distance(&points, Point::ORIGIN) - expected).abs() < 1e-12);
    }

    #[test]
    fn bbox_of_points() {
        let points = vec![Point::new(0.0, 0.0), Point::new(10.0, -2.0), Point::new(4.0, 5.0)];
        let bbox = bounding_box(&points).unwrap();
        assert_eq!(bbox, BoundingBox::new(0.0, -2.0, 10.0, 5.0).unwrap());
        assert_eq!(bbox.width(), 10.0);
        assert_eq!(bbox.height(), 7.0);
    }

    #[test]
    fn empty_bbox() {
        assert_eq!(bounding_box(&[]), None);
    }

    #[test]
    fn inverted_box_rejected() {
        assert!(matches!(
            BoundingBox::new(10.0, 0.0, 0.0, 10.0),
            Err(ScribbleError::InvalidClipBox { .. })
        ));
        assert!(BoundingBox::new(0.0, 0.0, f64::NAN, 1.0).is_err());
        assert!(BoundingBox::new(1.0, 1.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn box_contains_is_inclusive() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
        assert!(bbox.contains(Point::new(0.0, 0.0)));
        assert!(bbox.contains(Point::new(10.0, 10.0)));
        assert!(!bbox.contains(Point::new(-0.001, 5.0)));
    }

    #[test]
    fn box_clamp() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
        assert_eq!(bbox.clamp(Point::new(-3.0, 12.0)), Point::new(0.0, 10.0));
        assert_eq!(bbox.clamp(Point::new(4.0, 6.0)), Point::new(4.0, 6.0));
    }

    #[test]
    fn lyon_round_trip() {
        let p = Point::new(1.5, -2.25);
        let lp: lyon_geom::Point<f64> = p.into();
        assert_eq!(Point::from(lp), p);
    }
}
