//! Polar stepping - the recurrence under every scribble variant.
//!
//! A scribble is the parametric circle `(r·cos θ, r·sin θ)` where both `θ`
//! and `r` are pushed through caller-supplied update rules between points.

use crate::geometry::Point;
use crate::rules::RuleRun;

/// Current angle (degrees) and radius of a scribble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarState {
    pub angle: f64,
    pub radius: f64,
}

impl PolarState {
    /// Every generation run starts at angle 0 with the caller's radius.
    #[inline]
    pub fn seed(initial_radius: f64) -> Self {
        Self { angle: 0.0, radius: initial_radius }
    }
}

/// Converts polar states into points around a fixed origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarStepper {
    origin: Point,
}

impl PolarStepper {
    pub fn new(origin: Point) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Cartesian position of `state` relative to the origin.
    ///
    /// A negative radius reflects the point through the origin.
    #[inline]
    pub fn point_at(&self, state: PolarState) -> Point {
        let (sin, cos) = state.angle.to_radians().sin_cos();
        self.origin.offset(state.radius * cos, state.radius * sin)
    }

    /// Advance both values through their rules and place the new point.
    ///
    /// Non-finite rule output is not corrected; it yields a degenerate point.
    #[inline]
    pub fn step(&self, state: PolarState, angle: &mut RuleRun<'_>, radius: &mut RuleRun<'_>) -> (PolarState, Point) {
        let next = PolarState {
            angle: angle.advance(state.angle),
            radius: radius.advance(state.radius),
        };
        (next, self.point_at(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn seed_point_lies_on_positive_x_axis() {
        let stepper = PolarStepper::new(Point::new(10.0, -5.0));
        let p = stepper.point_at(PolarState::seed(10.0));
        assert!(p.approx_eq(Point::new(20.0, -5.0), EPS));
    }

    #[test]
    fn step_applies_rules_then_places_point() {
        let stepper = PolarStepper::new(Point::ORIGIN);
        let (state, p) = stepper.step(
            PolarState::seed(10.0),
            &mut RuleRun::new(&|a: f64| a + 90.0),
            &mut RuleRun::new(&|r: f64| r * 2.0),
        );
        assert_eq!(state, PolarState { angle: 90.0, radius: 20.0 });
        assert!(p.approx_eq(Point::new(0.0, 20.0), EPS));
    }

    #[test]
    fn negative_radius_reflects_through_origin() {
        let stepper = PolarStepper::new(Point::ORIGIN);
        let p = stepper.point_at(PolarState { angle: 0.0, radius: -4.0 });
        assert!(p.approx_eq(Point::new(-4.0, 0.0), EPS));
    }

    #[test]
    fn non_finite_rule_output_passes_through() {
        let stepper = PolarStepper::new(Point::ORIGIN);
        let (state, p) = stepper.step(
            PolarState::seed(1.0),
            &mut RuleRun::new(&|a: f64| a),
            &mut RuleRun::new(&|_: f64| f64::NAN),
        );
        assert!(state.radius.is_nan());
        assert!(!p.is_finite());
    }
}
