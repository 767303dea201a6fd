//! Scribble generators - random polar walks turned into point sequences.
//!
//! All three variants share one recurrence ([`PolarStepper`]) and differ only
//! in how consecutive stepped points become output:
//! - **Linear**: every stepped point is emitted as-is
//! - **Bunched**: points are taken in (control, end) pairs and each pair
//!   becomes a quadratic Bézier curve starting at the previous end
//! - **Curvy**: like bunched, but the previous curve's end point becomes the
//!   next control point and each curve is cut short at ~5/6 of its length,
//!   which hides the corners between curves
//!
//! Generation stops when the path length reaches `max_length` (see
//! [`LengthBudget`]) or after `max_steps` polar steps, whichever is first.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use lyon_geom::QuadraticBezierSegment;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::polar::{PolarState, PolarStepper};
use crate::rng::entropy_seed;
use crate::rules::{RuleRun, RuleSpec, SharedRule, UpdateRule};

/// Samples per Bézier curve unless configured otherwise.
pub const DEFAULT_BEZIER_STEPS: usize = 10;

/// Fewer samples than this makes curvy scribbles degenerate.
pub const MIN_BEZIER_STEPS: usize = 10;

/// More samples than this adds nothing visible and only costs memory.
pub const MAX_BEZIER_STEPS: usize = 10_000;

/// Polar steps allowed per call before generation gives up.
///
/// Realistic scribbles (a few thousand units long) need well under a
/// thousand steps; the cap only matters for rules that stop moving.
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// Fraction of each curvy segment that is drawn before the next begins.
const CURVY_SPLIT: f64 = 5.0 / 6.0;

/// How stepped points become output points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Linear,
    Bunched,
    Curvy,
}

impl Variant {
    /// Get all available variants.
    pub fn all() -> &'static [Variant] {
        &[Variant::Linear, Variant::Bunched, Variant::Curvy]
    }

    /// Get variant name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Linear => "linear",
            Variant::Bunched => "bunched",
            Variant::Curvy => "curvy",
        }
    }

    /// Parse variant from name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Variant> {
        Variant::all()
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// When to stop relative to `max_length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthBudget {
    /// Stop at the first point whose cumulative length reaches or exceeds
    /// `max_length`; that point is kept.
    #[default]
    Overshoot,
    /// Never keep a point that would take the length past `max_length`.
    Truncate,
}

/// Everything a generation run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// The emitted points, in drawing order.
    pub points: Vec<Point>,
    /// Underlying curves for bunched/curvy runs (empty for linear).
    pub segments: Vec<QuadraticBezierSegment<f64>>,
    /// Path length of `points`.
    pub length: f64,
    /// True if the iteration cap ended the run before the length budget.
    pub capped: bool,
}

/// The recurrence a generator replays on every call: where the walk is
/// centered and how angle and radius evolve between steps.
#[derive(Clone)]
pub struct ScribbleConfig {
    pub origin: Point,
    pub angle_rule: SharedRule,
    pub radius_rule: SharedRule,
}

impl ScribbleConfig {
    pub fn new(origin: Point, angle_rule: SharedRule, radius_rule: SharedRule) -> Self {
        Self { origin, angle_rule, radius_rule }
    }

    /// The default random rules (`a + U{1..50}`, `|r + U{-3..3}|`) with a
    /// fixed seed.
    pub fn seeded(origin: Point, seed: u64) -> Self {
        Self {
            origin,
            angle_rule: RuleSpec::default_angle().bind(seed).into_shared(),
            radius_rule: RuleSpec::default_radius().bind(decorrelate(seed)).into_shared(),
        }
    }
}

impl fmt::Debug for ScribbleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScribbleConfig")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Produces scribble point sequences from an origin and two update rules.
///
/// Generators hold no per-call state: every call to
/// [`get_points`](Self::get_points) starts from angle 0 and the given radius,
/// so one generator can be reused (and shared between threads).
///
/// # Example
/// ```
/// use scribbles::{Point, ScribbleGenerator};
///
/// // A circle: constant radius, 10° per step.
/// let circle = ScribbleGenerator::linear(Point::new(0.0, 0.0))
///     .with_angle_rule(|a: f64| a + 10.0)
///     .with_radius_rule(|r: f64| r);
/// let points = circle.get_points(10.0, 62.8);
/// assert!(points.len() > 30);
/// ```
#[derive(Clone)]
pub struct ScribbleGenerator {
    variant: Variant,
    config: ScribbleConfig,
    stepper: PolarStepper,
    bezier_steps: usize,
    max_steps: usize,
    budget: LengthBudget,
}

impl ScribbleGenerator {
    /// A generator with the default random rules, seeded from the clock.
    pub fn new(variant: Variant, origin: Point) -> Self {
        Self::seeded(variant, origin, entropy_seed())
    }

    /// A generator with the default random rules and a fixed seed.
    pub fn seeded(variant: Variant, origin: Point, seed: u64) -> Self {
        Self::from_config(variant, ScribbleConfig::seeded(origin, seed))
    }

    pub fn from_config(variant: Variant, config: ScribbleConfig) -> Self {
        Self {
            variant,
            stepper: PolarStepper::new(config.origin),
            config,
            bezier_steps: DEFAULT_BEZIER_STEPS,
            max_steps: DEFAULT_MAX_STEPS,
            budget: LengthBudget::default(),
        }
    }

    pub fn linear(origin: Point) -> Self {
        Self::new(Variant::Linear, origin)
    }

    pub fn bunched(origin: Point) -> Self {
        Self::new(Variant::Bunched, origin)
    }

    pub fn curvy(origin: Point) -> Self {
        Self::new(Variant::Curvy, origin)
    }

    pub fn with_angle_rule<R: UpdateRule + 'static>(mut self, rule: R) -> Self {
        self.config.angle_rule = Arc::new(rule);
        self
    }

    pub fn with_radius_rule<R: UpdateRule + 'static>(mut self, rule: R) -> Self {
        self.config.radius_rule = Arc::new(rule);
        self
    }

    /// Use rules that are already shared with other generators.
    pub fn with_shared_rules(mut self, angle_rule: SharedRule, radius_rule: SharedRule) -> Self {
        self.config.angle_rule = angle_rule;
        self.config.radius_rule = radius_rule;
        self
    }

    /// Samples per Bézier curve, kept within
    /// [`MIN_BEZIER_STEPS`]..=[`MAX_BEZIER_STEPS`].
    pub fn with_bezier_steps(mut self, steps: usize) -> Self {
        self.bezier_steps = steps.clamp(MIN_BEZIER_STEPS, MAX_BEZIER_STEPS);
        self
    }

    /// Polar step cap per call (at least 1).
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn with_budget(mut self, budget: LengthBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn origin(&self) -> Point {
        self.config.origin
    }

    pub fn config(&self) -> &ScribbleConfig {
        &self.config
    }

    pub fn bezier_steps(&self) -> usize {
        self.bezier_steps
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn budget(&self) -> LengthBudget {
        self.budget
    }

    /// Generate a scribble of roughly `max_length` total length.
    ///
    /// The first point is always the seed position (angle 0,
    /// `initial_radius`), so the result is never empty. A `max_length` of
    /// zero or less (or NaN) returns just that point.
    pub fn get_points(&self, initial_radius: f64, max_length: f64) -> Vec<Point> {
        self.trace(initial_radius, max_length).points
    }

    /// Like [`get_points`](Self::get_points), also returning the curves
    /// the points were sampled from.
    pub fn trace(&self, initial_radius: f64, max_length: f64) -> Trace {
        let seed = PolarState::seed(initial_radius);
        let mut path = PathBuilder::new(self.stepper.point_at(seed), max_length, self.budget);
        let mut walk = Walk {
            stepper: &self.stepper,
            angle: RuleRun::new(self.config.angle_rule.as_ref()),
            radius: RuleRun::new(self.config.radius_rule.as_ref()),
            state: seed,
            steps: 0,
            max_steps: self.max_steps,
            capped: false,
        };
        let mut segments = Vec::new();

        if !path.is_full() {
            match self.variant {
                Variant::Linear => trace_linear(&mut walk, &mut path),
                Variant::Bunched => trace_bunched(&mut walk, &mut path, &mut segments, self.bezier_steps),
                Variant::Curvy => trace_curvy(&mut walk, &mut path, &mut segments, self.bezier_steps),
            }
        }

        if walk.capped {
            log::warn!(
                "{} scribble hit the {} step cap at length {:.2} of {:.2}",
                self.variant, self.max_steps, path.length, max_length
            );
        }
        log::debug!(
            "{} scribble: {} points, {} curves, length {:.2}",
            self.variant, path.points.len(), segments.len(), path.length
        );

        Trace {
            points: path.points,
            segments,
            length: path.length,
            capped: walk.capped,
        }
    }
}

impl fmt::Debug for ScribbleGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScribbleGenerator")
            .field("variant", &self.variant)
            .field("origin", &self.config.origin)
            .field("bezier_steps", &self.bezier_steps)
            .field("max_steps", &self.max_steps)
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}

/// Sample a quadratic Bézier curve at `steps + 1` evenly spaced parameters,
/// both endpoints included.
pub fn bezier_points(from: Point, ctrl: Point, to: Point, steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    let curve = QuadraticBezierSegment { from: from.into(), ctrl: ctrl.into(), to: to.into() };
    (0..=steps).map(|i| sample(&curve, i, steps)).collect()
}

/// Index of the sample where a curvy segment hands over to the next one.
fn curvy_split_index(steps: usize) -> usize {
    let index = (steps.saturating_add(1) as f64 * CURVY_SPLIT) as usize;
    index.saturating_sub(1).clamp(1, steps.max(1))
}

#[inline]
fn sample(curve: &QuadraticBezierSegment<f64>, i: usize, steps: usize) -> Point {
    curve.sample(i as f64 / steps as f64).into()
}

/// Spread a seed so the radius rule does not mirror the angle rule.
fn decorrelate(seed: u64) -> u64 {
    seed.rotate_left(32) ^ 0x9E37_79B9_7F4A_7C15
}

// ============================================================================
// Generation internals
// ============================================================================

/// Stepped points, until the iteration cap.
struct Walk<'a> {
    stepper: &'a PolarStepper,
    angle: RuleRun<'a>,
    radius: RuleRun<'a>,
    state: PolarState,
    steps: usize,
    max_steps: usize,
    capped: bool,
}

impl Iterator for Walk<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.steps >= self.max_steps {
            self.capped = true;
            return None;
        }
        self.steps += 1;
        let (state, point) = self.stepper.step(self.state, &mut self.angle, &mut self.radius);
        self.state = state;
        Some(point)
    }
}

/// Accumulates output points against the length budget.
struct PathBuilder {
    points: Vec<Point>,
    length: f64,
    max_length: f64,
    budget: LengthBudget,
}

impl PathBuilder {
    fn new(first: Point, max_length: f64, budget: LengthBudget) -> Self {
        Self { points: vec![first], length: 0.0, max_length, budget }
    }

    /// `length < max_length` is false for NaN on either side, so a
    /// degenerate point ends the run.
    fn is_full(&self) -> bool {
        !(self.length < self.max_length)
    }

    fn last(&self) -> Point {
        // Seeded with one point in `new`, never drained.
        self.points[self.points.len() - 1]
    }

    /// Append `p` if the budget allows. Returns false once generation
    /// should stop.
    fn push(&mut self, p: Point) -> bool {
        let next = self.length + self.last().distance(p);
        if self.budget == LengthBudget::Truncate && next > self.max_length {
            return false;
        }
        self.points.push(p);
        self.length = next;
        !self.is_full()
    }

    /// Push samples `range` of `curve`; false once the budget is used up.
    fn push_samples(&mut self, curve: &QuadraticBezierSegment<f64>, range: RangeInclusive<usize>, steps: usize) -> bool {
        range.into_iter().all(|i| self.push(sample(curve, i, steps)))
    }
}

fn trace_linear(walk: &mut Walk<'_>, path: &mut PathBuilder) {
    for p in walk.by_ref() {
        if !path.push(p) {
            break;
        }
    }
}

fn trace_bunched(
    walk: &mut Walk<'_>,
    path: &mut PathBuilder,
    segments: &mut Vec<QuadraticBezierSegment<f64>>,
    steps: usize,
) {
    let mut start = path.last();
    loop {
        // A fresh control point for every curve: tangents break at joins.
        let (Some(ctrl), Some(end)) = (walk.next(), walk.next()) else {
            break;
        };
        let curve = QuadraticBezierSegment { from: start.into(), ctrl: ctrl.into(), to: end.into() };
        segments.push(curve);
        // t = 0 is `start`, already emitted.
        if !path.push_samples(&curve, 1..=steps, steps) {
            break;
        }
        start = end;
    }
}

fn trace_curvy(
    walk: &mut Walk<'_>,
    path: &mut PathBuilder,
    segments: &mut Vec<QuadraticBezierSegment<f64>>,
    steps: usize,
) {
    let split = curvy_split_index(steps);
    let mut start = path.last();
    let Some(mut ctrl) = walk.next() else {
        return;
    };
    while let Some(end) = walk.next() {
        let curve = QuadraticBezierSegment { from: start.into(), ctrl: ctrl.into(), to: end.into() };
        segments.push(curve);
        if !path.push_samples(&curve, 1..=split, steps) {
            break;
        }
        // The split sample starts the next curve and this curve's end
        // steers it, so the direction carries across the join.
        start = path.last();
        ctrl = end;
    }
}

// ============================================================================
// TESTS
// ============================================================================
