//! Update rules for the polar recurrence.
//!
//! A rule maps the previous angle (or radius) to the next one. Any
//! `Fn(f64) -> f64` closure is a rule; [`RuleSpec`] describes the common
//! randomized ones as data so recipes can name them in YAML.
//!
//! ## Rust Lesson #12: Traits & Blanket Impls
//!
//! `impl<F: Fn(f64) -> f64> UpdateRule for F` means every matching closure
//! IS an `UpdateRule` without wrapping. `Send + Sync` lets generators be
//! shared between threads.
//!
//! Rules never hold mutable state. Randomized rules draw from an RNG that is
//! owned by a [`RuleRun`] and reseeded at the start of every run, so the same
//! generator replays the same scribble no matter how often, or from how many
//! threads, it is called.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ScribbleError;
use crate::rng::Rng;

/// Produces the next value of an angle or radius from the previous one.
pub trait UpdateRule: Send + Sync {
    /// `rng` belongs to the current run and starts from [`seed`](Self::seed).
    fn apply(&self, value: f64, rng: &mut Rng) -> f64;

    /// Seed for each run's RNG. Deterministic rules can leave the default.
    fn seed(&self) -> u64 {
        0
    }
}

impl<F> UpdateRule for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    #[inline]
    fn apply(&self, value: f64, _rng: &mut Rng) -> f64 {
        self(value)
    }
}

/// One generation run of a rule: the rule plus a freshly seeded RNG.
pub struct RuleRun<'a> {
    rule: &'a dyn UpdateRule,
    rng: Rng,
}

impl<'a> RuleRun<'a> {
    pub fn new(rule: &'a dyn UpdateRule) -> Self {
        Self { rule, rng: Rng::new(rule.seed()) }
    }

    #[inline]
    pub fn advance(&mut self, value: f64) -> f64 {
        self.rule.apply(value, &mut self.rng)
    }
}

/// A rule shared between clones of a generator.
pub type SharedRule = Arc<dyn UpdateRule>;

/// Declarative description of an update rule.
///
/// `jitter` and `scale_jitter` draw uniform integers, mirroring the
/// `randint`-style rules scribbles are usually built from.
///
/// ```yaml
/// kind: chain
/// steps:
///   - { kind: jitter, min: 1, max: 5 }
///   - { kind: wrap, modulus: 180 }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    /// Keep the value unchanged.
    #[default]
    Identity,
    /// Add a constant.
    Offset { by: f64 },
    /// Add a uniformly drawn integer from `[min, max]`.
    Jitter { min: i64, max: i64 },
    /// Multiply by a uniformly drawn integer from `[min, max]`.
    ScaleJitter { min: i64, max: i64 },
    /// Floored modulo; the result takes the sign of the modulus.
    Wrap { modulus: f64 },
    /// Absolute value.
    Abs,
    /// Apply each step in order.
    Chain { steps: Vec<RuleSpec> },
}

impl RuleSpec {
    pub fn offset(by: f64) -> Self {
        RuleSpec::Offset { by }
    }

    pub fn jitter(min: i64, max: i64) -> Self {
        RuleSpec::Jitter { min, max }
    }

    pub fn scale_jitter(min: i64, max: i64) -> Self {
        RuleSpec::ScaleJitter { min, max }
    }

    pub fn wrap(modulus: f64) -> Self {
        RuleSpec::Wrap { modulus }
    }

    /// Follow this rule with `next`. Appends to an existing chain.
    pub fn then(self, next: RuleSpec) -> Self {
        match self {
            RuleSpec::Chain { mut steps } => {
                steps.push(next);
                RuleSpec::Chain { steps }
            }
            first => RuleSpec::Chain { steps: vec![first, next] },
        }
    }

    /// Default angle rule: `a + U{1..50}` degrees.
    pub fn default_angle() -> Self {
        RuleSpec::jitter(1, 50)
    }

    /// Default radius rule: `|r + U{-3..3}|`.
    pub fn default_radius() -> Self {
        RuleSpec::jitter(-3, 3).then(RuleSpec::Abs)
    }

    /// Check that the rule can be evaluated.
    pub fn validate(&self) -> Result<(), ScribbleError> {
        match self {
            RuleSpec::Wrap { modulus } if *modulus == 0.0 || !modulus.is_finite() => {
                Err(ScribbleError::InvalidRule(format!("wrap modulus must be finite and non-zero, got {}", modulus)))
            }
            RuleSpec::Offset { by } if !by.is_finite() => {
                Err(ScribbleError::InvalidRule(format!("offset must be finite, got {}", by)))
            }
            RuleSpec::Chain { steps } => steps.iter().try_for_each(RuleSpec::validate),
            _ => Ok(()),
        }
    }

    /// Turn the description into a rule whose runs draw from `seed`.
    pub fn compile(&self, seed: u64) -> Result<CompiledRule, ScribbleError> {
        self.validate()?;
        Ok(self.bind(seed))
    }

    /// `compile` for rules known to be valid.
    pub(crate) fn bind(&self, seed: u64) -> CompiledRule {
        CompiledRule { spec: self.clone(), seed }
    }

    fn evaluate(&self, value: f64, rng: &mut Rng) -> f64 {
        match self {
            RuleSpec::Identity => value,
            RuleSpec::Offset { by } => value + by,
            RuleSpec::Jitter { min, max } => value + rng.next_int(*min, *max) as f64,
            RuleSpec::ScaleJitter { min, max } => value * rng.next_int(*min, *max) as f64,
            RuleSpec::Wrap { modulus } => floored_mod(value, *modulus),
            RuleSpec::Abs => value.abs(),
            RuleSpec::Chain { steps } => steps.iter().fold(value, |v, step| step.evaluate(v, rng)),
        }
    }
}

/// Modulo whose result has the sign of `modulus` (like Python's `%`).
fn floored_mod(value: f64, modulus: f64) -> f64 {
    let r = value % modulus;
    if r != 0.0 && (r < 0.0) != (modulus < 0.0) {
        r + modulus
    } else {
        r
    }
}

/// A validated [`RuleSpec`] and the seed its runs start from.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRule {
    spec: RuleSpec,
    seed: u64,
}

impl CompiledRule {
    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    /// Start a run from the seed.
    pub fn run(&self) -> RuleRun<'_> {
        RuleRun::new(self)
    }

    pub fn into_shared(self) -> SharedRule {
        Arc::new(self)
    }
}

impl UpdateRule for CompiledRule {
    #[inline]
    fn apply(&self, value: f64, rng: &mut Rng) -> f64 {
        self.spec.evaluate(value, rng)
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_rules() {
        let rule = |a: f64| a + 10.0;
        assert_eq!(RuleRun::new(&rule).advance(5.0), 15.0);
    }

    #[test]
    fn jitter_stays_in_range() {
        let rule = RuleSpec::jitter(1, 50).compile(3).unwrap();
        let mut run = rule.run();
        for _ in 0..500 {
            let delta = run.advance(100.0) - 100.0;
            assert!((1.0..=50.0).contains(&delta), "delta {}", delta);
            assert_eq!(delta.fract(), 0.0);
        }
    }

    #[test]
    fn default_radius_is_never_negative() {
        let rule = RuleSpec::default_radius().compile(11).unwrap();
        let mut run = rule.run();
        let mut r = 0.0;
        for _ in 0..500 {
            r = run.advance(r);
            assert!(r >= 0.0);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = RuleSpec::default_angle().compile(99).unwrap();
        let b = RuleSpec::default_angle().compile(99).unwrap();
        let mut run_a = a.run();
        let mut run_b = b.run();
        let seq_a: Vec<f64> = (0..20).map(|i| run_a.advance(i as f64)).collect();
        let seq_b: Vec<f64> = (0..20).map(|i| run_b.advance(i as f64)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn every_run_restarts_from_the_seed() {
        let rule = RuleSpec::default_angle().compile(5).unwrap();
        let mut first = rule.run();
        let seq_first: Vec<f64> = (0..20).map(|_| first.advance(0.0)).collect();

        // An interleaved run on a clone does not disturb a new run.
        let clone = rule.clone();
        let mut other = clone.run();
        other.advance(0.0);
        let mut second = rule.run();
        let seq_second: Vec<f64> = (0..20).map(|_| second.advance(0.0)).collect();
        assert_eq!(seq_first, seq_second);
    }

    #[test]
    fn wrap_follows_modulus_sign() {
        assert_eq!(floored_mod(370.0, 360.0), 10.0);
        assert_eq!(floored_mod(-10.0, 360.0), 350.0);
        assert_eq!(floored_mod(10.0, -360.0), -350.0);
        assert_eq!(floored_mod(720.0, 360.0), 0.0);
    }

    #[test]
    fn chain_applies_in_order() {
        // (a + 5) * 2 vs a * 2 + 5
        let rule = RuleSpec::offset(5.0).then(RuleSpec::scale_jitter(2, 2)).compile(0).unwrap();
        assert_eq!(rule.run().advance(1.0), 12.0);
        let rule = RuleSpec::scale_jitter(2, 2).then(RuleSpec::offset(5.0)).compile(0).unwrap();
        assert_eq!(rule.run().advance(1.0), 7.0);
    }

    #[test]
    fn then_flattens_chains() {
        let rule = RuleSpec::jitter(1, 5).then(RuleSpec::scale_jitter(1, 2)).then(RuleSpec::wrap(360.0));
        match rule {
            RuleSpec::Chain { steps } => assert_eq!(steps.len(), 3),
            other => panic!("expected chain, got {:?}", other),
        }
    }

    #[test]
    fn zero_modulus_rejected() {
        let err = RuleSpec::jitter(1, 5).then(RuleSpec::wrap(0.0)).compile(0).unwrap_err();
        assert!(matches!(err, ScribbleError::InvalidRule(_)));
    }

    #[test]
    fn abs_and_identity() {
        let rule = RuleSpec::Abs.compile(0).unwrap();
        assert_eq!(rule.run().advance(-3.5), 3.5);
        let rule = RuleSpec::Identity.compile(0).unwrap();
        assert_eq!(rule.run().advance(-3.5), -3.5);
    }
}
