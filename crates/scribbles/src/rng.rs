//! Seeded randomness for update rules and color helpers.
//!
//! Every compiled rule owns one [`Rng`]. Callers usually hand out seeds that
//! differ by one (`seed`, `seed + 1`, ...), so seeds are mixed before use and
//! neighbouring seeds still start far apart.

/// A small deterministic generator.
///
/// An LCG (Knuth's MMIX constants) whose output is taken from the high bits.
///
/// # Example
/// ```
/// use scribbles::rng::Rng;
///
/// let mut rng = Rng::new(12345);
/// let step = rng.next_int(1, 50); // inclusive on both ends
/// assert!((1..=50).contains(&step));
/// ```
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// The same seed always produces the same sequence.
    pub fn new(seed: u64) -> Self {
        Self { state: mix(seed) }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `[min, max]`. Bounds in the wrong order are swapped.
    #[inline]
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = (hi.wrapping_sub(lo) as u64).saturating_add(1);
        lo.wrapping_add((self.next_f64() * span as f64) as i64)
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0)
    }
}

/// SplitMix64 finalizer.
fn mix(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A seed from the wall clock, for callers that did not ask for
/// reproducible output.
pub fn entropy_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn neighbouring_seeds_diverge_immediately() {
        let mut a = Rng::new(1);
        let mut b = Rng::new(2);
        let first: Vec<_> = (0..10).map(|_| a.next_int(1, 50)).collect();
        let second: Vec<_> = (0..10).map(|_| b.next_int(1, 50)).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn f64_in_unit_interval() {
        let mut rng = Rng::new(12345);
        for _ in 0..1000 {
            assert!((0.0..1.0).contains(&rng.next_f64()));
        }
    }

    #[test]
    fn int_is_inclusive_and_covers_bounds() {
        let mut rng = Rng::new(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let v = rng.next_int(-3, 3);
            assert!((-3..=3).contains(&v));
            seen_min |= v == -3;
            seen_max |= v == 3;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn int_with_swapped_bounds() {
        let mut rng = Rng::new(9);
        for _ in 0..100 {
            assert!((1..=5).contains(&rng.next_int(5, 1)));
        }
        assert_eq!(rng.next_int(4, 4), 4);
    }

    #[test]
    fn entropy_seeds_change() {
        let a = entropy_seed();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert_ne!(a, entropy_seed());
    }
}
