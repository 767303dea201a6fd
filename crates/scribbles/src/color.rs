//! Pen colors and the small random walks used to vary them between strokes.
//!
//! Every helper takes the caller's [`Rng`] so a seeded drawing recolors the
//! same way every time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScribbleError;
use crate::rng::Rng;

/// An opaque 24-bit color.
///
/// Parses anything SVG accepts (`"#f80"`, `"tomato"`, `"rgb(10, 20, 30)"`)
/// and always prints as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_channels([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }

    /// Index of the strongest channel (first one wins ties).
    pub fn dominant_channel(&self) -> usize {
        let channels = self.channels();
        (1..3).fold(0, |best, i| if channels[i] > channels[best] { i } else { best })
    }

    /// A new color whose red channel moves by up to `range` and whose
    /// green and blue move by no more than red did.
    pub fn drift(&self, range: i64, rng: &mut Rng) -> Rgb {
        let shift = |value: u8, range: i64, rng: &mut Rng| -> u8 {
            ((value as i64 + channel_offset(range, rng)).abs() % 255) as u8
        };
        let r = shift(self.r, range, rng);
        let diff = (self.r as i64 - r as i64).abs();
        Rgb::new(r, shift(self.g, diff, rng), shift(self.b, diff, rng))
    }

    /// A nearby color that keeps the same dominant channel.
    ///
    /// The dominant channel stays at least `min`; the others stay at least
    /// `min` below it.
    pub fn nearby(&self, min: u8, range: i64, rng: &mut Rng) -> Rgb {
        let mut channels = self.channels();
        let dominant = self.dominant_channel();
        let top = jitter_channel(channels[dominant], min, u8::MAX, range, rng);
        let ceiling = top.saturating_sub(min);
        for (i, channel) in channels.iter_mut().enumerate() {
            *channel = if i == dominant {
                top
            } else {
                jitter_channel(*channel, 0, ceiling, range, rng)
            };
        }
        Rgb::from_channels(channels)
    }

    /// Subtract `decrement` from each channel, never going below `min`.
    pub fn darken(&self, min: u8, decrement: u8) -> Rgb {
        self.map(|c| c.saturating_sub(decrement).max(min))
    }

    /// Add `increment` to each channel, saturating at 255.
    pub fn lighten(&self, increment: u8) -> Rgb {
        self.map(|c| c.saturating_add(increment))
    }

    /// `(r, g, b)` becomes `(g, b, r)`.
    pub fn rotate_channels(&self) -> Rgb {
        Rgb::new(self.g, self.b, self.r)
    }

    /// Add an independent draw from `[lo, hi]` to each channel and clamp the
    /// result to `[min, max]`.
    pub fn offset_clamped(&self, lo: i64, hi: i64, min: u8, max: u8, rng: &mut Rng) -> Rgb {
        let (lo, hi) = (lo.clamp(-SPAN, SPAN), hi.clamp(-SPAN, SPAN));
        self.map(|c| (c as i64 + rng.next_int(lo, hi)).clamp(min as i64, max.max(min) as i64) as u8)
    }

    fn map(&self, mut f: impl FnMut(u8) -> u8) -> Rgb {
        Rgb::new(f(self.r), f(self.g), f(self.b))
    }
}

/// Widest useful channel offset.
const SPAN: i64 = u8::MAX as i64;

/// A draw from `[-|range|, |range|]`, with `|range|` capped at [`SPAN`].
fn channel_offset(range: i64, rng: &mut Rng) -> i64 {
    let range = range.unsigned_abs().min(SPAN as u64) as i64;
    rng.next_int(-range, range)
}

/// Move `value` by a random non-zero offset in `[-range, range]` and clamp
/// the (absolute) result into `[min, max]`.
pub fn jitter_channel(value: u8, min: u8, max: u8, range: i64, rng: &mut Rng) -> u8 {
    let offset = match channel_offset(range, rng) {
        0 => 1,
        n => n,
    };
    (value as i64 + offset).abs().clamp(min as i64, max.max(min) as i64) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ScribbleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = svgtypes::Color::from_str(s.trim()).map_err(|_| ScribbleError::InvalidColor(s.to_string()))?;
        Ok(Rgb::new(color.red, color.green, color.blue))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ScribbleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
