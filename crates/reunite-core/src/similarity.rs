//! Cosine similarity scoring and the strictness threshold.

use crate::{Error, Result, embedding::Embedding};

/// Cosine similarity between two vectors, in `[-1.0, 1.0]`.
///
/// Accumulates in `f64` so long vectors stay numerically stable, then clamps
/// the final ratio into range. If either vector has zero magnitude the score
/// is `0.0` (no similarity), never an error; a division by zero must not
/// poison the ranking.
pub fn score(a: &Embedding, b: &Embedding) -> f32 {
  debug_assert_eq!(a.dimension(), b.dimension());
  let mut dot = 0.0f64;
  let mut mag_a = 0.0f64;
  let mut mag_b = 0.0f64;
  for (&x, &y) in a.as_slice().iter().zip(b.as_slice()) {
    let (x, y) = (f64::from(x), f64::from(y));
    dot += x * y;
    mag_a += x * x;
    mag_b += y * y;
  }
  let denom = mag_a.sqrt() * mag_b.sqrt();
  if denom == 0.0 {
    return 0.0;
  }
  let score = (dot / denom).clamp(-1.0, 1.0) as f32;
  if score.is_finite() { score } else { 0.0 }
}

// ─── Strictness ──────────────────────────────────────────────────────────────

/// How demanding a match query is, on a `0.0 ..= 1.0` scale.
///
/// The similarity threshold is a monotonic non-decreasing function of the
/// strictness value, so raising strictness never admits a candidate that a
/// lower strictness rejected; it only narrows the match set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strictness(f32);

impl Strictness {
  /// Balanced default for callers that do not supply a value.
  pub const DEFAULT: Strictness = Strictness(0.33);

  /// Validate a raw slider value. Anything outside `[0.0, 1.0]`, NaN
  /// included, is rejected.
  pub fn new(value: f32) -> Result<Self> {
    if !(0.0..=1.0).contains(&value) {
      return Err(Error::InvalidStrictness(value));
    }
    Ok(Self(value))
  }

  pub fn value(self) -> f32 { self.0 }

  /// The minimum cosine score a candidate must reach to count as a match.
  pub fn threshold(self) -> f32 { self.0 }

  /// Whether a score clears the threshold. Inclusive: a score exactly at
  /// the threshold is a match.
  pub fn admits(self, score: f32) -> bool { score >= self.threshold() }
}
