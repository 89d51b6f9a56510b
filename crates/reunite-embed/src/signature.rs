//! The deterministic content-signature extractor.

use reunite_core::{
  Error, Result,
  embedding::{Embedding, EmbeddingExtractor},
};
use sha2::{Digest, Sha256};

use crate::sniff::sniff_format;

/// Deterministic content-signature extractor.
///
/// Derives the vector from a SHA-256 digest chain over the raw image bytes:
/// identical photos always produce identical embeddings, and distinct photos
/// spread approximately uniformly over the unit sphere. It carries no facial
/// geometry — it exists so the registry runs end-to-end without a model
/// runtime, with exact photo re-uploads matching at score 1.0. A deployment
/// with a real face-recognition model implements
/// [`EmbeddingExtractor`] over that model instead.
pub struct SignatureExtractor {
  dim: usize,
}

impl SignatureExtractor {
  pub fn new(dimension: usize) -> Self { Self { dim: dimension } }

  /// Digest chain: block `i` is `SHA-256(seed || i)`, bytes mapped onto
  /// `[-1.0, 1.0]`, the result scaled to unit length.
  fn signature(&self, image: &[u8]) -> Vec<f32> {
    let seed = Sha256::digest(image);
    let mut values = Vec::with_capacity(self.dim);
    let mut counter = 0u32;
    while values.len() < self.dim {
      let mut hasher = Sha256::new();
      hasher.update(seed);
      hasher.update(counter.to_le_bytes());
      for byte in hasher.finalize() {
        if values.len() == self.dim {
          break;
        }
        values.push((f32::from(byte) / 255.0) * 2.0 - 1.0);
      }
      counter += 1;
    }

    let norm = values
      .iter()
      .map(|v| f64::from(*v) * f64::from(*v))
      .sum::<f64>()
      .sqrt();
    if norm > 0.0 {
      for v in &mut values {
        *v = (f64::from(*v) / norm) as f32;
      }
    }
    values
  }
}

/// 128 components, matching the common face-embedding width.
impl Default for SignatureExtractor {
  fn default() -> Self { Self::new(128) }
}

impl EmbeddingExtractor for SignatureExtractor {
  fn dimension(&self) -> usize { self.dim }

  fn extract(&self, image: &[u8]) -> Result<Embedding> {
    if sniff_format(image).is_none() {
      return Err(Error::Extraction(
        "unrecognised image format (expected JPEG or PNG)".into(),
      ));
    }
    Ok(Embedding::new(self.signature(image)))
  }
}
