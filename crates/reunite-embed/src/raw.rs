//! A fixture extractor that gives callers exact control over the vector.

use reunite_core::{
  Error, Result,
  embedding::{Embedding, EmbeddingExtractor},
};

/// Extractor that treats the uploaded bytes as the vector itself.
///
/// The payload must be exactly `dimension * 4` bytes; each consecutive four
/// bytes decode as one little-endian `f32` component, and every component
/// must be finite. Useful wherever a test or demo needs a photo that embeds
/// to a known vector.
pub struct RawVectorExtractor {
  dim: usize,
}

impl RawVectorExtractor {
  pub fn new(dimension: usize) -> Self { Self { dim: dimension } }

  /// Encode a vector as a payload this extractor decodes back unchanged.
  pub fn encode(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
  }
}

impl EmbeddingExtractor for RawVectorExtractor {
  fn dimension(&self) -> usize { self.dim }

  fn extract(&self, image: &[u8]) -> Result<Embedding> {
    if image.len() != self.dim * 4 {
      return Err(Error::Extraction(format!(
        "raw vector payload must be {} bytes, got {}",
        self.dim * 4,
        image.len()
      )));
    }
    let mut values = Vec::with_capacity(self.dim);
    for chunk in image.chunks_exact(4) {
      let value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
      if !value.is_finite() {
        return Err(Error::Extraction(
          "raw vector contains non-finite components".into(),
        ));
      }
      values.push(value);
    }
    Ok(Embedding::new(values))
  }
}
