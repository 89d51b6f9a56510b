//! Embeddings — fixed-length feature vectors derived from photos.

use serde::{Deserialize, Serialize};

use crate::Result;

/// A fixed-length numeric vector summarising a face photo for comparison.
///
/// Embeddings are compared with cosine similarity (see [`crate::similarity`]).
/// The dimension is fixed per deployment: the extractor, the store, and every
/// query vector in a process must agree on it, and the store enforces the
/// agreement at its boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding(Vec<f32>);

impl Embedding {
  pub fn new(values: Vec<f32>) -> Self { Self(values) }

  /// The number of components in the vector.
  pub fn dimension(&self) -> usize { self.0.len() }

  pub fn as_slice(&self) -> &[f32] { &self.0 }

  pub fn into_vec(self) -> Vec<f32> { self.0 }
}

impl From<Vec<f32>> for Embedding {
  fn from(values: Vec<f32>) -> Self { Self(values) }
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// Turns raw image bytes into an [`Embedding`].
///
/// Extraction is a pure function of the image: the same bytes always yield
/// the same vector, and no state is touched. An undecodable image, or one
/// with no usable signal, fails with
/// [`Error::Extraction`](crate::Error::Extraction).
pub trait EmbeddingExtractor: Send + Sync {
  /// The fixed length of every vector this extractor produces.
  fn dimension(&self) -> usize;

  /// Derive the feature vector for an image.
  fn extract(&self, image: &[u8]) -> Result<Embedding>;
}
