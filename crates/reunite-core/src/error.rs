//! Error types for `reunite-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("case not found: {0}")]
  CaseNotFound(Uuid),

  #[error("embedding extraction failed: {0}")]
  Extraction(String),

  #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
  DimensionMismatch { expected: usize, actual: usize },

  #[error("strictness must be within [0.0, 1.0], got {0}")]
  InvalidStrictness(f32),

  #[error("photo storage failed: {0}")]
  PhotoStorage(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
