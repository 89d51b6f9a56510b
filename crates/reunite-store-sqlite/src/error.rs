//! Error type for `reunite-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column holds a value the decoders do not recognise.
  #[error("invalid stored value: {0}")]
  InvalidValue(String),

  /// The case id is not in the active set.
  #[error("case not found: {0}")]
  CaseNotFound(Uuid),

  /// An embedding does not match the dimension this store is pinned to.
  #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
  DimensionMismatch { expected: usize, actual: usize },
}

impl From<Error> for reunite_core::Error {
  /// Lifecycle and dimension failures map onto their typed core
  /// counterparts; everything else is an opaque store failure.
  fn from(err: Error) -> Self {
    match err {
      Error::CaseNotFound(id) => reunite_core::Error::CaseNotFound(id),
      Error::DimensionMismatch { expected, actual } => {
        reunite_core::Error::DimensionMismatch { expected, actual }
      }
      other => reunite_core::Error::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
