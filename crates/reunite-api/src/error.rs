//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The uploaded payload is not a photo the extractor can embed.
  #[error("unusable image: {0}")]
  UnusableImage(String),

  #[error("internal error: {0}")]
  Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl From<reunite_core::Error> for ApiError {
  /// Classify domain failures into HTTP categories.
  fn from(err: reunite_core::Error) -> Self {
    use reunite_core::Error;
    match err {
      Error::CaseNotFound(id) => ApiError::NotFound(format!("case {id} not found")),
      Error::InvalidStrictness(value) => {
        ApiError::BadRequest(format!("strictness must be within [0.0, 1.0], got {value}"))
      }
      Error::Extraction(message) => ApiError::UnusableImage(message),
      err @ Error::DimensionMismatch { .. } => {
        // Extractor and store disagree about vector width. Config fault,
        // not a user fault; surface loudly.
        tracing::error!(%err, "embedding dimension drift");
        ApiError::Internal(Box::new(err))
      }
      other => ApiError::Internal(Box::new(other)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::UnusableImage(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
