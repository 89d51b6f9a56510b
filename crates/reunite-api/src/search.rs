//! Handler for `POST /search`.
//!
//! The probe photo arrives base64-encoded in the JSON body. It is embedded
//! with the same extractor used at registration, compared against every
//! active case, and never stored.

use axum::{Json, extract::State};
use reunite_core::{finder::Finder, similarity::Strictness, store::CaseStore};
use serde::{Deserialize, Serialize};

use crate::{cases::CaseSummary, decode_photo, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SearchBody {
  /// Base64-encoded probe photo (JPEG or PNG).
  pub photo:      String,
  /// Match strictness within `[0.0, 1.0]`. Omitted means the server default.
  pub strictness: Option<f32>,
}

/// One hit: the case plus its similarity score.
#[derive(Debug, Serialize)]
pub struct MatchResult {
  pub case:  CaseSummary,
  pub score: f32,
}

/// `POST /search` — body: [`SearchBody`]. Hits come back ordered by
/// descending score; an empty array is a normal outcome.
pub async fn handler<S>(
  State(finder): State<Finder<S>>,
  Json(body): Json<SearchBody>,
) -> Result<Json<Vec<MatchResult>>, ApiError>
where
  S: CaseStore + Clone + Send + Sync + 'static,
  S::Error: Into<reunite_core::Error>,
{
  let strictness = match body.strictness {
    Some(value) => Strictness::new(value)?,
    None => Strictness::DEFAULT,
  };
  let photo = decode_photo(&body.photo)?;

  let matches = finder.find_matches(&photo, strictness).await?;
  Ok(Json(
    matches
      .into_iter()
      .map(|hit| MatchResult { case: hit.case.into(), score: hit.score })
      .collect(),
  ))
}
