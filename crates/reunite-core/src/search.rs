//! Search orchestration — rank the active set against a query embedding.

use std::cmp::Ordering;

use crate::{
  Error, Result,
  case::Case,
  embedding::Embedding,
  similarity::{self, Strictness},
  store::CaseStore,
};

/// An active case together with its similarity score for one query.
#[derive(Debug, Clone)]
pub struct Match {
  pub case:  Case,
  pub score: f32,
}

/// Rank every active case against `query`.
///
/// Fetches the full active set regardless of owner, scores each case, keeps
/// the ones the strictness admits, and orders them by descending score. An
/// empty result is a normal outcome, not an error.
///
/// Fails with [`Error::DimensionMismatch`] when the query's length differs
/// from the store's embedding dimension. That signals configuration drift,
/// not bad user input, so the caller should log it rather than blame the
/// upload.
pub async fn search<S>(
  store: &S,
  query: &Embedding,
  strictness: Strictness,
) -> Result<Vec<Match>>
where
  S: CaseStore,
  S::Error: Into<Error>,
{
  let expected = store.dimension();
  if query.dimension() != expected {
    return Err(Error::DimensionMismatch {
      expected,
      actual: query.dimension(),
    });
  }
  let active = store.list_active().await.map_err(Into::into)?;
  Ok(rank(active, query, strictness))
}

/// Score, filter, and order one batch of cases.
///
/// The sort is stable and `cases` arrives in creation order, so equal scores
/// keep earliest-created-first order and repeated queries over an unchanged
/// store return identical sequences.
pub fn rank(
  cases: Vec<Case>,
  query: &Embedding,
  strictness: Strictness,
) -> Vec<Match> {
  let mut matches: Vec<Match> = cases
    .into_iter()
    .map(|case| {
      let score = similarity::score(query, &case.embedding);
      Match { case, score }
    })
    .filter(|m| strictness.admits(m.score))
    .collect();
  matches
    .sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
  matches
}
