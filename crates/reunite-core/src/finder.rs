//! The `Finder` facade — the front door the surrounding application calls.
//!
//! Composes the embedding extractor, the geocoder, photo storage, profile
//! lookup, and a [`CaseStore`] backend. Presentation concerns (forms, session
//! handling, rendering) stay outside; this type only takes post-validation
//! inputs and returns domain values or typed errors.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  case::{Case, CaseDraft, FoundCase, NewCase},
  embedding::EmbeddingExtractor,
  geo::Geocoder,
  photo::PhotoStore,
  profile::ProfileSearch,
  search::{self, Match},
  similarity::Strictness,
  store::CaseStore,
};

#[derive(Clone)]
pub struct Finder<S> {
  store:     S,
  extractor: Arc<dyn EmbeddingExtractor>,
  geocoder:  Arc<dyn Geocoder>,
  photos:    Arc<dyn PhotoStore>,
  profiles:  Arc<dyn ProfileSearch>,
}

impl<S> Finder<S>
where
  S: CaseStore,
  S::Error: Into<Error>,
{
  /// Wire a finder over a store and its collaborators.
  ///
  /// Fails with [`Error::DimensionMismatch`] when the extractor and the
  /// store disagree on the embedding dimension.
  pub fn new(
    store: S,
    extractor: Arc<dyn EmbeddingExtractor>,
    geocoder: Arc<dyn Geocoder>,
    photos: Arc<dyn PhotoStore>,
    profiles: Arc<dyn ProfileSearch>,
  ) -> Result<Self> {
    if extractor.dimension() != store.dimension() {
      return Err(Error::DimensionMismatch {
        expected: store.dimension(),
        actual:   extractor.dimension(),
      });
    }
    Ok(Self { store, extractor, geocoder, photos, profiles })
  }

  /// Register a new case from user-entered fields and an uploaded photo.
  ///
  /// The embedding is computed first, so an unusable image rejects the whole
  /// registration before anything is stored. A failed geocode is not an
  /// error: the case is simply created without coordinates. Profile lookup
  /// is best-effort enrichment and can only add links, never fail the call.
  pub async fn register(
    &self,
    owner_id: Uuid,
    draft: CaseDraft,
    image: &[u8],
  ) -> Result<Case> {
    let embedding = self.extractor.extract(image)?;
    let last_seen_at = self.geocoder.geocode(&draft.last_seen_address).await;
    let photo_path = self.photos.save(image).await?;
    let profile_links = self.profiles.find_profiles(&photo_path).await;
    let input = NewCase {
      owner_id,
      draft,
      last_seen_at,
      photo_path,
      profile_links,
      embedding,
    };
    self.store.create(input).await.map_err(Into::into)
  }

  /// Match an uploaded photo against every active case.
  pub async fn find_matches(
    &self,
    image: &[u8],
    strictness: Strictness,
  ) -> Result<Vec<Match>> {
    let query = self.extractor.extract(image)?;
    search::search(&self.store, &query, strictness).await
  }

  /// One owner's view of their own active cases.
  pub async fn my_cases(&self, owner_id: Uuid) -> Result<Vec<Case>> {
    self.store.list_by_owner(owner_id).await.map_err(Into::into)
  }

  /// Look up a single active case.
  pub async fn case(&self, case_id: Uuid) -> Result<Option<Case>> {
    self.store.get(case_id).await.map_err(Into::into)
  }

  /// Resolve an active case: move it permanently into the found set.
  pub async fn resolve(&self, case_id: Uuid) -> Result<FoundCase> {
    self.store.mark_found(case_id).await.map_err(Into::into)
  }

  /// Every resolved case, most recently resolved first.
  pub async fn found_cases(&self) -> Result<Vec<FoundCase>> {
    self.store.list_found().await.map_err(Into::into)
  }
}
