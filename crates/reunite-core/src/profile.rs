//! Reverse-image profile lookup — the consumed contract for enrichment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A public social-media profile surfaced by reverse-image search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
  pub url:   String,
  pub title: Option<String>,
}

/// Looks up public profiles that feature a stored photo.
///
/// Lookup is enrichment only: failures and empty results both collapse to an
/// empty list and never block registration. `photo` is the stored reference
/// from [`PhotoStore::save`](crate::photo::PhotoStore::save); implementations
/// that need a fetchable URL derive one from it.
#[async_trait]
pub trait ProfileSearch: Send + Sync {
  async fn find_profiles(&self, photo: &str) -> Vec<ProfileLink>;
}

/// Profile lookup for deployments without a reverse-image provider.
pub struct DisabledProfileSearch;

#[async_trait]
impl ProfileSearch for DisabledProfileSearch {
  async fn find_profiles(&self, _photo: &str) -> Vec<ProfileLink> {
    Vec::new()
  }
}
