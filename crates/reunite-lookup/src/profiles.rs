//! Reverse-image profile discovery via the SerpApi Google Lens engine.

use std::time::Duration;

use async_trait::async_trait;
use reunite_core::profile::{ProfileLink, ProfileSearch};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com";

/// Hosts whose visual matches count as social profiles.
const SOCIAL_HOSTS: [&str; 5] =
  ["facebook.com", "instagram.com", "twitter.com", "linkedin.com", "tiktok.com"];

/// Cap on links attached to a single case.
const MAX_LINKS: usize = 5;

/// Settings for the SerpApi integration.
#[derive(Debug, Clone)]
pub struct ProfileSearchConfig {
  pub base_url:       String,
  pub api_key:        String,
  /// Public base URL under which stored photos are served. Lens can only
  /// inspect images it can fetch, so photo references are joined onto this.
  pub photo_base_url: String,
}

/// [`ProfileSearch`] backed by the Google Lens engine on SerpApi.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct SerpLensSearch {
  client: reqwest::Client,
  config: ProfileSearchConfig,
}

impl SerpLensSearch {
  pub fn new(config: ProfileSearchConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn photo_url(&self, photo: &str) -> String {
    format!(
      "{}/{}",
      self.config.photo_base_url.trim_end_matches('/'),
      photo.trim_start_matches('/')
    )
  }

  /// `GET {base_url}/search?engine=google_lens&url=<photo>&api_key=<key>`
  async fn search(&self, photo: &str) -> Result<Vec<ProfileLink>> {
    let photo_url = self.photo_url(photo);
    let response: LensResponse = self
      .client
      .get(format!("{}/search", self.config.base_url.trim_end_matches('/')))
      .query(&[
        ("engine", "google_lens"),
        ("url", photo_url.as_str()),
        ("api_key", self.config.api_key.as_str()),
      ])
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;
    Ok(social_links(response.visual_matches))
  }
}

#[async_trait]
impl ProfileSearch for SerpLensSearch {
  async fn find_profiles(&self, photo: &str) -> Vec<ProfileLink> {
    match self.search(photo).await {
      Ok(links) => links,
      Err(error) => {
        tracing::warn!(%error, "reverse-image profile search failed");
        Vec::new()
      }
    }
  }
}

#[derive(Debug, Deserialize)]
struct LensResponse {
  #[serde(default)]
  visual_matches: Vec<VisualMatch>,
}

#[derive(Debug, Deserialize)]
struct VisualMatch {
  #[serde(default)]
  title: Option<String>,
  link:  String,
}

/// Keeps matches on known social hosts, in response order, capped at
/// [`MAX_LINKS`].
fn social_links(matches: Vec<VisualMatch>) -> Vec<ProfileLink> {
  matches
    .into_iter()
    .filter(|hit| is_social(&hit.link))
    .take(MAX_LINKS)
    .map(|hit| ProfileLink { url: hit.link, title: hit.title })
    .collect()
}

fn is_social(link: &str) -> bool {
  let Ok(url) = reqwest::Url::parse(link) else {
    return false;
  };
  let Some(host) = url.host_str() else {
    return false;
  };
  let host = host.strip_prefix("www.").unwrap_or(host);
  SOCIAL_HOSTS
    .iter()
    .any(|social| host == *social || host.ends_with(&format!(".{social}")))
}
