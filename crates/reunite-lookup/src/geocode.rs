//! Forward geocoding of last-seen addresses via Nominatim.

use std::time::Duration;

use async_trait::async_trait;
use reunite_core::geo::{GeoPoint, Geocoder};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Connection settings for a Nominatim-compatible search endpoint.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
  pub base_url:   String,
  /// Sent as the `User-Agent`. Nominatim's usage policy requires one that
  /// identifies the calling application.
  pub user_agent: String,
}

/// [`Geocoder`] backed by the Nominatim search API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct NominatimGeocoder {
  client: reqwest::Client,
  config: GeocoderConfig,
}

impl NominatimGeocoder {
  pub fn new(config: GeocoderConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .user_agent(&config.user_agent)
      .timeout(Duration::from_secs(10))
      .build()?;
    Ok(Self { client, config })
  }

  /// `GET {base_url}/search?q=<address>&format=json&limit=1`
  async fn lookup(&self, address: &str) -> Result<Option<GeoPoint>> {
    let hits: Vec<NominatimHit> = self
      .client
      .get(format!("{}/search", self.config.base_url.trim_end_matches('/')))
      .query(&[("q", address), ("format", "json"), ("limit", "1")])
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;
    Ok(first_point(&hits))
  }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
  async fn geocode(&self, address: &str) -> Option<GeoPoint> {
    match self.lookup(address).await {
      Ok(point) => point,
      Err(error) => {
        tracing::warn!(%error, address, "geocoding failed, continuing without coordinates");
        None
      }
    }
  }
}

/// One search hit. Nominatim serialises coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimHit {
  lat: String,
  lon: String,
}

fn first_point(hits: &[NominatimHit]) -> Option<GeoPoint> {
  let hit = hits.first()?;
  let lat = hit.lat.parse().ok()?;
  let lon = hit.lon.parse().ok()?;
  Some(GeoPoint { lat, lon })
}
