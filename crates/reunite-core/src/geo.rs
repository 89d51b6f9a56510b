//! Geocoding — the consumed contract for address resolution.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
  pub lat: f64,
  pub lon: f64,
}

/// Resolves free-text addresses to coordinates.
///
/// Geocoding is best-effort: an address that cannot be resolved yields
/// `None`, and no registry operation is blocked by it. Implementations
/// collapse their own failures (network, quota) to `None` as well, after
/// reporting them however they see fit.
#[async_trait]
pub trait Geocoder: Send + Sync {
  async fn geocode(&self, address: &str) -> Option<GeoPoint>;
}

/// Geocoder for deployments without a geocoding service: every address
/// resolves to no coordinates.
pub struct DisabledGeocoder;

#[async_trait]
impl Geocoder for DisabledGeocoder {
  async fn geocode(&self, _address: &str) -> Option<GeoPoint> { None }
}
