//! JSON REST API for the Reunite case registry.
//!
//! Exposes an axum [`Router`] backed by a [`Finder`] over any
//! [`CaseStore`]. Authentication, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", reunite_api::api_router(finder.clone()))
//! ```

pub mod cases;
pub mod error;
pub mod photos;
pub mod search;

use std::path::PathBuf;

use axum::{
  Router,
  routing::{get, post},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use reunite_core::{finder::Finder, store::CaseStore};
use serde::Deserialize;

pub use error::ApiError;
pub use photos::DirPhotoStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  pub photo_dir:      PathBuf,
  /// Width of the face embeddings. The store pins this on first open, so
  /// changing it requires a fresh database.
  #[serde(default = "default_embedding_dim")]
  pub embedding_dim:  usize,
  /// Optional Nominatim integration. Cases are stored without coordinates
  /// when absent.
  #[serde(default)]
  pub geocoder:       Option<GeocoderSettings>,
  /// Optional SerpApi integration. Cases carry no profile links when absent.
  #[serde(default)]
  pub profile_search: Option<ProfileSearchSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
  #[serde(default = "default_nominatim_url")]
  pub base_url:   String,
  pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSearchSettings {
  #[serde(default = "default_serpapi_url")]
  pub base_url:       String,
  pub api_key:        String,
  /// Public URL under which `/photos` is reachable; the Lens engine can
  /// only inspect images it can fetch.
  pub photo_base_url: String,
}

fn default_embedding_dim() -> usize {
  128
}

fn default_nominatim_url() -> String {
  reunite_lookup::DEFAULT_NOMINATIM_URL.to_string()
}

fn default_serpapi_url() -> String {
  reunite_lookup::DEFAULT_SERPAPI_URL.to_string()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `finder`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(finder: Finder<S>) -> Router<()>
where
  S: CaseStore + Clone + Send + Sync + 'static,
  S::Error: Into<reunite_core::Error>,
{
  Router::new()
    // Cases
    .route("/cases", get(cases::list::<S>).post(cases::register::<S>))
    .route("/cases/found", get(cases::found::<S>))
    .route("/cases/{id}", get(cases::get_one::<S>))
    .route("/cases/{id}/resolve", post(cases::resolve::<S>))
    // Search
    .route("/search", post(search::handler::<S>))
    .with_state(finder)
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Decode a base64 photo field from a request body.
pub(crate) fn decode_photo(b64: &str) -> Result<Vec<u8>, ApiError> {
  B64
    .decode(b64.trim())
    .map_err(|e| ApiError::BadRequest(format!("photo is not valid base64: {e}")))
}

// ─── Integration tests ────────────────────────────────────────────────────────
