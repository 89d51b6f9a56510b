//! Reunite server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite case store, and serves the JSON API together with the stored
//! photos. The geocoding and reverse-image integrations are optional and
//! switch on when their config sections are present.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use reunite_api::{DirPhotoStore, ServerConfig, api_router};
use reunite_core::{
  finder::Finder,
  geo::{DisabledGeocoder, Geocoder},
  profile::{DisabledProfileSearch, ProfileSearch},
};
use reunite_embed::SignatureExtractor;
use reunite_lookup::{GeocoderConfig, NominatimGeocoder, ProfileSearchConfig, SerpLensSearch};
use reunite_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Reunite case registry server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("REUNITE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in filesystem paths.
  let store_path = expand_tilde(&server_cfg.store_path);
  let photo_dir = expand_tilde(&server_cfg.photo_dir);

  // Open the case store, pinned to the configured embedding width.
  let store = SqliteStore::open(&store_path, server_cfg.embedding_dim)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let extractor = SignatureExtractor::new(server_cfg.embedding_dim);
  let photos = DirPhotoStore::new(&photo_dir)
    .with_context(|| format!("failed to prepare photo dir {photo_dir:?}"))?;

  let geocoder: Arc<dyn Geocoder> = match &server_cfg.geocoder {
    Some(cfg) => {
      tracing::info!(base_url = %cfg.base_url, "geocoding enabled");
      Arc::new(NominatimGeocoder::new(GeocoderConfig {
        base_url:   cfg.base_url.clone(),
        user_agent: cfg.user_agent.clone(),
      })?)
    }
    None => Arc::new(DisabledGeocoder),
  };

  let profiles: Arc<dyn ProfileSearch> = match &server_cfg.profile_search {
    Some(cfg) => {
      tracing::info!(base_url = %cfg.base_url, "reverse-image profile search enabled");
      Arc::new(SerpLensSearch::new(ProfileSearchConfig {
        base_url:       cfg.base_url.clone(),
        api_key:        cfg.api_key.clone(),
        photo_base_url: cfg.photo_base_url.clone(),
      })?)
    }
    None => Arc::new(DisabledProfileSearch),
  };

  let finder = Finder::new(store, Arc::new(extractor), geocoder, Arc::new(photos), profiles)
    .context("failed to wire the registration pipeline")?;

  let app = axum::Router::new()
    .nest("/api", api_router(finder))
    .nest_service("/photos", ServeDir::new(&photo_dir))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
