//! Photo storage — the consumed contract for persisting uploads.

use async_trait::async_trait;

use crate::Result;

/// Stores uploaded photo bytes and hands back a stable reference.
///
/// The reference is opaque to the registry: it is persisted on the case and
/// the surrounding application decides how the bytes behind it are served.
/// Storage failures surface as
/// [`Error::PhotoStorage`](crate::Error::PhotoStorage).
#[async_trait]
pub trait PhotoStore: Send + Sync {
  async fn save(&self, image: &[u8]) -> Result<String>;
}
