//! Content-addressed photo storage on the local filesystem.
//!
//! Files are named by the SHA-256 of their bytes plus a sniffed extension,
//! so re-uploading the same photo is idempotent and names never collide.

use std::path::PathBuf;

use async_trait::async_trait;
use reunite_core::{Error, Result, photo::PhotoStore};
use reunite_embed::sniff_format;
use sha2::{Digest, Sha256};

/// Stores photos as files under a root directory.
///
/// The returned reference is the bare file name; the server exposes it at
/// `/photos/{name}`.
pub struct DirPhotoStore {
  root: PathBuf,
}

impl DirPhotoStore {
  /// Creates the root directory if it does not exist yet.
  pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
    let root = root.into();
    std::fs::create_dir_all(&root)
      .map_err(|e| Error::PhotoStorage(format!("creating {}: {e}", root.display())))?;
    Ok(Self { root })
  }
}

#[async_trait]
impl PhotoStore for DirPhotoStore {
  async fn save(&self, image: &[u8]) -> Result<String> {
    let format = sniff_format(image)
      .ok_or_else(|| Error::PhotoStorage("unrecognised image format".into()))?;
    let name = format!("{}.{}", hex::encode(Sha256::digest(image)), format.extension());
    let path = self.root.join(&name);
    tokio::fs::write(&path, image)
      .await
      .map_err(|e| Error::PhotoStorage(format!("writing {name}: {e}")))?;
    Ok(name)
  }
}
