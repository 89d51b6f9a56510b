//! Image-format detection by magic bytes.
//!
//! Uploads arrive as bare byte buffers; the claimed filename or content type
//! never reaches this layer, so the container is identified from the payload
//! itself.

/// Image container formats the registry accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
  Jpeg,
  Png,
}

impl ImageFormat {
  /// Canonical file extension, used when persisting uploads.
  pub fn extension(&self) -> &'static str {
    match self {
      Self::Jpeg => "jpg",
      Self::Png => "png",
    }
  }

  /// MIME type for serving the stored file.
  pub fn mime(&self) -> &'static str {
    match self {
      Self::Jpeg => "image/jpeg",
      Self::Png => "image/png",
    }
  }
}

/// Identify an image by its leading magic bytes. Returns `None` when the
/// payload matches no supported container.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
  const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
  if bytes.starts_with(&PNG_MAGIC) {
    return Some(ImageFormat::Png);
  }
  if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
    return Some(ImageFormat::Jpeg);
  }
  None
}
