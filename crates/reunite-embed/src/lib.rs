//! Embedding extractors for Reunite.
//!
//! Implements [`reunite_core::embedding::EmbeddingExtractor`] without pulling
//! in a model runtime. Pure synchronous; no HTTP or database dependencies.
//!
//! # Quick start
//!
//! ```
//! use reunite_core::embedding::EmbeddingExtractor;
//! use reunite_embed::SignatureExtractor;
//!
//! let extractor = SignatureExtractor::new(128);
//! let photo = [&[0xFF, 0xD8, 0xFF][..], b"raw jpeg payload"].concat();
//! let embedding = extractor.extract(&photo).unwrap();
//! assert_eq!(embedding.dimension(), 128);
//! ```

mod raw;
mod signature;
mod sniff;

pub use raw::RawVectorExtractor;
pub use signature::SignatureExtractor;
pub use sniff::{ImageFormat, sniff_format};
