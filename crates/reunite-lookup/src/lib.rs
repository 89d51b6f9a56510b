//! External lookup adapters for the Reunite registry.
//!
//! Two integrations live here: forward geocoding of last-seen addresses
//! through a Nominatim-compatible endpoint, and reverse-image profile
//! discovery through the SerpApi Google Lens API. Both degrade to "no
//! result" on failure, so neither can block or fail a registration.

mod geocode;
mod profiles;

pub mod error;

pub use error::{Error, Result};
pub use geocode::{DEFAULT_NOMINATIM_URL, GeocoderConfig, NominatimGeocoder};
pub use profiles::{DEFAULT_SERPAPI_URL, ProfileSearchConfig, SerpLensSearch};
