//! Conversions between domain types and their SQLite column encodings.

use chrono::{DateTime, NaiveDate, Utc};
use reunite_core::{
  case::{Case, ContactInfo, FoundCase, Gender},
  embedding::Embedding,
  geo::GeoPoint,
  profile::ProfileLink,
};
use uuid::Uuid;

use crate::error::{Error, Result};

// ─── Identifiers ─────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  Ok(
    DateTime::parse_from_rfc3339(s)
      .map_err(|e| Error::DateParse(e.to_string()))?
      .with_timezone(&Utc),
  )
}

pub fn encode_date(date: NaiveDate) -> String { date.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse().map_err(|e: chrono::format::ParseError| Error::DateParse(e.to_string()))
}

// ─── Enumerations ────────────────────────────────────────────────────────────

pub fn encode_gender(gender: Gender) -> &'static str { gender.as_str() }

pub fn decode_gender(s: &str) -> Result<Gender> {
  Gender::parse(s).ok_or_else(|| Error::InvalidValue(format!("unknown gender: {s:?}")))
}

fn decode_age(age: i64) -> Result<u8> {
  u8::try_from(age).map_err(|_| Error::InvalidValue(format!("age out of range: {age}")))
}

// ─── Profile Links ───────────────────────────────────────────────────────────

pub fn encode_profile_links(links: &[ProfileLink]) -> Result<String> {
  Ok(serde_json::to_string(links)?)
}

pub fn decode_profile_links(json: &str) -> Result<Vec<ProfileLink>> {
  Ok(serde_json::from_str(json)?)
}

// ─── Embeddings ──────────────────────────────────────────────────────────────

/// Flattens an embedding into a blob of little-endian `f32` components.
pub fn encode_embedding(embedding: &Embedding) -> Vec<u8> {
  let mut bytes = Vec::with_capacity(embedding.dimension() * 4);
  for value in embedding.as_slice() {
    bytes.extend_from_slice(&value.to_le_bytes());
  }
  bytes
}

pub fn decode_embedding(blob: &[u8], dimension: usize) -> Result<Embedding> {
  if blob.len() != dimension * 4 {
    return Err(Error::InvalidValue(format!(
      "embedding blob is {} bytes, expected {}",
      blob.len(),
      dimension * 4
    )));
  }
  let values = blob
    .chunks_exact(4)
    .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    .collect();
  Ok(Embedding::new(values))
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// A `cases` row as it comes off the wire, before decoding.
pub struct RawCase {
  pub case_id:           String,
  pub owner_id:          String,
  pub name:              String,
  pub age:               i64,
  pub gender:            String,
  pub contact_name:      String,
  pub contact_phone:     String,
  pub contact_relation:  Option<String>,
  pub aadhaar:           Option<String>,
  pub description:       String,
  pub home_address:      Option<String>,
  pub last_seen_address: String,
  pub last_seen_date:    String,
  pub last_seen_lat:     Option<f64>,
  pub last_seen_lon:     Option<f64>,
  pub photo_path:        String,
  pub profile_links:     String,
  pub embedding:         Vec<u8>,
  pub created_at:        String,
}

impl RawCase {
  pub fn into_case(self, dimension: usize) -> Result<Case> {
    let last_seen_at = match (self.last_seen_lat, self.last_seen_lon) {
      (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
      (None, None) => None,
      _ => return Err(Error::InvalidValue("half-written coordinate pair".into())),
    };
    Ok(Case {
      case_id:           decode_uuid(&self.case_id)?,
      owner_id:          decode_uuid(&self.owner_id)?,
      name:              self.name,
      age:               decode_age(self.age)?,
      gender:            decode_gender(&self.gender)?,
      contact:           ContactInfo {
        name:     self.contact_name,
        phone:    self.contact_phone,
        relation: self.contact_relation,
      },
      aadhaar:           self.aadhaar,
      description:       self.description,
      home_address:      self.home_address,
      last_seen_address: self.last_seen_address,
      last_seen_date:    decode_date(&self.last_seen_date)?,
      last_seen_at,
      photo_path:        self.photo_path,
      profile_links:     decode_profile_links(&self.profile_links)?,
      embedding:         decode_embedding(&self.embedding, dimension)?,
      created_at:        decode_dt(&self.created_at)?,
    })
  }
}

/// A `found_cases` row as it comes off the wire, before decoding.
pub struct RawFoundCase {
  pub case_id:           String,
  pub owner_id:          String,
  pub name:              String,
  pub age:               i64,
  pub gender:            String,
  pub last_seen_address: String,
  pub photo_path:        String,
  pub found_at:          String,
}

impl RawFoundCase {
  pub fn into_found(self) -> Result<FoundCase> {
    Ok(FoundCase {
      case_id:           decode_uuid(&self.case_id)?,
      owner_id:          decode_uuid(&self.owner_id)?,
      name:              self.name,
      age:               decode_age(self.age)?,
      gender:            decode_gender(&self.gender)?,
      last_seen_address: self.last_seen_address,
      photo_path:        self.photo_path,
      found_at:          decode_dt(&self.found_at)?,
    })
  }
}
