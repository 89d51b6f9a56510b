//! Case records — the fundamental unit of the Reunite registry.
//!
//! A case is the durable record of one missing-person report. Its fields are
//! immutable once created; the only lifecycle transition is resolution, which
//! moves the record into the found set permanently (see
//! [`CaseStore::mark_found`](crate::store::CaseStore::mark_found)).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{embedding::Embedding, geo::GeoPoint, profile::ProfileLink};

// ─── Demographics ────────────────────────────────────────────────────────────

/// Reported gender of the missing person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Female,
  Male,
  Other,
}

impl Gender {
  /// The string stored in the `gender` column.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Female => "female",
      Self::Male => "male",
      Self::Other => "other",
    }
  }

  /// Inverse of [`as_str`](Gender::as_str).
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "female" => Some(Self::Female),
      "male" => Some(Self::Male),
      "other" => Some(Self::Other),
      _ => None,
    }
  }
}

/// How to reach the person who filed the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
  pub name:     String,
  pub phone:    String,
  /// Relation to the missing person, e.g. "mother", "neighbour".
  pub relation: Option<String>,
}

// ─── Case ────────────────────────────────────────────────────────────────────

/// An active missing-person record, eligible for search.
///
/// `case_id` and `created_at` are assigned by the store on creation. The
/// embedding is computed exactly once from the reference photo at
/// registration; re-registering the same person creates a new case rather
/// than mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
  pub case_id:           Uuid,
  /// Identifier of the submitting user, as established by the surrounding
  /// application's authentication. Partitions the "my cases" view; search
  /// always runs over the full active set.
  pub owner_id:          Uuid,
  pub name:              String,
  pub age:               u8,
  pub gender:            Gender,
  pub contact:           ContactInfo,
  /// National identity number. Stored in full, masked for display.
  pub aadhaar:           Option<String>,
  pub description:       String,
  pub home_address:      Option<String>,
  /// Raw address text as entered by the reporter.
  pub last_seen_address: String,
  pub last_seen_date:    NaiveDate,
  /// Geocoded from `last_seen_address`. Absent when geocoding failed or is
  /// disabled; absence never blocks any operation.
  pub last_seen_at:      Option<GeoPoint>,
  /// Reference to the stored photo. The file itself belongs to the
  /// surrounding application; the registry only holds the reference.
  pub photo_path:        String,
  /// Public profiles surfaced by reverse-image lookup at registration.
  pub profile_links:     Vec<ProfileLink>,
  pub embedding:         Embedding,
  pub created_at:        DateTime<Utc>,
}

impl Case {
  /// The identity number masked for display: only the last four characters
  /// survive. Full digits never leave the store through a listing.
  pub fn masked_aadhaar(&self) -> Option<String> {
    self.aadhaar.as_ref().map(|id| {
      let digits: Vec<char> = id.chars().collect();
      let tail: String =
        digits[digits.len().saturating_sub(4)..].iter().collect();
      format!("XXXX-XXXX-{tail}")
    })
  }
}

// ─── FoundCase ───────────────────────────────────────────────────────────────

/// A resolved case. Keeps the identity and the minimal display fields;
/// permanently excluded from search. The transition from [`Case`] is one-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundCase {
  pub case_id:           Uuid,
  pub owner_id:          Uuid,
  pub name:              String,
  pub age:               u8,
  pub gender:            Gender,
  pub last_seen_address: String,
  pub photo_path:        String,
  pub found_at:          DateTime<Utc>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// The user-entered fields of a report, before any enrichment.
/// Input to [`Finder::register`](crate::finder::Finder::register).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDraft {
  pub name:              String,
  pub age:               u8,
  pub gender:            Gender,
  pub contact:           ContactInfo,
  pub aadhaar:           Option<String>,
  pub description:       String,
  pub home_address:      Option<String>,
  pub last_seen_address: String,
  pub last_seen_date:    NaiveDate,
}

/// Input to [`crate::store::CaseStore::create`]: a draft plus everything the
/// registration pipeline derived from it. `case_id` and `created_at` are
/// always set by the store; they are not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewCase {
  pub owner_id:      Uuid,
  pub draft:         CaseDraft,
  pub last_seen_at:  Option<GeoPoint>,
  pub photo_path:    String,
  pub profile_links: Vec<ProfileLink>,
  pub embedding:     Embedding,
}
