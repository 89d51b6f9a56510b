//! Handlers for `/cases` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/cases` | Body: [`RegisterBody`]; returns 201 + [`CaseSummary`] |
//! | `GET`  | `/cases` | `?owner_id=<uuid>` required; the caller's own reports |
//! | `GET`  | `/cases/found` | Resolved cases, most recently resolved first |
//! | `GET`  | `/cases/:id` | 404 if unknown or already resolved |
//! | `POST` | `/cases/:id/resolve` | Moves the case into the found set |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, Utc};
use reunite_core::{
  case::{Case, CaseDraft, ContactInfo, FoundCase, Gender},
  finder::Finder,
  geo::GeoPoint,
  profile::ProfileLink,
  store::CaseStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{decode_photo, error::ApiError};

// ─── Wire representation ──────────────────────────────────────────────────────

/// A case as the API exposes it. The embedding never leaves the process and
/// the identity number is masked down to its last four characters.
#[derive(Debug, Serialize)]
pub struct CaseSummary {
  pub case_id:           Uuid,
  pub owner_id:          Uuid,
  pub name:              String,
  pub age:               u8,
  pub gender:            Gender,
  pub contact:           ContactInfo,
  pub aadhaar_masked:    Option<String>,
  pub description:       String,
  pub home_address:      Option<String>,
  pub last_seen_address: String,
  pub last_seen_date:    NaiveDate,
  pub last_seen_at:      Option<GeoPoint>,
  pub photo_path:        String,
  pub profile_links:     Vec<ProfileLink>,
  pub created_at:        DateTime<Utc>,
}

impl From<Case> for CaseSummary {
  fn from(case: Case) -> Self {
    let aadhaar_masked = case.masked_aadhaar();
    CaseSummary {
      case_id:           case.case_id,
      owner_id:          case.owner_id,
      name:              case.name,
      age:               case.age,
      gender:            case.gender,
      contact:           case.contact,
      aadhaar_masked,
      description:       case.description,
      home_address:      case.home_address,
      last_seen_address: case.last_seen_address,
      last_seen_date:    case.last_seen_date,
      last_seen_at:      case.last_seen_at,
      photo_path:        case.photo_path,
      profile_links:     case.profile_links,
      created_at:        case.created_at,
    }
  }
}

// ─── Register ─────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /cases`.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub owner_id:          Uuid,
  pub name:              String,
  pub age:               u8,
  pub gender:            Gender,
  pub contact:           ContactInfo,
  pub aadhaar:           Option<String>,
  pub description:       String,
  pub home_address:      Option<String>,
  pub last_seen_address: String,
  pub last_seen_date:    NaiveDate,
  /// Base64-encoded reference photo (JPEG or PNG).
  pub photo:             String,
}

/// `POST /cases` — returns 201 + the registered case.
pub async fn register<S>(
  State(finder): State<Finder<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CaseStore + Clone + Send + Sync + 'static,
  S::Error: Into<reunite_core::Error>,
{
  let photo = decode_photo(&body.photo)?;
  let draft = CaseDraft {
    name:              body.name,
    age:               body.age,
    gender:            body.gender,
    contact:           body.contact,
    aadhaar:           body.aadhaar,
    description:       body.description,
    home_address:      body.home_address,
    last_seen_address: body.last_seen_address,
    last_seen_date:    body.last_seen_date,
  };
  let case = finder.register(body.owner_id, draft, &photo).await?;
  Ok((StatusCode::CREATED, Json(CaseSummary::from(case))))
}

// ─── List own cases ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Required: the reporting account whose cases to return.
  pub owner_id: Uuid,
}

/// `GET /cases?owner_id=<uuid>`
pub async fn list<S>(
  State(finder): State<Finder<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<CaseSummary>>, ApiError>
where
  S: CaseStore + Clone + Send + Sync + 'static,
  S::Error: Into<reunite_core::Error>,
{
  let cases = finder.my_cases(params.owner_id).await?;
  Ok(Json(cases.into_iter().map(CaseSummary::from).collect()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /cases/:id`
pub async fn get_one<S>(
  State(finder): State<Finder<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CaseSummary>, ApiError>
where
  S: CaseStore + Clone + Send + Sync + 'static,
  S::Error: Into<reunite_core::Error>,
{
  let case = finder
    .case(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("case {id} not found")))?;
  Ok(Json(case.into()))
}

// ─── Resolve ──────────────────────────────────────────────────────────────────

/// `POST /cases/:id/resolve` — marks the person as found.
///
/// Returns the new [`FoundCase`]. 404 when the id is unknown or was already
/// resolved; nothing changes in that event.
pub async fn resolve<S>(
  State(finder): State<Finder<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<FoundCase>, ApiError>
where
  S: CaseStore + Clone + Send + Sync + 'static,
  S::Error: Into<reunite_core::Error>,
{
  let found = finder.resolve(id).await?;
  Ok(Json(found))
}

// ─── Found listing ────────────────────────────────────────────────────────────

/// `GET /cases/found` — every resolved case, most recently resolved first.
pub async fn found<S>(
  State(finder): State<Finder<S>>,
) -> Result<Json<Vec<FoundCase>>, ApiError>
where
  S: CaseStore + Clone + Send + Sync + 'static,
  S::Error: Into<reunite_core::Error>,
{
  Ok(Json(finder.found_cases().await?))
}
