//! Facade-level tests over an in-memory store and fixture collaborators.
//!
//! The fixture extractor reads the "image" bytes as little-endian `f32`s, so
//! each test controls the exact embedding a photo produces.

use std::sync::{
  Arc, Mutex,
  atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::{
  Error, Result,
  case::{Case, CaseDraft, ContactInfo, FoundCase, Gender, NewCase},
  embedding::{Embedding, EmbeddingExtractor},
  finder::Finder,
  geo::{DisabledGeocoder, GeoPoint, Geocoder},
  photo::PhotoStore,
  profile::{DisabledProfileSearch, ProfileLink, ProfileSearch},
  search,
  similarity::Strictness,
  store::CaseStore,
};

// ─── Fixtures ────────────────────────────────────────────────────────────────

struct MemStore {
  dim:    usize,
  active: Mutex<Vec<Case>>,
  found:  Mutex<Vec<FoundCase>>,
  clock:  AtomicI64,
}

impl MemStore {
  fn new(dim: usize) -> Self {
    Self {
      dim,
      active: Mutex::new(Vec::new()),
      found: Mutex::new(Vec::new()),
      clock: AtomicI64::new(0),
    }
  }

  /// Strictly increasing timestamps, so creation order is unambiguous.
  fn tick(&self) -> DateTime<Utc> {
    let n = self.clock.fetch_add(1, Ordering::SeqCst);
    Utc.timestamp_millis_opt(1_700_000_000_000 + n).unwrap()
  }
}

impl CaseStore for MemStore {
  type Error = Error;

  fn dimension(&self) -> usize { self.dim }

  async fn create(&self, input: NewCase) -> Result<Case> {
    if input.embedding.dimension() != self.dim {
      return Err(Error::DimensionMismatch {
        expected: self.dim,
        actual:   input.embedding.dimension(),
      });
    }
    let case = Case {
      case_id:           Uuid::new_v4(),
      owner_id:          input.owner_id,
      name:              input.draft.name,
      age:               input.draft.age,
      gender:            input.draft.gender,
      contact:           input.draft.contact,
      aadhaar:           input.draft.aadhaar,
      description:       input.draft.description,
      home_address:      input.draft.home_address,
      last_seen_address: input.draft.last_seen_address,
      last_seen_date:    input.draft.last_seen_date,
      last_seen_at:      input.last_seen_at,
      photo_path:        input.photo_path,
      profile_links:     input.profile_links,
      embedding:         input.embedding,
      created_at:        self.tick(),
    };
    self.active.lock().unwrap().push(case.clone());
    Ok(case)
  }

  async fn mark_found(&self, case_id: Uuid) -> Result<FoundCase> {
    let mut active = self.active.lock().unwrap();
    let index = active
      .iter()
      .position(|c| c.case_id == case_id)
      .ok_or(Error::CaseNotFound(case_id))?;
    let case = active.remove(index);
    let found = FoundCase {
      case_id:           case.case_id,
      owner_id:          case.owner_id,
      name:              case.name,
      age:               case.age,
      gender:            case.gender,
      last_seen_address: case.last_seen_address,
      photo_path:        case.photo_path,
      found_at:          self.tick(),
    };
    self.found.lock().unwrap().push(found.clone());
    Ok(found)
  }

  async fn get(&self, id: Uuid) -> Result<Option<Case>> {
    let active = self.active.lock().unwrap();
    Ok(active.iter().find(|c| c.case_id == id).cloned())
  }

  async fn list_active(&self) -> Result<Vec<Case>> {
    Ok(self.active.lock().unwrap().clone())
  }

  async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Case>> {
    let active = self.active.lock().unwrap();
    Ok(active.iter().filter(|c| c.owner_id == owner_id).cloned().collect())
  }

  async fn list_found(&self) -> Result<Vec<FoundCase>> {
    let found = self.found.lock().unwrap();
    Ok(found.iter().rev().cloned().collect())
  }
}

/// Decodes the "image" as a sequence of little-endian `f32` components.
struct ByteExtractor {
  dim: usize,
}

impl EmbeddingExtractor for ByteExtractor {
  fn dimension(&self) -> usize { self.dim }

  fn extract(&self, image: &[u8]) -> Result<Embedding> {
    if image.len() != self.dim * 4 {
      return Err(Error::Extraction(format!(
        "expected {} bytes, got {}",
        self.dim * 4,
        image.len()
      )));
    }
    let values = image
      .chunks_exact(4)
      .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
      .collect();
    Ok(Embedding::new(values))
  }
}

struct FixedGeocoder(GeoPoint);

#[async_trait]
impl Geocoder for FixedGeocoder {
  async fn geocode(&self, _address: &str) -> Option<GeoPoint> { Some(self.0) }
}

struct MemPhotos(AtomicI64);

#[async_trait]
impl PhotoStore for MemPhotos {
  async fn save(&self, _image: &[u8]) -> Result<String> {
    let n = self.0.fetch_add(1, Ordering::SeqCst);
    Ok(format!("photo-{n}.jpg"))
  }
}

struct FailingPhotos;

#[async_trait]
impl PhotoStore for FailingPhotos {
  async fn save(&self, _image: &[u8]) -> Result<String> {
    Err(Error::PhotoStorage("disk full".into()))
  }
}

struct StaticProfiles(Vec<ProfileLink>);

#[async_trait]
impl ProfileSearch for StaticProfiles {
  async fn find_profiles(&self, _photo: &str) -> Vec<ProfileLink> {
    self.0.clone()
  }
}

fn finder(dim: usize) -> Finder<MemStore> {
  Finder::new(
    MemStore::new(dim),
    Arc::new(ByteExtractor { dim }),
    Arc::new(DisabledGeocoder),
    Arc::new(MemPhotos(AtomicI64::new(0))),
    Arc::new(DisabledProfileSearch),
  )
  .expect("extractor and store dimensions agree")
}

/// Encode an embedding as the fixture extractor's "image" bytes.
fn photo(values: &[f32]) -> Vec<u8> {
  values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn draft(name: &str) -> CaseDraft {
  CaseDraft {
    name:              name.into(),
    age:               24,
    gender:            Gender::Female,
    contact:           ContactInfo {
      name:     "Ravi".into(),
      phone:    "555-0100".into(),
      relation: Some("brother".into()),
    },
    aadhaar:           Some("123412341234".into()),
    description:       "last seen near the market".into(),
    home_address:      None,
    last_seen_address: "MG Road, Bengaluru".into(),
    last_seen_date:    chrono::NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
  }
}

fn strictness(value: f32) -> Strictness { Strictness::new(value).unwrap() }

// ─── Registration ────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_assigns_identity_and_persists() {
  let f = finder(3);
  let owner = Uuid::new_v4();

  let case = f
    .register(owner, draft("Asha"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();

  assert_eq!(case.owner_id, owner);
  assert_eq!(case.name, "Asha");
  assert_eq!(case.embedding, Embedding::new(vec![1.0, 0.0, 0.0]));
  assert!(!case.photo_path.is_empty());

  let mine = f.my_cases(owner).await.unwrap();
  assert_eq!(mine.len(), 1);
  assert_eq!(mine[0].case_id, case.case_id);

  let fetched = f.case(case.case_id).await.unwrap();
  assert!(fetched.is_some());
}

#[tokio::test]
async fn unusable_image_creates_nothing() {
  let f = finder(3);
  let owner = Uuid::new_v4();

  let err = f.register(owner, draft("Asha"), b"not-a-photo").await;
  assert!(matches!(err, Err(Error::Extraction(_))));

  assert!(f.my_cases(owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_geocode_is_not_an_error() {
  // DisabledGeocoder resolves nothing; registration must still succeed.
  let f = finder(3);
  let case = f
    .register(Uuid::new_v4(), draft("Asha"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();
  assert!(case.last_seen_at.is_none());
}

#[tokio::test]
async fn register_carries_enrichments() {
  let point = GeoPoint { lat: 12.9716, lon: 77.5946 };
  let links = vec![ProfileLink {
    url:   "https://instagram.com/asha".into(),
    title: Some("Asha".into()),
  }];
  let f = Finder::new(
    MemStore::new(3),
    Arc::new(ByteExtractor { dim: 3 }),
    Arc::new(FixedGeocoder(point)),
    Arc::new(MemPhotos(AtomicI64::new(0))),
    Arc::new(StaticProfiles(links.clone())),
  )
  .unwrap();

  let case = f
    .register(Uuid::new_v4(), draft("Asha"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();

  assert_eq!(case.last_seen_at, Some(point));
  assert_eq!(case.profile_links, links);
}

#[tokio::test]
async fn photo_storage_failure_rejects_registration() {
  let f = Finder::new(
    MemStore::new(3),
    Arc::new(ByteExtractor { dim: 3 }),
    Arc::new(DisabledGeocoder),
    Arc::new(FailingPhotos),
    Arc::new(DisabledProfileSearch),
  )
  .unwrap();
  let owner = Uuid::new_v4();

  let err = f.register(owner, draft("Asha"), &photo(&[1.0, 0.0, 0.0])).await;
  assert!(matches!(err, Err(Error::PhotoStorage(_))));
  assert!(f.my_cases(owner).await.unwrap().is_empty());
}

// ─── Matching ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn exact_photo_matches_with_full_score() {
  let f = finder(3);
  let case = f
    .register(Uuid::new_v4(), draft("Asha"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();

  let matches = f
    .find_matches(&photo(&[1.0, 0.0, 0.0]), strictness(0.9))
    .await
    .unwrap();

  assert_eq!(matches.len(), 1);
  assert_eq!(matches[0].case.case_id, case.case_id);
  assert!((matches[0].score - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn orthogonal_photo_matches_nothing() {
  let f = finder(3);
  f.register(Uuid::new_v4(), draft("Asha"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();

  let matches = f
    .find_matches(&photo(&[0.0, 1.0, 0.0]), strictness(0.1))
    .await
    .unwrap();
  assert!(matches.is_empty());
}

#[tokio::test]
async fn raising_strictness_only_narrows_results() {
  let f = finder(3);
  f.register(Uuid::new_v4(), draft("exact"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();
  f.register(Uuid::new_v4(), draft("close"), &photo(&[0.6, 0.8, 0.0]))
    .await
    .unwrap();

  let query = photo(&[1.0, 0.0, 0.0]);
  let loose = f.find_matches(&query, strictness(0.5)).await.unwrap();
  let strict = f.find_matches(&query, strictness(0.8)).await.unwrap();

  assert_eq!(loose.len(), 2);
  assert_eq!(strict.len(), 1);
  // The strict result set is a subset of the loose one.
  let loose_ids: Vec<Uuid> = loose.iter().map(|m| m.case.case_id).collect();
  assert!(strict.iter().all(|m| loose_ids.contains(&m.case.case_id)));
}

#[tokio::test]
async fn equal_scores_return_earliest_registered_first() {
  let f = finder(3);
  let first = f
    .register(Uuid::new_v4(), draft("first"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();
  let second = f
    .register(Uuid::new_v4(), draft("second"), &photo(&[2.0, 0.0, 0.0]))
    .await
    .unwrap();

  let matches = f
    .find_matches(&photo(&[1.0, 0.0, 0.0]), strictness(0.9))
    .await
    .unwrap();

  assert_eq!(matches.len(), 2);
  assert_eq!(matches[0].case.case_id, first.case_id);
  assert_eq!(matches[1].case.case_id, second.case_id);
}

#[tokio::test]
async fn repeated_queries_return_identical_sequences() {
  let f = finder(3);
  for name in ["a", "b", "c"] {
    f.register(Uuid::new_v4(), draft(name), &photo(&[1.0, 0.0, 0.0]))
      .await
      .unwrap();
  }

  let query = photo(&[1.0, 0.0, 0.0]);
  let once = f.find_matches(&query, strictness(0.5)).await.unwrap();
  let twice = f.find_matches(&query, strictness(0.5)).await.unwrap();

  let ids = |ms: &[search::Match]| {
    ms.iter().map(|m| m.case.case_id).collect::<Vec<_>>()
  };
  assert_eq!(ids(&once), ids(&twice));
}

#[tokio::test]
async fn query_dimension_drift_is_rejected() {
  let store = MemStore::new(3);
  let err = search::search(
    &store,
    &Embedding::new(vec![1.0, 0.0, 0.0, 0.0]),
    strictness(0.5),
  )
  .await;
  assert!(matches!(
    err,
    Err(Error::DimensionMismatch { expected: 3, actual: 4 })
  ));
}

#[tokio::test]
async fn wiring_mismatched_dimensions_fails_fast() {
  let result = Finder::new(
    MemStore::new(3),
    Arc::new(ByteExtractor { dim: 4 }),
    Arc::new(DisabledGeocoder),
    Arc::new(MemPhotos(AtomicI64::new(0))),
    Arc::new(DisabledProfileSearch),
  );
  assert!(matches!(
    result,
    Err(Error::DimensionMismatch { expected: 3, actual: 4 })
  ));
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn resolving_moves_a_case_into_the_found_set() {
  let f = finder(3);
  let owner = Uuid::new_v4();
  let case = f
    .register(owner, draft("Asha"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();

  let found = f.resolve(case.case_id).await.unwrap();
  assert_eq!(found.case_id, case.case_id);
  assert_eq!(found.name, "Asha");

  // Gone from every active view, present in the found view.
  assert!(f.my_cases(owner).await.unwrap().is_empty());
  assert!(f.case(case.case_id).await.unwrap().is_none());
  let found_list = f.found_cases().await.unwrap();
  assert_eq!(found_list.len(), 1);
  assert_eq!(found_list[0].case_id, case.case_id);

  // Resolved cases are permanently excluded from search.
  let matches = f
    .find_matches(&photo(&[1.0, 0.0, 0.0]), strictness(0.9))
    .await
    .unwrap();
  assert!(matches.is_empty());
}

#[tokio::test]
async fn resolving_twice_fails_with_not_found() {
  let f = finder(3);
  let case = f
    .register(Uuid::new_v4(), draft("Asha"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();

  f.resolve(case.case_id).await.unwrap();
  let err = f.resolve(case.case_id).await;
  assert!(matches!(err, Err(Error::CaseNotFound(id)) if id == case.case_id));

  // The sets are unchanged by the failed second attempt.
  assert_eq!(f.found_cases().await.unwrap().len(), 1);
}

#[tokio::test]
async fn resolving_an_unknown_id_changes_nothing() {
  let f = finder(3);
  let owner = Uuid::new_v4();
  f.register(owner, draft("Asha"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();

  let missing = Uuid::new_v4();
  let err = f.resolve(missing).await;
  assert!(matches!(err, Err(Error::CaseNotFound(id)) if id == missing));

  assert_eq!(f.my_cases(owner).await.unwrap().len(), 1);
  assert!(f.found_cases().await.unwrap().is_empty());
}

#[tokio::test]
async fn found_cases_come_back_newest_first() {
  let f = finder(3);
  let first = f
    .register(Uuid::new_v4(), draft("first"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();
  let second = f
    .register(Uuid::new_v4(), draft("second"), &photo(&[0.0, 1.0, 0.0]))
    .await
    .unwrap();

  f.resolve(first.case_id).await.unwrap();
  f.resolve(second.case_id).await.unwrap();

  let found = f.found_cases().await.unwrap();
  assert_eq!(found.len(), 2);
  assert_eq!(found[0].case_id, second.case_id);
  assert_eq!(found[1].case_id, first.case_id);
}

// ─── Owner views ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn my_cases_is_scoped_to_the_owner() {
  let f = finder(3);
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();

  f.register(alice, draft("a1"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();
  f.register(bob, draft("b1"), &photo(&[0.0, 1.0, 0.0]))
    .await
    .unwrap();
  f.register(alice, draft("a2"), &photo(&[0.0, 0.0, 1.0]))
    .await
    .unwrap();

  let mine = f.my_cases(alice).await.unwrap();
  assert_eq!(mine.len(), 2);
  assert!(mine.iter().all(|c| c.owner_id == alice));
  // Creation order within the owner view.
  assert_eq!(mine[0].name, "a1");
  assert_eq!(mine[1].name, "a2");
}

#[tokio::test]
async fn search_spans_all_owners() {
  let f = finder(3);
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();

  f.register(alice, draft("a1"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();
  f.register(bob, draft("b1"), &photo(&[1.0, 0.0, 0.0]))
    .await
    .unwrap();

  let matches = f
    .find_matches(&photo(&[1.0, 0.0, 0.0]), strictness(0.9))
    .await
    .unwrap();
  assert_eq!(matches.len(), 2);
}
