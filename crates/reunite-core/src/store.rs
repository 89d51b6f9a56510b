//! The `CaseStore` trait.
//!
//! Storage backends (e.g. `reunite-store-sqlite`) implement this trait;
//! everything above it depends on the abstraction, never on a concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::case::{Case, FoundCase, NewCase};

/// Abstraction over a case registry backend.
///
/// A backend owns two disjoint sets: active cases and found cases. A given
/// case identity is in at most one of the two at any time, and the only
/// transition between them is [`mark_found`](CaseStore::mark_found), which is
/// one-way.
///
/// Every method returns a `Send` future so the trait is usable from a
/// multi-threaded runtime (tokio under `axum` in this workspace).
pub trait CaseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The embedding dimension this store was opened with. Every persisted
  /// embedding has exactly this length for the life of the store.
  fn dimension(&self) -> usize;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new case and return it with its assigned `case_id` and
  /// `created_at`. The write is atomic; readers never observe a partial
  /// case. Rejects an embedding whose length differs from
  /// [`dimension`](CaseStore::dimension).
  fn create(
    &self,
    input: NewCase,
  ) -> impl Future<Output = Result<Case, Self::Error>> + Send + '_;

  /// Move a case out of the active set and into the found set.
  ///
  /// Both effects commit together: no reader sees the identity in both sets,
  /// or in neither. Fails if `case_id` does not reference an active case
  /// (unknown, or already found).
  fn mark_found(
    &self,
    case_id: Uuid,
  ) -> impl Future<Output = Result<FoundCase, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve an active case by id. Returns `None` if the id is not in the
  /// active set.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  /// All active cases, ordered by creation time ascending (ties broken by
  /// case id). Ranking relies on this order for deterministic tie-breaks.
  fn list_active(
    &self,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  /// One owner's active cases, in creation order.
  fn list_by_owner(
    &self,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  /// All found cases, most recently resolved first.
  fn list_found(
    &self,
  ) -> impl Future<Output = Result<Vec<FoundCase>, Self::Error>> + Send + '_;
}
