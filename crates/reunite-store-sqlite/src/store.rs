//! [`SqliteStore`] — the SQLite implementation of [`CaseStore`].

use std::path::Path;

use chrono::Utc;
use reunite_core::{
  case::{Case, FoundCase, NewCase},
  store::CaseStore,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  encode::{
    RawCase, RawFoundCase, encode_date, encode_dt, encode_embedding, encode_gender,
    encode_profile_links, encode_uuid,
  },
  error::{Error, Result},
  schema::SCHEMA,
};

const CASE_COLUMNS: &str = "case_id, owner_id, name, age, gender, contact_name, \
                            contact_phone, contact_relation, aadhaar, description, \
                            home_address, last_seen_address, last_seen_date, \
                            last_seen_lat, last_seen_lon, photo_path, profile_links, \
                            embedding, created_at";

fn case_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCase> {
  Ok(RawCase {
    case_id:           row.get(0)?,
    owner_id:          row.get(1)?,
    name:              row.get(2)?,
    age:               row.get(3)?,
    gender:            row.get(4)?,
    contact_name:      row.get(5)?,
    contact_phone:     row.get(6)?,
    contact_relation:  row.get(7)?,
    aadhaar:           row.get(8)?,
    description:       row.get(9)?,
    home_address:      row.get(10)?,
    last_seen_address: row.get(11)?,
    last_seen_date:    row.get(12)?,
    last_seen_lat:     row.get(13)?,
    last_seen_lon:     row.get(14)?,
    photo_path:        row.get(15)?,
    profile_links:     row.get(16)?,
    embedding:         row.get(17)?,
    created_at:        row.get(18)?,
  })
}

fn found_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawFoundCase> {
  Ok(RawFoundCase {
    case_id:           row.get(0)?,
    owner_id:          row.get(1)?,
    name:              row.get(2)?,
    age:               row.get(3)?,
    gender:            row.get(4)?,
    last_seen_address: row.get(5)?,
    photo_path:        row.get(6)?,
    found_at:          row.get(7)?,
  })
}

/// A SQLite-backed [`CaseStore`].
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
  dim:  usize,
}

impl SqliteStore {
  /// Opens (or creates) a store at `path`, pinned to `dimension`.
  pub async fn open(path: impl AsRef<Path>, dimension: usize) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn, dimension).await
  }

  /// Opens a fresh in-memory store. Used by tests.
  pub async fn open_in_memory(dimension: usize) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn, dimension).await
  }

  async fn init(conn: tokio_rusqlite::Connection, dimension: usize) -> Result<Self> {
    let store = Self { conn, dim: dimension };
    store.init_schema().await?;
    store.pin_dimension(dimension).await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Records the embedding dimension on first open and verifies it on every
  /// later one. A database written with one width never reopens with another.
  async fn pin_dimension(&self, dimension: usize) -> Result<()> {
    let pinned: Option<i64> = self
      .conn
      .call(move |conn| {
        let existing: Option<i64> = conn
          .query_row("SELECT embedding_dim FROM store_meta WHERE id = 1", [], |row| {
            row.get(0)
          })
          .optional()?;
        if existing.is_none() {
          conn.execute(
            "INSERT INTO store_meta (id, embedding_dim) VALUES (1, ?1)",
            rusqlite::params![dimension as i64],
          )?;
        }
        Ok(existing)
      })
      .await?;

    match pinned {
      Some(pinned) if pinned != dimension as i64 => Err(Error::DimensionMismatch {
        expected: pinned as usize,
        actual:   dimension,
      }),
      _ => Ok(()),
    }
  }
}

impl CaseStore for SqliteStore {
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
      created_at:        Utc::now(),
    };

    let case_id           = encode_uuid(case.case_id);
    let owner_id          = encode_uuid(case.owner_id);
    let name              = case.name.clone();
    let age               = i64::from(case.age);
    let gender            = encode_gender(case.gender);
    let contact_name      = case.contact.name.clone();
    let contact_phone     = case.contact.phone.clone();
    let contact_relation  = case.contact.relation.clone();
    let aadhaar           = case.aadhaar.clone();
    let description       = case.description.clone();
    let home_address      = case.home_address.clone();
    let last_seen_address = case.last_seen_address.clone();
    let last_seen_date    = encode_date(case.last_seen_date);
    let last_seen_lat     = case.last_seen_at.map(|p| p.lat);
    let last_seen_lon     = case.last_seen_at.map(|p| p.lon);
    let photo_path        = case.photo_path.clone();
    let profile_links     = encode_profile_links(&case.profile_links)?;
    let embedding         = encode_embedding(&case.embedding);
    let created_at        = encode_dt(case.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cases (
             case_id, owner_id, name, age, gender,
             contact_name, contact_phone, contact_relation, aadhaar, description,
             home_address, last_seen_address, last_seen_date, last_seen_lat,
             last_seen_lon, photo_path, profile_links, embedding, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                     ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
          rusqlite::params![
            case_id, owner_id, name, age, gender,
            contact_name, contact_phone, contact_relation, aadhaar, description,
            home_address, last_seen_address, last_seen_date, last_seen_lat,
            last_seen_lon, photo_path, profile_links, embedding, created_at
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(case)
  }

  async fn mark_found(&self, case_id: Uuid) -> Result<FoundCase> {
    let id = encode_uuid(case_id);
    let found_at = encode_dt(Utc::now());

    let raw: Option<RawFoundCase> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let row: Option<(String, String, i64, String, String, String)> = tx
          .query_row(
            "SELECT owner_id, name, age, gender, last_seen_address, photo_path
             FROM cases WHERE case_id = ?1",
            rusqlite::params![id],
            |row| {
              Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?))
            },
          )
          .optional()?;

        let Some((owner_id, name, age, gender, last_seen_address, photo_path)) = row else {
          return Ok(None);
        };

        tx.execute(
          "INSERT INTO found_cases (
             case_id, owner_id, name, age, gender, last_seen_address, photo_path, found_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id,
            owner_id,
            name,
            age,
            gender,
            last_seen_address,
            photo_path,
            found_at
          ],
        )?;
        tx.execute("DELETE FROM cases WHERE case_id = ?1", rusqlite::params![id])?;
        tx.commit()?;

        Ok(Some(RawFoundCase {
          case_id: id,
          owner_id,
          name,
          age,
          gender,
          last_seen_address,
          photo_path,
          found_at,
        }))
      })
      .await?;

    match raw {
      Some(raw) => raw.into_found(),
      None => Err(Error::CaseNotFound(case_id)),
    }
  }

  async fn get(&self, case_id: Uuid) -> Result<Option<Case>> {
    let id = encode_uuid(case_id);
    let raw = self
      .conn
      .call(move |conn| {
        let row = conn
          .query_row(
            &format!("SELECT {CASE_COLUMNS} FROM cases WHERE case_id = ?1"),
            rusqlite::params![id],
            case_row,
          )
          .optional()?;
        Ok(row)
      })
      .await?;
    raw.map(|raw| raw.into_case(self.dim)).transpose()
  }

  async fn list_active(&self) -> Result<Vec<Case>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CASE_COLUMNS} FROM cases ORDER BY created_at, case_id"
        ))?;
        let rows = stmt.query_map([], case_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    rows.into_iter().map(|raw| raw.into_case(self.dim)).collect()
  }

  async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Case>> {
    let owner = encode_uuid(owner_id);
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CASE_COLUMNS} FROM cases WHERE owner_id = ?1 ORDER BY created_at, case_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner], case_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    rows.into_iter().map(|raw| raw.into_case(self.dim)).collect()
  }

  async fn list_found(&self) -> Result<Vec<FoundCase>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT case_id, owner_id, name, age, gender, last_seen_address, photo_path, found_at
           FROM found_cases ORDER BY found_at DESC, case_id",
        )?;
        let rows = stmt.query_map([], found_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    rows.into_iter().map(RawFoundCase::into_found).collect()
  }
}
