//! SQLite persistence for the Reunite case registry.
//!
//! Every operation funnels through a single background connection thread
//! (via [`tokio_rusqlite`]), so writes are naturally serialised and the
//! found transition runs as one transaction.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
