//! Error type for `reunite-lookup`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http client error: {0}")]
  Http(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
