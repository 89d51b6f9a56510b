//! Core types and trait definitions for the Reunite case registry.
//!
//! This crate stays free of HTTP and database dependencies: every other
//! crate in the workspace depends on it, never the reverse.

pub mod case;
pub mod embedding;
pub mod error;
pub mod finder;
pub mod geo;
pub mod photo;
pub mod profile;
pub mod search;
pub mod similarity;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
