//! Polymer sequence index and secondary-structure coverage tables for mmCIF
//! entries, stored in SQLite.
//!
//! - [`cif`]: CIF/STAR reader and typed extraction
//! - [`sequence`]: canonical chain sequences and position lookup
//! - [`structure`]: entities, first model, helices and sheets
//! - [`secondary_structure`]: coil derivation from helix and strand coverage
//! - [`tables`] and [`db`]: relational rows and their storage
//! - [`rcsb`]: entry id listing and mmCIF download

pub mod cif;
pub mod config;
pub mod db;
pub mod error;
pub mod rcsb;
pub mod secondary_structure;
pub mod sequence;
pub mod structure;
pub mod tables;

#[cfg(test)]
mod fixtures;

pub use error::{Error, Result};
