//! Crate-level error: everything that can make one file or command fail.

use crate::cif::{CifParseError, ExtractionError};
use crate::config::OptionsError;
use crate::db::DatabaseError;
use crate::rcsb::RcsbError;
use crate::sequence::LocateError;
use crate::tables::SchemaError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] CifParseError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Rcsb(#[from] RcsbError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
