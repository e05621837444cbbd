//! CIF/STAR parser and typed extractors.
//!
//! Two-layer design:
//! - **Layer 1 (DOM)**: [`parse`] any CIF/STAR file into an untyped [`Document`] tree.
//! - **Layer 2 (Extractors)**: Pull typed data out via `TryFrom<&Block>`, e.g.
//!   [`Structure`](crate::structure::Structure) and
//!   [`SequenceIndex`](crate::sequence::SequenceIndex).
//!
//! ```ignore
//! let doc = pdb_tables::cif::read_file(path)?;
//! let block = pdb_tables::cif::sole_block(&doc)?;
//!
//! let structure = Structure::try_from(block)?;
//! let index = SequenceIndex::try_from(block)?;
//! ```

pub mod dom;
pub mod extract;
pub mod parse;

// DOM types
pub use dom::{Block, ColumnIter, Columns, Document, Loop, RowIter, Value};

// Parser
pub use parse::{parse, read_file, CifParseError};

// Typed extractors
pub use extract::{monomers, sole_block, ExtractionError};
