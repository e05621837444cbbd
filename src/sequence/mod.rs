//! Canonical polymer sequences and position lookup.
//!
//! - [`codes`]: residue name to one-letter translation
//! - [`index`]: the per-entry [`SequenceIndex`] built from
//!   `_pdbx_poly_seq_scheme`, with subsequence extraction
//! - [`locate`]: interpolation-assisted search shared by the index and by
//!   modeled residue spans

pub mod codes;
pub mod index;
pub mod locate;

pub use codes::{one_letter_code, translate, UNKNOWN_RESIDUE};
pub use index::{ChainBounds, Monomer, Orientation, SequenceIndex, Subsequence};
pub use locate::{locate_by, locate_clamped, locate_range, search_by, LocateError};
