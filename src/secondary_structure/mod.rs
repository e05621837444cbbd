//! Secondary structure coverage.
//!
//! Depositor-assigned helices and strands are author-addressed; they are
//! resolved to sequential ids through the model ([`span`]) and their
//! complement in each chain becomes a list of coils ([`coil`]).

pub mod coil;
pub mod span;

pub use coil::{derive_coils, Coil, CoilScan, IllDefinedSpan};
pub use span::{ResolvedSpan, SpanSource};
