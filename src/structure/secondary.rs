//! Helices and sheets as annotated by the depositor.

use super::model::AtomAddress;

/// One `_struct_conf` helix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Helix {
    pub id: String,
    pub start: AtomAddress,
    pub end: AtomAddress,
    /// `pdbx_PDB_helix_length`, when given.
    pub length: Option<i32>,
}

/// Orientation of a strand relative to the one before it in its sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sense {
    /// First strand of a sheet, or no `_struct_sheet_order` row names it.
    #[default]
    None,
    Parallel,
    AntiParallel,
}

impl Sense {
    pub fn from_cif(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "parallel" => Sense::Parallel,
            "anti-parallel" | "antiparallel" => Sense::AntiParallel,
            _ => Sense::None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Sense::None => "",
            Sense::Parallel => "P",
            Sense::AntiParallel => "A",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strand {
    pub id: String,
    pub start: AtomAddress,
    pub end: AtomAddress,
    pub sense: Sense,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub id: String,
    pub strands: Vec<Strand>,
}

impl Sheet {
    /// `P`/`A` for each strand after the first, e.g. `"AAP"`.
    pub fn sense_sequence(&self) -> String {
        self.strands.iter().map(|s| s.sense.code()).collect()
    }
}
