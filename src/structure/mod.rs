//! Navigable view of one mmCIF entry.
//!
//! [`Structure`] is built from a parsed block (see `cif::extract`) and holds
//! what the table extractors need: entry metadata, entities, the first
//! model's chains and residues, and the depositor's helices and sheets.
//! Coordinates are not kept.

pub mod entity;
pub mod model;
pub mod secondary;

pub use entity::{Entity, EntityType, PolymerType};
pub use model::{AtomAddress, Chain, Model, ResidueSpan, Residue, ResolvedResidue, SeqId, GAP};
pub use secondary::{Helix, Sense, Sheet, Strand};

/// Entry-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryInfo {
    /// `_entry.id`, or the data block name when absent.
    pub entry_id: String,
    pub title: Option<String>,
    pub source_organism: Option<String>,
    /// Latest `_pdbx_audit_revision_history.revision_date` (ISO `YYYY-MM-DD`).
    pub revision_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub info: EntryInfo,
    pub entities: Vec<Entity>,
    /// First model of the file; later models are not read.
    pub model: Model,
    pub helices: Vec<Helix>,
    pub sheets: Vec<Sheet>,
}

impl Structure {
    pub fn entry_id(&self) -> &str {
        &self.info.entry_id
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }
}
