//! Typed extractors for mmCIF data blocks.
//!
//! Each extractor pulls typed data out of the untyped DOM, via `TryFrom<&Block>`
//! for the top-level objects:
//! - [`SequenceIndex`] from `_pdbx_poly_seq_scheme`
//! - [`Structure`] from `_atom_site`, `_entity*`, `_struct_asym`,
//!   `_struct_conf`, and `_struct_sheet*`
//! - [`EntryInfo`] from `_entry`, `_struct`, the source categories, and the
//!   revision history (never fails)
//!
//! Optional categories that are absent yield empty collections. A category
//! that is present but lacks a required tag, or holds a value of the wrong
//! type, is an error.

use std::collections::{HashMap, HashSet};

use super::dom::{Block, Columns, Document, Value};
use crate::sequence::{Monomer, SequenceIndex};
use crate::structure::{
    AtomAddress, Chain, Entity, EntityType, EntryInfo, Helix, Model, PolymerType, Residue,
    SeqId, Sense, Sheet, Strand, Structure,
};

/// Errors from typed extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("missing category: {0}")]
    MissingCategory(String),
    #[error("missing required tag: {0}")]
    MissingTag(String),
    #[error("parse error in {tag} row {row}: {detail}")]
    ParseError {
        tag: String,
        row: usize,
        detail: String,
    },
    #[error("expected a single data block, found {0}")]
    BlockCount(usize),
}

/// The single data block of an entry file.
pub fn sole_block(doc: &Document) -> Result<&Block, ExtractionError> {
    doc.sole_block()
        .ok_or(ExtractionError::BlockCount(doc.blocks.len()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_columns<'a>(block: &'a Block, tags: &[&str]) -> Result<Columns<'a>, ExtractionError> {
    block.columns(tags).ok_or_else(|| {
        let missing = tags
            .iter()
            .find(|tag| block.column(tag).is_none())
            .unwrap_or(&tags[0]);
        ExtractionError::MissingTag((*missing).to_string())
    })
}

fn optional_column<'a>(block: &'a Block, tag: &str) -> Option<Vec<&'a Value>> {
    block.column(tag).map(|c| c.collect())
}

fn cell<'a>(column: &Option<Vec<&'a Value>>, row: usize) -> Option<&'a Value> {
    column.as_ref().and_then(|v| v.get(row)).copied()
}

fn require_str<'a>(v: &'a Value, tag: &str, row: usize) -> Result<&'a str, ExtractionError> {
    v.as_str().ok_or_else(|| ExtractionError::ParseError {
        tag: tag.into(),
        row,
        detail: format!("expected a value, got {:?}", v),
    })
}

fn require_i32(v: &Value, tag: &str, row: usize) -> Result<i32, ExtractionError> {
    v.as_i32().ok_or_else(|| ExtractionError::ParseError {
        tag: tag.into(),
        row,
        detail: format!("expected integer, got {:?}", v),
    })
}

/// Insertion codes are written as `?` or `.` when absent.
fn insertion_code(v: &Value) -> Option<char> {
    v.as_str().and_then(|s| s.chars().next())
}

fn is_yes(v: &Value) -> bool {
    matches!(v.as_str(), Some(s) if s.eq_ignore_ascii_case("y") || s.eq_ignore_ascii_case("yes"))
}

// ---------------------------------------------------------------------------
// Sequence records
// ---------------------------------------------------------------------------

const POLY_SEQ_TAGS: [&str; 6] = [
    "_pdbx_poly_seq_scheme.pdb_strand_id",
    "_pdbx_poly_seq_scheme.entity_id",
    "_pdbx_poly_seq_scheme.seq_id",
    "_pdbx_poly_seq_scheme.mon_id",
    "_pdbx_poly_seq_scheme.pdb_mon_id",
    "_pdbx_poly_seq_scheme.hetero",
];

/// Raw `_pdbx_poly_seq_scheme` records in file order.
pub fn monomers(block: &Block) -> Result<Vec<Monomer>, ExtractionError> {
    if !block.has_category("_pdbx_poly_seq_scheme") {
        log::debug!("{}: no _pdbx_poly_seq_scheme, empty sequence index", block.name);
        return Ok(Vec::new());
    }
    let cols = require_columns(block, &POLY_SEQ_TAGS)?;
    let mut records = Vec::with_capacity(cols.nrows());
    for (i, row) in cols.iter().enumerate() {
        records.push(Monomer {
            chain: require_str(row[0], POLY_SEQ_TAGS[0], i)?.to_string(),
            entity_id: require_i32(row[1], POLY_SEQ_TAGS[1], i)?,
            seq_id: require_i32(row[2], POLY_SEQ_TAGS[2], i)?,
            name: require_str(row[3], POLY_SEQ_TAGS[3], i)?.to_string(),
            observed: row[4].as_str().map(str::to_string),
            hetero: is_yes(row[5]),
        });
    }
    Ok(records)
}

impl TryFrom<&Block> for SequenceIndex {
    type Error = ExtractionError;

    fn try_from(block: &Block) -> Result<Self, Self::Error> {
        Ok(SequenceIndex::build(monomers(block)?))
    }
}

// ---------------------------------------------------------------------------
// Entry metadata
// ---------------------------------------------------------------------------

const ORGANISM_TAGS: [&str; 3] = [
    "_entity_src_gen.pdbx_gene_src_scientific_name",
    "_entity_src_nat.pdbx_organism_scientific",
    "_pdbx_entity_src_syn.organism_scientific",
];

const REVISION_TAGS: [&str; 2] = [
    "_pdbx_audit_revision_history.revision_date",
    "_database_PDB_rev.date",
];

impl From<&Block> for EntryInfo {
    fn from(block: &Block) -> Self {
        let entry_id = block
            .first("_entry.id")
            .and_then(Value::as_str)
            .unwrap_or(block.name.as_str())
            .to_string();
        let title = block
            .first("_struct.title")
            .and_then(Value::as_str)
            .map(str::to_string);
        let source_organism = ORGANISM_TAGS.iter().find_map(|tag| {
            block
                .column(tag)?
                .find_map(Value::as_str)
                .map(str::to_string)
        });
        // ISO dates order lexically
        let revision_date = REVISION_TAGS.iter().find_map(|tag| {
            block
                .column(tag)?
                .filter_map(Value::as_str)
                .max()
                .map(str::to_string)
        });
        EntryInfo {
            entry_id,
            title,
            source_organism,
            revision_date,
        }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

fn entities(block: &Block) -> Result<Vec<Entity>, ExtractionError> {
    if !block.has_category("_entity") {
        return Ok(Vec::new());
    }
    let ids = require_columns(block, &["_entity.id"])?;
    let types = optional_column(block, "_entity.type");
    let descriptions = optional_column(block, "_entity.pdbx_description");

    let mut polymer_types: HashMap<&str, PolymerType> = HashMap::new();
    if let Some(cols) = block.columns(&["_entity_poly.entity_id", "_entity_poly.type"]) {
        for row in cols.iter() {
            if let (Some(id), Some(kind)) = (row[0].as_str(), row[1].as_str()) {
                polymer_types.insert(id, PolymerType::from_cif(kind));
            }
        }
    }

    // `_struct_asym` lists every subchain; older files only reveal them
    // through the atoms.
    let subchain_rows = block
        .columns(&["_struct_asym.id", "_struct_asym.entity_id"])
        .or_else(|| block.columns(&["_atom_site.label_asym_id", "_atom_site.label_entity_id"]));
    let mut subchains: HashMap<&str, Vec<String>> = HashMap::new();
    if let Some(cols) = subchain_rows {
        for row in cols.iter() {
            if let (Some(subchain), Some(entity)) = (row[0].as_str(), row[1].as_str()) {
                let list = subchains.entry(entity).or_default();
                if !list.iter().any(|s| s == subchain) {
                    list.push(subchain.to_string());
                }
            }
        }
    }

    let mut entities = Vec::with_capacity(ids.nrows());
    for (i, row) in ids.iter().enumerate() {
        let id = require_str(row[0], "_entity.id", i)?;
        entities.push(Entity {
            id: id.to_string(),
            description: cell(&descriptions, i)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            entity_type: cell(&types, i)
                .and_then(Value::as_str)
                .map_or(EntityType::Unknown, EntityType::from_cif),
            polymer_type: polymer_types
                .get(id)
                .copied()
                .unwrap_or(PolymerType::Unknown),
            subchains: subchains.remove(id).unwrap_or_default(),
        });
    }
    Ok(entities)
}

// ---------------------------------------------------------------------------
// Atoms
// ---------------------------------------------------------------------------

const ATOM_TAGS: [&str; 3] = [
    "_atom_site.label_comp_id",
    "_atom_site.label_asym_id",
    "_atom_site.auth_seq_id",
];

/// Residues of the first model, grouped into author chains.
///
/// Consecutive atom rows with the same residue identity collapse into one
/// residue, so alternate locations of one residue do not multiply it. Parts
/// of one author chain that are split across the file (polymer first,
/// waters at the end) are merged into a single [`Chain`].
fn first_model(block: &Block, entities: &[Entity]) -> Result<Model, ExtractionError> {
    let cols = require_columns(block, &ATOM_TAGS)?;
    let auth_chains = optional_column(block, "_atom_site.auth_asym_id");
    let label_seqs = optional_column(block, "_atom_site.label_seq_id");
    let entity_ids = optional_column(block, "_atom_site.label_entity_id");
    let icodes = optional_column(block, "_atom_site.pdbx_PDB_ins_code");
    let model_nums = optional_column(block, "_atom_site.pdbx_PDB_model_num");

    let polymer_entities: HashSet<&str> = entities
        .iter()
        .filter(|e| e.entity_type == EntityType::Polymer)
        .map(|e| e.id.as_str())
        .collect();

    let mut model = Model::default();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for (i, row) in cols.iter().enumerate() {
        let number = cell(&model_nums, i).and_then(Value::as_i32).unwrap_or(1);
        if i == 0 {
            model.number = number;
        } else if number != model.number {
            continue;
        }

        let name = require_str(row[0], ATOM_TAGS[0], i)?;
        let subchain = require_str(row[1], ATOM_TAGS[1], i)?;
        let seq_id = SeqId::new(
            require_i32(row[2], ATOM_TAGS[2], i)?,
            cell(&icodes, i).and_then(insertion_code),
        );
        let chain_name = cell(&auth_chains, i)
            .and_then(Value::as_str)
            .unwrap_or(subchain);
        let label_seq = cell(&label_seqs, i).and_then(Value::as_i32);
        let entity_id = cell(&entity_ids, i).and_then(Value::as_str);

        let slot = *slots.entry(chain_name.to_string()).or_insert_with(|| {
            model.chains.push(Chain::new(chain_name));
            model.chains.len() - 1
        });
        let chain = &mut model.chains[slot];
        let same_residue = chain.residues.last().is_some_and(|r| {
            r.seq_id == seq_id && r.name == name && r.subchain == subchain && r.label_seq == label_seq
        });
        if same_residue {
            continue;
        }
        let polymer = match entity_id {
            Some(id) if !polymer_entities.is_empty() => polymer_entities.contains(id),
            _ => label_seq.is_some(),
        };
        chain.residues.push(Residue {
            name: name.to_string(),
            subchain: subchain.to_string(),
            entity_id: entity_id.map(str::to_string),
            label_seq,
            seq_id,
            polymer,
        });
    }
    Ok(model)
}

// ---------------------------------------------------------------------------
// Secondary structure
// ---------------------------------------------------------------------------

/// Tags naming one endpoint of a helix or strand.
struct EndpointTags {
    asym: &'static str,
    seq: &'static str,
    icode: &'static str,
    comp: &'static str,
}

const HELIX_BEG: EndpointTags = EndpointTags {
    asym: "_struct_conf.beg_auth_asym_id",
    seq: "_struct_conf.beg_auth_seq_id",
    icode: "_struct_conf.pdbx_beg_PDB_ins_code",
    comp: "_struct_conf.beg_auth_comp_id",
};

const HELIX_END: EndpointTags = EndpointTags {
    asym: "_struct_conf.end_auth_asym_id",
    seq: "_struct_conf.end_auth_seq_id",
    icode: "_struct_conf.pdbx_end_PDB_ins_code",
    comp: "_struct_conf.end_auth_comp_id",
};

const STRAND_BEG: EndpointTags = EndpointTags {
    asym: "_struct_sheet_range.beg_auth_asym_id",
    seq: "_struct_sheet_range.beg_auth_seq_id",
    icode: "_struct_sheet_range.pdbx_beg_PDB_ins_code",
    comp: "_struct_sheet_range.beg_auth_comp_id",
};

const STRAND_END: EndpointTags = EndpointTags {
    asym: "_struct_sheet_range.end_auth_asym_id",
    seq: "_struct_sheet_range.end_auth_seq_id",
    icode: "_struct_sheet_range.pdbx_end_PDB_ins_code",
    comp: "_struct_sheet_range.end_auth_comp_id",
};

/// Column reader for one endpoint.
struct Endpoints<'a> {
    tags: &'static EndpointTags,
    cols: Columns<'a>,
    icodes: Option<Vec<&'a Value>>,
    comps: Option<Vec<&'a Value>>,
}

impl<'a> Endpoints<'a> {
    fn new(block: &'a Block, tags: &'static EndpointTags) -> Result<Self, ExtractionError> {
        Ok(Self {
            tags,
            cols: require_columns(block, &[tags.asym, tags.seq])?,
            icodes: optional_column(block, tags.icode),
            comps: optional_column(block, tags.comp),
        })
    }

    fn address(&self, row: usize) -> Result<AtomAddress, ExtractionError> {
        Ok(AtomAddress {
            chain: require_str(self.cols.get(row, 0), self.tags.asym, row)?.to_string(),
            seq_id: SeqId::new(
                require_i32(self.cols.get(row, 1), self.tags.seq, row)?,
                cell(&self.icodes, row).and_then(insertion_code),
            ),
            residue_name: cell(&self.comps, row)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
        })
    }
}

/// Helices from `_struct_conf`; turns and other conformation types are skipped.
fn helices(block: &Block) -> Result<Vec<Helix>, ExtractionError> {
    if !block.has_category("_struct_conf") {
        return Ok(Vec::new());
    }
    let cols = require_columns(block, &["_struct_conf.conf_type_id", "_struct_conf.id"])?;
    let beg = Endpoints::new(block, &HELIX_BEG)?;
    let end = Endpoints::new(block, &HELIX_END)?;
    let lengths = optional_column(block, "_struct_conf.pdbx_PDB_helix_length");

    let mut helices = Vec::new();
    for (i, row) in cols.iter().enumerate() {
        let is_helix = row[0]
            .as_str()
            .is_some_and(|kind| kind.to_ascii_uppercase().starts_with("HELX"));
        if !is_helix {
            continue;
        }
        helices.push(Helix {
            id: require_str(row[1], "_struct_conf.id", i)?.to_string(),
            start: beg.address(i)?,
            end: end.address(i)?,
            length: cell(&lengths, i).and_then(Value::as_i32),
        });
    }
    Ok(helices)
}

/// Sheets from `_struct_sheet_range`, with strand senses from
/// `_struct_sheet_order`.
fn sheets(block: &Block) -> Result<Vec<Sheet>, ExtractionError> {
    if !block.has_category("_struct_sheet_range") {
        return Ok(Vec::new());
    }
    let cols = require_columns(block, &["_struct_sheet_range.sheet_id", "_struct_sheet_range.id"])?;
    let beg = Endpoints::new(block, &STRAND_BEG)?;
    let end = Endpoints::new(block, &STRAND_END)?;

    let mut sheets: Vec<Sheet> = Vec::new();
    for (i, row) in cols.iter().enumerate() {
        let sheet_id = require_str(row[0], "_struct_sheet_range.sheet_id", i)?;
        let strand = Strand {
            id: require_str(row[1], "_struct_sheet_range.id", i)?.to_string(),
            start: beg.address(i)?,
            end: end.address(i)?,
            sense: Sense::None,
        };
        match sheets.iter_mut().find(|s| s.id == sheet_id) {
            Some(sheet) => sheet.strands.push(strand),
            None => sheets.push(Sheet {
                id: sheet_id.to_string(),
                strands: vec![strand],
            }),
        }
    }

    if let Some(order) = block.columns(&[
        "_struct_sheet_order.sheet_id",
        "_struct_sheet_order.range_id_2",
        "_struct_sheet_order.sense",
    ]) {
        for row in order.iter() {
            let (Some(sheet_id), Some(range_id), Some(sense)) =
                (row[0].as_str(), row[1].as_str(), row[2].as_str())
            else {
                continue;
            };
            let strand = sheets
                .iter_mut()
                .filter(|s| s.id == sheet_id)
                .flat_map(|s| s.strands.iter_mut())
                .find(|s| s.id == range_id);
            if let Some(strand) = strand {
                strand.sense = Sense::from_cif(sense);
            }
        }
    }
    Ok(sheets)
}

impl TryFrom<&Block> for Structure {
    type Error = ExtractionError;

    fn try_from(block: &Block) -> Result<Self, Self::Error> {
        if !block.has_category("_atom_site") {
            return Err(ExtractionError::MissingCategory("_atom_site".into()));
        }
        let entities = entities(block)?;
        let model = first_model(block, &entities)?;
        Ok(Structure {
            info: EntryInfo::from(block),
            entities,
            model,
            helices: helices(block)?,
            sheets: sheets(block)?,
        })
    }
}
