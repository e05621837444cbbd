//! Row extractors, one per table.
//!
//! Helices and strands are addressed by author numbering in the file; both
//! endpoints are resolved through the first model before their sequences are
//! read from the [`SequenceIndex`](crate::sequence::SequenceIndex). An
//! endpoint past the modeled residues clamps to the nearest one; a span
//! naming an unknown chain is logged and left out. A span whose endpoints sit
//! in two chains is stored without a sequence.

use super::{Cell, Entry, Row};
use crate::secondary_structure::{derive_coils, ResolvedSpan};
use crate::sequence::LocateError;
use crate::structure::AtomAddress;

fn resolve(entry: &Entry, what: &str, start: &AtomAddress, end: &AtomAddress) -> Option<ResolvedSpan> {
    let span = ResolvedSpan::resolve(&entry.structure.model, start, end);
    if span.is_none() {
        log::warn!(
            "{}: cannot resolve {what} ({start} to {end}), leaving it out",
            entry.entry_id()
        );
    }
    span
}

pub fn main_rows(entry: &Entry) -> Result<Vec<Row>, LocateError> {
    let info = &entry.structure.info;
    let chains: Vec<&str> = entry
        .structure
        .model
        .chains
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    Ok(vec![vec![
        info.entry_id.as_str().into(),
        info.title.clone().into(),
        info.source_organism.clone().into(),
        chains.join(" ").into(),
        info.revision_date.clone().into(),
    ]])
}

pub fn entity_rows(entry: &Entry) -> Result<Vec<Row>, LocateError> {
    Ok(entry
        .structure
        .entities
        .iter()
        .map(|entity| {
            vec![
                entry.entry_id().into(),
                entity.id.as_str().into(),
                entity.description.as_str().into(),
                entity.entity_type.name().into(),
                entity.polymer_type.name().into(),
                entity.subchains.join(" ").into(),
            ]
        })
        .collect())
}

/// One row per author chain of the first model, ligand-only chains included.
pub fn chain_rows(entry: &Entry) -> Result<Vec<Row>, LocateError> {
    Ok(entry
        .structure
        .model
        .chains
        .iter()
        .map(|chain| {
            let polymer = chain.polymer();
            vec![
                entry.entry_id().into(),
                chain.name.as_str().into(),
                chain.subchains().join(" ").into(),
                polymer.one_letter_sequence().into(),
                entry.index.chain_sequence(&chain.name).into(),
                polymer.first_label_seq().into(),
                polymer.last_label_seq().into(),
                polymer.len().into(),
            ]
        })
        .collect())
}

/// Modeled subchains of peptide entities.
pub fn subchain_rows(entry: &Entry) -> Result<Vec<Row>, LocateError> {
    let model = &entry.structure.model;
    let mut rows = Vec::new();
    for entity in &entry.structure.entities {
        if !entity.polymer_type.is_peptide() {
            continue;
        }
        for subchain in &entity.subchains {
            let span = model.subchain(subchain);
            let (Some(start), Some(end)) = (span.first_label_seq(), span.last_label_seq()) else {
                continue;
            };
            let Some(parent) = model.parent_of(subchain) else {
                continue;
            };
            let unannotated = entry.index.subsequence(&parent.name, start, end)?;
            rows.push(vec![
                entry.entry_id().into(),
                entity.id.as_str().into(),
                subchain.as_str().into(),
                parent.name.as_str().into(),
                span.one_letter_sequence().into(),
                unannotated.text.into(),
                start.into(),
                end.into(),
                span.len().into(),
            ]);
        }
    }
    Ok(rows)
}

pub fn helix_rows(entry: &Entry) -> Result<Vec<Row>, LocateError> {
    let mut rows = Vec::new();
    for helix in &entry.structure.helices {
        let what = format!("helix {}", helix.id);
        let Some(span) = resolve(entry, &what, &helix.start, &helix.end) else {
            continue;
        };
        let (sequence, length): (Cell, Cell) = if span.is_cross_chain() {
            (Cell::Null, helix.length.into())
        } else {
            let sub = entry.index.subsequence(&span.start_chain, span.start, span.end)?;
            (sub.text.into(), helix.length.unwrap_or(sub.length).into())
        };
        rows.push(vec![
            entry.entry_id().into(),
            helix.id.as_str().into(),
            span.chain_label().into(),
            sequence,
            span.start.into(),
            span.end.into(),
            length,
        ]);
    }
    Ok(rows)
}

pub fn sheet_rows(entry: &Entry) -> Result<Vec<Row>, LocateError> {
    Ok(entry
        .structure
        .sheets
        .iter()
        .map(|sheet| {
            vec![
                entry.entry_id().into(),
                sheet.id.as_str().into(),
                sheet.strands.len().into(),
                sheet.sense_sequence().into(),
            ]
        })
        .collect())
}

/// Strand length is signed: negative when the strand runs against the
/// sequential numbering.
pub fn strand_rows(entry: &Entry) -> Result<Vec<Row>, LocateError> {
    let mut rows = Vec::new();
    for sheet in &entry.structure.sheets {
        for strand in &sheet.strands {
            let what = format!("sheet {} strand {}", sheet.id, strand.id);
            let Some(span) = resolve(entry, &what, &strand.start, &strand.end) else {
                continue;
            };
            let (sequence, length): (Cell, Cell) = if span.is_cross_chain() {
                (Cell::Null, Cell::Null)
            } else {
                let sub = entry.index.subsequence(&span.start_chain, span.start, span.end)?;
                (sub.text.into(), sub.length.into())
            };
            rows.push(vec![
                entry.entry_id().into(),
                sheet.id.as_str().into(),
                strand.id.as_str().into(),
                span.start_chain.as_str().into(),
                sequence,
                span.start.into(),
                span.end.into(),
                length,
            ]);
        }
    }
    Ok(rows)
}

pub fn coil_rows(entry: &Entry) -> Result<Vec<Row>, LocateError> {
    let structure = &entry.structure;
    let scan = derive_coils(
        structure.entry_id(),
        &structure.helices,
        &structure.sheets,
        &structure.model,
        &entry.index,
    );
    Ok(scan
        .coils
        .into_iter()
        .map(|coil| {
            vec![
                entry.entry_id().into(),
                coil.id.into(),
                coil.chain.into(),
                coil.unconfirmed.into(),
                coil.sequence.into(),
                coil.annotated_sequence.into(),
                coil.start.into(),
                coil.end.into(),
                coil.length.into(),
            ]
        })
        .collect())
}
