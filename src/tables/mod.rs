//! Relational output: one [`Table`] per kind of row the database stores.
//!
//! - [`schema`]: column declarations, validated keys, SQL rendering
//! - [`extract`]: row extractors reading an [`Entry`]
//!
//! Every extractor reads the same per-file [`Entry`]: the navigable
//! [`Structure`] and its [`SequenceIndex`]. Tables are listed by
//! [`table_schemas`] in insertion order; deletion runs the other way.

pub mod extract;
pub mod schema;

use std::fmt;
use std::path::Path;

use crate::cif::{self, Block};
use crate::error::Error;
use crate::sequence::{LocateError, SequenceIndex};
use crate::structure::Structure;

pub use schema::{Attributes, Column, ForeignKey, SchemaError};

/// One value of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Null,
    Int(i64),
    Text(String),
}

pub type Row = Vec<Cell>;

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("NULL"),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Int(v.into())
    }
}

impl From<u32> for Cell {
    fn from(v: u32) -> Self {
        Cell::Int(v.into())
    }
}

impl From<usize> for Cell {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or(Cell::Null, Cell::Int)
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Int(v.into())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map_or(Cell::Null, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// Everything the extractors need from one file.
#[derive(Debug, Clone)]
pub struct Entry {
    pub structure: Structure,
    pub index: SequenceIndex,
}

impl Entry {
    pub fn from_block(block: &Block) -> Result<Self, cif::ExtractionError> {
        Ok(Self {
            structure: Structure::try_from(block)?,
            index: SequenceIndex::try_from(block)?,
        })
    }

    /// Read, parse and build the entry of an mmCIF file.
    pub fn read(path: &Path) -> Result<Self, Error> {
        let doc = cif::read_file(path)?;
        let block = cif::sole_block(&doc)?;
        let entry = Self::from_block(block)?;
        log::debug!(
            "{}: entry {} with {} sequence records",
            path.display(),
            entry.entry_id(),
            entry.index.len()
        );
        Ok(entry)
    }

    pub fn entry_id(&self) -> &str {
        self.structure.entry_id()
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Builds the rows of one table for one entry.
pub type Extractor = fn(&Entry) -> Result<Vec<Row>, LocateError>;

/// A named table: its columns and the extractor filling it.
#[derive(Clone)]
pub struct Table {
    pub name: &'static str,
    pub attributes: Attributes,
    extractor: Extractor,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

impl Table {
    pub fn new(name: &'static str, attributes: Attributes, extractor: Extractor) -> Self {
        Self {
            name,
            attributes,
            extractor,
        }
    }

    pub fn create_statement(&self) -> String {
        format!("CREATE TABLE IF NOT EXISTS {} {}", self.name, self.attributes)
    }

    pub fn insert_statement(&self) -> String {
        let args = vec!["?"; self.attributes.len()].join(", ");
        format!("INSERT INTO {} VALUES({})", self.name, args)
    }

    /// All rows of one entry, in insertion order.
    pub fn select_statement(&self) -> String {
        let columns: Vec<&str> = self.attributes.names().collect();
        format!(
            "SELECT {} FROM {} WHERE entry_id = ?1 ORDER BY rowid",
            columns.join(", "),
            self.name
        )
    }

    pub fn delete_statement(&self) -> String {
        format!("DELETE FROM {} WHERE entry_id = ?1", self.name)
    }

    pub fn extract(&self, entry: &Entry) -> Result<Vec<Row>, LocateError> {
        let rows = (self.extractor)(entry)?;
        debug_assert!(rows.iter().all(|r| r.len() == self.attributes.len()));
        log::debug!("{}: {} rows for {}", entry.entry_id(), rows.len(), self.name);
        Ok(rows)
    }
}

const ENTRY_ID: (&str, &str) = ("entry_id", "VARCHAR(5) NOT NULL");
const CHAIN_ID: (&str, &str) = ("chain_id", "VARCHAR(5) NOT NULL");
const SHEET_ID: (&str, &str) = ("sheet_id", "VARCHAR(5) NOT NULL");
const START_POSITION: (&str, &str) = ("start_position", "INT");
const END_POSITION: (&str, &str) = ("end_position", "INT");
const LENGTH: (&str, &str) = ("length", "INT");
const MAIN_FK: (&str, &str, &str) = ("entry_id", "main", "entry_id");

/// Every table, in insertion order.
pub fn table_schemas() -> Result<Vec<Table>, SchemaError> {
    Ok(vec![
        Table::new(
            "main",
            Attributes::new(
                "main",
                &[
                    ENTRY_ID,
                    ("structure_title", "VARCHAR"),
                    ("source_organism", "VARCHAR(200)"),
                    ("chains", "VARCHAR"),
                    ("revision_date", "VARCHAR(10)"),
                ],
                &["entry_id"],
                &[],
            )?,
            extract::main_rows,
        ),
        Table::new(
            "entities",
            Attributes::new(
                "entities",
                &[
                    ENTRY_ID,
                    ("entity_id", "VARCHAR(5) NOT NULL"),
                    ("entity_name", "VARCHAR(200)"),
                    ("entity_type", "VARCHAR(25)"),
                    ("polymer_type", "VARCHAR(25)"),
                    ("subchains", "VARCHAR"),
                ],
                &["entry_id", "entity_id"],
                &[MAIN_FK],
            )?,
            extract::entity_rows,
        ),
        Table::new(
            "chains",
            Attributes::new(
                "chains",
                &[
                    ENTRY_ID,
                    CHAIN_ID,
                    ("subchains", "VARCHAR"),
                    ("annotated_chain_sequence", "VARCHAR"),
                    ("unannotated_chain_sequence", "VARCHAR"),
                    START_POSITION,
                    END_POSITION,
                    LENGTH,
                ],
                &["entry_id", "chain_id"],
                &[MAIN_FK],
            )?,
            extract::chain_rows,
        ),
        Table::new(
            "subchains",
            Attributes::new(
                "subchains",
                &[
                    ENTRY_ID,
                    ("entity_id", "VARCHAR(5) NOT NULL"),
                    ("subchain_id", "VARCHAR(5) NOT NULL"),
                    CHAIN_ID,
                    ("annotated_subchain_sequence", "VARCHAR"),
                    ("unannotated_subchain_sequence", "VARCHAR"),
                    START_POSITION,
                    END_POSITION,
                    LENGTH,
                ],
                &["entry_id", "subchain_id"],
                &[MAIN_FK],
            )?,
            extract::subchain_rows,
        ),
        Table::new(
            "helices",
            Attributes::new(
                "helices",
                &[
                    ENTRY_ID,
                    ("helix_id", "VARCHAR(10) NOT NULL"),
                    ("chain_id", "VARCHAR(11) NOT NULL"),
                    ("helix_sequence", "VARCHAR"),
                    START_POSITION,
                    END_POSITION,
                    LENGTH,
                ],
                &["entry_id", "helix_id"],
                &[MAIN_FK],
            )?,
            extract::helix_rows,
        ),
        Table::new(
            "sheets",
            Attributes::new(
                "sheets",
                &[
                    ENTRY_ID,
                    SHEET_ID,
                    ("number_strands", "INT"),
                    ("sense_sequence", "VARCHAR"),
                ],
                &["entry_id", "sheet_id"],
                &[MAIN_FK],
            )?,
            extract::sheet_rows,
        ),
        Table::new(
            "strands",
            Attributes::new(
                "strands",
                &[
                    ENTRY_ID,
                    SHEET_ID,
                    ("strand_id", "VARCHAR(5) NOT NULL"),
                    CHAIN_ID,
                    ("strand_sequence", "VARCHAR"),
                    START_POSITION,
                    END_POSITION,
                    LENGTH,
                ],
                &["entry_id", "sheet_id", "strand_id"],
                &[MAIN_FK],
            )?,
            extract::strand_rows,
        ),
        Table::new(
            "coils",
            Attributes::new(
                "coils",
                &[
                    ENTRY_ID,
                    ("coil_id", "INT NOT NULL"),
                    CHAIN_ID,
                    ("unconfirmed", "INT"),
                    ("sequence", "VARCHAR"),
                    ("annotated_sequence", "VARCHAR"),
                    START_POSITION,
                    END_POSITION,
                    LENGTH,
                ],
                &["entry_id", "coil_id"],
                &[MAIN_FK],
            )?,
            extract::coil_rows,
        ),
    ])
}
