//! SQLite storage of extracted tables.
//!
//! Each entry is written in one transaction: either every table gets its
//! rows or none does. Re-ingesting a file replaces the stored rows only when
//! the file carries a newer revision, or when an earlier run left the entry
//! without coils.

use std::fmt;
use std::path::Path;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Value, ValueRef};
use rusqlite::{params_from_iter, Connection, OptionalExtension, ToSql, Transaction};

use crate::error::Error;
use crate::sequence::LocateError;
use crate::tables::{table_schemas, Cell, Entry, Row, Table};

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("cannot build rows of {table}: {source}")]
    Rows {
        table: &'static str,
        #[source]
        source: LocateError,
    },
}

/// What [`Database::check_file`] did with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// New entry, inserted.
    Added,
    /// The file has a newer revision than the stored rows; replaced.
    Updated,
    /// Stored without coils; replaced.
    Repaired,
    Unchanged,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileStatus::Added => "added",
            FileStatus::Updated => "updated",
            FileStatus::Repaired => "repaired",
            FileStatus::Unchanged => "unchanged",
        })
    }
}

impl ToSql for Cell {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Cell::Null => ToSqlOutput::Owned(Value::Null),
            Cell::Int(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            Cell::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

impl FromSql for Cell {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Cell::Null),
            ValueRef::Integer(v) => Ok(Cell::Int(v)),
            ValueRef::Text(_) => value.as_str().map(|s| Cell::Text(s.to_string())),
            ValueRef::Real(_) | ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
        }
    }
}

pub struct Database {
    connection: Connection,
    tables: Vec<Table>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let connection = Connection::open(path).map_err(DatabaseError::from)?;
        log::debug!("opened database {}", path.display());
        Self::with_connection(connection)
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        let connection = Connection::open_in_memory().map_err(DatabaseError::from)?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self, Error> {
        Ok(Self {
            connection,
            tables: table_schemas()?,
        })
    }

    /// Create every table that does not exist yet.
    pub fn init(&self) -> Result<(), DatabaseError> {
        for table in &self.tables {
            self.connection.execute(&table.create_statement(), [])?;
        }
        Ok(())
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    fn table(&self, name: &str) -> Result<&Table, DatabaseError> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| DatabaseError::UnknownTable(name.to_string()))
    }

    /// Whether `table` holds at least one row of the entry.
    pub fn contains(&self, table: &str, entry_id: &str) -> Result<bool, DatabaseError> {
        let table = self.table(table)?;
        let sql = format!("SELECT 1 FROM {} WHERE entry_id = ?1 LIMIT 1", table.name);
        let found = self
            .connection
            .query_row(&sql, [entry_id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    /// Stored rows of one entry, in insertion order.
    pub fn retrieve(&self, table: &str, entry_id: &str) -> Result<Vec<Row>, DatabaseError> {
        let table = self.table(table)?;
        let ncols = table.attributes.len();
        let mut statement = self.connection.prepare(&table.select_statement())?;
        let rows = statement.query_map([entry_id], |row| {
            (0..ncols)
                .map(|i| row.get::<_, Cell>(i))
                .collect::<rusqlite::Result<Row>>()
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<Row>>>()?)
    }

    fn stored_revision(&self, entry_id: &str) -> Result<Option<String>, DatabaseError> {
        let date = self
            .connection
            .query_row(
                "SELECT revision_date FROM main WHERE entry_id = ?1",
                [entry_id],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?;
        Ok(date.flatten())
    }

    fn build_rows<'a>(tables: &'a [Table], entry: &Entry) -> Result<Vec<(&'a Table, Vec<Row>)>, DatabaseError> {
        tables
            .iter()
            .map(|table| {
                table
                    .extract(entry)
                    .map(|rows| (table, rows))
                    .map_err(|source| DatabaseError::Rows {
                        table: table.name,
                        source,
                    })
            })
            .collect()
    }

    /// Insert every row of a new entry.
    pub fn insert_entry(&mut self, entry: &Entry) -> Result<(), DatabaseError> {
        let rows = Self::build_rows(&self.tables, entry)?;
        let transaction = self.connection.transaction()?;
        write_rows(&transaction, &rows)?;
        transaction.commit()?;
        Ok(())
    }

    /// Replace every stored row of an entry.
    pub fn update_entry(&mut self, entry: &Entry) -> Result<(), DatabaseError> {
        let rows = Self::build_rows(&self.tables, entry)?;
        let transaction = self.connection.transaction()?;
        for table in self.tables.iter().rev() {
            transaction.execute(&table.delete_statement(), [entry.entry_id()])?;
        }
        write_rows(&transaction, &rows)?;
        transaction.commit()?;
        Ok(())
    }

    /// Read an mmCIF file and bring its entry up to date.
    pub fn check_file(&mut self, path: &Path) -> Result<FileStatus, Error> {
        let entry = Entry::read(path)?;
        let entry_id = entry.entry_id();
        let status = if !self.contains("main", entry_id)? {
            self.insert_entry(&entry)?;
            FileStatus::Added
        } else if self.stored_revision(entry_id)?.as_deref() < entry.structure.info.revision_date.as_deref() {
            self.update_entry(&entry)?;
            FileStatus::Updated
        } else if !self.contains("coils", entry_id)? {
            self.update_entry(&entry)?;
            FileStatus::Repaired
        } else {
            FileStatus::Unchanged
        };
        log::info!("{}: {entry_id} {status}", path.display());
        Ok(status)
    }
}

fn write_rows(transaction: &Transaction<'_>, rows: &[(&Table, Vec<Row>)]) -> rusqlite::Result<()> {
    for (table, table_rows) in rows {
        let mut insert = transaction.prepare(&table.insert_statement())?;
        for row in table_rows {
            insert.execute(params_from_iter(row.iter()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ENTRY_1TST;
    use std::path::PathBuf;

    fn write_entry(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn database() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.init().unwrap();
        db
    }

    #[test]
    fn init_is_idempotent() {
        let db = database();
        db.init().unwrap();
        assert_eq!(db.tables().len(), 8);
        assert!(!db.contains("main", "1TST").unwrap());
    }

    #[test]
    fn check_file_adds_then_leaves_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entry(&dir, "1tst.cif", ENTRY_1TST);
        let mut db = database();
        assert_eq!(db.check_file(&path).unwrap(), FileStatus::Added);
        assert_eq!(db.check_file(&path).unwrap(), FileStatus::Unchanged);
        assert_eq!(db.retrieve("main", "1TST").unwrap().len(), 1);
        assert_eq!(db.retrieve("coils", "1TST").unwrap().len(), 3);
    }

    #[test]
    fn stored_rows_read_back() {
        let doc = crate::cif::parse(ENTRY_1TST).unwrap();
        let entry = Entry::from_block(&doc.blocks[0]).unwrap();
        let mut db = database();
        db.insert_entry(&entry).unwrap();
        for table in table_schemas().unwrap() {
            assert_eq!(
                db.retrieve(table.name, "1TST").unwrap(),
                table.extract(&entry).unwrap(),
                "{}",
                table.name
            );
        }
    }

    #[test]
    fn newer_revision_replaces_rows() {
        let dir = tempfile::tempdir().unwrap();
        let old = write_entry(&dir, "old.cif", ENTRY_1TST);
        let new = write_entry(&dir, "new.cif", &ENTRY_1TST.replace("2009-02-24", "2012-05-01"));
        let mut db = database();
        assert_eq!(db.check_file(&new).unwrap(), FileStatus::Added);
        // an older file never overwrites
        assert_eq!(db.check_file(&old).unwrap(), FileStatus::Unchanged);

        let mut db = database();
        assert_eq!(db.check_file(&old).unwrap(), FileStatus::Added);
        assert_eq!(db.check_file(&new).unwrap(), FileStatus::Updated);
        let main = db.retrieve("main", "1TST").unwrap();
        assert_eq!(main.len(), 1);
        assert_eq!(main[0][4], Cell::Text("2012-05-01".into()));
        assert_eq!(db.retrieve("coils", "1TST").unwrap().len(), 3);
    }

    #[test]
    fn missing_coils_are_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entry(&dir, "1tst.cif", ENTRY_1TST);
        let mut db = database();
        db.check_file(&path).unwrap();
        db.connection
            .execute("DELETE FROM coils WHERE entry_id = '1TST'", [])
            .unwrap();
        assert_eq!(db.check_file(&path).unwrap(), FileStatus::Repaired);
        assert_eq!(db.retrieve("coils", "1TST").unwrap().len(), 3);
        assert_eq!(db.retrieve("helices", "1TST").unwrap().len(), 1);
    }

    #[test]
    fn failed_insert_leaves_nothing() {
        let doc = crate::cif::parse(ENTRY_1TST).unwrap();
        let entry = Entry::from_block(&doc.blocks[0]).unwrap();
        let mut db = database();
        db.insert_entry(&entry).unwrap();
        db.connection
            .execute("DELETE FROM main WHERE entry_id = '1TST'", [])
            .unwrap();
        // entities rows still exist, so the second insert fails on its key
        assert!(matches!(db.insert_entry(&entry), Err(DatabaseError::Sql(_))));
        assert!(!db.contains("main", "1TST").unwrap());
    }

    #[test]
    fn unknown_table() {
        let db = database();
        assert!(matches!(
            db.retrieve("residues", "1TST"),
            Err(DatabaseError::UnknownTable(name)) if name == "residues"
        ));
    }

    #[test]
    fn bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entry(&dir, "bad.cif", "data_x\n_struct.title 'unterminated\n");
        let mut db = database();
        assert!(matches!(db.check_file(&path), Err(Error::Parse(_))));
    }

    #[test]
    fn on_disk_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let cif = write_entry(&dir, "1tst.cif", ENTRY_1TST);
        let db_path = dir.path().join("pdb.db");
        {
            let mut db = Database::open(&db_path).unwrap();
            db.init().unwrap();
            assert_eq!(db.check_file(&cif).unwrap(), FileStatus::Added);
        }
        let db = Database::open(&db_path).unwrap();
        assert!(db.contains("strands", "1TST").unwrap());
        assert_eq!(db.retrieve("sheets", "1TST").unwrap()[0][3], Cell::Text("A".into()));
    }
}
