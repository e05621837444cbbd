//! Column declarations and the SQL they render to.

use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("table {table}: primary key {key} is not a column")]
    PrimaryKey { table: String, key: String },
    #[error("table {table}: foreign key {key} is not a column")]
    ForeignKey { table: String, key: String },
    #[error("table {0} has no columns")]
    NoColumns(String),
}

/// One column: name plus SQL type and constraints, e.g. `"VARCHAR(5) NOT NULL"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
}

/// `FOREIGN KEY (column) REFERENCES table (target)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub table: &'static str,
    pub target: &'static str,
}

/// Validated column list of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    columns: Vec<Column>,
    primary_keys: Vec<&'static str>,
    foreign_keys: Vec<ForeignKey>,
}

impl Attributes {
    /// Every primary and foreign key must name one of `columns`.
    pub fn new(
        table: &str,
        columns: &[(&'static str, &'static str)],
        primary_keys: &[&'static str],
        foreign_keys: &[(&'static str, &'static str, &'static str)],
    ) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::NoColumns(table.to_string()));
        }
        let columns: Vec<Column> = columns
            .iter()
            .map(|&(name, sql_type)| Column { name, sql_type })
            .collect();
        let known = |key: &str| columns.iter().any(|c| c.name == key);
        if let Some(key) = primary_keys.iter().find(|k| !known(k)) {
            return Err(SchemaError::PrimaryKey {
                table: table.to_string(),
                key: key.to_string(),
            });
        }
        if let Some((key, _, _)) = foreign_keys.iter().find(|(k, _, _)| !known(k)) {
            return Err(SchemaError::ForeignKey {
                table: table.to_string(),
                key: key.to_string(),
            });
        }
        Ok(Self {
            columns,
            primary_keys: primary_keys.to_vec(),
            foreign_keys: foreign_keys
                .iter()
                .map(|&(column, table, target)| ForeignKey { column, table, target })
                .collect(),
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn primary_keys(&self) -> &[&'static str] {
        &self.primary_keys
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }
}

/// The parenthesized column clause of `CREATE TABLE`.
impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.sql_type))
            .collect();
        if !self.primary_keys.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", self.primary_keys.join(", ")));
        }
        for fk in &self.foreign_keys {
            parts.push(format!(
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                fk.column, fk.table, fk.target
            ));
        }
        write!(f, "({})", parts.join(", "))
    }
}
