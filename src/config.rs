//! Batch ingestion options with TOML file support.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Every field has a default, so a partial file (e.g. only `database`) works.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IngestOptions {
    /// SQLite file the tables are written to.
    pub database: PathBuf,
    /// File extensions picked up when walking a directory, without the dot.
    pub extensions: Vec<String>,
    pub follow_links: bool,
    /// Directory recursion limit; unlimited when absent.
    pub max_depth: Option<usize>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            database: PathBuf::from("pdb_database.db"),
            extensions: vec!["cif".to_string()],
            follow_links: false,
            max_depth: None,
        }
    }
}

impl IngestOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| OptionsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether a file found while walking a directory should be ingested.
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}
