//! Entry id listing and mmCIF download from the RCSB PDB.
//!
//! The search service hands out every released entry id, one page at a
//! time; pages are requested until the reported total has been collected.
//! Downloads go through a `.part` file so an interrupted transfer never
//! looks like a present entry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const SEARCH_URL: &str = "https://search.rcsb.org/rcsbsearch/v2/query";
pub const DOWNLOAD_URL: &str = "https://files.rcsb.org/download";

/// Largest page the search service serves.
pub const PAGE_SIZE: usize = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum RcsbError {
    #[error("request failed: {0}")]
    Http(#[from] ureq::Error),
    #[error("malformed search response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("search page at {start} was empty with {total} ids reported")]
    ShortPage { start: usize, total: usize },
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SearchPage {
    pub total_count: usize,
    #[serde(default)]
    pub result_set: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    pub identifier: String,
}

impl SearchPage {
    /// Parse a response body. The service answers with no content when
    /// nothing matches.
    pub fn parse(body: &str) -> Result<Self, RcsbError> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(body)?)
    }

    pub fn ids(self) -> impl Iterator<Item = String> {
        self.result_set.into_iter().map(|hit| hit.identifier)
    }
}

/// Search request matching every entry, returning `rows` ids from `start`.
pub fn search_query(start: usize, rows: usize) -> serde_json::Value {
    serde_json::json!({
        "query": {
            "type": "terminal",
            "service": "text"
        },
        "request_options": {
            "paginate": {
                "start": start,
                "rows": rows
            }
        },
        "return_type": "entry"
    })
}

/// Collect ids page by page through `fetch(start, rows)`.
///
/// Each request starts where the ids collected so far end, so a page
/// shorter than `page_size` does not skip anything.
pub fn collect_ids<F>(page_size: usize, mut fetch: F) -> Result<Vec<String>, RcsbError>
where
    F: FnMut(usize, usize) -> Result<SearchPage, RcsbError>,
{
    let page_size = page_size.max(1);
    let mut ids = Vec::new();
    loop {
        let start = ids.len();
        let page = fetch(start, page_size)?;
        let total = page.total_count;
        let before = ids.len();
        ids.extend(page.ids());
        log::debug!("listed {} of {total} ids", ids.len());
        if ids.len() >= total {
            return Ok(ids);
        }
        if ids.len() == before {
            return Err(RcsbError::ShortPage { start, total });
        }
    }
}

/// Request one search page from the RCSB search service.
pub fn fetch_page(start: usize, rows: usize) -> Result<SearchPage, RcsbError> {
    let query = search_query(start, rows).to_string();
    let body = ureq::get(SEARCH_URL)
        .query("json", &query)
        .call()?
        .into_body()
        .read_to_string()?;
    SearchPage::parse(&body)
}

/// Every entry id the RCSB PDB currently serves.
pub fn list_entry_ids(page_size: usize) -> Result<Vec<String>, RcsbError> {
    let ids = collect_ids(page_size, fetch_page)?;
    log::info!("listed {} entry ids", ids.len());
    Ok(ids)
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> RcsbError {
    let path = path.to_path_buf();
    move |source| RcsbError::Io { path, source }
}

/// Write one id per line.
pub fn write_ids(path: &Path, ids: &[String]) -> Result<(), RcsbError> {
    let mut text = ids.join("\n");
    text.push('\n');
    fs::write(path, text).map_err(io_error(path))
}

/// Read an id list. Ids may be separated by newlines, whitespace or commas.
pub fn read_ids(path: &Path) -> Result<Vec<String>, RcsbError> {
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    Ok(text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect())
}

/// Where the mmCIF file of `id` lives under `dir`.
pub fn entry_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{}.cif", id.to_lowercase()))
}

/// Download the mmCIF file of `id` into `dir` unless it is already there.
///
/// Returns whether a file was fetched.
pub fn download_entry(id: &str, dir: &Path) -> Result<bool, RcsbError> {
    let path = entry_path(dir, id);
    if path.exists() {
        return Ok(false);
    }
    let url = format!("{DOWNLOAD_URL}/{}.cif", id.to_lowercase());
    let mut body = ureq::get(&url).call()?.into_body().into_reader();

    let partial = path.with_extension("cif.part");
    let mut file = fs::File::create(&partial).map_err(io_error(&partial))?;
    io::copy(&mut body, &mut file).map_err(io_error(&partial))?;
    drop(file);
    fs::rename(&partial, &path).map_err(io_error(&path))?;
    log::debug!("downloaded {id} to {}", path.display());
    Ok(true)
}
