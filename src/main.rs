//! `pdb-tables`: list and fetch RCSB entries, and ingest mmCIF entries into
//! an SQLite database.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use walkdir::WalkDir;

use pdb_tables::config::IngestOptions;
use pdb_tables::db::{Database, FileStatus};
use pdb_tables::error::Result;
use pdb_tables::rcsb;

#[derive(Debug, Parser)]
#[command(name = "pdb-tables", version, about)]
struct Cli {
    /// SQLite database file (overrides the options file).
    #[arg(long, global = true)]
    database: Option<PathBuf>,
    /// TOML options file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the tables.
    Init,
    /// Ingest mmCIF files, or every matching file under a directory.
    Ingest {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Extension to pick up when walking directories; repeatable.
        #[arg(long = "extension")]
        extensions: Vec<String>,
        #[arg(long)]
        max_depth: Option<usize>,
        #[arg(long)]
        follow_links: bool,
    },
    /// Print the stored rows of one entry.
    Show { table: String, entry_id: String },
    /// List every entry id served by the RCSB PDB.
    Crawl {
        #[arg(long, default_value = "list_file.txt")]
        output: PathBuf,
        #[arg(long, default_value_t = rcsb::PAGE_SIZE)]
        page_size: usize,
    },
    /// Download the mmCIF file of every id in a list, skipping present ones.
    Download {
        list: PathBuf,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut options = match &cli.config {
        Some(path) => IngestOptions::load(path)?,
        None => IngestOptions::default(),
    };
    if let Some(database) = cli.database {
        options.database = database;
    }

    match cli.command {
        Command::Init => {
            Database::open(&options.database)?.init()?;
            log::info!("initialized {}", options.database.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Ingest {
            paths,
            extensions,
            max_depth,
            follow_links,
        } => {
            if !extensions.is_empty() {
                options.extensions = extensions;
            }
            if max_depth.is_some() {
                options.max_depth = max_depth;
            }
            options.follow_links |= follow_links;
            ingest(&paths, &options)
        }
        Command::Show { table, entry_id } => {
            let db = Database::open(&options.database)?;
            let rows = db.retrieve(&table, &entry_id)?;
            for row in rows {
                let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                println!("{}", cells.join("\t"));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Crawl { output, page_size } => {
            let ids = rcsb::list_entry_ids(page_size)?;
            rcsb::write_ids(&output, &ids)?;
            log::info!("wrote {} ids to {}", ids.len(), output.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Download { list, dir } => download(&list, &dir),
    }
}

fn download(list: &Path, dir: &Path) -> Result<ExitCode> {
    let ids = rcsb::read_ids(list)?;
    let (mut fetched, mut present, mut failed) = (0usize, 0usize, 0usize);
    for id in &ids {
        match rcsb::download_entry(id, dir) {
            Ok(true) => fetched += 1,
            Ok(false) => present += 1,
            Err(e) => {
                log::error!("{id}: {e}");
                failed += 1;
            }
        }
    }
    log::info!("{fetched} downloaded, {present} already present, {failed} failed");
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn ingest(paths: &[PathBuf], options: &IngestOptions) -> Result<ExitCode> {
    let mut db = Database::open(&options.database)?;
    db.init()?;

    let mut counts = [0usize; 4];
    let mut failed = 0usize;
    for path in collect_inputs(paths, options) {
        match db.check_file(&path) {
            Ok(status) => counts[status as usize] += 1,
            Err(e) => {
                log::error!("{}: {e}", path.display());
                failed += 1;
            }
        }
    }
    log::info!(
        "{} added, {} updated, {} repaired, {} unchanged, {} failed",
        counts[FileStatus::Added as usize],
        counts[FileStatus::Updated as usize],
        counts[FileStatus::Repaired as usize],
        counts[FileStatus::Unchanged as usize],
        failed
    );
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Files named on the command line are taken as given; directories are
/// walked and filtered by extension. Sorted for a reproducible order.
fn collect_inputs(paths: &[PathBuf], options: &IngestOptions) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut walker = WalkDir::new(path).follow_links(options.follow_links);
        if let Some(depth) = options.max_depth {
            walker = walker.max_depth(depth);
        }
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() && options.accepts(entry.path()) => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => log::warn!("{}: {e}", path.display()),
            }
        }
    }
    files.sort();
    files.dedup();
    files
}
