//! Command-line interface for birdnames.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **convert**: Convert names with an explicit source and target
//! - **guess**: Convert names of unknown kind to a chosen output type
//! - **detect**: Report which authority and name type the names come from
//! - **list**: List the available taxonomies and their name types
//! - **show**: Show every authority's record for one bird
//!
//! ## Usage
//!
//! ```text
//! # Common names to scientific names (AviList)
//! birdnames convert --from-type common --to-type scientific "American Robin" "Blue Jay"
//!
//! # eBird species codes to IBP alpha codes, one name per line on stdin
//! cut -f3 checklist.tsv | birdnames convert --from-type ebird_code --to-type alpha \
//!     --from-authority ebird --to-authority ibp --input -
//!
//! # Anything to BBL alpha codes
//! birdnames guess alpha "Turdus migratorius" "Northern Cardinal"
//!
//! # JSON output for scripting
//! birdnames --format json list
//! ```

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use crate::catalog::store::TableCache;

pub mod convert;
pub mod detect;
pub mod guess;
pub mod list;
pub mod show;

/// Environment variable naming a directory of ingestion output
pub const DATA_DIR_ENV: &str = "BIRDNAMES_DATA_DIR";

/// Marker printed for names that could not be converted
pub const UNRESOLVED: &str = "NA";

#[derive(Parser)]
#[command(name = "birdnames")]
#[command(version)]
#[command(about = "Convert bird names between naming schemes and taxonomic authorities")]
#[command(
    long_about = "birdnames converts bird names between scientific names, common names, alpha codes, eBird species codes, French names and genus/family/order.\n\nSupported authorities: AviList, eBird (Clements), BirdLife, IBP and BBL. Names are matched exactly, then case- and spacing-insensitively, and optionally with typo tolerance (--fuzzy)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory of `{authority}_{year}_taxonomy.csv` files (defaults to the embedded data)
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert names from one name type and authority to another
    Convert(convert::ConvertArgs),

    /// Convert names of unknown kind to scientific names, common names, or codes
    Guess(guess::GuessArgs),

    /// Detect the authority and name type of a list of names
    Detect(detect::DetectArgs),

    /// List available taxonomies
    List,

    /// Show one bird's record under every authority
    Show(show::ShowArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Open the table cache for a run: a data directory if given, else the embedded tables
///
/// # Errors
///
/// Returns an error if the data directory cannot be read.
pub fn open_cache(data_dir: Option<&Path>) -> anyhow::Result<Arc<TableCache>> {
    match data_dir {
        Some(dir) => {
            let cache = TableCache::from_dir(dir)
                .with_context(|| format!("Failed to open data directory {}", dir.display()))?;
            tracing::debug!(dir = %dir.display(), "using taxonomy data directory");
            Ok(Arc::new(cache))
        }
        None => Ok(TableCache::shared_embedded()),
    }
}

/// Collect names from the command line and an optional input file ('-' for stdin)
///
/// Names from the file come after the positional names, one per line. Blank
/// lines are kept so that output lines up with input lines.
///
/// # Errors
///
/// Returns an error if the file cannot be read or no names were given.
pub fn read_names(mut names: Vec<String>, input: Option<&Path>) -> anyhow::Result<Vec<String>> {
    if let Some(path) = input {
        let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
            Box::new(BufReader::new(std::io::stdin()))
        } else {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        };
        for line in reader.lines() {
            let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
            names.push(line.trim_end_matches('\r').to_string());
        }
    }

    if names.is_empty() {
        bail!("No names given. Pass names as arguments or use --input FILE (or '-' for stdin)");
    }
    Ok(names)
}

/// Escape a field for TSV output
fn tsv_field(s: &str) -> String {
    s.replace(['\t', '\n'], " ")
}
