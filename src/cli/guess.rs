//! Guess command - convert names of unknown kind to a chosen output type.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::catalog::store::TableCache;
use crate::cli::convert::ErrorReport;
use crate::cli::{tsv_field, OutputFormat, UNRESOLVED};
use crate::convert::infer::{guess, GuessOptions, OnUnmatched};
use crate::core::types::{Authority, NameType};
use crate::error::ConvertError;
use crate::utils::validation::parse_year;

/// Output types offered by the guess command
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum GuessTarget {
    /// Scientific names (default authority: avilist)
    Scientific,
    /// English common names (default authority: avilist)
    Common,
    /// 4-letter alpha codes (default authority: bbl)
    Alpha,
    /// eBird species codes (authority: ebird)
    SpeciesCode,
}

impl GuessTarget {
    fn name_type(self) -> NameType {
        match self {
            Self::Scientific => NameType::ScientificName,
            Self::Common => NameType::CommonName,
            Self::Alpha => NameType::AlphaCode4,
            Self::SpeciesCode => NameType::SpeciesCode,
        }
    }

    fn default_authority(self) -> Authority {
        match self {
            Self::Scientific | Self::Common => Authority::Avilist,
            Self::Alpha => Authority::Bbl,
            Self::SpeciesCode => Authority::Ebird,
        }
    }
}

#[derive(Args)]
pub struct GuessArgs {
    /// What to convert the names to
    #[arg(value_enum)]
    pub target: GuessTarget,

    /// Names to convert (any kind; the most likely kind is detected)
    pub names: Vec<String>,

    /// Authority of the output names
    #[arg(long)]
    pub authority: Option<Authority>,

    /// Taxonomy year of the output (defaults to latest)
    #[arg(long, value_parser = parse_year)]
    pub year: Option<u16>,

    /// Disable case- and spacing-insensitive matching
    #[arg(long)]
    pub no_soft: bool,

    /// Enable typo-tolerant matching (slower)
    #[arg(long)]
    pub fuzzy: bool,

    /// What to do with names that match nothing in the detected taxonomy
    #[arg(long, value_enum, default_value = "warn")]
    pub on_unmatched: OnUnmatched,

    /// Read names from a file, one per line ('-' for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[derive(Serialize)]
struct GuessedName<'a> {
    input: &'a str,
    output: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

pub fn run(args: GuessArgs, format: OutputFormat, verbose: bool, cache: &TableCache) -> anyhow::Result<()> {
    let names = crate::cli::read_names(args.names, args.input.as_deref())?;
    let options = GuessOptions {
        target_authority: args.authority,
        year: args.year,
        soft_matching: !args.no_soft,
        fuzzy_matching: args.fuzzy,
        on_unmatched: args.on_unmatched,
    };

    let results = guess(
        cache,
        names.as_slice(),
        args.target.name_type(),
        args.target.default_authority(),
        &options,
    )?;

    if verbose {
        let resolved = results.iter().filter(|r| r.is_ok()).count();
        eprintln!(
            "Converted {resolved} of {} names to {} ({})",
            names.len(),
            args.target.name_type(),
            args.authority.unwrap_or(args.target.default_authority()),
        );
    }

    match format {
        OutputFormat::Text => {
            for result in &results {
                println!("{}", result.as_deref().unwrap_or(UNRESOLVED));
            }
        }
        OutputFormat::Json => print_json_results(&names, &results)?,
        OutputFormat::Tsv => {
            println!("input\toutput");
            for (name, result) in names.iter().zip(&results) {
                println!(
                    "{}\t{}",
                    tsv_field(name),
                    tsv_field(result.as_deref().unwrap_or(UNRESOLVED))
                );
            }
        }
    }

    Ok(())
}

fn print_json_results(names: &[String], results: &[Result<String, ConvertError>]) -> anyhow::Result<()> {
    let output: Vec<GuessedName> = names
        .iter()
        .zip(results)
        .map(|(name, result)| GuessedName {
            input: name,
            output: result.as_deref().ok(),
            error: result.as_ref().err().map(ErrorReport::from),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
