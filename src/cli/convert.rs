//! Convert command - convert names with an explicit source and target.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::catalog::store::TableCache;
use crate::cli::{tsv_field, OutputFormat, UNRESOLVED};
use crate::convert::converter::Converter;
use crate::convert::request::ConversionRequest;
use crate::core::types::{Authority, MatchKind, NameType};
use crate::error::ConvertError;
use crate::matching::bridge::Resolution;
use crate::utils::validation::parse_year;

#[derive(Args)]
pub struct ConvertArgs {
    /// Names to convert
    pub names: Vec<String>,

    /// Name type of the input (scientific, common, alpha, alpha6, ebird_code, french, genus, family, order)
    #[arg(long, required = true)]
    pub from_type: NameType,

    /// Name type to convert to
    #[arg(long, required = true)]
    pub to_type: NameType,

    /// Authority of the input names (avilist, ebird, birdlife, ibp, bbl)
    #[arg(long, default_value = "avilist")]
    pub from_authority: Authority,

    /// Authority of the output names (defaults to --from-authority)
    #[arg(long)]
    pub to_authority: Option<Authority>,

    /// Taxonomy year of the input (defaults to latest)
    #[arg(long, value_parser = parse_year)]
    pub from_year: Option<u16>,

    /// Taxonomy year of the output (defaults to latest)
    #[arg(long, value_parser = parse_year)]
    pub to_year: Option<u16>,

    /// Disable case- and spacing-insensitive matching
    #[arg(long)]
    pub no_soft: bool,

    /// Enable typo-tolerant matching (slower)
    #[arg(long)]
    pub fuzzy: bool,

    /// Read names from a file, one per line ('-' for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

impl ConvertArgs {
    fn request(&self) -> ConversionRequest {
        let mut request = ConversionRequest::new(self.from_type, self.to_type)
            .from_authority(self.from_authority)
            .from_year(self.from_year)
            .to_year(self.to_year)
            .soft_matching(!self.no_soft)
            .fuzzy_matching(self.fuzzy);
        if let Some(to_authority) = self.to_authority {
            request = request.to_authority(to_authority);
        }
        request
    }
}

/// One converted name, as reported in JSON output
#[derive(Serialize)]
struct ConvertedName<'a> {
    input: &'a str,
    output: Option<&'a str>,
    match_kind: MatchKind,
    confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    scientific_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

#[derive(Serialize)]
pub(crate) struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
}

impl From<&ConvertError> for ErrorReport {
    fn from(err: &ConvertError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

pub fn run(args: ConvertArgs, format: OutputFormat, verbose: bool, cache: &TableCache) -> anyhow::Result<()> {
    let request = args.request();
    let converter = Converter::with_cache(request, cache)?;
    let names = crate::cli::read_names(args.names, args.input.as_deref())?;

    let results: Vec<Result<Resolution, ConvertError>> =
        names.iter().map(|n| converter.convert_one(n)).collect();

    if verbose {
        let resolved = results.iter().filter(|r| r.is_ok()).count();
        eprintln!(
            "Converted {resolved} of {} names: {} ({}) -> {} ({})",
            names.len(),
            converter.from_type(),
            converter.from_table().key(),
            converter.to_type(),
            converter.to_table().key(),
        );
    }

    match format {
        OutputFormat::Text => print_text_results(&names, &results),
        OutputFormat::Json => print_json_results(&names, &results)?,
        OutputFormat::Tsv => print_tsv_results(&names, &results),
    }

    Ok(())
}

fn print_text_results(names: &[String], results: &[Result<Resolution, ConvertError>]) {
    for (name, result) in names.iter().zip(results) {
        match result {
            Ok(resolution) => println!("{}", resolution.value),
            Err(e) => {
                tracing::info!("{name}: {e}");
                println!("{UNRESOLVED}");
            }
        }
    }
}

fn print_json_results(names: &[String], results: &[Result<Resolution, ConvertError>]) -> anyhow::Result<()> {
    let output: Vec<ConvertedName> = names
        .iter()
        .zip(results)
        .map(|(name, result)| match result {
            Ok(r) => ConvertedName {
                input: name,
                output: Some(&r.value),
                match_kind: r.match_kind,
                confidence: r.confidence,
                scientific_name: Some(&r.to_record.scientific_name),
                error: None,
            },
            Err(e) => ConvertedName {
                input: name,
                output: None,
                match_kind: MatchKind::None,
                confidence: 0.0,
                scientific_name: None,
                error: Some(e.into()),
            },
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(names: &[String], results: &[Result<Resolution, ConvertError>]) {
    println!("input\toutput\tmatch\tconfidence\tstatus");
    for (name, result) in names.iter().zip(results) {
        match result {
            Ok(r) => println!(
                "{}\t{}\t{}\t{:.3}\tok",
                tsv_field(name),
                tsv_field(&r.value),
                r.match_kind,
                r.confidence
            ),
            Err(e) => println!(
                "{}\t{UNRESOLVED}\t{}\t{:.3}\t{}",
                tsv_field(name),
                MatchKind::None,
                0.0,
                e.kind()
            ),
        }
    }
}
