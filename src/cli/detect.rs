use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::TableCache;
use crate::cli::{tsv_field, OutputFormat};
use crate::convert::infer::determine_name_type;
use crate::matching::engine::MatchStrategy;

#[derive(Args)]
pub struct DetectArgs {
    /// Names to inspect
    pub names: Vec<String>,

    /// Also try typo-tolerant matching if nothing matches exactly
    #[arg(long)]
    pub fuzzy: bool,

    /// Read names from a file, one per line ('-' for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

pub fn run(args: DetectArgs, format: OutputFormat, verbose: bool, cache: &TableCache) -> anyhow::Result<()> {
    let names = crate::cli::read_names(args.names, args.input.as_deref())?;
    let inference = determine_name_type(cache, &names, MatchStrategy::new(true, args.fuzzy))?;

    match format {
        OutputFormat::Text => {
            println!(
                "Detected: {} ({} {})",
                inference.name_type, inference.authority, inference.year
            );
            println!(
                "Matched:  {} of {} distinct names ({} match)",
                inference.matched,
                inference.matched + inference.unmatched.len(),
                inference.match_kind
            );
            if !inference.unmatched.is_empty() {
                println!("\nUnmatched:");
                let shown = if verbose {
                    inference.unmatched.len()
                } else {
                    inference.unmatched.len().min(10)
                };
                for name in &inference.unmatched[..shown] {
                    println!("  {name}");
                }
                if shown < inference.unmatched.len() {
                    println!(
                        "  ... and {} more (use --verbose to show all)",
                        inference.unmatched.len() - shown
                    );
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&inference)?);
        }
        OutputFormat::Tsv => {
            println!("authority\tyear\tname_type\tmatch\tmatched\tunmatched");
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                inference.authority,
                inference.year,
                inference.name_type,
                inference.match_kind,
                inference.matched,
                tsv_field(&inference.unmatched.join(","))
            );
        }
    }

    Ok(())
}
