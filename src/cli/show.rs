//! Show command - one bird's record under every authority.
//!
//! The name's kind and source authority are detected first; the record is then
//! bridged into every other authority's latest table through its scientific name.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use crate::catalog::store::{CatalogError, TableCache};
use crate::cli::{tsv_field, OutputFormat};
use crate::convert::infer::{determine_name_type, Inference};
use crate::core::record::TaxonRecord;
use crate::core::types::{Authority, NameType};
use crate::error::ConvertError;
use crate::matching::bridge::BridgeResolver;
use crate::matching::engine::MatchStrategy;

#[derive(Args)]
pub struct ShowArgs {
    /// Any name of the bird (scientific, common, code, ...)
    #[arg(required = true)]
    pub name: String,

    /// Only show this authority's record
    #[arg(long)]
    pub authority: Option<Authority>,

    /// Enable typo-tolerant matching (slower)
    #[arg(long)]
    pub fuzzy: bool,
}

#[derive(Serialize)]
struct AuthorityRecord {
    authority: Authority,
    year: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<Arc<TaxonRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<String>,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    query: &'a str,
    source: &'a Inference,
    records: Vec<AuthorityRecord>,
}

pub fn run(args: ShowArgs, format: OutputFormat, verbose: bool, cache: &TableCache) -> anyhow::Result<()> {
    let strategy = MatchStrategy::new(true, args.fuzzy);
    let source = determine_name_type(cache, &[args.name.as_str()], strategy)?;
    let from = cache.load(source.authority, Some(source.year))?;

    let authorities: Vec<Authority> = match args.authority {
        Some(a) => vec![a],
        None => Authority::ALL.to_vec(),
    };

    let resolver = BridgeResolver::default();
    let mut records = Vec::new();
    for authority in authorities {
        let to = match cache.load(authority, None) {
            Ok(table) => table,
            Err(CatalogError::UnsupportedAuthority(_)) if args.authority.is_none() => continue,
            Err(e) => return Err(e.into()),
        };
        let entry = match resolver.resolve(
            &args.name,
            &from,
            source.name_type,
            &to,
            NameType::ScientificName,
            strategy,
        ) {
            Ok(resolution) => AuthorityRecord {
                authority,
                year: to.year(),
                record: Some(resolution.to_record),
                missing: None,
            },
            Err(e @ ConvertError::BridgeBroken { .. }) => AuthorityRecord {
                authority,
                year: to.year(),
                record: None,
                missing: Some(e.to_string()),
            },
            Err(e) => return Err(e.into()),
        };
        records.push(entry);
    }

    match format {
        OutputFormat::Text => print_text(&args.name, &source, &records, verbose),
        OutputFormat::Json => {
            let output = ShowOutput {
                query: &args.name,
                source: &source,
                records,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("authority\tyear\tname_type\tvalue");
            for entry in &records {
                let Some(record) = &entry.record else {
                    continue;
                };
                for name_type in entry.authority.schema().name_types() {
                    if let Some(value) = record.get(name_type) {
                        println!("{}\t{}\t{}\t{}", entry.authority, entry.year, name_type, tsv_field(value));
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_text(query: &str, source: &Inference, records: &[AuthorityRecord], verbose: bool) {
    println!(
        "{query}: {} ({} {}, {} match)",
        source.name_type, source.authority, source.year, source.match_kind
    );

    for entry in records {
        println!("\n{} {}", entry.authority, entry.year);
        println!("{}", "-".repeat(40));
        match &entry.record {
            Some(record) => {
                for name_type in entry.authority.schema().name_types() {
                    if let Some(value) = record.get(name_type) {
                        println!("  {:<16} {value}", name_type.as_str());
                    }
                }
                if verbose {
                    println!("  {:<16} {}", "rank", record.rank);
                }
            }
            None => println!("  (not listed)"),
        }
        if verbose {
            if let Some(missing) = &entry.missing {
                println!("  {missing}");
            }
        }
    }
}
