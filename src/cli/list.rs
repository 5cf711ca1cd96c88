use serde::Serialize;

use crate::catalog::store::{TableCache, TaxonomyInfo};
use crate::cli::OutputFormat;
use crate::core::types::NameType;

#[derive(Serialize)]
struct Listing<'a> {
    generated_at: chrono::DateTime<chrono::Utc>,
    taxonomies: &'a [TaxonomyInfo],
}

fn join_name_types(name_types: &[NameType]) -> String {
    name_types
        .iter()
        .map(|nt| nt.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn run(format: OutputFormat, verbose: bool, cache: &TableCache) -> anyhow::Result<()> {
    let taxonomies = cache.list_taxonomies();

    match format {
        OutputFormat::Text => {
            let types_width = taxonomies
                .iter()
                .map(|t| join_name_types(&t.name_types).len())
                .max()
                .unwrap_or(10)
                .max(10);

            println!("Available Taxonomies ({})\n", taxonomies.len());
            println!("{:<10} {:>6}  Name types", "Authority", "Year");
            println!("{}", "-".repeat(10 + 6 + 3 + types_width));
            for t in &taxonomies {
                println!(
                    "{:<10} {:>6}  {}",
                    t.authority.as_str(),
                    t.year,
                    join_name_types(&t.name_types)
                );
            }

            if verbose {
                println!();
                for authority in crate::core::types::Authority::ALL {
                    match cache.latest_year(authority) {
                        Ok(year) => println!("{authority}: latest {year}"),
                        Err(e) => println!("{authority}: {e}"),
                    }
                }
            }
        }
        OutputFormat::Json => {
            let listing = Listing {
                generated_at: chrono::Utc::now(),
                taxonomies: &taxonomies,
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        OutputFormat::Tsv => {
            println!("authority\tyear\tname_types");
            for t in &taxonomies {
                println!("{}\t{}\t{}", t.authority, t.year, join_name_types(&t.name_types));
            }
        }
    }

    Ok(())
}
