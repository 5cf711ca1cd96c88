//! Parsers for the reference tables produced by the ingestion pipeline.
//!
//! Ingestion writes one CSV per authority and year,
//! `{authority}_{year}_taxonomy.csv`, with a header row. Two columns are
//! shared by every authority; the rest carry the authority as a prefix:
//!
//! | Column | Meaning | Required |
//! |--------|---------|----------|
//! | `scientific_name` | Canonical key, unique per table | Yes |
//! | `genus` | Genus (derived from the scientific name if absent) | No |
//! | `{authority}_common_name` | English common name | No |
//! | `{authority}_order`, `{authority}_family` | Hierarchy | No |
//! | `{authority}_alpha`, `{authority}_alpha6` | 4- and 6-letter codes | No |
//! | `ebird_ebird_code` | eBird species code | No |
//! | `bbl_french_name` | French name | No |
//! | `avilist_taxon_rank` | Taxon rank | No |
//!
//! ## Example
//!
//! ```rust
//! use birdnames::core::types::Authority;
//! use birdnames::parsing::taxonomy::parse_taxonomy_text;
//!
//! let csv = "scientific_name,ibp_common_name,ibp_alpha\nTurdus migratorius,American Robin,AMRO\n";
//! let parsed = parse_taxonomy_text(csv, Authority::Ibp.schema()).unwrap();
//! assert_eq!(parsed.records[0].alpha_code_4.as_deref(), Some("AMRO"));
//! ```

pub mod taxonomy;
