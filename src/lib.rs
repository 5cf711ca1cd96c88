//! # birdnames
//!
//! A library for converting bird names between naming schemes and taxonomic
//! authorities.
//!
//! The same bird goes by many names: *Turdus migratorius*, American Robin,
//! AMRO, TURMIG, `amerob`, Merle d'Amérique. Each authority (AviList, eBird,
//! BirdLife, IBP, BBL) publishes its own subset of these, and the authorities
//! do not always agree on the scientific name itself.
//!
//! `birdnames` resolves a name under one authority and naming scheme to its
//! equivalent under another, using the scientific name as the bridge between
//! authorities.
//!
//! ## Features
//!
//! - **Exact, soft and fuzzy matching**: case/spacing/punctuation tolerant
//!   matching on by default, typo-tolerant matching on request
//! - **Cross-authority bridging**: e.g. eBird species codes to IBP alpha codes
//! - **Hierarchy roll-ups**: species to genus, family, or order
//! - **Batch conversion**: output mirrors the input shape, one failure never
//!   aborts a batch
//! - **Type inference**: convert names without knowing what kind they are
//!
//! ## Example
//!
//! ```rust
//! use birdnames::{ConversionRequest, Converter, NameType};
//!
//! let request = ConversionRequest::new(NameType::CommonName, NameType::Family);
//! let converter = Converter::new(request).unwrap();
//!
//! assert_eq!(converter.convert("american robin").unwrap(), "Turdidae");
//! ```
//!
//! ## Reference data
//!
//! The tables compiled into the crate are a small sample (at most a couple dozen North
//! American and European species per authority), enough for examples and
//! tests. For full taxonomies, point the library at an ingestion output
//! directory with [`TableCache::from_dir`] and [`Converter::with_cache`], or
//! pass `--data-dir` (or set `BIRDNAMES_DATA_DIR`) on the command line.
//!
//! ## Modules
//!
//! - [`catalog`]: Reference table loading, caching, and indexing
//! - [`convert`]: Conversion requests, the converter, and type inference
//! - [`core`]: Authorities, name types, records, and column contracts
//! - [`matching`]: Matcher and bridge resolver
//! - [`parsing`]: Reader for the ingestion output
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod convert;
pub mod core;
pub mod error;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::{CatalogError, TableCache, TaxonomyInfo};
pub use catalog::table::ReferenceTable;
pub use convert::infer::{alpha, common, determine_name_type, scientific, species_code, GuessOptions, OnUnmatched};
pub use convert::{ConversionRequest, ConvertInput, Converter, Series};
pub use core::record::TaxonRecord;
pub use core::types::*;
pub use error::{BridgeGap, ConfigError, ConvertError};
pub use matching::bridge::{BridgeResolver, Resolution};
pub use matching::engine::{MatchResult, MatchStrategy, Matcher, MatcherConfig};

/// List every (authority, year) in the embedded data with its name types
#[must_use]
pub fn list_taxonomies() -> Vec<TaxonomyInfo> {
    TableCache::shared_embedded().list_taxonomies()
}
