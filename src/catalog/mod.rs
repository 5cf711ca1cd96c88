//! Reference table storage, indexing, and caching.
//!
//! Each authority publishes its taxonomy as one table per year. Tables are
//! produced by the ingestion pipeline and treated as read-only here.
//!
//! - [`TableSource`]: where tables come from (embedded snapshot or a directory)
//! - [`TableCache`]: loads each (authority, year) once and shares it
//! - [`ReferenceTable`]: records plus one [`MatchIndex`] per supported column
//!
//! ## Example
//!
//! ```rust
//! use birdnames::catalog::store::TableCache;
//! use birdnames::core::types::{Authority, NameType};
//!
//! let cache = TableCache::embedded();
//!
//! // Latest IBP table
//! let ibp = cache.load(Authority::Ibp, None).unwrap();
//! assert!(ibp.supports(NameType::AlphaCode4));
//!
//! let robin = ibp.get("Turdus migratorius").unwrap();
//! assert_eq!(robin.alpha_code_4.as_deref(), Some("AMRO"));
//!
//! // Discover what is available without loading anything
//! for info in cache.list_taxonomies() {
//!     println!("{} {}: {:?}", info.authority, info.year, info.name_types);
//! }
//! ```
//!
//! ## Custom Data
//!
//! Point a cache at an ingestion output directory containing
//! `{authority}_{year}_taxonomy.csv` files:
//!
//! ```rust,no_run
//! use birdnames::catalog::store::TableCache;
//! use std::path::Path;
//!
//! let cache = TableCache::from_dir(Path::new("data/processed")).unwrap();
//! ```
//!
//! [`TableSource`]: source::TableSource
//! [`TableCache`]: store::TableCache
//! [`ReferenceTable`]: table::ReferenceTable
//! [`MatchIndex`]: index::MatchIndex

pub mod index;
pub mod source;
pub mod store;
pub mod table;
