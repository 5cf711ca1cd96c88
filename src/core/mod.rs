//! Core data types for bird name resolution.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Authority`], [`NameType`], [`Rank`]: closed enumerations of what can be queried
//! - [`TaxonRecord`]: one row of an authority's reference table
//! - [`AuthoritySchema`]: the column contract of each authority's tables
//! - [`MatchKind`], [`TableKey`]: result classification and table identity
//!
//! ## Support Matrix
//!
//! Authorities publish different name types:
//!
//! | Authority | Common | Order/Family | Alpha 4 | Alpha 6 | Species code | French |
//! |-----------|--------|--------------|---------|---------|--------------|--------|
//! | AviList   | yes    | yes          |         |         |              |        |
//! | eBird     | yes    | yes          |         |         | yes          |        |
//! | BirdLife  | yes    | yes          |         |         |              |        |
//! | IBP       | yes    |              | yes     | yes     |              |        |
//! | BBL       | yes    |              | yes     |         |              | yes    |
//!
//! Scientific name and genus are available everywhere. The scientific name is
//! the only key shared across authorities.
//!
//! [`Authority`]: types::Authority
//! [`NameType`]: types::NameType
//! [`Rank`]: types::Rank
//! [`TaxonRecord`]: record::TaxonRecord
//! [`AuthoritySchema`]: schema::AuthoritySchema
//! [`MatchKind`]: types::MatchKind
//! [`TableKey`]: types::TableKey

pub mod record;
pub mod schema;
pub mod types;
