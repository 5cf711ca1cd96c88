//! Token resolution and cross-authority bridging.
//!
//! - [`Matcher`]: resolves one token against one column index
//! - [`BridgeResolver`]: chains two lookups through the scientific name
//!
//! ## Matching Algorithm
//!
//! Strategies are tried in order and the first hit wins:
//!
//! 1. **Exact**: the value as stored in the table (confidence 1.0)
//! 2. **Soft**: equality after [`normalize`] (confidence 1.0)
//! 3. **Fuzzy**: best normalized Levenshtein ratio strictly above the
//!    threshold (default 0.8), ties broken by the smallest normalized key
//!
//! Soft matching is on by default; fuzzy matching is opt-in. Fuzzy matching
//! compares the token with every candidate in the column, so it is the only
//! step whose cost grows with table size. Candidates whose length alone rules
//! them out are skipped, and with the `parallel` feature large columns are
//! scanned with rayon.
//!
//! ## Bridging
//!
//! Every table is keyed on scientific name. To convert across authorities (or
//! across years of one authority) the source record's scientific name is looked
//! up in the target table with exact and soft matching only.
//!
//! ## Example
//!
//! ```rust
//! use birdnames::catalog::store::TableCache;
//! use birdnames::core::types::{Authority, NameType};
//! use birdnames::matching::bridge::BridgeResolver;
//! use birdnames::matching::engine::MatchStrategy;
//!
//! let cache = TableCache::embedded();
//! let ebird = cache.load(Authority::Ebird, None).unwrap();
//! let ibp = cache.load(Authority::Ibp, None).unwrap();
//!
//! let resolution = BridgeResolver::default()
//!     .resolve("amerob", &ebird, NameType::SpeciesCode, &ibp, NameType::AlphaCode4, MatchStrategy::default())
//!     .unwrap();
//! assert_eq!(resolution.value, "AMRO");
//! ```
//!
//! [`Matcher`]: engine::Matcher
//! [`BridgeResolver`]: bridge::BridgeResolver
//! [`normalize`]: normalize::normalize

pub mod bridge;
pub mod engine;
pub mod normalize;
pub mod similarity;
