//! Public conversion API.
//!
//! - [`ConversionRequest`]: from/to name types, authorities, years, strategies
//! - [`Converter`]: validated once, then converts single names or batches
//! - [`infer`]: entry points that guess the source kind of the names
//!
//! ## Example
//!
//! ```rust
//! use birdnames::convert::{ConversionRequest, Converter};
//! use birdnames::core::types::{Authority, NameType};
//!
//! // eBird species codes to IBP alpha codes
//! let request = ConversionRequest::new(NameType::SpeciesCode, NameType::AlphaCode4)
//!     .from_authority(Authority::Ebird)
//!     .to_authority(Authority::Ibp);
//! let converter = Converter::new(request).unwrap();
//!
//! let codes = converter.convert(vec!["amerob", "blujay", "norcar"]);
//! let codes: Vec<_> = codes.into_iter().map(Result::unwrap).collect();
//! assert_eq!(codes, vec!["AMRO", "BLJA", "NOCA"]);
//! ```
//!
//! [`ConversionRequest`]: request::ConversionRequest
//! [`Converter`]: converter::Converter

pub mod converter;
pub mod infer;
pub mod request;

pub use converter::{ConvertInput, Converter, Series};
pub use request::ConversionRequest;
