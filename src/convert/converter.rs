use std::sync::Arc;

use serde::Serialize;

use crate::catalog::store::TableCache;
use crate::catalog::table::ReferenceTable;
use crate::convert::request::ConversionRequest;
use crate::core::types::NameType;
use crate::error::{ConfigError, ConvertError};
use crate::matching::bridge::{BridgeResolver, Resolution};
use crate::matching::engine::Matcher;

/// Batches at least this large are converted in parallel (with the `parallel` feature)
#[cfg(feature = "parallel")]
const PARALLEL_BATCH_SIZE: usize = 256;

/// Converts names under one validated [`ConversionRequest`]
///
/// Construction validates the request and loads both reference tables, so a
/// misconfigured converter never exists. Each token is converted independently;
/// in batches a failed token yields an `Err` slot and the rest proceed.
///
/// ```rust
/// use birdnames::convert::converter::Converter;
/// use birdnames::convert::request::ConversionRequest;
/// use birdnames::core::types::NameType;
///
/// let request = ConversionRequest::new(NameType::CommonName, NameType::ScientificName);
/// let converter = Converter::new(request).unwrap();
///
/// assert_eq!(converter.convert("American Robin").unwrap(), "Turdus migratorius");
///
/// let results = converter.convert(vec!["Blue Jay", "Not A Bird"]);
/// assert_eq!(results[0].as_deref().ok(), Some("Cyanocitta cristata"));
/// assert!(results[1].is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    request: ConversionRequest,
    from: Arc<ReferenceTable>,
    to: Arc<ReferenceTable>,
    resolver: BridgeResolver,
}

impl Converter {
    /// Create a converter over the embedded sample tables
    ///
    /// The sample covers only a few species; use [`Converter::with_cache`] with
    /// [`TableCache::from_dir`] for full taxonomies.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Configuration` if a name type is unsupported or an
    /// authority/year has no data, and `ConvertError::DataUnavailable` if a table
    /// fails to load.
    pub fn new(request: ConversionRequest) -> Result<Self, ConvertError> {
        Self::with_cache(request, &TableCache::shared_embedded())
    }

    /// Create a converter over tables from the given cache
    ///
    /// # Errors
    ///
    /// Same as [`Converter::new`].
    pub fn with_cache(request: ConversionRequest, cache: &TableCache) -> Result<Self, ConvertError> {
        request.validate()?;

        let from = cache.load(request.from_authority, request.from_year)?;
        let to = cache.load(request.to_authority, request.to_year)?;

        // A table may omit a column its contract allows
        for (table, name_type) in [(&from, request.from_type), (&to, request.to_type)] {
            if !table.supports(name_type) {
                return Err(ConfigError::UnsupportedNameType {
                    authority: table.authority(),
                    name_type,
                }
                .into());
            }
        }

        tracing::debug!(
            from = %from.key(),
            to = %to.key(),
            from_type = %request.from_type,
            to_type = %request.to_type,
            "converter ready"
        );

        Ok(Self {
            request,
            from,
            to,
            resolver: BridgeResolver::default(),
        })
    }

    /// Replace the matcher (e.g. to tune the fuzzy threshold)
    #[must_use]
    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.resolver = BridgeResolver::new(matcher);
        self
    }

    #[must_use]
    pub fn request(&self) -> &ConversionRequest {
        &self.request
    }

    #[must_use]
    pub fn from_table(&self) -> &ReferenceTable {
        &self.from
    }

    #[must_use]
    pub fn to_table(&self) -> &ReferenceTable {
        &self.to
    }

    #[must_use]
    pub fn from_type(&self) -> NameType {
        self.request.from_type
    }

    #[must_use]
    pub fn to_type(&self) -> NameType {
        self.request.to_type
    }

    /// Convert a single token, returning the full resolution
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::NoMatch` or `ConvertError::BridgeBroken` if the
    /// token cannot be converted.
    pub fn convert_one(&self, token: &str) -> Result<Resolution, ConvertError> {
        self.resolver.resolve(
            token,
            &self.from,
            self.request.from_type,
            &self.to,
            self.request.to_type,
            self.request.strategy(),
        )
    }

    fn convert_value(&self, token: &str) -> Result<String, ConvertError> {
        self.convert_one(token).map(|r| r.value)
    }

    /// Convert a single value or a batch; the output mirrors the input shape
    pub fn convert<I: ConvertInput>(&self, input: I) -> I::Output {
        input.convert_with(self)
    }

    /// Convert a slice of tokens, preserving order
    pub fn convert_batch<S: AsRef<str> + Sync>(&self, tokens: &[S]) -> Vec<Result<String, ConvertError>> {
        #[cfg(feature = "parallel")]
        {
            if tokens.len() >= PARALLEL_BATCH_SIZE {
                use rayon::prelude::*;
                return tokens
                    .par_iter()
                    .map(|t| self.convert_value(t.as_ref()))
                    .collect();
            }
        }

        tokens.iter().map(|t| self.convert_value(t.as_ref())).collect()
    }
}

/// Input shapes accepted by [`Converter::convert`]
pub trait ConvertInput {
    type Output;

    /// The tokens in input order
    fn tokens(&self) -> Vec<&str>;

    fn convert_with(self, converter: &Converter) -> Self::Output;
}

impl ConvertInput for &str {
    type Output = Result<String, ConvertError>;

    fn tokens(&self) -> Vec<&str> {
        vec![*self]
    }

    fn convert_with(self, converter: &Converter) -> Self::Output {
        converter.convert_value(self)
    }
}

impl ConvertInput for String {
    type Output = Result<String, ConvertError>;

    fn tokens(&self) -> Vec<&str> {
        vec![self.as_str()]
    }

    fn convert_with(self, converter: &Converter) -> Self::Output {
        converter.convert_value(&self)
    }
}

impl<S: AsRef<str> + Sync> ConvertInput for Vec<S> {
    type Output = Vec<Result<String, ConvertError>>;

    fn tokens(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }

    fn convert_with(self, converter: &Converter) -> Self::Output {
        converter.convert_batch(&self)
    }
}

impl<S: AsRef<str> + Sync> ConvertInput for &[S] {
    type Output = Vec<Result<String, ConvertError>>;

    fn tokens(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }

    fn convert_with(self, converter: &Converter) -> Self::Output {
        converter.convert_batch(self)
    }
}

impl<S: AsRef<str>, const N: usize> ConvertInput for [S; N] {
    type Output = [Result<String, ConvertError>; N];

    fn tokens(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }

    fn convert_with(self, converter: &Converter) -> Self::Output {
        self.map(|t| converter.convert_value(t.as_ref()))
    }
}

impl<L, S: AsRef<str> + Sync> ConvertInput for Series<L, S> {
    type Output = Series<L, Result<String, ConvertError>>;

    fn tokens(&self) -> Vec<&str> {
        self.values().map(AsRef::as_ref).collect()
    }

    fn convert_with(self, converter: &Converter) -> Self::Output {
        let (labels, values): (Vec<L>, Vec<S>) = self.entries.into_iter().unzip();
        let results = converter.convert_batch(&values);
        labels.into_iter().zip(results).collect()
    }
}

/// An ordered sequence of labeled values
///
/// Labels are carried through conversion untouched, so a converted series
/// lines up with its input row for row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<L, V> {
    entries: Vec<(L, V)>,
}

impl<L, V> Series<L, V> {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn push(&mut self, label: L, value: V) {
        self.entries.push((label, value));
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.entries.iter().map(|(l, _)| l)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, &V)> {
        self.entries.iter().map(|(l, v)| (l, v))
    }

    /// First value carrying `label`
    pub fn get(&self, label: &L) -> Option<&V>
    where
        L: PartialEq,
    {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L, V> Default for Series<L, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, V> FromIterator<(L, V)> for Series<L, V> {
    fn from_iter<T: IntoIterator<Item = (L, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<L, V> From<Vec<(L, V)>> for Series<L, V> {
    fn from(entries: Vec<(L, V)>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Authority;
    use crate::error::BridgeGap;

    fn converter(from_type: NameType, to_type: NameType) -> Converter {
        Converter::new(ConversionRequest::new(from_type, to_type)).unwrap()
    }

    #[test]
    fn test_convert_single() {
        let c = converter(NameType::CommonName, NameType::ScientificName);
        assert_eq!(c.convert("American Robin").unwrap(), "Turdus migratorius");
        assert_eq!(
            c.convert(String::from("blue jay")).unwrap(),
            "Cyanocitta cristata"
        );
    }

    #[test]
    fn test_convert_one_reports_match() {
        let c = converter(NameType::CommonName, NameType::ScientificName);
        let resolution = c.convert_one("AMERICAN ROBIN").unwrap();
        assert_eq!(resolution.match_kind, crate::core::types::MatchKind::Soft);
        assert!(!resolution.bridged);
    }

    #[test]
    fn test_custom_fuzzy_threshold() {
        use crate::matching::engine::MatcherConfig;

        let request = ConversionRequest::new(NameType::CommonName, NameType::ScientificName).fuzzy_matching(true);
        // One deletion in fourteen characters scores about 0.93
        let lenient = Converter::new(request.clone()).unwrap();
        assert_eq!(lenient.convert("Amercan Robin").unwrap(), "Turdus migratorius");

        let strict = Converter::new(request).unwrap().with_matcher(Matcher::with_config(MatcherConfig {
            fuzzy_threshold: 0.95,
            ..MatcherConfig::default()
        }));
        assert!(matches!(
            strict.convert("Amercan Robin"),
            Err(ConvertError::NoMatch { .. })
        ));
        assert_eq!(strict.convert("American Robin").unwrap(), "Turdus migratorius");
    }

    #[test]
    fn test_hierarchy_rollup() {
        let sci = "Turdus migratorius";
        assert_eq!(converter(NameType::ScientificName, NameType::Genus).convert(sci).unwrap(), "Turdus");
        assert_eq!(converter(NameType::ScientificName, NameType::Family).convert(sci).unwrap(), "Turdidae");
        assert_eq!(
            converter(NameType::ScientificName, NameType::Order).convert(sci).unwrap(),
            "Passeriformes"
        );
    }

    #[test]
    fn test_batch_preserves_order_and_continues() {
        let c = converter(NameType::CommonName, NameType::ScientificName);
        let results = c.convert(vec!["American Robin", "Not A Bird", "Northern Cardinal"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_deref().ok(), Some("Turdus migratorius"));
        assert!(matches!(results[1], Err(ConvertError::NoMatch { .. })));
        assert_eq!(results[2].as_deref().ok(), Some("Cardinalis cardinalis"));
    }

    #[test]
    fn test_array_and_slice_shapes() {
        let c = converter(NameType::CommonName, NameType::ScientificName);

        let array: [Result<String, ConvertError>; 2] = c.convert(["Blue Jay", "American Robin"]);
        assert_eq!(array[0].as_deref().ok(), Some("Cyanocitta cristata"));

        let owned = vec![String::from("Blue Jay")];
        let slice = c.convert(owned.as_slice());
        assert_eq!(slice.len(), 1);
    }

    #[test]
    fn test_series_keeps_labels() {
        let c = converter(NameType::CommonName, NameType::ScientificName);
        let series: Series<u32, &str> = vec![(10, "Blue Jay"), (20, "Dodo"), (30, "American Robin")].into();

        let converted = c.convert(series);
        let labels: Vec<u32> = converted.labels().copied().collect();
        assert_eq!(labels, vec![10, 20, 30]);
        assert_eq!(converted.get(&30).unwrap().as_deref().ok(), Some("Turdus migratorius"));
        assert!(converted.get(&20).unwrap().is_err());
    }

    #[test]
    fn test_unsupported_type_fails_at_construction() {
        let err = Converter::new(ConversionRequest::new(NameType::FrenchName, NameType::ScientificName))
            .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Configuration(ConfigError::UnsupportedNameType { .. })
        ));
    }

    #[test]
    fn test_unknown_year_fails_at_construction() {
        let request = ConversionRequest::new(NameType::CommonName, NameType::ScientificName)
            .from_year(Some(1990));
        let err = Converter::new(request).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Configuration(ConfigError::UnknownYear { year: 1990, .. })
        ));
    }

    #[test]
    fn test_cross_authority_bridge_broken() {
        // Eurasian Blackbird is not in the IBP (North American) list
        let request = ConversionRequest::new(NameType::CommonName, NameType::AlphaCode4)
            .to_authority(Authority::Ibp);
        let c = Converter::new(request).unwrap();
        let err = c.convert("Eurasian Blackbird").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::BridgeBroken {
                gap: BridgeGap::NoCounterpart,
                ..
            }
        ));
    }

    #[test]
    fn test_year_to_year_bridge() {
        let request = ConversionRequest::new(NameType::SpeciesCode, NameType::ScientificName)
            .from_authority(Authority::Ebird)
            .from_year(Some(2023))
            .to_year(Some(2024));
        let c = Converter::new(request).unwrap();

        // Renamed between editions, so the 2023 name has no 2024 counterpart
        let err = c.convert("coohaw").unwrap_err();
        assert!(matches!(err, ConvertError::BridgeBroken { .. }));
        assert_eq!(c.convert("amerob").unwrap(), "Turdus migratorius");
    }
}
