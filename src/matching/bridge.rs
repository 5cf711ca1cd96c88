use std::sync::Arc;

use serde::Serialize;

use crate::catalog::store::TableCache;
use crate::catalog::table::ReferenceTable;
use crate::convert::request::ConversionRequest;
use crate::core::record::TaxonRecord;
use crate::core::types::{MatchKind, NameType};
use crate::error::{BridgeGap, ConfigError, ConvertError};
use crate::matching::engine::{MatchStrategy, Matcher};

/// A successfully converted token
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// The requested output value
    pub value: String,

    /// Record the token resolved to in the source table
    pub from_record: Arc<TaxonRecord>,

    /// Record the value was read from (same as `from_record` without a bridge)
    pub to_record: Arc<TaxonRecord>,

    /// How the token matched in the source table
    pub match_kind: MatchKind,

    /// Confidence of the source match
    pub confidence: f64,

    /// Whether the scientific name was used to cross into another table
    pub bridged: bool,
}

/// Composes lookups in two tables through the shared scientific name
#[derive(Debug, Clone, Copy, Default)]
pub struct BridgeResolver {
    matcher: Matcher,
}

impl BridgeResolver {
    #[must_use]
    pub fn new(matcher: Matcher) -> Self {
        Self { matcher }
    }

    /// Convert a token from `from_type` in `from` to `to_type` in `to`.
    ///
    /// When both tables are the same, `to_type` is read straight off the
    /// matched record. Otherwise the record's scientific name is looked up in
    /// `to` (exact, then soft if enabled; never fuzzy).
    ///
    /// # Errors
    ///
    /// - `ConvertError::Configuration` if either table lacks the name type
    /// - `ConvertError::NoMatch` if the token is not found in `from`
    /// - `ConvertError::BridgeBroken` if `to` has no counterpart or no value for it
    pub fn resolve(
        &self,
        token: &str,
        from: &ReferenceTable,
        from_type: NameType,
        to: &ReferenceTable,
        to_type: NameType,
        strategy: MatchStrategy,
    ) -> Result<Resolution, ConvertError> {
        let from_index = from
            .index(from_type)
            .ok_or(ConfigError::UnsupportedNameType {
                authority: from.authority(),
                name_type: from_type,
            })?;
        if !to.supports(to_type) {
            return Err(ConfigError::UnsupportedNameType {
                authority: to.authority(),
                name_type: to_type,
            }
            .into());
        }

        // Step (a): resolve the token in the source table
        let matched = self.matcher.resolve(token, from_index, strategy);
        let Some(from_record) = matched.record else {
            return Err(ConvertError::NoMatch {
                token: token.to_string(),
                name_type: from_type,
                authority: from.authority(),
            });
        };

        // Steps (b) and (c): cross to the target table on the scientific name
        let same_table = from.key() == to.key();
        let to_record = if same_table {
            Arc::clone(&from_record)
        } else {
            self.counterpart(&from_record, to, strategy)?
        };

        // Step (d): read the requested column
        let Some(value) = to_record.get(to_type) else {
            return Err(ConvertError::BridgeBroken {
                scientific_name: to_record.scientific_name.clone(),
                authority: to.authority(),
                gap: BridgeGap::MissingValue(to_type),
            });
        };

        Ok(Resolution {
            value: value.to_string(),
            to_record: Arc::clone(&to_record),
            from_record,
            match_kind: matched.kind,
            confidence: matched.confidence,
            bridged: !same_table,
        })
    }

    /// Find the record for `record`'s scientific name in another table
    fn counterpart(
        &self,
        record: &TaxonRecord,
        to: &ReferenceTable,
        strategy: MatchStrategy,
    ) -> Result<Arc<TaxonRecord>, ConvertError> {
        let broken = || ConvertError::BridgeBroken {
            scientific_name: record.scientific_name.clone(),
            authority: to.authority(),
            gap: BridgeGap::NoCounterpart,
        };

        let Some(index) = to.index(NameType::ScientificName) else {
            return Err(broken());
        };

        let bridged = self
            .matcher
            .resolve(&record.scientific_name, index, strategy.without_fuzzy());
        bridged.record.ok_or_else(|| {
            tracing::debug!(
                scientific_name = %record.scientific_name,
                table = %to.key(),
                "no counterpart in target table"
            );
            broken()
        })
    }

    /// Convert one token as described by a request, loading tables from the cache
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Configuration` if the request is invalid for the
    /// available data, `ConvertError::DataUnavailable` if a table cannot be
    /// loaded, and the per-token errors of [`BridgeResolver::resolve`].
    pub fn convert_cross_authority(
        &self,
        cache: &TableCache,
        token: &str,
        request: &ConversionRequest,
    ) -> Result<Resolution, ConvertError> {
        request.validate()?;
        let from = cache.load(request.from_authority, request.from_year)?;
        let to = cache.load(request.to_authority, request.to_year)?;
        self.resolve(
            token,
            &from,
            request.from_type,
            &to,
            request.to_type,
            request.strategy(),
        )
    }
}
