//! Type-inferring entry points.
//!
//! These take raw names of unknown kind, work out which authority and name
//! type they most likely come from, then convert them with a [`Converter`].
//! Only one source combination is chosen per call: a batch mixing common names
//! and alpha codes is converted from whichever kind matched more names.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::store::{CatalogError, TableCache};
use crate::catalog::table::ReferenceTable;
use crate::convert::converter::{ConvertInput, Converter};
use crate::convert::request::ConversionRequest;
use crate::core::types::{Authority, MatchKind, NameType};
use crate::error::{ConfigError, ConvertError};
use crate::matching::engine::{MatchStrategy, Matcher};

/// The source combination that best explains a set of names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inference {
    pub authority: Authority,
    pub year: u16,
    pub name_type: NameType,

    /// `Fuzzy` if the names were only recognized with fuzzy matching,
    /// `Soft` if any name needed normalization, `Exact` otherwise
    pub match_kind: MatchKind,

    /// Distinct names recognized under this combination
    pub matched: usize,

    /// Distinct names not recognized, in input order
    pub unmatched: Vec<String>,
}

/// What the convenience functions do with names the inference could not place
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OnUnmatched {
    /// Convert anyway; unmatched names come back as errors in their slots
    #[default]
    Ignore,
    /// Same as `Ignore`, plus a warning with the count
    Warn,
    /// Fail before converting anything
    Error,
}

/// Options shared by [`scientific`], [`common`], [`alpha`] and [`species_code`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOptions {
    /// Authority for the output names; each function has its own default
    pub target_authority: Option<Authority>,
    /// Year of the target taxonomy (`None` = latest)
    pub year: Option<u16>,
    pub soft_matching: bool,
    pub fuzzy_matching: bool,
    pub on_unmatched: OnUnmatched,
}

impl Default for GuessOptions {
    fn default() -> Self {
        Self {
            target_authority: None,
            year: None,
            soft_matching: true,
            fuzzy_matching: false,
            on_unmatched: OnUnmatched::Ignore,
        }
    }
}

/// Work out which (authority, year, name type) the names come from
///
/// Every authority's latest table is tried, in priority order, on each
/// identifying name type it publishes. The combination recognizing the most
/// distinct names wins; ties go to the earlier combination, so a single name
/// picks the first exact or soft hit with avilist preferred. Only if nothing is
/// recognized, and `strategy` allows it, is the scan repeated with fuzzy matching.
///
/// # Errors
///
/// Returns `ConvertError::NoMatch` if no combination recognizes any name, and
/// `ConvertError::DataUnavailable` if a table fails to load.
pub fn determine_name_type<S: AsRef<str>>(
    cache: &TableCache,
    names: &[S],
    strategy: MatchStrategy,
) -> Result<Inference, ConvertError> {
    let tokens = distinct_tokens(names);
    let Some(first) = tokens.first() else {
        return Err(ConvertError::NoMatch {
            token: String::new(),
            name_type: NameType::ScientificName,
            authority: Authority::Avilist,
        });
    };

    let tables = latest_tables(cache)?;
    let matcher = Matcher::new();

    let found = scan(&tables, &tokens, &matcher, strategy.without_fuzzy()).or_else(|| {
        if strategy.fuzzy {
            tracing::debug!("no exact or soft hits, retrying inference with fuzzy matching");
            scan(&tables, &tokens, &matcher, strategy)
        } else {
            None
        }
    });

    found.ok_or_else(|| ConvertError::NoMatch {
        token: (*first).to_string(),
        name_type: NameType::ScientificName,
        authority: Authority::Avilist,
    })
}

/// Non-blank names, trimmed and deduplicated, in first-seen order
fn distinct_tokens<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty() && seen.insert(*n))
        .collect()
}

/// Latest table of every authority the cache has data for, in priority order
fn latest_tables(cache: &TableCache) -> Result<Vec<Arc<ReferenceTable>>, ConvertError> {
    let mut tables = Vec::new();
    for authority in Authority::ALL {
        match cache.load(authority, None) {
            Ok(table) => tables.push(table),
            Err(CatalogError::UnsupportedAuthority(_)) => {
                tracing::debug!(%authority, "no data, skipped during inference");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(tables)
}

fn scan(
    tables: &[Arc<ReferenceTable>],
    tokens: &[&str],
    matcher: &Matcher,
    strategy: MatchStrategy,
) -> Option<Inference> {
    let mut best: Option<Inference> = None;

    for table in tables {
        for name_type in NameType::IDENTIFYING {
            let Some(index) = table.index(name_type) else {
                continue;
            };

            let mut matched = 0;
            let mut kind = MatchKind::Exact;
            let mut unmatched = Vec::new();
            for token in tokens {
                let result = matcher.resolve(token, index, strategy);
                match result.kind {
                    MatchKind::None => unmatched.push((*token).to_string()),
                    MatchKind::Exact => matched += 1,
                    MatchKind::Soft | MatchKind::Fuzzy => {
                        matched += 1;
                        if kind == MatchKind::Exact || result.kind == MatchKind::Fuzzy {
                            kind = result.kind;
                        }
                    }
                }
            }

            if matched > best.as_ref().map_or(0, |b| b.matched) {
                best = Some(Inference {
                    authority: table.authority(),
                    year: table.year(),
                    name_type,
                    match_kind: kind,
                    matched,
                    unmatched,
                });
                if matched == tokens.len() {
                    return best;
                }
            }
        }
    }

    best
}

/// Infer the source of `names` and convert them to `to_type`
///
/// `default_authority` is used when `options.target_authority` is unset.
///
/// # Errors
///
/// - `ConvertError::Configuration` if the target authority does not publish `to_type`
/// - `ConvertError::NoMatch` if the source cannot be inferred, or if
///   `options.on_unmatched` is `Error` and some names were not recognized
/// - `ConvertError::DataUnavailable` if a table fails to load
pub fn guess<I: ConvertInput>(
    cache: &TableCache,
    names: I,
    to_type: NameType,
    default_authority: Authority,
    options: &GuessOptions,
) -> Result<I::Output, ConvertError> {
    let target = options.target_authority.unwrap_or(default_authority);
    if !target.supports(to_type) {
        return Err(ConfigError::UnsupportedNameType {
            authority: target,
            name_type: to_type,
        }
        .into());
    }

    let strategy = MatchStrategy::new(options.soft_matching, options.fuzzy_matching);
    let inference = determine_name_type(cache, &names.tokens(), strategy)?;

    if let Some(first) = inference.unmatched.first() {
        match options.on_unmatched {
            OnUnmatched::Ignore => {}
            OnUnmatched::Warn => tracing::warn!(
                count = inference.unmatched.len(),
                name_type = %inference.name_type,
                authority = %inference.authority,
                year = inference.year,
                "names could not be matched"
            ),
            OnUnmatched::Error => {
                return Err(ConvertError::NoMatch {
                    token: first.clone(),
                    name_type: inference.name_type,
                    authority: inference.authority,
                })
            }
        }
    }

    let request = ConversionRequest::new(inference.name_type, to_type)
        .from_authority(inference.authority)
        .from_year(Some(inference.year))
        .to_authority(target)
        .to_year(options.year)
        .soft_matching(options.soft_matching)
        .fuzzy_matching(options.fuzzy_matching);
    let converter = Converter::with_cache(request, cache)?;
    Ok(converter.convert(names))
}

/// Convert names of any kind to scientific names (avilist by default)
///
/// ```rust
/// use birdnames::convert::infer::{scientific, GuessOptions};
///
/// let names = scientific(vec!["AMRO", "BLJA"], &GuessOptions::default()).unwrap();
/// assert_eq!(names[0].as_deref().ok(), Some("Turdus migratorius"));
/// ```
///
/// # Errors
///
/// See [`guess`].
pub fn scientific<I: ConvertInput>(names: I, options: &GuessOptions) -> Result<I::Output, ConvertError> {
    guess(
        &TableCache::shared_embedded(),
        names,
        NameType::ScientificName,
        Authority::Avilist,
        options,
    )
}

/// Convert names of any kind to English common names (avilist by default)
///
/// # Errors
///
/// See [`guess`].
pub fn common<I: ConvertInput>(names: I, options: &GuessOptions) -> Result<I::Output, ConvertError> {
    guess(
        &TableCache::shared_embedded(),
        names,
        NameType::CommonName,
        Authority::Avilist,
        options,
    )
}

/// Convert names of any kind to 4-letter alpha codes (bbl by default)
///
/// # Errors
///
/// See [`guess`].
pub fn alpha<I: ConvertInput>(names: I, options: &GuessOptions) -> Result<I::Output, ConvertError> {
    guess(
        &TableCache::shared_embedded(),
        names,
        NameType::AlphaCode4,
        Authority::Bbl,
        options,
    )
}

/// Convert names of any kind to eBird species codes
///
/// # Errors
///
/// See [`guess`].
pub fn species_code<I: ConvertInput>(names: I, options: &GuessOptions) -> Result<I::Output, ConvertError> {
    guess(
        &TableCache::shared_embedded(),
        names,
        NameType::SpeciesCode,
        Authority::Ebird,
        options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(names: &[&str]) -> Inference {
        determine_name_type(&TableCache::shared_embedded(), names, MatchStrategy::default()).unwrap()
    }

    #[test]
    fn test_infer_common_names_prefers_avilist() {
        let inference = infer(&["American Robin", "Blue Jay"]);
        assert_eq!(inference.authority, Authority::Avilist);
        assert_eq!(inference.name_type, NameType::CommonName);
        assert_eq!(inference.year, 2025);
        assert_eq!(inference.match_kind, MatchKind::Exact);
        assert!(inference.unmatched.is_empty());
    }

    #[test]
    fn test_infer_majority_wins() {
        // Three species codes outvote one avilist common name
        let inference = infer(&["amerob", "blujay", "norcar", "American Robin"]);
        assert_eq!(inference.authority, Authority::Ebird);
        assert_eq!(inference.name_type, NameType::SpeciesCode);
        assert_eq!(inference.matched, 3);
        assert_eq!(inference.unmatched, vec!["American Robin".to_string()]);
    }

    #[test]
    fn test_infer_alpha_codes() {
        let inference = infer(&["AMRO", "BLJA"]);
        assert_eq!(inference.authority, Authority::Ibp);
        assert_eq!(inference.name_type, NameType::AlphaCode4);
    }

    #[test]
    fn test_infer_french_names() {
        let inference = infer(&["Merle d'Amérique"]);
        assert_eq!(inference.authority, Authority::Bbl);
        assert_eq!(inference.name_type, NameType::FrenchName);
    }

    #[test]
    fn test_infer_soft_kind() {
        let inference = infer(&["american robin"]);
        assert_eq!(inference.match_kind, MatchKind::Soft);
    }

    #[test]
    fn test_infer_fuzzy_fallback_only_when_enabled() {
        let cache = TableCache::shared_embedded();
        assert!(determine_name_type(&cache, &["Amercan Robin"], MatchStrategy::default()).is_err());

        let inference = determine_name_type(&cache, &["Amercan Robin"], MatchStrategy::new(true, true)).unwrap();
        assert_eq!(inference.match_kind, MatchKind::Fuzzy);
        assert_eq!(inference.name_type, NameType::CommonName);
    }

    #[test]
    fn test_infer_nothing_recognized() {
        let cache = TableCache::shared_embedded();
        let err = determine_name_type(&cache, &["zzzz", "", "  "], MatchStrategy::default()).unwrap_err();
        assert!(matches!(err, ConvertError::NoMatch { ref token, .. } if token == "zzzz"));

        let empty: [&str; 0] = [];
        assert!(determine_name_type(&cache, &empty, MatchStrategy::default()).is_err());
    }

    #[test]
    fn test_scientific_from_codes() {
        let results = scientific(vec!["AMRO", "BLJA", "XXXX"], &GuessOptions::default()).unwrap();
        assert_eq!(results[0].as_deref().ok(), Some("Turdus migratorius"));
        assert_eq!(results[1].as_deref().ok(), Some("Cyanocitta cristata"));
        assert!(results[2].is_err());
    }

    #[test]
    fn test_alpha_defaults_to_bbl() {
        let code = alpha("Northern Cardinal", &GuessOptions::default()).unwrap();
        assert_eq!(code.unwrap(), "NOCA");
    }

    #[test]
    fn test_common_and_species_code() {
        let name = common("Turdus migratorius", &GuessOptions::default()).unwrap();
        assert_eq!(name.unwrap(), "American Robin");

        let code = species_code("Blue Jay", &GuessOptions::default()).unwrap();
        assert_eq!(code.unwrap(), "blujay");
    }

    #[test]
    fn test_on_unmatched_error() {
        let options = GuessOptions {
            on_unmatched: OnUnmatched::Error,
            ..GuessOptions::default()
        };
        let err = scientific(vec!["AMRO", "QQQQ"], &options).unwrap_err();
        assert!(matches!(err, ConvertError::NoMatch { ref token, .. } if token == "QQQQ"));
    }

    #[test]
    fn test_target_without_output_type() {
        let options = GuessOptions {
            target_authority: Some(Authority::Avilist),
            ..GuessOptions::default()
        };
        let err = alpha("Blue Jay", &options).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Configuration(ConfigError::UnsupportedNameType {
                authority: Authority::Avilist,
                name_type: NameType::AlphaCode4,
            })
        ));
    }
}
