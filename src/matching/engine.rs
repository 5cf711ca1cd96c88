use std::sync::Arc;

use crate::catalog::index::{Candidate, MatchIndex};
use crate::core::record::TaxonRecord;
use crate::core::types::MatchKind;
use crate::matching::normalize::normalize;
use crate::matching::similarity::{can_exceed, ratio};
use crate::utils::validation::is_blank;

/// Result of resolving one token against one column
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// The matched record, if any
    pub record: Option<Arc<TaxonRecord>>,

    /// 1.0 for exact and soft matches, the similarity score for fuzzy matches
    pub confidence: f64,

    pub kind: MatchKind,
}

impl MatchResult {
    fn hit(record: &Arc<TaxonRecord>, kind: MatchKind, confidence: f64) -> Self {
        Self {
            record: Some(Arc::clone(record)),
            confidence,
            kind,
        }
    }

    #[must_use]
    pub fn none() -> Self {
        Self {
            record: None,
            confidence: 0.0,
            kind: MatchKind::None,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.record.is_some()
    }
}

/// Which strategies beyond exact matching are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStrategy {
    pub soft: bool,
    pub fuzzy: bool,
}

impl MatchStrategy {
    pub const EXACT: Self = Self {
        soft: false,
        fuzzy: false,
    };

    #[must_use]
    pub fn new(soft: bool, fuzzy: bool) -> Self {
        Self { soft, fuzzy }
    }

    /// Same strategy with fuzzy matching turned off
    #[must_use]
    pub fn without_fuzzy(self) -> Self {
        Self {
            soft: self.soft,
            fuzzy: false,
        }
    }
}

impl Default for MatchStrategy {
    fn default() -> Self {
        Self {
            soft: true,
            fuzzy: false,
        }
    }
}

/// Default acceptance threshold for fuzzy matches (score must exceed it)
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Columns at least this large are scanned in parallel (with the `parallel` feature)
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2_000;

/// Configuration for the matcher
#[derive(Debug, Clone, Copy)]
pub struct MatcherConfig {
    /// A fuzzy candidate is accepted only if its score is strictly greater
    pub fuzzy_threshold: f64,
    /// Minimum candidate count before the fuzzy scan goes parallel
    pub parallel_threshold: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Resolves tokens against a column index: exact, then soft, then fuzzy
///
/// The first strategy that succeeds wins. Fuzzy matching scans every
/// candidate in the column and is the only step whose cost grows with table
/// size; it never runs unless enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Resolve a token against an index using the enabled strategies
    #[must_use]
    pub fn resolve(&self, token: &str, index: &MatchIndex, strategy: MatchStrategy) -> MatchResult {
        if is_blank(token) {
            return MatchResult::none();
        }

        // Step 1: exact value as stored
        if let Some(record) = index.exact(token) {
            return MatchResult::hit(record, MatchKind::Exact, 1.0);
        }

        // Exact matching tolerates surrounding whitespace
        let trimmed = token.trim();
        if trimmed.len() != token.len() {
            if let Some(record) = index.exact(trimmed) {
                return MatchResult::hit(record, MatchKind::Exact, 1.0);
            }
        }

        if !strategy.soft && !strategy.fuzzy {
            return MatchResult::none();
        }

        let key = normalize(token);
        if key.is_empty() {
            return MatchResult::none();
        }

        // Step 2: soft normalization
        if strategy.soft {
            if let Some(record) = index.soft_normalized(&key) {
                return MatchResult::hit(record, MatchKind::Soft, 1.0);
            }
        }

        // Step 3: best edit-distance candidate
        if strategy.fuzzy {
            if let Some((candidate, score)) = self.best_candidate(&key, index.candidates()) {
                tracing::trace!(token, candidate = %candidate.key, score, "fuzzy match");
                return MatchResult::hit(&candidate.record, MatchKind::Fuzzy, score);
            }
        }

        MatchResult::none()
    }

    /// Highest-scoring candidate above the threshold.
    ///
    /// Candidates are sorted by key, so keeping only strictly better scores
    /// picks the lexicographically smallest key among ties.
    fn best_candidate<'a>(&self, key: &str, candidates: &'a [Candidate]) -> Option<(&'a Candidate, f64)> {
        let threshold = self.config.fuzzy_threshold;
        let key_len = key.chars().count();

        #[cfg(feature = "parallel")]
        {
            if candidates.len() >= self.config.parallel_threshold {
                return best_candidate_parallel(key, key_len, threshold, candidates);
            }
        }

        let mut best: Option<(&Candidate, f64)> = None;
        for candidate in candidates {
            if !can_exceed(key_len, candidate.len, threshold) {
                continue;
            }
            let score = ratio(key, &candidate.key);
            if score > threshold && best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }
        best
    }
}

#[cfg(feature = "parallel")]
fn best_candidate_parallel<'a>(
    key: &str,
    key_len: usize,
    threshold: f64,
    candidates: &'a [Candidate],
) -> Option<(&'a Candidate, f64)> {
    use rayon::prelude::*;

    candidates
        .par_iter()
        .filter(|c| can_exceed(key_len, c.len, threshold))
        .map(|c| (c, ratio(key, &c.key)))
        .filter(|(_, score)| *score > threshold)
        .reduce_with(|a, b| {
            // Higher score first, then smaller key: same order as the sequential scan
            match a.1.partial_cmp(&b.1) {
                Some(std::cmp::Ordering::Greater) => a,
                Some(std::cmp::Ordering::Less) => b,
                _ => {
                    if a.0.key <= b.0.key {
                        a
                    } else {
                        b
                    }
                }
            }
        })
}
