use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::record::TaxonRecord;
use crate::core::types::NameType;
use crate::matching::normalize::normalize;

/// A normalized column value ready for fuzzy scanning
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Soft-normalized value
    pub key: String,
    /// Length of `key` in chars, cached for the length pre-filter
    pub len: usize,
    pub record: Arc<TaxonRecord>,
}

/// Lookup structure over one column of a reference table
///
/// Built once when the table is loaded and never modified. When several
/// records share a value (a genus, a family) the first one in table order wins.
#[derive(Debug)]
pub struct MatchIndex {
    name_type: NameType,

    /// Index: raw value -> record
    exact: HashMap<String, Arc<TaxonRecord>>,

    /// Index: normalized value -> record
    soft: HashMap<String, Arc<TaxonRecord>>,

    /// Distinct normalized values, sorted by key
    candidates: Vec<Candidate>,
}

impl MatchIndex {
    /// Build the index for `name_type` over the table's records
    pub fn build(name_type: NameType, records: &[Arc<TaxonRecord>]) -> Self {
        let mut exact = HashMap::new();
        let mut soft = HashMap::new();

        for record in records {
            let Some(value) = record.get(name_type) else {
                continue;
            };

            exact
                .entry(value.to_string())
                .or_insert_with(|| Arc::clone(record));

            let key = normalize(value);
            if key.is_empty() {
                continue;
            }
            if let Entry::Vacant(slot) = soft.entry(key) {
                slot.insert(Arc::clone(record));
            }
        }

        let mut candidates: Vec<Candidate> = soft
            .iter()
            .map(|(key, record)| Candidate {
                key: key.clone(),
                len: key.chars().count(),
                record: Arc::clone(record),
            })
            .collect();
        candidates.sort_by(|a, b| a.key.cmp(&b.key));

        Self {
            name_type,
            exact,
            soft,
            candidates,
        }
    }

    #[must_use]
    pub fn name_type(&self) -> NameType {
        self.name_type
    }

    /// Look up a value exactly as stored
    #[must_use]
    pub fn exact(&self, value: &str) -> Option<&Arc<TaxonRecord>> {
        self.exact.get(value)
    }

    /// Look up a value after soft normalization of the query
    #[must_use]
    pub fn soft(&self, value: &str) -> Option<&Arc<TaxonRecord>> {
        self.soft.get(&normalize(value))
    }

    /// Look up an already-normalized key
    #[must_use]
    pub fn soft_normalized(&self, key: &str) -> Option<&Arc<TaxonRecord>> {
        self.soft.get(key)
    }

    /// All distinct normalized values, sorted lexicographically
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of distinct raw values
    #[must_use]
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}
