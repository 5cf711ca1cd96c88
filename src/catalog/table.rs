use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::index::MatchIndex;
use crate::core::record::TaxonRecord;
use crate::core::types::{Authority, NameType, TableKey};
use crate::parsing::taxonomy::{parse_taxonomy_text, ParseError, ParsedTable};

/// One authority's taxonomy for one year, with an index per supported column
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct ReferenceTable {
    key: TableKey,

    /// All records in table order
    records: Vec<Arc<TaxonRecord>>,

    /// Index: name type -> column index (only supported name types)
    indexes: HashMap<NameType, MatchIndex>,
}

impl ReferenceTable {
    /// Build a table from parsed records
    pub fn new(key: TableKey, records: Vec<TaxonRecord>, name_types: &[NameType]) -> Self {
        let records: Vec<Arc<TaxonRecord>> = records.into_iter().map(Arc::new).collect();
        let schema = key.authority.schema();

        let indexes = name_types
            .iter()
            .copied()
            .filter(|nt| schema.supports(*nt))
            .map(|nt| (nt, MatchIndex::build(nt, &records)))
            .collect();

        Self {
            key,
            records,
            indexes,
        }
    }

    /// Parse ingestion output text into a table
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the CSV is malformed or lacks a `scientific_name` column.
    pub fn from_csv(key: TableKey, text: &str) -> Result<Self, ParseError> {
        let ParsedTable {
            records,
            name_types,
        } = parse_taxonomy_text(text, key.authority.schema())?;
        Ok(Self::new(key, records, &name_types))
    }

    #[must_use]
    pub fn key(&self) -> TableKey {
        self.key
    }

    #[must_use]
    pub fn authority(&self) -> Authority {
        self.key.authority
    }

    #[must_use]
    pub fn year(&self) -> u16 {
        self.key.year
    }

    /// Whether this table can answer queries on `name_type`
    #[must_use]
    pub fn supports(&self, name_type: NameType) -> bool {
        self.indexes.contains_key(&name_type)
    }

    /// Supported name types in canonical order
    #[must_use]
    pub fn name_types(&self) -> Vec<NameType> {
        NameType::ALL
            .into_iter()
            .filter(|nt| self.supports(*nt))
            .collect()
    }

    /// Index over a column, or None if the name type is unsupported
    #[must_use]
    pub fn index(&self, name_type: NameType) -> Option<&MatchIndex> {
        self.indexes.get(&name_type)
    }

    /// (value, record) pairs of one column in table order; empty cells are skipped
    ///
    /// Returns None for an unsupported name type, never an empty sequence.
    #[must_use]
    pub fn lookup_column(&self, name_type: NameType) -> Option<Vec<(&str, &Arc<TaxonRecord>)>> {
        if !self.supports(name_type) {
            return None;
        }
        Some(
            self.records
                .iter()
                .filter_map(|r| r.get(name_type).map(|v| (v, r)))
                .collect(),
        )
    }

    /// Get a record by its scientific name
    #[must_use]
    pub fn get(&self, scientific_name: &str) -> Option<&Arc<TaxonRecord>> {
        self.index(NameType::ScientificName)
            .and_then(|idx| idx.exact(scientific_name))
    }

    #[must_use]
    pub fn records(&self) -> &[Arc<TaxonRecord>] {
        &self.records
    }

    /// Number of records in table
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EBIRD_CSV: &str = "scientific_name,ebird_common_name,ebird_ebird_code,ebird_order,ebird_family,genus
Turdus migratorius,American Robin,amerob,Passeriformes,Turdidae,Turdus
Cyanocitta cristata,Blue Jay,blujay,Passeriformes,Corvidae,Cyanocitta
";

    fn table() -> ReferenceTable {
        ReferenceTable::from_csv(TableKey::new(Authority::Ebird, 2024), EBIRD_CSV).unwrap()
    }

    #[test]
    fn test_supports() {
        let table = table();
        assert!(table.supports(NameType::SpeciesCode));
        assert!(table.supports(NameType::Family));
        assert!(!table.supports(NameType::AlphaCode4));
        assert!(!table.supports(NameType::FrenchName));
    }

    #[test]
    fn test_lookup_column() {
        let table = table();
        let column = table.lookup_column(NameType::SpeciesCode).unwrap();
        let values: Vec<&str> = column.iter().map(|(v, _)| *v).collect();
        assert_eq!(values, vec!["amerob", "blujay"]);
        assert_eq!(column[1].1.scientific_name, "Cyanocitta cristata");

        assert!(table.lookup_column(NameType::AlphaCode4).is_none());
    }

    #[test]
    fn test_get_by_scientific_name() {
        let table = table();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("Turdus migratorius").unwrap().common_name.as_deref(),
            Some("American Robin")
        );
        assert!(table.get("Turdus merula").is_none());
    }

    #[test]
    fn test_unsupported_columns_in_file_are_ignored() {
        // An alpha column in an eBird file is not part of the eBird contract
        let csv = "scientific_name,ibp_alpha\nTurdus migratorius,AMRO\n";
        let table = ReferenceTable::from_csv(TableKey::new(Authority::Ebird, 2024), csv).unwrap();
        assert!(!table.supports(NameType::AlphaCode4));
        assert!(!table.supports(NameType::SpeciesCode));
        assert!(table.supports(NameType::ScientificName));
    }
}
