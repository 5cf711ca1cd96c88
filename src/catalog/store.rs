use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::source::{DirectorySource, EmbeddedSource, TableSource};
use crate::catalog::table::ReferenceTable;
use crate::core::types::{Authority, NameType, TableKey};
use crate::parsing::taxonomy::ParseError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No taxonomy data available for {0}")]
    UnsupportedAuthority(Authority),

    #[error("No {authority} taxonomy for {year} (available: {})", format_years(.available))]
    UnsupportedYear {
        authority: Authority,
        year: u16,
        available: Vec<u16>,
    },

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {key} taxonomy: {source}")]
    ParseError {
        key: TableKey,
        #[source]
        source: ParseError,
    },
}

fn format_years(years: &[u16]) -> String {
    if years.is_empty() {
        return "none".to_string();
    }
    years
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One entry of the listing interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyInfo {
    pub authority: Authority,
    pub year: u16,
    /// Name types the authority's column contract declares
    pub name_types: Vec<NameType>,
}

type Slot = Arc<Mutex<Option<Arc<ReferenceTable>>>>;

/// Lazily loaded, shared reference tables
///
/// Each (authority, year) is parsed at most once, on first use, under a
/// per-key lock; afterwards every caller shares the same immutable table.
/// Load failures are not cached.
#[derive(Debug)]
pub struct TableCache {
    source: Box<dyn TableSource>,

    /// Index: table key -> load slot
    slots: Mutex<HashMap<TableKey, Slot>>,
}

impl TableCache {
    /// Create a cache over any table source
    pub fn new(source: impl TableSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Cache over the sample tables compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(EmbeddedSource)
    }

    /// Process-wide cache over the embedded tables
    #[must_use]
    pub fn shared_embedded() -> Arc<Self> {
        static SHARED: OnceLock<Arc<TableCache>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::embedded())))
    }

    /// Cache over an ingestion output directory
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ReadError` if the directory cannot be listed.
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        Ok(Self::new(DirectorySource::open(dir)?))
    }

    /// Years available for an authority, ascending
    #[must_use]
    pub fn years(&self, authority: Authority) -> Vec<u16> {
        let mut years: Vec<u16> = self
            .source
            .available()
            .into_iter()
            .filter(|k| k.authority == authority)
            .map(|k| k.year)
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Most recent year available for an authority
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnsupportedAuthority` if the source has no table for it.
    pub fn latest_year(&self, authority: Authority) -> Result<u16, CatalogError> {
        self.years(authority)
            .last()
            .copied()
            .ok_or(CatalogError::UnsupportedAuthority(authority))
    }

    /// Resolve an optional year to a concrete table key, without loading
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnsupportedAuthority` or `CatalogError::UnsupportedYear`
    /// if the source has no matching table.
    pub fn resolve_key(&self, authority: Authority, year: Option<u16>) -> Result<TableKey, CatalogError> {
        let years = self.years(authority);
        if years.is_empty() {
            return Err(CatalogError::UnsupportedAuthority(authority));
        }
        match year {
            None => Ok(TableKey::new(authority, years[years.len() - 1])),
            Some(y) if years.contains(&y) => Ok(TableKey::new(authority, y)),
            Some(y) => Err(CatalogError::UnsupportedYear {
                authority,
                year: y,
                available: years,
            }),
        }
    }

    /// Load a table, parsing it on first use; `year = None` selects the latest
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if no matching table exists or it cannot be read or parsed.
    pub fn load(&self, authority: Authority, year: Option<u16>) -> Result<Arc<ReferenceTable>, CatalogError> {
        let key = self.resolve_key(authority, year)?;
        self.load_key(key)
    }

    /// Load a table by exact key
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the table cannot be read or parsed.
    pub fn load_key(&self, key: TableKey) -> Result<Arc<ReferenceTable>, CatalogError> {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(key).or_default())
        };

        // Only this key's loaders wait here; other keys proceed independently
        let mut guard = slot.lock();
        if let Some(table) = guard.as_ref() {
            return Ok(Arc::clone(table));
        }

        let start = Instant::now();
        let text = self.source.read(key)?;
        let table = ReferenceTable::from_csv(key, &text)
            .map_err(|source| CatalogError::ParseError { key, source })?;

        tracing::debug!(
            table = %key,
            records = table.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "loaded reference table"
        );

        let table = Arc::new(table);
        *guard = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Number of tables parsed so far
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        let slots: Vec<Slot> = self.slots.lock().values().cloned().collect();
        slots.iter().filter(|s| s.lock().is_some()).count()
    }

    /// Enumerate every (authority, year) with its declared name types
    ///
    /// Reads only the source's inventory; nothing is loaded.
    #[must_use]
    pub fn list_taxonomies(&self) -> Vec<TaxonomyInfo> {
        let mut keys = self.source.available();
        keys.sort();
        keys.dedup();
        keys.into_iter()
            .map(|key| TaxonomyInfo {
                authority: key.authority,
                year: key.year,
                name_types: key.authority.schema().name_types(),
            })
            .collect()
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_latest() {
        let cache = TableCache::embedded();
        let table = cache.load(Authority::Ebird, None).unwrap();
        assert_eq!(table.year(), 2024);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_load_specific_year() {
        let cache = TableCache::embedded();
        let table = cache.load(Authority::Ebird, Some(2023)).unwrap();
        assert_eq!(table.year(), 2023);
        assert!(table.get("Accipiter cooperii").is_some());
    }

    #[test]
    fn test_unsupported_year() {
        let cache = TableCache::embedded();
        let err = cache.load(Authority::Ibp, Some(1999)).unwrap_err();
        match err {
            CatalogError::UnsupportedYear {
                authority,
                year,
                available,
            } => {
                assert_eq!(authority, Authority::Ibp);
                assert_eq!(year, 1999);
                assert_eq!(available, vec![2024]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_is_cached() {
        let cache = TableCache::embedded();
        assert_eq!(cache.loaded_count(), 0);

        let a = cache.load(Authority::Ibp, None).unwrap();
        let b = cache.load(Authority::Ibp, Some(2024)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.loaded_count(), 1);
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        let cache = Arc::new(TableCache::embedded());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.load(Authority::Avilist, None).unwrap())
            })
            .collect();
        let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for t in &tables[1..] {
            assert!(Arc::ptr_eq(&tables[0], t));
        }
        assert_eq!(cache.loaded_count(), 1);
    }

    #[test]
    fn test_missing_authority_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ibp_2024_taxonomy.csv"),
            "scientific_name,ibp_alpha\nTurdus migratorius,AMRO\n",
        )
        .unwrap();
        let cache = TableCache::from_dir(dir.path()).unwrap();

        assert!(cache.load(Authority::Ibp, None).is_ok());
        assert!(matches!(
            cache.load(Authority::Bbl, None),
            Err(CatalogError::UnsupportedAuthority(Authority::Bbl))
        ));
    }

    #[test]
    fn test_malformed_table_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bbl_2025_taxonomy.csv");
        std::fs::write(&path, "name,bbl_alpha\nAmerican Robin,AMRO\n").unwrap();
        let cache = TableCache::from_dir(dir.path()).unwrap();

        assert!(matches!(
            cache.load(Authority::Bbl, None),
            Err(CatalogError::ParseError { .. })
        ));
        assert_eq!(cache.loaded_count(), 0);

        std::fs::write(&path, "scientific_name,bbl_alpha\nTurdus migratorius,AMRO\n").unwrap();
        assert!(cache.load(Authority::Bbl, None).is_ok());
    }

    #[test]
    fn test_list_taxonomies() {
        let cache = TableCache::embedded();
        let listing = cache.list_taxonomies();

        assert_eq!(listing[0].authority, Authority::Avilist);
        let ebird_years: Vec<u16> = listing
            .iter()
            .filter(|i| i.authority == Authority::Ebird)
            .map(|i| i.year)
            .collect();
        assert_eq!(ebird_years, vec![2023, 2024]);

        let bbl = listing.iter().find(|i| i.authority == Authority::Bbl).unwrap();
        assert!(bbl.name_types.contains(&NameType::FrenchName));
        assert!(!bbl.name_types.contains(&NameType::Family));

        // Listing does not load anything
        assert_eq!(cache.loaded_count(), 0);
    }
}
