use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::catalog::store::CatalogError;
use crate::core::types::{Authority, TableKey};

/// Where reference tables come from
///
/// Implementations hand out the raw ingestion output; parsing and caching
/// happen in [`TableCache`](crate::catalog::store::TableCache).
pub trait TableSource: Send + Sync + std::fmt::Debug {
    /// Every (authority, year) this source can provide, in no particular order
    fn available(&self) -> Vec<TableKey>;

    /// Raw CSV text of one table
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the table cannot be read.
    fn read(&self, key: TableKey) -> Result<Cow<'static, str>, CatalogError>;
}

/// Sample of the ingestion output compiled into the binary
///
/// Each table holds only a handful of species (roughly 6 to 25 rows). Real
/// taxonomies are loaded with [`DirectorySource`] via
/// [`TableCache::from_dir`](crate::catalog::store::TableCache::from_dir) or the
/// CLI's `--data-dir`.
pub const EMBEDDED_TABLES: &[(Authority, u16, &str)] = &[
    (
        Authority::Avilist,
        2025,
        include_str!("../../data/processed/avilist_2025_taxonomy.csv"),
    ),
    (
        Authority::Ebird,
        2023,
        include_str!("../../data/processed/ebird_2023_taxonomy.csv"),
    ),
    (
        Authority::Ebird,
        2024,
        include_str!("../../data/processed/ebird_2024_taxonomy.csv"),
    ),
    (
        Authority::Birdlife,
        2024,
        include_str!("../../data/processed/birdlife_2024_taxonomy.csv"),
    ),
    (
        Authority::Ibp,
        2024,
        include_str!("../../data/processed/ibp_2024_taxonomy.csv"),
    ),
    (
        Authority::Bbl,
        2025,
        include_str!("../../data/processed/bbl_2025_taxonomy.csv"),
    ),
];

/// Sample tables embedded at compile time (validated by build.rs)
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedSource;

impl TableSource for EmbeddedSource {
    fn available(&self) -> Vec<TableKey> {
        EMBEDDED_TABLES
            .iter()
            .map(|(authority, year, _)| TableKey::new(*authority, *year))
            .collect()
    }

    fn read(&self, key: TableKey) -> Result<Cow<'static, str>, CatalogError> {
        EMBEDDED_TABLES
            .iter()
            .find(|(authority, year, _)| *authority == key.authority && *year == key.year)
            .map(|(_, _, text)| Cow::Borrowed(*text))
            .ok_or(CatalogError::UnsupportedAuthority(key.authority))
    }
}

/// Tables read from an ingestion output directory
///
/// Files are expected as `{authority}_{year}_taxonomy.csv`; anything else in
/// the directory is ignored. Authority aliases and case variants are accepted
/// (`clements_2024_taxonomy.csv` is eBird 2024); when both spellings exist the
/// canonical file name wins.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    paths: BTreeMap<TableKey, PathBuf>,
}

impl DirectorySource {
    /// Scan a directory for taxonomy files
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ReadError` if the directory cannot be listed.
    pub fn open(dir: &Path) -> Result<Self, CatalogError> {
        let entries = std::fs::read_dir(dir).map_err(|source| CatalogError::ReadError {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = BTreeMap::new();
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(key) = TableKey::from_file_name(name) else {
                tracing::debug!("ignoring '{name}' in {}", dir.display());
                continue;
            };
            if key.file_name() == name {
                paths.insert(key, entry.path());
            } else if paths.contains_key(&key) {
                tracing::debug!("ignoring '{name}': {key} already present");
            } else {
                paths.insert(key, entry.path());
            }
        }

        tracing::debug!(tables = paths.len(), "scanned {}", dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            paths,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TableSource for DirectorySource {
    fn available(&self) -> Vec<TableKey> {
        self.paths.keys().copied().collect()
    }

    fn read(&self, key: TableKey) -> Result<Cow<'static, str>, CatalogError> {
        let path = self
            .paths
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.dir.join(key.file_name()));
        std::fs::read_to_string(&path)
            .map(Cow::Owned)
            .map_err(|source| CatalogError::ReadError { path, source })
    }
}
