//! Column contracts for each authority's reference table.
//!
//! Every authority is described by one static [`AuthoritySchema`]. Adding an
//! authority means adding a variant to [`Authority`] and a schema here.

use crate::core::types::{Authority, NameType};

/// Column holding the canonical scientific name in every table
pub const SCIENTIFIC_NAME_COLUMN: &str = "scientific_name";

/// Column holding the genus in every table
pub const GENUS_COLUMN: &str = "genus";

/// Column layout of one authority's ingestion output
#[derive(Debug)]
pub struct AuthoritySchema {
    pub authority: Authority,
    /// Authority-specific columns (scientific name and genus are shared)
    pub columns: &'static [(NameType, &'static str)],
    /// Column holding the taxon rank, if the authority publishes one
    pub rank_column: Option<&'static str>,
}

impl AuthoritySchema {
    /// Column name for a name type, or None if this authority doesn't publish it
    #[must_use]
    pub fn column(&self, name_type: NameType) -> Option<&'static str> {
        match name_type {
            NameType::ScientificName => Some(SCIENTIFIC_NAME_COLUMN),
            NameType::Genus => Some(GENUS_COLUMN),
            _ => self
                .columns
                .iter()
                .find(|(nt, _)| *nt == name_type)
                .map(|(_, col)| *col),
        }
    }

    #[must_use]
    pub fn supports(&self, name_type: NameType) -> bool {
        self.column(name_type).is_some()
    }

    /// All supported name types in canonical order
    #[must_use]
    pub fn name_types(&self) -> Vec<NameType> {
        NameType::ALL
            .into_iter()
            .filter(|nt| self.supports(*nt))
            .collect()
    }
}

static AVILIST: AuthoritySchema = AuthoritySchema {
    authority: Authority::Avilist,
    columns: &[
        (NameType::CommonName, "avilist_common_name"),
        (NameType::Order, "avilist_order"),
        (NameType::Family, "avilist_family"),
    ],
    rank_column: Some("avilist_taxon_rank"),
};

static EBIRD: AuthoritySchema = AuthoritySchema {
    authority: Authority::Ebird,
    columns: &[
        (NameType::CommonName, "ebird_common_name"),
        (NameType::SpeciesCode, "ebird_ebird_code"),
        (NameType::Order, "ebird_order"),
        (NameType::Family, "ebird_family"),
    ],
    rank_column: None,
};

static BIRDLIFE: AuthoritySchema = AuthoritySchema {
    authority: Authority::Birdlife,
    columns: &[
        (NameType::CommonName, "birdlife_common_name"),
        (NameType::Order, "birdlife_order"),
        (NameType::Family, "birdlife_family"),
    ],
    rank_column: None,
};

static IBP: AuthoritySchema = AuthoritySchema {
    authority: Authority::Ibp,
    columns: &[
        (NameType::CommonName, "ibp_common_name"),
        (NameType::AlphaCode4, "ibp_alpha"),
        (NameType::AlphaCode6, "ibp_alpha6"),
    ],
    rank_column: None,
};

static BBL: AuthoritySchema = AuthoritySchema {
    authority: Authority::Bbl,
    columns: &[
        (NameType::CommonName, "bbl_common_name"),
        (NameType::AlphaCode4, "bbl_alpha"),
        (NameType::FrenchName, "bbl_french_name"),
    ],
    rank_column: None,
};

impl Authority {
    /// The column contract for this authority's tables
    #[must_use]
    pub fn schema(self) -> &'static AuthoritySchema {
        match self {
            Self::Avilist => &AVILIST,
            Self::Ebird => &EBIRD,
            Self::Birdlife => &BIRDLIFE,
            Self::Ibp => &IBP,
            Self::Bbl => &BBL,
        }
    }
}
