use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// Organization publishing a bird taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authority {
    Avilist,
    Ebird,
    Birdlife,
    Ibp,
    Bbl,
}

impl Authority {
    /// All authorities, in priority order (preferred first)
    pub const ALL: [Authority; 5] = [
        Authority::Avilist,
        Authority::Ebird,
        Authority::Birdlife,
        Authority::Ibp,
        Authority::Bbl,
    ];

    /// Lowercase identifier used in file names and column prefixes
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Avilist => "avilist",
            Self::Ebird => "ebird",
            Self::Birdlife => "birdlife",
            Self::Ibp => "ibp",
            Self::Bbl => "bbl",
        }
    }

    /// Check whether this authority publishes the given name type
    #[must_use]
    pub fn supports(self, name_type: NameType) -> bool {
        self.schema().supports(name_type)
    }
}

impl std::fmt::Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Authority {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avilist" => Ok(Self::Avilist),
            "ebird" | "clements" => Ok(Self::Ebird),
            "birdlife" => Ok(Self::Birdlife),
            "ibp" => Ok(Self::Ibp),
            "bbl" => Ok(Self::Bbl),
            _ => Err(ConfigError::UnknownAuthority(s.to_string())),
        }
    }
}

/// Category of identifier for a taxon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameType {
    ScientificName,
    CommonName,
    Genus,
    Family,
    Order,
    /// 4-letter banding code (e.g. AMRO)
    AlphaCode4,
    /// 6-letter banding code (e.g. TURMIG)
    AlphaCode6,
    /// eBird species code (e.g. amerob)
    SpeciesCode,
    FrenchName,
}

impl NameType {
    pub const ALL: [NameType; 9] = [
        NameType::ScientificName,
        NameType::CommonName,
        NameType::Genus,
        NameType::Family,
        NameType::Order,
        NameType::AlphaCode4,
        NameType::AlphaCode6,
        NameType::SpeciesCode,
        NameType::FrenchName,
    ];

    /// Name types that identify a single taxon, in the order inference tries them
    pub const IDENTIFYING: [NameType; 6] = [
        NameType::ScientificName,
        NameType::CommonName,
        NameType::AlphaCode4,
        NameType::AlphaCode6,
        NameType::SpeciesCode,
        NameType::FrenchName,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScientificName => "scientific_name",
            Self::CommonName => "common_name",
            Self::Genus => "genus",
            Self::Family => "family",
            Self::Order => "order",
            Self::AlphaCode4 => "alpha_code_4",
            Self::AlphaCode6 => "alpha_code_6",
            Self::SpeciesCode => "species_code",
            Self::FrenchName => "french_name",
        }
    }
}

impl std::fmt::Display for NameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NameType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        match key.as_str() {
            "scientific_name" | "scientific" => Ok(Self::ScientificName),
            "common_name" | "common" => Ok(Self::CommonName),
            "genus" => Ok(Self::Genus),
            "family" => Ok(Self::Family),
            "order" => Ok(Self::Order),
            "alpha_code_4" | "alpha" | "alpha4" => Ok(Self::AlphaCode4),
            "alpha_code_6" | "alpha6" => Ok(Self::AlphaCode6),
            "species_code" | "ebird_code" | "ebird" => Ok(Self::SpeciesCode),
            "french_name" | "french" => Ok(Self::FrenchName),
            _ => Err(ConfigError::UnknownNameType(s.to_string())),
        }
    }
}

/// Taxonomic level of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Species,
    Subspecies,
    Genus,
    Family,
    Order,
    Other,
}

impl Rank {
    /// Parse a rank cell from a reference table. Unrecognized ranks become `Other`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "species" => Self::Species,
            "subspecies" | "ssp" | "ssp." => Self::Subspecies,
            "genus" => Self::Genus,
            "family" => Self::Family,
            "order" => Self::Order,
            _ => Self::Other,
        }
    }

    /// Infer rank from the shape of a scientific name (uni-, bi-, or trinomial)
    #[must_use]
    pub fn from_scientific_name(name: &str) -> Self {
        match name.split_whitespace().count() {
            1 => Self::Genus,
            2 => Self::Species,
            3 => Self::Subspecies,
            _ => Self::Other,
        }
    }

    /// Hierarchy column holding this rank's name, if the rank is a roll-up level
    #[must_use]
    pub fn name_type(self) -> Option<NameType> {
        match self {
            Self::Genus => Some(NameType::Genus),
            Self::Family => Some(NameType::Family),
            Self::Order => Some(NameType::Order),
            Self::Species | Self::Subspecies | Self::Other => None,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Species => "species",
            Self::Subspecies => "subspecies",
            Self::Genus => "genus",
            Self::Family => "family",
            Self::Order => "order",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// How a token was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    /// Equal after case/whitespace/punctuation normalization
    Soft,
    /// Best edit-distance candidate above the acceptance threshold
    Fuzzy,
    None,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Exact => "exact",
            Self::Soft => "soft",
            Self::Fuzzy => "fuzzy",
            Self::None => "none",
        };
        write!(f, "{s}")
    }
}

/// Identifies one reference table: an authority's taxonomy for one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableKey {
    pub authority: Authority,
    pub year: u16,
}

impl TableKey {
    #[must_use]
    pub fn new(authority: Authority, year: u16) -> Self {
        Self { authority, year }
    }

    /// File name of this table in the ingestion output directory
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}_{}_taxonomy.csv", self.authority, self.year)
    }

    /// Parse an ingestion output file name (`{authority}_{year}_taxonomy.csv`)
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix("_taxonomy.csv")?;
        let (authority, year) = stem.rsplit_once('_')?;
        let authority = authority.parse().ok()?;
        let year = year.parse().ok()?;
        Some(Self { authority, year })
    }
}

impl std::fmt::Display for TableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.authority, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_type_aliases() {
        assert_eq!("alpha".parse::<NameType>().unwrap(), NameType::AlphaCode4);
        assert_eq!("alpha6".parse::<NameType>().unwrap(), NameType::AlphaCode6);
        assert_eq!(
            "ebird_code".parse::<NameType>().unwrap(),
            NameType::SpeciesCode
        );
        assert_eq!(
            " Scientific-Name ".parse::<NameType>().unwrap(),
            NameType::ScientificName
        );
        assert!("nickname".parse::<NameType>().is_err());
    }

    #[test]
    fn test_authority_parse() {
        assert_eq!("eBird".parse::<Authority>().unwrap(), Authority::Ebird);
        assert!(matches!(
            "hbw".parse::<Authority>(),
            Err(ConfigError::UnknownAuthority(_))
        ));
    }

    #[test]
    fn test_table_key_file_name() {
        let key = TableKey::new(Authority::Ibp, 2024);
        assert_eq!(key.file_name(), "ibp_2024_taxonomy.csv");
        assert_eq!(TableKey::from_file_name("ibp_2024_taxonomy.csv"), Some(key));
        assert_eq!(TableKey::from_file_name("ibp_latest_taxonomy.csv"), None);
        assert_eq!(TableKey::from_file_name("hbw_2024_taxonomy.csv"), None);
        assert_eq!(TableKey::from_file_name("available_taxonomies.csv"), None);
    }

    #[test]
    fn test_rank_from_scientific_name() {
        assert_eq!(Rank::from_scientific_name("Turdus"), Rank::Genus);
        assert_eq!(
            Rank::from_scientific_name("Turdus migratorius"),
            Rank::Species
        );
        assert_eq!(
            Rank::from_scientific_name("Junco hyemalis oreganus"),
            Rank::Subspecies
        );
    }
}
