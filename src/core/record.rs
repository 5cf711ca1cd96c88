use serde::{Deserialize, Serialize};

use crate::core::types::{NameType, Rank};

/// One row of a reference table
///
/// Every field except `scientific_name` is optional: a `None` means the
/// authority left the cell empty or does not publish that name type at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonRecord {
    /// Canonical key, unique within a table
    pub scientific_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    pub rank: Rank,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_code_4: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_code_6: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub french_name: Option<String>,
}

impl TaxonRecord {
    /// Create a record with only a scientific name; rank and genus are derived from it
    pub fn new(scientific_name: impl Into<String>) -> Self {
        let scientific_name = scientific_name.into();
        let rank = Rank::from_scientific_name(&scientific_name);
        let genus = scientific_name
            .split_whitespace()
            .next()
            .map(ToString::to_string);
        Self {
            scientific_name,
            common_name: None,
            genus,
            family: None,
            order: None,
            rank,
            alpha_code_4: None,
            alpha_code_6: None,
            species_code: None,
            french_name: None,
        }
    }

    /// Read the value of a name type off this record
    #[must_use]
    pub fn get(&self, name_type: NameType) -> Option<&str> {
        match name_type {
            NameType::ScientificName => Some(self.scientific_name.as_str()),
            NameType::CommonName => self.common_name.as_deref(),
            NameType::Genus => self.genus.as_deref(),
            NameType::Family => self.family.as_deref(),
            NameType::Order => self.order.as_deref(),
            NameType::AlphaCode4 => self.alpha_code_4.as_deref(),
            NameType::AlphaCode6 => self.alpha_code_6.as_deref(),
            NameType::SpeciesCode => self.species_code.as_deref(),
            NameType::FrenchName => self.french_name.as_deref(),
        }
    }

    /// Set the value of a name type. The scientific name is only replaced by `Some`.
    pub fn set(&mut self, name_type: NameType, value: Option<String>) {
        match name_type {
            NameType::ScientificName => {
                if let Some(v) = value {
                    self.scientific_name = v;
                }
            }
            NameType::CommonName => self.common_name = value,
            NameType::Genus => self.genus = value,
            NameType::Family => self.family = value,
            NameType::Order => self.order = value,
            NameType::AlphaCode4 => self.alpha_code_4 = value,
            NameType::AlphaCode6 => self.alpha_code_6 = value,
            NameType::SpeciesCode => self.species_code = value,
            NameType::FrenchName => self.french_name = value,
        }
    }

    #[must_use]
    pub fn with(mut self, name_type: NameType, value: impl Into<String>) -> Self {
        self.set(name_type, Some(value.into()));
        self
    }

    /// Name of the enclosing taxon at a roll-up rank (genus, family, order)
    #[must_use]
    pub fn rollup(&self, rank: Rank) -> Option<&str> {
        rank.name_type().and_then(|nt| self.get(nt))
    }
}
