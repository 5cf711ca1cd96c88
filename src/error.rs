use thiserror::Error;

use crate::catalog::store::CatalogError;
use crate::core::types::{Authority, NameType};

/// Misconfiguration detected before any conversion runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{authority} does not publish {name_type}")]
    UnsupportedNameType {
        authority: Authority,
        name_type: NameType,
    },

    #[error("Unknown authority: '{0}'")]
    UnknownAuthority(String),

    #[error("Unknown name type: '{0}'")]
    UnknownNameType(String),

    #[error("Invalid taxonomy year: '{0}'")]
    InvalidYear(String),

    #[error("No taxonomy data available for {0}")]
    NoData(Authority),

    #[error("No {authority} taxonomy for {year}")]
    UnknownYear { authority: Authority, year: u16 },
}

/// Why a resolved taxon has no usable counterpart in the target table
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeGap {
    /// The scientific name is absent from the target table
    NoCounterpart,
    /// The target record exists but leaves this name type empty
    MissingValue(NameType),
}

impl std::fmt::Display for BridgeGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoCounterpart => write!(f, "no counterpart"),
            Self::MissingValue(nt) => write!(f, "no {nt} value"),
        }
    }
}

/// Failure of a conversion or of setting one up
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// The token could not be resolved in the source table
    #[error("No match for '{token}' as {name_type} in {authority}")]
    NoMatch {
        token: String,
        name_type: NameType,
        authority: Authority,
    },

    /// The token resolved, but the target table has nothing for it
    #[error("'{scientific_name}' has {gap} in {authority}")]
    BridgeBroken {
        scientific_name: String,
        authority: Authority,
        gap: BridgeGap,
    },

    #[error("Taxonomy data unavailable: {0}")]
    DataUnavailable(CatalogError),
}

impl From<CatalogError> for ConvertError {
    /// Asking for an authority or year the data doesn't cover is a configuration
    /// problem; failing to read or parse existing data is not.
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnsupportedAuthority(authority) => {
                Self::Configuration(ConfigError::NoData(authority))
            }
            CatalogError::UnsupportedYear {
                authority, year, ..
            } => Self::Configuration(ConfigError::UnknownYear { authority, year }),
            other => Self::DataUnavailable(other),
        }
    }
}

impl ConvertError {
    /// True for per-token misses (as opposed to setup failures)
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::NoMatch { .. } | Self::BridgeBroken { .. })
    }

    /// Short machine-readable label for reports
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::NoMatch { .. } => "no_match",
            Self::BridgeBroken { .. } => "bridge_broken",
            Self::DataUnavailable(_) => "data_unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConvertError::from(ConfigError::UnsupportedNameType {
            authority: Authority::Avilist,
            name_type: NameType::FrenchName,
        });
        assert_eq!(
            err.to_string(),
            "Invalid configuration: avilist does not publish french_name"
        );
        assert!(!err.is_unresolved());

        let err = ConvertError::BridgeBroken {
            scientific_name: "Turdus merula".to_string(),
            authority: Authority::Ibp,
            gap: BridgeGap::NoCounterpart,
        };
        assert_eq!(err.to_string(), "'Turdus merula' has no counterpart in ibp");
        assert!(err.is_unresolved());
        assert_eq!(err.kind(), "bridge_broken");
    }

    #[test]
    fn test_catalog_error_classification() {
        let err = ConvertError::from(CatalogError::UnsupportedYear {
            authority: Authority::Ebird,
            year: 1999,
            available: vec![2023, 2024],
        });
        assert!(matches!(
            err,
            ConvertError::Configuration(ConfigError::UnknownYear { year: 1999, .. })
        ));

        let err = ConvertError::from(CatalogError::ReadError {
            path: "missing.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        });
        assert_eq!(err.kind(), "data_unavailable");
    }
}
