use serde::Serialize;

use crate::core::types::{Authority, NameType};
use crate::error::ConfigError;
use crate::matching::engine::MatchStrategy;

/// What to convert from and to
///
/// Built with defaults and refined with builder methods:
///
/// ```rust
/// use birdnames::convert::request::ConversionRequest;
/// use birdnames::core::types::{Authority, NameType};
///
/// let request = ConversionRequest::new(NameType::SpeciesCode, NameType::AlphaCode4)
///     .from_authority(Authority::Ebird)
///     .to_authority(Authority::Ibp)
///     .fuzzy_matching(true);
///
/// assert_eq!(request.from_year, None);
/// assert!(request.soft_matching);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRequest {
    pub from_type: NameType,
    pub to_type: NameType,
    pub from_authority: Authority,
    pub to_authority: Authority,

    /// `None` selects the latest available year
    pub from_year: Option<u16>,
    pub to_year: Option<u16>,

    pub soft_matching: bool,
    pub fuzzy_matching: bool,

    /// Whether `to_authority` was chosen explicitly or follows `from_authority`
    #[serde(skip)]
    to_authority_set: bool,
}

impl ConversionRequest {
    /// Defaults: avilist on both sides, latest years, soft matching on, fuzzy off
    #[must_use]
    pub fn new(from_type: NameType, to_type: NameType) -> Self {
        Self {
            from_type,
            to_type,
            from_authority: Authority::Avilist,
            to_authority: Authority::Avilist,
            from_year: None,
            to_year: None,
            soft_matching: true,
            fuzzy_matching: false,
            to_authority_set: false,
        }
    }

    /// Set the source authority. The target follows it unless set explicitly.
    #[must_use]
    pub fn from_authority(mut self, authority: Authority) -> Self {
        self.from_authority = authority;
        if !self.to_authority_set {
            self.to_authority = authority;
        }
        self
    }

    #[must_use]
    pub fn to_authority(mut self, authority: Authority) -> Self {
        self.to_authority = authority;
        self.to_authority_set = true;
        self
    }

    #[must_use]
    pub fn from_year(mut self, year: Option<u16>) -> Self {
        self.from_year = year;
        self
    }

    #[must_use]
    pub fn to_year(mut self, year: Option<u16>) -> Self {
        self.to_year = year;
        self
    }

    #[must_use]
    pub fn soft_matching(mut self, enabled: bool) -> Self {
        self.soft_matching = enabled;
        self
    }

    #[must_use]
    pub fn fuzzy_matching(mut self, enabled: bool) -> Self {
        self.fuzzy_matching = enabled;
        self
    }

    /// Matching strategy for the source lookup
    #[must_use]
    pub fn strategy(&self) -> MatchStrategy {
        MatchStrategy::new(self.soft_matching, self.fuzzy_matching)
    }

    /// True if the conversion stays within one authority's naming scheme
    #[must_use]
    pub fn is_single_authority(&self) -> bool {
        self.from_authority == self.to_authority
    }

    /// Check both name types against the authorities' column contracts
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedNameType` for the first side whose
    /// authority does not publish the requested name type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (authority, name_type) in [
            (self.from_authority, self.from_type),
            (self.to_authority, self.to_type),
        ] {
            if !authority.supports(name_type) {
                return Err(ConfigError::UnsupportedNameType {
                    authority,
                    name_type,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = ConversionRequest::new(NameType::CommonName, NameType::ScientificName);
        assert_eq!(request.from_authority, Authority::Avilist);
        assert_eq!(request.to_authority, Authority::Avilist);
        assert_eq!(request.to_year, None);
        assert!(request.soft_matching);
        assert!(!request.fuzzy_matching);
        assert!(request.is_single_authority());
    }

    #[test]
    fn test_to_authority_follows_from_authority() {
        let request =
            ConversionRequest::new(NameType::CommonName, NameType::AlphaCode4).from_authority(Authority::Ibp);
        assert_eq!(request.to_authority, Authority::Ibp);

        // An explicit target is kept regardless of call order
        let request = ConversionRequest::new(NameType::SpeciesCode, NameType::AlphaCode4)
            .to_authority(Authority::Bbl)
            .from_authority(Authority::Ebird);
        assert_eq!(request.from_authority, Authority::Ebird);
        assert_eq!(request.to_authority, Authority::Bbl);
        assert!(!request.is_single_authority());
    }

    #[test]
    fn test_validate_unsupported_source() {
        let request = ConversionRequest::new(NameType::FrenchName, NameType::ScientificName);
        assert_eq!(
            request.validate(),
            Err(ConfigError::UnsupportedNameType {
                authority: Authority::Avilist,
                name_type: NameType::FrenchName,
            })
        );
    }

    #[test]
    fn test_validate_unsupported_target() {
        let request = ConversionRequest::new(NameType::AlphaCode4, NameType::Family)
            .from_authority(Authority::Bbl);
        assert!(matches!(
            request.validate(),
            Err(ConfigError::UnsupportedNameType {
                authority: Authority::Bbl,
                name_type: NameType::Family,
            })
        ));
    }

    #[test]
    fn test_strategy() {
        let request = ConversionRequest::new(NameType::CommonName, NameType::ScientificName)
            .soft_matching(false)
            .fuzzy_matching(true);
        assert_eq!(request.strategy(), MatchStrategy::new(false, true));
    }
}
