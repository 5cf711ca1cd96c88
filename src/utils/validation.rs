//! Centralized validation and helper functions.

use crate::error::ConfigError;

/// Maximum number of records accepted from a single reference table
pub const MAX_RECORDS: usize = 250_000;

/// Earliest taxonomy year accepted
pub const MIN_YEAR: u16 = 1900;

/// Latest taxonomy year accepted
pub const MAX_YEAR: u16 = 2999;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Parse a taxonomy year given on the command line or in a file name.
///
/// # Examples
///
/// ```
/// use birdnames::utils::validation::parse_year;
///
/// assert_eq!(parse_year("2024").unwrap(), 2024);
/// assert!(parse_year("24").is_err());
/// assert!(parse_year("latest").is_err());
/// ```
///
/// # Errors
///
/// Returns `ConfigError::InvalidYear` if the value is not a four-digit year
/// in the accepted range.
pub fn parse_year(s: &str) -> Result<u16, ConfigError> {
    let trimmed = s.trim();
    if trimmed.len() != 4 {
        return Err(ConfigError::InvalidYear(s.to_string()));
    }
    let year: u16 = trimmed
        .parse()
        .map_err(|_| ConfigError::InvalidYear(s.to_string()))?;
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ConfigError::InvalidYear(s.to_string()))
    }
}

/// A token is blank when it holds nothing but whitespace
#[must_use]
pub fn is_blank(token: &str) -> bool {
    token.trim().is_empty()
}

/// Trim a cell from a reference table, mapping empty cells to None
#[must_use]
pub fn clean_cell(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_record_limit() {
        assert!(check_record_limit(0).is_none());
        assert!(check_record_limit(MAX_RECORDS - 1).is_none());
        assert!(check_record_limit(MAX_RECORDS).is_some());
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year(" 2025 ").unwrap(), 2025);
        assert!(matches!(parse_year("1850"), Err(ConfigError::InvalidYear(_))));
        assert!(parse_year("20x4").is_err());
        assert!(parse_year("").is_err());
    }

    #[test]
    fn test_clean_cell() {
        assert_eq!(clean_cell("  AMRO "), Some("AMRO".to_string()));
        assert_eq!(clean_cell("   "), None);
        assert_eq!(clean_cell(""), None);
    }
}
