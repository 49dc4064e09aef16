//! Migration file name validation.

use regex::Regex;

use crate::rule::CatalogError;
use crate::types::{Finding, Severity};

/// Identifier reported when the file name pattern cannot be compiled.
pub const FILENAME_RULE_ID: &str = "filename-format";

/// Message of the file name finding.
pub const FILENAME_MESSAGE: &str = "Filename should match YYYYMMDDHHMMSS_description.sql";

/// `<14-digit timestamp>_<description>.sql`
const FILENAME_PATTERN: &str = r"^\d{14}_\w+\.(?i:sql)$";

/// Checks that a document name is a timestamped migration name.
///
/// Runs independently of file contents, including for empty files.
#[derive(Debug, Clone)]
pub struct FilenameValidator {
    pattern: Regex,
}

impl FilenameValidator {
    /// Compiles the file name pattern.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RuleConstruction`] if the pattern is invalid.
    pub fn new() -> Result<Self, CatalogError> {
        let pattern = Regex::new(FILENAME_PATTERN).map_err(|e| CatalogError::RuleConstruction {
            id: FILENAME_RULE_ID.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { pattern })
    }

    /// Returns true when `name` follows the convention.
    #[must_use]
    pub fn is_valid(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    /// Returns a line-0 error finding when `name` does not follow the convention.
    #[must_use]
    pub fn check(&self, name: &str) -> Option<Finding> {
        (!self.is_valid(name)).then(|| Finding::new(name, 0, Severity::Error, FILENAME_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_timestamped_names() {
        let v = FilenameValidator::new().unwrap();
        for name in [
            "20251212143000_add_users.sql",
            "20250101000000_ok.sql",
            "20250101000000_x.SQL",
        ] {
            assert!(v.check(name).is_none(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_everything_else() {
        let v = FilenameValidator::new().unwrap();
        for name in [
            "bad.sql",
            "2025010100000_short.sql",
            "202501010000001_long.sql",
            "20250101000000_.sql",
            "20250101000000-dash.sql",
            "20250101000000_ok.sql.bak",
            "20250101000000_has space.sql",
        ] {
            let finding = v.check(name).unwrap_or_else(|| panic!("{name} should be invalid"));
            assert_eq!(finding.line, 0);
            assert_eq!(finding.severity, Severity::Error);
            assert_eq!(finding.file, name);
            assert!(finding.excerpt.is_none());
        }
    }
}
