//! SPDX license identifiers accepted by the bridge.

use std::fmt;

use crate::error::SavantError;

/// The SPDX short names Savant repositories accept. Matching is
/// case-insensitive on input; the canonical spelling is stored.
const KNOWN_IDENTIFIERS: &[&str] = &[
    "Apache-1.0",
    "Apache-1.1",
    "Apache-2.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "CC0-1.0",
    "CDDL-1.0",
    "CDDL-1.1",
    "EPL-1.0",
    "EPL-2.0",
    "GPL-2.0-only",
    "GPL-2.0-with-classpath-exception",
    "GPL-3.0-only",
    "ISC",
    "LGPL-2.1-only",
    "LGPL-3.0-only",
    "MIT",
    "MPL-1.1",
    "MPL-2.0",
    "Unlicense",
    "Zlib",
];

/// A validated SPDX license identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    identifier: &'static str,
}

impl License {
    /// Parse an SPDX short name.
    ///
    /// # Errors
    /// Returns an error when the identifier is not in the accepted table.
    pub fn parse(identifier: &str) -> Result<Self, SavantError> {
        let trimmed = identifier.trim();
        KNOWN_IDENTIFIERS
            .iter()
            .find(|known| known.eq_ignore_ascii_case(trimmed))
            .map(|known| Self { identifier: known })
            .ok_or_else(|| SavantError::UnknownLicense {
                identifier: trimmed.to_owned(),
            })
    }

    /// The canonical SPDX spelling.
    pub fn identifier(&self) -> &str {
        self.identifier
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_identifier() {
        let license = License::parse("Apache-2.0").unwrap();
        assert_eq!(license.identifier(), "Apache-2.0");
    }

    #[test]
    fn parse_is_case_insensitive_but_canonical() {
        let license = License::parse("apache-2.0").unwrap();
        assert_eq!(license.identifier(), "Apache-2.0");
    }

    #[test]
    fn parse_trims_whitespace() {
        let license = License::parse("  MIT ").unwrap();
        assert_eq!(license.identifier(), "MIT");
    }

    #[test]
    fn rejects_unknown_identifier() {
        let err = License::parse("Apachev2").unwrap_err();
        assert!(err.to_string().contains("Apachev2"), "error was: {err}");
    }

    #[test]
    fn rejects_empty() {
        assert!(License::parse("").is_err());
    }

    #[test]
    fn display_is_identifier() {
        let license = License::parse("BSD-3-Clause").unwrap();
        assert_eq!(license.to_string(), "BSD-3-Clause");
    }
}
