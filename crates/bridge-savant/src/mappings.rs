//! Persistent Maven-group-to-Savant-group mappings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::SavantError;

/// File name of the mappings file inside the working directory.
const FILE_NAME: &str = "maven-group-mappings.properties";

/// Mappings from Maven group to Savant group, stored as a flat UTF-8
/// properties file. Loaded at startup, updated in place when the user
/// supplies a replacement, truncated and rewritten on exit.
#[derive(Debug)]
pub struct GroupMappings {
    file: PathBuf,
    entries: BTreeMap<String, String>,
}

impl GroupMappings {
    /// Load the mappings file from `directory`, if it exists.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(directory: &Path) -> Result<Self, SavantError> {
        let file = directory.join(FILE_NAME);
        let mut entries = BTreeMap::new();

        if file.is_file() {
            let content = std::fs::read_to_string(&file).map_err(|source| SavantError::Io {
                path: file.display().to_string(),
                source,
            })?;
            for (index, line) in content.lines().enumerate() {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                let (key, value) = split_entry(trimmed);
                let key = unescape(key).map_err(|message| SavantError::InvalidMapping {
                    path: file.display().to_string(),
                    line: index + 1,
                    message,
                })?;
                let value = unescape(value).map_err(|message| SavantError::InvalidMapping {
                    path: file.display().to_string(),
                    line: index + 1,
                    message,
                })?;
                entries.insert(key.trim().to_owned(), value.trim().to_owned());
            }
        }

        Ok(Self { file, entries })
    }

    /// The Savant group mapped from `maven_group`, when one is stored.
    pub fn get(&self, maven_group: &str) -> Option<&str> {
        self.entries.get(maven_group).map(String::as_str)
    }

    /// The Savant group for `maven_group`, falling back to the input.
    pub fn map<'a>(&'a self, maven_group: &'a str) -> &'a str {
        self.get(maven_group).unwrap_or(maven_group)
    }

    /// Record (or replace) a mapping.
    pub fn add(&mut self, maven_group: &str, savant_group: &str) {
        self.entries
            .insert(maven_group.to_owned(), savant_group.to_owned());
    }

    /// Truncate and rewrite the mappings file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn store(&self) -> Result<(), SavantError> {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(&escape(key, true));
            out.push('=');
            out.push_str(&escape(value, false));
            out.push('\n');
        }
        std::fs::write(&self.file, out).map_err(|source| SavantError::Io {
            path: self.file.display().to_string(),
            source,
        })
    }
}

/// Split a properties line at the first unescaped `=` or `:`.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (offset, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                let value = line.get(offset + 1..).unwrap_or("");
                return (line.get(..offset).unwrap_or(line), value);
            }
            _ => {}
        }
    }
    (line, "")
}

/// Decode properties-file backslash escapes.
fn unescape(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                if digits.len() < 4 {
                    return Err("truncated \\u escape".to_owned());
                }
                let code = u32::from_str_radix(&digits, 16)
                    .map_err(|_| format!("invalid \\u escape \\u{digits}"))?;
                let decoded =
                    char::from_u32(code).ok_or_else(|| format!("invalid \\u escape \\u{digits}"))?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => return Err("dangling backslash".to_owned()),
        }
    }
    Ok(out)
}

/// Encode properties-file backslash escapes. Keys additionally escape the
/// separator characters and spaces.
fn escape(input: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key => out.push_str("\\ "),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let mappings = GroupMappings::load(tmp.path()).unwrap();
        assert_eq!(mappings.get("commons-collections"), None);
    }

    #[test]
    fn loads_simple_entries() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(FILE_NAME),
            "commons-collections=org.apache.commons\n# comment\n! also a comment\n\n",
        )
        .unwrap();

        let mappings = GroupMappings::load(tmp.path()).unwrap();
        assert_eq!(
            mappings.get("commons-collections"),
            Some("org.apache.commons")
        );
    }

    #[test]
    fn colon_separator_and_trimming() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(FILE_NAME), "junit : org.junit \n").unwrap();

        let mappings = GroupMappings::load(tmp.path()).unwrap();
        assert_eq!(mappings.get("junit"), Some("org.junit"));
    }

    #[test]
    fn map_falls_back_to_input() {
        let tmp = tempfile::tempdir().unwrap();
        let mappings = GroupMappings::load(tmp.path()).unwrap();
        assert_eq!(mappings.map("org.example"), "org.example");
    }

    #[test]
    fn store_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let mut mappings = GroupMappings::load(tmp.path()).unwrap();
        mappings.add("commons-collections", "org.apache.commons");
        mappings.add("junit", "org.junit");
        mappings.store().unwrap();

        let reloaded = GroupMappings::load(tmp.path()).unwrap();
        assert_eq!(
            reloaded.get("commons-collections"),
            Some("org.apache.commons")
        );
        assert_eq!(reloaded.get("junit"), Some("org.junit"));
    }

    #[test]
    fn store_truncates_previous_content() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(FILE_NAME), "stale=entry\n").unwrap();

        let mut mappings = GroupMappings::load(tmp.path()).unwrap();
        mappings.add("fresh", "org.fresh");
        mappings.entries.remove("stale");
        mappings.store().unwrap();

        let reloaded = GroupMappings::load(tmp.path()).unwrap();
        assert_eq!(reloaded.get("stale"), None);
        assert_eq!(reloaded.get("fresh"), Some("org.fresh"));
    }

    #[test]
    fn escaped_separator_in_key_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let mut mappings = GroupMappings::load(tmp.path()).unwrap();
        mappings.add("odd=group", "org.odd");
        mappings.store().unwrap();

        let reloaded = GroupMappings::load(tmp.path()).unwrap();
        assert_eq!(reloaded.get("odd=group"), Some("org.odd"));
    }

    #[test]
    fn unicode_escape_is_decoded() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(FILE_NAME), "k=\\u0041bc\n").unwrap();

        let mappings = GroupMappings::load(tmp.path()).unwrap();
        assert_eq!(mappings.get("k"), Some("Abc"));
    }

    #[test]
    fn truncated_unicode_escape_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(FILE_NAME), "k=\\u00\n").unwrap();

        let err = GroupMappings::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("escape"), "error was: {err}");
    }

    #[cfg(test)]
    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Any group-shaped key/value pair survives a store/load cycle.
            #[test]
            fn plain_entries_round_trip(
                key in "[a-zA-Z][a-zA-Z0-9._-]{0,30}",
                value in "[a-zA-Z][a-zA-Z0-9._-]{0,30}",
            ) {
                let tmp = tempfile::tempdir().unwrap();
                let mut mappings = GroupMappings::load(tmp.path()).unwrap();
                mappings.add(&key, &value);
                mappings.store().unwrap();

                let reloaded = GroupMappings::load(tmp.path()).unwrap();
                prop_assert_eq!(reloaded.get(&key), Some(value.as_str()));
            }
        }
    }
}
