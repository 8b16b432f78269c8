//! Filename predicate for music files.
//!
//! A file is a candidate when its name ends with one of the configured
//! extensions, compared case-insensitively.

use std::path::Path;

/// Extensions scanned when nothing else is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".mp3", ".flac", ".wav", ".aac", ".m4a", ".ogg"];

/// A set of lowercase, dot-prefixed filename suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    suffixes: Vec<String>,
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().copied())
    }
}

impl ExtensionSet {
    /// Build a set from user-supplied extensions.
    ///
    /// Entries are trimmed, lowercased and given a leading dot, so `"MP3"`,
    /// `"mp3"` and `".mp3"` are equivalent. Empty entries and duplicates are
    /// dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use songdupe::scanner::ExtensionSet;
    /// use std::path::Path;
    ///
    /// let set = ExtensionSet::new(["FLAC", ".mp3"]);
    /// assert!(set.matches(Path::new("/music/Track 01.Flac")));
    /// assert!(!set.matches(Path::new("/music/cover.jpg")));
    /// ```
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suffixes: Vec<String> = Vec::new();
        for ext in extensions {
            if let Some(suffix) = normalize_extension(ext.as_ref()) {
                if !suffixes.contains(&suffix) {
                    suffixes.push(suffix);
                }
            }
        }
        Self { suffixes }
    }

    /// Normalized suffixes, in configuration order.
    #[must_use]
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Whether the set contains no suffixes (matches nothing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Check whether the file name of `path` ends with one of the suffixes.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy().to_lowercase();
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }
}

/// Normalize one extension to lowercase with a leading dot.
pub(crate) fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().trim_start_matches('.');
    if ext.is_empty() {
        None
    } else {
        Some(format!(".{}", ext.to_lowercase()))
    }
}
