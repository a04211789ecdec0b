//! Accepted document extensions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Extensions used when the caller supplies none.
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".md", ".markdown"];

/// Case-insensitive set of accepted extensions, each stored lowercase with a
/// leading dot (`.md`). Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", from = "Vec<String>")]
pub struct ExtensionSet {
    exts: BTreeSet<String>,
}

impl ExtensionSet {
    /// Parse a comma-separated list such as `"md, .Markdown"`.
    pub fn parse(raw: &str) -> Self {
        Self::from_list(raw.split(','))
    }

    /// Build from individual entries; blank entries are skipped and the
    /// defaults apply when nothing remains.
    pub fn from_list<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let exts: BTreeSet<String> = entries
            .into_iter()
            .filter_map(|entry| normalize_extension(entry.as_ref()))
            .collect();

        if exts.is_empty() {
            return Self::default();
        }
        Self { exts }
    }

    /// Whether `ext` (with or without leading dot, any case) is accepted.
    pub fn contains(&self, ext: &str) -> bool {
        normalize_extension(ext).is_some_and(|e| self.exts.contains(&e))
    }

    /// Whether the final extension of `path` is accepted.
    pub fn matches_path(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(lowercase_extension)
            .is_some_and(|ext| self.exts.contains(&ext))
    }

    /// Whether the final extension of a `/`-separated link target is accepted.
    pub fn matches_target(&self, target: &str) -> bool {
        let name = target.rsplit('/').next().unwrap_or(target);
        lowercase_extension(name).is_some_and(|ext| self.exts.contains(&ext))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.exts.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.exts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exts.is_empty()
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self {
            exts: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(","))
    }
}

impl From<ExtensionSet> for Vec<String> {
    fn from(set: ExtensionSet) -> Self {
        set.exts.into_iter().collect()
    }
}

impl From<Vec<String>> for ExtensionSet {
    fn from(entries: Vec<String>) -> Self {
        Self::from_list(entries)
    }
}

/// Lowercase `.ext` of a file name: everything from the last dot. `None`
/// when the name has no dot.
pub fn lowercase_extension(file_name: &str) -> Option<String> {
    file_name
        .rfind('.')
        .map(|dot| file_name[dot..].to_lowercase())
}

fn normalize_extension(raw: &str) -> Option<String> {
    let ext = raw.trim().to_lowercase();
    if ext.is_empty() {
        return None;
    }
    if ext.starts_with('.') {
        Some(ext)
    } else {
        Some(format!(".{}", ext))
    }
}
