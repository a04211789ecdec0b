//! Path rules: scan-time ignore rules and orphan check exemptions

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use mdorphan_core::prelude::*;
use mdorphan_core::utils::clean_path;
use std::path::{Path, PathBuf};

/// Compiled `--ignore` rules, matched against `/`-separated paths relative
/// to the scan directory.
///
/// Rules containing `*`, `?` or `[` are globs where `*` stops at `/`. Any
/// other rule is a prefix: it matches the path itself and everything below.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    globs: GlobSet,
    prefixes: Vec<String>,
}

impl IgnoreRules {
    pub fn compile<I, S>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut globs = GlobSetBuilder::new();
        let mut prefixes = Vec::new();

        for raw in rules {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            let rule = clean_slash(raw);
            if rule == "." {
                continue;
            }

            if is_glob(&rule) {
                let glob = GlobBuilder::new(&rule)
                    .literal_separator(true)
                    .build()
                    .map_err(|e| {
                        Error::config_error(format!("invalid ignore rule {raw:?}: {e}"))
                    })?;
                globs.add(glob);
            } else {
                prefixes.push(rule.trim_end_matches('/').to_string());
            }
        }

        let globs = globs
            .build()
            .map_err(|e| Error::config_error(format!("compile ignore rules: {e}")))?;
        Ok(Self { globs, prefixes })
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty() && self.prefixes.is_empty()
    }

    /// Whether the relative path `rel` is ignored. The scan root (`.`) never is.
    pub fn matches(&self, rel: &str) -> bool {
        if rel.is_empty() || rel == "." || self.is_empty() {
            return false;
        }
        if self.globs.is_match(rel) {
            return true;
        }
        self.prefixes.iter().any(|prefix| {
            rel == prefix
                || rel
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

fn is_glob(rule: &str) -> bool {
    rule.contains(['*', '?', '['])
}

/// `--ignore-check-file` rules: orphans matching one of them are not
/// reported.
///
/// A rule containing `/` must equal the orphan's path relative to the scan
/// directory; any other rule is compared with the file name. Absolute rules
/// that point inside the scan directory are made relative first.
#[derive(Debug, Clone, Default)]
pub struct CheckFileFilter {
    relative: Vec<String>,
    names: Vec<String>,
}

impl CheckFileFilter {
    pub fn new<I, S>(scan_dir: &Path, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for raw in rules {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            let rule = normalize_check_rule(scan_dir, raw);
            if rule.contains('/') {
                filter.relative.push(rule);
            } else {
                filter.names.push(rule);
            }
        }
        filter
    }

    pub fn is_empty(&self) -> bool {
        self.relative.is_empty() && self.names.is_empty()
    }

    /// Whether `file` (absolute, inside `scan_dir`) is exempt from the check
    pub fn is_exempt(&self, scan_dir: &Path, file: &Path) -> Result<bool> {
        if self.is_empty() {
            return Ok(false);
        }
        let file = normalize_abs(file)?;
        let rel = relative_slash(scan_dir, &file)?;
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(self.relative.iter().any(|rule| *rule == rel)
            || self.names.iter().any(|rule| *rule == name))
    }

    /// Drop exempt files, keeping the order of the rest
    pub fn retain_checked(&self, scan_dir: &Path, files: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        if self.is_empty() || files.is_empty() {
            return Ok(files);
        }
        let scan_dir = normalize_abs(scan_dir)?;
        let mut kept = Vec::with_capacity(files.len());
        for file in files {
            if !self.is_exempt(&scan_dir, &file)? {
                kept.push(file);
            }
        }
        Ok(kept)
    }
}

fn normalize_check_rule(scan_dir: &Path, rule: &str) -> String {
    let path = Path::new(rule);
    if path.is_absolute()
        && let Ok(rel) = relative_slash(scan_dir, &clean_path(path))
        && rel != ".."
        && !rel.starts_with("../")
    {
        return rel;
    }
    clean_slash(rule)
}
