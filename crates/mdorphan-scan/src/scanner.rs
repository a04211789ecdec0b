//! Directory walk producing the document inventory

use crate::ignore::IgnoreRules;
use mdorphan_core::prelude::*;
use std::path::{Path, PathBuf};
use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

/// Walks a scan directory and collects documents with an accepted extension.
#[derive(Debug, Clone)]
pub struct Scanner {
    dir: PathBuf,
    extensions: ExtensionSet,
    ignore: Vec<String>,
}

impl Scanner {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extensions: ExtensionSet::default(),
            ignore: Vec::new(),
        }
    }

    pub fn extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    /// Ignore rules relative to the scan directory (see [`IgnoreRules`])
    pub fn ignore<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = rules.into_iter().map(Into::into).collect();
        self
    }

    /// Absolute, normalized paths of every accepted document, sorted.
    ///
    /// Ignored directories are not descended into. Symlinks are not followed.
    #[instrument(skip(self), fields(dir = ?self.dir), name = "scan_files")]
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if is_blank_path(&self.dir) {
            return Err(Error::config_error("scan dir is required"));
        }
        let dir = normalize_abs(&self.dir)?;
        let rules = IgnoreRules::compile(&self.ignore)?;

        let mut files = Vec::new();
        let walker = WalkDir::new(&dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_ignored(&dir, entry, &rules));

        for entry in walker {
            let entry = entry.map_err(|e| Error::scan_error(e.to_string()))?;
            if entry.file_type().is_dir() {
                continue;
            }
            if !self.extensions.matches_path(entry.path()) {
                continue;
            }
            files.push(normalize_abs(entry.path())?);
        }

        files.sort();
        log::debug!("Scanned {}: {} documents", dir.display(), files.len());
        Ok(files)
    }
}

fn is_ignored(dir: &Path, entry: &DirEntry, rules: &IgnoreRules) -> bool {
    if entry.depth() == 0 || rules.is_empty() {
        return false;
    }
    let Ok(rel) = entry.path().strip_prefix(dir) else {
        return false;
    };
    let rel = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let ignored = rules.matches(&rel);
    if ignored {
        log::debug!("Ignoring {}", rel);
    }
    ignored
}
