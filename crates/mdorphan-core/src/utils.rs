//! Shared utilities for operations across mdorphan crates.
//!
//! Provides helpers for:
//! - Serialization with consistent error handling
//! - Path normalization and scan-boundary checks
//! - Relative, `/`-separated display paths

use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Generic JSON serialization with consistent error handling
/// Works with any type that implements Serialize (including slices)
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| Error::export_error(format!("Failed to serialize {} as JSON: {}", context, e)))
}

/// Resolve `path` against the working directory and remove `.`/`..`
/// segments lexically. The path does not need to exist.
pub fn normalize_abs(path: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(path)
        .map_err(|e| Error::invalid_path(format!("{}: {}", path.display(), e)))?;
    Ok(clean_path(&abs))
}

/// Lexically normalize a path: drop `.`, apply `..` against the preceding
/// component, never climb above the root of an absolute path.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Prefix(p) => normalized.push(p.as_os_str()),
            Component::RootDir => normalized.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    normalized.pop();
                    depth -= 1;
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::Normal(name) => {
                normalized.push(name);
                depth += 1;
            }
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Lexically clean a `/`- or `\`-separated relative string and return it
/// with `/` separators. Leading `..` segments are kept.
pub fn clean_slash(raw: &str) -> String {
    let rooted = raw.starts_with('/') || raw.starts_with('\\');
    let mut parts: Vec<&str> = Vec::new();
    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Whether a path argument is empty or whitespace only.
pub fn is_blank_path(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}

/// Whether `path` equals `dir` or is nested beneath it. Both are expected
/// to be normalized.
pub fn is_within_dir(dir: &Path, path: &Path) -> bool {
    path.starts_with(dir)
}

/// `path` relative to `base`, `/`-separated. Paths outside `base` climb
/// with `..`.
pub fn relative_slash(base: &Path, path: &Path) -> Result<String> {
    let base_parts: Vec<Component> = base.components().collect();
    let path_parts: Vec<Component> = path.components().collect();

    if base.has_root() != path.has_root() {
        return Err(Error::invalid_path(format!(
            "can't make {} relative to {}",
            path.display(),
            base.display()
        )));
    }

    let common = base_parts
        .iter()
        .zip(path_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = Vec::new();
    for _ in common..base_parts.len() {
        segments.push("..".to_string());
    }
    for part in &path_parts[common..] {
        segments.push(part.as_os_str().to_string_lossy().into_owned());
    }

    if segments.is_empty() {
        return Ok(".".to_string());
    }
    Ok(segments.join("/"))
}

/// [`relative_slash`] over many paths, failing on the first error.
pub fn relative_slash_many(base: &Path, paths: &[PathBuf]) -> Result<Vec<String>> {
    paths.iter().map(|p| relative_slash(base, p)).collect()
}
