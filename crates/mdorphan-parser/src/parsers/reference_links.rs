//! Reference-style link parser: `[text][label]` plus `[label]: destination`
//!
//! Labels compare case-insensitively. When a label is defined more than
//! once, the first definition in the document wins.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// `[label]: destination` at the start of a line, up to three spaces indented.
static REFERENCE_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s{0,3}\[([^\]]+)\]:\s*(\S+)").expect("valid reference definition regex")
});

/// `[text][label]`; the label may be empty (and is then ignored).
static REFERENCE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]]+\]\[([^\]]*)\]").expect("valid reference link regex")
});

/// Label → raw destination map for one document.
#[derive(Debug, Default)]
pub struct ReferenceDefinitions<'a> {
    defs: HashMap<String, &'a str>,
}

impl<'a> ReferenceDefinitions<'a> {
    /// Collect every well-formed definition in `content`.
    pub fn parse(content: &'a str) -> Self {
        let mut defs = HashMap::new();
        if !content.contains("]:") {
            return Self { defs };
        }

        for caps in REFERENCE_DEFINITION.captures_iter(content) {
            let (Some(label), Some(dest)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let label = label.as_str().trim().to_lowercase();
            let dest = dest.as_str().trim();
            if label.is_empty() || dest.is_empty() {
                continue;
            }
            defs.entry(label).or_insert(dest);
        }
        Self { defs }
    }

    /// Destination for `label`, compared case-insensitively.
    pub fn resolve(&self, label: &str) -> Option<&'a str> {
        self.defs.get(&label.trim().to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Raw destinations of all reference-style links with a matching
/// definition, in source order of the links.
pub fn reference_destinations(content: &str) -> Vec<&str> {
    let defs = ReferenceDefinitions::parse(content);
    if defs.is_empty() {
        return Vec::new();
    }

    REFERENCE_LINK
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|label| label.as_str().trim())
        .filter(|label| !label.is_empty())
        .filter_map(|label| defs.resolve(label))
        .collect()
}
