//! Local link extraction over raw markdown text (regex layers, no block
//! structure).

use indexmap::IndexSet;
use mdorphan_core::ExtensionSet;

mod inline_links;
pub mod link_utils;
mod reference_links;

pub use self::inline_links::inline_destinations;
pub use self::reference_links::{ReferenceDefinitions, reference_destinations};

/// Extracts directory-relative local document links from markdown.
#[derive(Debug, Clone, Default)]
pub struct LinkExtractor {
    extensions: ExtensionSet,
}

impl LinkExtractor {
    /// Create an extractor accepting the given document extensions
    pub fn new(extensions: ExtensionSet) -> Self {
        Self { extensions }
    }

    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    /// Distinct local targets in first-seen order: inline links first, then
    /// reference-style links, each in source order.
    pub fn extract(&self, content: &str) -> Vec<String> {
        let mut seen = IndexSet::new();

        let raw = inline_destinations(content)
            .into_iter()
            .chain(reference_destinations(content));
        for destination in raw {
            if let Some(target) = link_utils::normalize_target(destination, &self.extensions) {
                seen.insert(target);
            }
        }

        seen.into_iter().collect()
    }
}
