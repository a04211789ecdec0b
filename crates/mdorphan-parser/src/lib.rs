//! # mdorphan Parser
//!
//! Local link extraction for markdown documents.
//!
//! This crate is deliberately not a markdown parser: it scans raw text with
//! two regex layers and never builds block structure.
//!
//! ## Recognized forms
//!
//! - Inline links: `[label](destination)`
//! - Reference links: `[label][ref]` with a `[ref]: destination` definition
//!   anywhere in the document (labels compare case-insensitively, first
//!   definition wins)
//!
//! ## Destination handling
//!
//! Each destination is stripped of angle brackets, cut at the first unescaped
//! whitespace, unescaped (`\(`, `\)`, `\[`, `\]`, `\#`, `\ `), HTML-entity and
//! percent decoded, and cut at `#` / `?`. External (`http://`, `https://`,
//! `mailto:`) and root-relative (`/…`) destinations are dropped, as is
//! anything whose extension is not accepted. What remains is cleaned of
//! `.`/`..` segments and kept relative to the source document's directory.
//!
//! ## Quick Start
//!
//! ```
//! use mdorphan_core::ExtensionSet;
//! use mdorphan_parser::extract_local_links;
//!
//! let content = "\
//! [a](./a.md) [ext](https://x.com/a.md) [mail](mailto:x@y.com)
//! [frag](./a.md#x) [q](./a.md?y=1) [noext](./a)
//! See [the guide][guide].
//!
//! [guide]: docs/guide.md
//! ";
//!
//! let links = extract_local_links(content, &ExtensionSet::parse(".md"));
//! assert_eq!(links, vec!["a.md", "docs/guide.md"]);
//! ```

pub mod parsers;

pub use parsers::{LinkExtractor, ReferenceDefinitions};

use mdorphan_core::ExtensionSet;

/// Distinct local link targets of `content`, in first-seen order.
///
/// Convenience wrapper around [`LinkExtractor::extract`].
pub fn extract_local_links(content: &str, extensions: &ExtensionSet) -> Vec<String> {
    LinkExtractor::new(extensions.clone()).extract(content)
}

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::extract_local_links;
    pub use crate::parsers::LinkExtractor;
    pub use crate::parsers::link_utils::normalize_target;
    pub use mdorphan_core::ExtensionSet;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md_only() -> ExtensionSet {
        ExtensionSet::parse(".md")
    }

    #[test]
    fn test_extraction_filters_everything_but_one() {
        let content = "[a](./a.md) [ext](https://x.com/a.md) [mail](mailto:x@y.com) \
                       [frag](./a.md#x) [q](./a.md?y=1) [noext](./a)";
        assert_eq!(extract_local_links(content, &md_only()), vec!["a.md"]);
    }

    #[test]
    fn test_dedup_across_forms_keeps_first_seen_order() {
        let content = "[c](c.md) [b](./b.md) [c again](sub/../c.md)\n\
                       [r1][one] [r2][two]\n\n[one]: b.md\n[two]: d.md";
        assert_eq!(
            extract_local_links(content, &md_only()),
            vec!["c.md", "b.md", "d.md"]
        );
    }

    #[test]
    fn test_relative_parent_links_kept() {
        let content = "[up](../other/x.md) [deep](a/b/../../y.md)";
        assert_eq!(
            extract_local_links(content, &md_only()),
            vec!["../other/x.md", "y.md"]
        );
    }

    #[test]
    fn test_escaped_and_encoded_destinations() {
        let content = r"[s](my\ notes.md) [p](my%20notes.md) [e](a&amp;b.md) [t](<t.md> )";
        assert_eq!(
            extract_local_links(content, &md_only()),
            vec!["my notes.md", "a&b.md", "t.md"]
        );
    }

    #[test]
    fn test_case_insensitive_extension() {
        let links = extract_local_links("[x](README.MD)", &md_only());
        assert_eq!(links, vec!["README.MD"]);
    }

    #[test]
    fn test_root_relative_dropped() {
        assert!(extract_local_links("[x](/docs/a.md)", &md_only()).is_empty());
        assert!(extract_local_links(r"[x](\docs\a.md)", &md_only()).is_empty());
    }

    #[test]
    fn test_no_links() {
        assert!(extract_local_links("plain text", &md_only()).is_empty());
        assert!(extract_local_links("", &md_only()).is_empty());
    }
}
