//! Inline link parser: `[text](destination)`

use regex::Regex;
use std::sync::LazyLock;

/// Matches inline links and captures everything between the parentheses,
/// titles and angle brackets included. The destination is cleaned up later
/// by [`super::link_utils::normalize_target`].
static INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]+\]\(([^)]+)\)").expect("valid inline link regex"));

/// Fast pre-filter: skip regex if no inline link pattern exists.
#[inline]
fn has_inline_link(content: &str) -> bool {
    content.contains("](")
}

/// Raw destinations of all inline links, in source order.
pub fn inline_destinations(content: &str) -> Vec<&str> {
    if !has_inline_link(content) {
        return Vec::new();
    }

    INLINE_LINK
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
