//! Shared utilities for turning a raw link destination into a local target.
//!
//! Used by both the inline and the reference-style parsers so every link
//! form goes through the same decoding and filtering.

use mdorphan_core::ExtensionSet;
use mdorphan_core::utils::clean_slash;
use percent_encoding::percent_decode_str;

/// Normalize a raw destination into a directory-relative local target.
///
/// Returns `None` for empty, external (`http://`, `https://`, `mailto:`),
/// root-relative (`/...`) and non-document destinations.
///
/// # Examples
///
/// ```
/// use mdorphan_core::ExtensionSet;
/// use mdorphan_parser::parsers::link_utils::normalize_target;
///
/// let exts = ExtensionSet::parse(".md");
/// assert_eq!(normalize_target("./guide/../a.md#intro", &exts), Some("a.md".to_string()));
/// assert_eq!(normalize_target("<my\\ file.md>", &exts), Some("my file.md".to_string()));
/// assert_eq!(normalize_target("https://example.com/a.md", &exts), None);
/// assert_eq!(normalize_target("/abs/a.md", &exts), None);
/// assert_eq!(normalize_target("image.png", &exts), None);
/// ```
pub fn normalize_target(raw: &str, extensions: &ExtensionSet) -> Option<String> {
    let destination = parse_destination(raw);
    if destination.is_empty() {
        return None;
    }

    let decoded = decode_escapes(destination);
    let target = strip_query_and_fragment(&decoded).trim();
    if target.is_empty() || is_external(target) || target.starts_with('/') {
        return None;
    }

    // `\docs\a.md` only turns root-relative once separators are unified
    let cleaned = clean_slash(target);
    if cleaned.starts_with('/') || !extensions.matches_target(&cleaned) {
        return None;
    }
    Some(cleaned)
}

/// Strip angle brackets and cut at the first unescaped whitespace.
pub fn parse_destination(raw: &str) -> &str {
    let mut dest = raw.trim();
    if dest.is_empty() {
        return dest;
    }

    if dest.starts_with('<')
        && let Some(end) = dest.find('>')
        && end > 1
    {
        dest = dest[1..end].trim();
    }

    let bytes = dest.as_bytes();
    let cut = bytes.iter().enumerate().position(|(i, &b)| {
        matches!(b, b' ' | b'\t' | b'\n' | b'\r') && !(i > 0 && bytes[i - 1] == b'\\')
    });
    if let Some(cut) = cut {
        dest = &dest[..cut];
    }
    dest.trim()
}

/// Decode backslash escapes, HTML entities and percent-encoding.
///
/// A malformed percent sequence or a non-UTF-8 result leaves the
/// entity-decoded text as is.
pub fn decode_escapes(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && matches!(next, ' ' | '(' | ')' | '[' | ']' | '#')
        {
            unescaped.push(next);
            chars.next();
            continue;
        }
        unescaped.push(c);
    }

    let entities = html_escape::decode_html_entities(&unescaped).into_owned();
    percent_decode_strict(&entities).unwrap_or(entities)
}

/// Percent-decode, rejecting `%` not followed by two hex digits.
fn percent_decode_strict(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || (bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return None;
    }
    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Cut at the earliest `#` or `?`.
pub fn strip_query_and_fragment(value: &str) -> &str {
    match value.find(['#', '?']) {
        Some(cut) => &value[..cut],
        None => value,
    }
}

/// Whether the destination points outside the document set.
pub fn is_external(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("mailto:")
}
