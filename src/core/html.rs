// src/core/html.rs
use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => { in_tag = false; out.push(' '); }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Human-visible text of a document: tags dropped, entities decoded, whitespace collapsed.
pub fn visible_text(doc: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(doc)))
}

/// Does `needle` occur in the page, either verbatim in the markup or in its visible text?
///
/// The verbatim pass catches text sitting in attributes or scripts; the
/// visible-text pass catches text that the markup splits with tags, entities
/// or line breaks. An empty needle never matches.
pub fn page_contains(doc: &str, needle: &str, ignore_case: bool) -> bool {
    let needle = normalize_ws(needle);
    if needle.is_empty() {
        return false;
    }

    if ignore_case {
        let needle = to_lower(&needle);
        to_lower(doc).contains(&needle) || to_lower(&visible_text(doc)).contains(&needle)
    } else {
        doc.contains(&needle) || visible_text(doc).contains(&needle)
    }
}
