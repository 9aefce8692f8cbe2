//! Citation markers and reference-section recognition.

use regex::Regex;
use std::sync::LazyLock;

/// Heading texts that introduce a reference section, compared trimmed and
/// case-insensitively. Both heading tagging and reference-list extraction use
/// this one list.
pub const REFERENCE_SYNONYMS: &[&str] = &[
    "references",
    "reference list",
    "bibliography",
    "works cited",
    "literature cited",
    "sources",
];

static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(@[^\[\]]+)\]").expect("BUG: invalid CITATION_RE regex literal")
});

pub fn is_reference_heading(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    REFERENCE_SYNONYMS.contains(&normalized.as_str())
}

/// Returns every citation key in `text`, in order, duplicates kept.
///
/// A group such as `[@a; @b, p. 4]` yields `a` then `b`; locators after the
/// key are dropped.
pub fn extract_citation_keys(text: &str) -> Vec<String> {
    let mut keys = Vec::new();
    for caps in CITATION_RE.captures_iter(text) {
        for part in caps[1].split(';') {
            let Some(rest) = part.trim().strip_prefix('@') else {
                continue;
            };
            let key: String = rest
                .chars()
                .take_while(|c| !c.is_whitespace() && *c != ',')
                .collect();
            if !key.is_empty() {
                keys.push(key);
            }
        }
    }
    keys
}
