//! Inline markdown link handling.

use std::sync::LazyLock;

use regex::Regex;

static MARKDOWN_LINK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").ok());

/// Replaces `[label](url)` with `label`.
pub fn strip_markdown_links(text: &str) -> String {
    match MARKDOWN_LINK.as_ref() {
        Some(re) => re.replace_all(text, "$1").into_owned(),
        None => text.to_string(),
    }
}

/// Extracts `(label, url)` pairs in order of appearance.
pub fn markdown_links(text: &str) -> Vec<(String, String)> {
    static LINK_PARTS: LazyLock<Option<Regex>> =
        LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").ok());
    let Some(re) = LINK_PARTS.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}
