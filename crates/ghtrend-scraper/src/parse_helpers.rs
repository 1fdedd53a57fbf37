//! Text clean-up shared by the trending page parser.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tags regex"));
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*").expect("valid number regex"));

/// Strips tags, decodes common entities and collapses whitespace.
pub(crate) fn clean_text(input: &str) -> String {
    let no_tags = TAG_RE.replace_all(input, " ");
    decode_entities(&no_tags)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes the handful of entities GitHub emits in descriptions.
///
/// `&amp;` goes last so `&amp;lt;` stays the literal text `&lt;`.
pub(crate) fn decode_entities(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// First comma-grouped number in the tag-stripped text, or 0.
pub(crate) fn first_count(html: &str) -> u64 {
    let text = clean_text(html);
    NUMBER_RE
        .find(&text)
        .and_then(|m| ghtrend_core::parse_count(m.as_str()))
        .unwrap_or(0)
}
