//! Extraction of ranked repositories from the trending page HTML.
//!
//! ## Observed page shape
//!
//! Each listed repository is one `<article class="Box-row">`. Inside it:
//! - the `<h2>` holds a link `href="/owner/project"`;
//! - the first `<p class="...">` holds the description (may be absent);
//! - `<span itemprop="programmingLanguage">` holds the language (may be absent);
//! - the `/owner/project/stargazers` and `/owner/project/forks` links hold an
//!   octicon `<svg>` followed by a comma-grouped count;
//! - a trailing line reads `1,234 stars today` (or `this week` / `this month`).
//!
//! Articles without a repository link are skipped. Ranks are assigned in page
//! order over the articles that were kept.

use std::sync::LazyLock;

use ghtrend_core::{parse_count, RepoRecord};
use regex::Regex;

use crate::parse_helpers::{clean_text, first_count};

static ARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<article class="Box-row">(.*?)</article>"#).expect("valid article regex")
});
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<h2[^>]*>.*?href="/([\w.-]+/[\w.-]+)".*?</h2>"#).expect("valid name regex")
});
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<p class="[^"]*">(.*?)</p>"#).expect("valid description regex")
});
static LANGUAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)itemprop="programmingLanguage">(.*?)</span>"#).expect("valid language regex")
});
static STARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)href="/[^"]*/stargazers"[^>]*>.*?</svg>(.*?)</a>"#)
        .expect("valid stargazers regex")
});
static FORKS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)href="/[^"]*/forks"[^>]*>.*?</svg>(.*?)</a>"#).expect("valid forks regex")
});
static GAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([\d,]+)\s+stars\s+(today|this week|this month)").expect("valid gain regex")
});

/// Parses every repository listed on a trending page, in page order.
///
/// Never fails: a page with no recognisable articles yields an empty list.
#[must_use]
pub fn parse_trending_html(html: &str) -> Vec<RepoRecord> {
    let mut repos = Vec::new();
    let mut next_rank = 1u32;

    for article in ARTICLE_RE.captures_iter(html) {
        let Some(block) = article.get(1).map(|m| m.as_str()) else {
            continue;
        };
        let Some(record) = parse_article(block, next_rank) else {
            tracing::debug!(rank = next_rank, "skipping trending article without a repo link");
            continue;
        };
        repos.push(record);
        next_rank += 1;
    }

    repos
}

fn parse_article(block: &str, rank: u32) -> Option<RepoRecord> {
    let name = NAME_RE
        .captures(block)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())?;

    let capture = |re: &Regex| -> Option<String> {
        re.captures(block)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
    };

    let description = capture(&DESCRIPTION_RE)
        .map(|raw| clean_text(&raw))
        .unwrap_or_default();
    let language = capture(&LANGUAGE_RE)
        .map(|raw| clean_text(&raw))
        .unwrap_or_default();
    let total_stars = capture(&STARS_RE).map_or(0, |raw| first_count(&raw));
    let forks = capture(&FORKS_RE).map_or(0, |raw| first_count(&raw));

    let (stars_gained, gain_period) = GAIN_RE
        .captures(block)
        .map(|cap| {
            let gained = cap
                .get(1)
                .and_then(|m| parse_count(m.as_str()))
                .unwrap_or(0);
            let period = cap
                .get(2)
                .map(|m| m.as_str().to_ascii_lowercase())
                .unwrap_or_default();
            (gained, period)
        })
        .unwrap_or_default();

    Some(RepoRecord {
        rank,
        name,
        description,
        language,
        total_stars,
        forks,
        stars_gained,
        gain_period,
        translated_description: None,
    })
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
