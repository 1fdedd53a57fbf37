//! Snapshot data model.
//!
//! ## Snapshot file shape
//!
//! Snapshots are stored as `{ "date", "timeframe", "repos": [...] }` with
//! camelCase record keys. Files written by the earlier Node scripts store
//! `totalStars` and `forks` as comma-grouped strings (`"12,345"`), while
//! `starsGained` is a plain number. Every count field accepts either form so
//! both generations of files load.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::diff::{compare, Comparison};
use crate::error::CoreError;

/// Reporting window a snapshot was captured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    /// All timeframes, in report order.
    pub const ALL: [Timeframe; 3] = [Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
        }
    }

    /// Phrase the trending page uses after the period star count,
    /// e.g. `"1,234 stars this week"`.
    #[must_use]
    pub fn gain_phrase(self) -> &'static str {
        match self {
            Timeframe::Daily => "today",
            Timeframe::Weekly => "this week",
            Timeframe::Monthly => "this month",
        }
    }

    /// Section heading used in rendered reports.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Timeframe::Daily => "Daily Trending",
            Timeframe::Weekly => "Weekly Trending",
            Timeframe::Monthly => "Monthly Trending",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Timeframe::Daily),
            "weekly" => Ok(Timeframe::Weekly),
            "monthly" => Ok(Timeframe::Monthly),
            _ => Err(CoreError::InvalidTimeframe(s.to_string())),
        }
    }
}

/// One ranked repository in one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoRecord {
    /// 1-based position within the snapshot.
    pub rank: u32,
    /// `"owner/project"`; the join key across snapshots.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub language: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total_stars: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub forks: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub stars_gained: u64,
    /// `"today"`, `"this week"` or `"this month"`; empty when the page had no gain line.
    #[serde(default)]
    pub gain_period: String,
    /// Filled in at report time by the translator. Never persisted.
    #[serde(skip)]
    pub translated_description: Option<String>,
}

impl RepoRecord {
    /// Builds a record with only the join key and rank set.
    #[must_use]
    pub fn new(rank: u32, name: impl Into<String>) -> Self {
        Self {
            rank,
            name: name.into(),
            description: String::new(),
            language: String::new(),
            total_stars: 0,
            forks: 0,
            stars_gained: 0,
            gain_period: String::new(),
            translated_description: None,
        }
    }

    /// The translated description when one is available, otherwise the original.
    #[must_use]
    pub fn display_description(&self) -> &str {
        self.translated_description
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.description)
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("https://github.com/{}", self.name)
    }
}

/// Parses a count as rendered on GitHub (`"12,345"`). Blank input counts as zero.
#[must_use]
pub fn parse_count(raw: &str) -> Option<u64> {
    let digits: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Number(u64),
        Text(String),
    }

    match RawCount::deserialize(deserializer)? {
        RawCount::Number(n) => Ok(n),
        RawCount::Text(s) => {
            parse_count(&s).ok_or_else(|| de::Error::custom(format!("invalid count: {s:?}")))
        }
    }
}

/// A dated, timeframe-scoped list of records ordered by rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub timeframe: Timeframe,
    pub repos: Vec<RepoRecord>,
}

impl Snapshot {
    #[must_use]
    pub fn new(timeframe: Timeframe, date: NaiveDate, repos: Vec<RepoRecord>) -> Self {
        Self {
            date,
            timeframe,
            repos,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Checks that names are non-empty and unique and that ranks run
    /// `1..=len` in order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedSnapshot`] describing the first violation.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::with_capacity(self.repos.len());

        for (expected_rank, repo) in (1u32..).zip(&self.repos) {
            if repo.name.trim().is_empty() {
                return Err(self.malformed(format!(
                    "record at rank {expected_rank} has an empty name"
                )));
            }
            if repo.rank != expected_rank {
                return Err(self.malformed(format!(
                    "'{}' has rank {} where rank {expected_rank} was expected",
                    repo.name, repo.rank
                )));
            }
            if !seen.insert(repo.name.as_str()) {
                return Err(self.malformed(format!("duplicate name '{}'", repo.name)));
            }
        }

        Ok(())
    }

    /// Diffs this snapshot against an optional earlier one.
    #[must_use]
    pub fn compare_with(&self, previous: Option<&Snapshot>) -> Comparison {
        compare(&self.repos, previous.map(|p| p.repos.as_slice()))
    }

    fn malformed(&self, reason: String) -> CoreError {
        CoreError::MalformedSnapshot {
            timeframe: self.timeframe,
            date: self.date,
            reason,
        }
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
