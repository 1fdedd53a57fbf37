//! Markdown rendering of per-timeframe comparisons.
//!
//! Pure formatting: everything shown is already in the [`TimeframeSection`]s,
//! so the output depends only on its inputs.

use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use ghtrend_core::{ClassifiedRepo, Comparison, RankChange, RepoRecord, Timeframe};

const TABLE_DESCRIPTION_CHARS: usize = 60;
const LIST_DESCRIPTION_CHARS: usize = 80;

/// One timeframe's slice of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TimeframeSection {
    pub timeframe: Timeframe,
    /// Date of the snapshot compared against, if any.
    pub previous_date: Option<NaiveDate>,
    /// `None` when there is no current snapshot for the report date.
    pub comparison: Option<Comparison>,
}

impl TimeframeSection {
    pub(crate) fn missing(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            previous_date: None,
            comparison: None,
        }
    }
}

/// A full report, rendered through [`fmt::Display`].
pub(crate) struct Report<'a> {
    pub date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub sections: &'a [TimeframeSection],
    /// Maximum rows in each leaderboard table.
    pub table_limit: usize,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# GitHub Trending Report - {}", self.date)?;
        writeln!(f)?;
        writeln!(
            f,
            "Generated at: {}",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        writeln!(f)?;

        for section in self.sections {
            self.write_section(f, section)?;
        }
        Ok(())
    }
}

impl Report<'_> {
    fn write_section(&self, f: &mut fmt::Formatter<'_>, section: &TimeframeSection) -> fmt::Result {
        writeln!(f, "## {}", section.timeframe.title())?;
        writeln!(f)?;

        let Some(comparison) = &section.comparison else {
            writeln!(f, "_No data for {}_", self.date)?;
            return writeln!(f);
        };

        match section.previous_date {
            Some(previous) => writeln!(f, "_Compared with {previous}_")?,
            None => writeln!(f, "_First snapshot, no history to compare_")?,
        }
        writeln!(f)?;

        writeln!(f, "### Leaderboard")?;
        writeln!(f)?;
        write_table(f, &comparison.classified, self.table_limit)?;
        writeln!(f)?;

        if !comparison.new_entries.is_empty() {
            writeln!(f, "### New Entries ({})", comparison.new_entries.len())?;
            writeln!(f)?;
            for entry in &comparison.new_entries {
                let record = &entry.record;
                let language = if record.language.is_empty() {
                    "N/A"
                } else {
                    record.language.as_str()
                };
                writeln!(
                    f,
                    "- **[{}]({})** ({language}) - {}",
                    record.name,
                    record.url(),
                    truncate_chars(record.display_description(), LIST_DESCRIPTION_CHARS)
                )?;
            }
            writeln!(f)?;
        }

        if !comparison.dropped.is_empty() {
            writeln!(f, "### Dropped ({})", comparison.dropped.len())?;
            writeln!(f)?;
            for record in &comparison.dropped {
                writeln!(f, "- ~~{}~~ (was #{})", record.name, record.rank)?;
            }
            writeln!(f)?;
        }

        if !comparison.rising.is_empty() {
            writeln!(f, "### Fastest Risers")?;
            writeln!(f)?;
            for riser in &comparison.rising {
                writeln!(
                    f,
                    "- **[{}]({})** up {}",
                    riser.record.name,
                    riser.record.url(),
                    riser.change.rise().unwrap_or_default()
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "---")?;
        writeln!(f)
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, rows: &[ClassifiedRepo], limit: usize) -> fmt::Result {
    if rows.is_empty() {
        return writeln!(f, "_No data_");
    }

    writeln!(f, "| Rank | Change | Repository | Stars | Language | Description |")?;
    writeln!(f, "|------|--------|------------|-------|----------|-------------|")?;
    for row in rows.iter().take(limit) {
        let record = &row.record;
        let description =
            truncate_chars(record.display_description(), TABLE_DESCRIPTION_CHARS).replace('|', "/");
        writeln!(
            f,
            "| {} | {} | [{}]({}) | {} | {} | {} |",
            record.rank,
            change_label(row.change),
            record.name,
            record.url(),
            stars_cell(record),
            record.language,
            description
        )?;
    }
    Ok(())
}

pub(crate) fn change_label(change: RankChange) -> String {
    match change {
        RankChange::New => "NEW".to_owned(),
        RankChange::Unchanged => "=".to_owned(),
        RankChange::Risen(n) => format!("▲{n}"),
        RankChange::Fallen(n) => format!("▼{n}"),
    }
}

/// Total stars, falling back to the period gain, or blank when neither is known.
fn stars_cell(record: &RepoRecord) -> String {
    if record.total_stars > 0 {
        record.total_stars.to_string()
    } else if record.stars_gained > 0 {
        record.stars_gained.to_string()
    } else {
        String::new()
    }
}

/// First `max` characters of `text`, never splitting a character.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
