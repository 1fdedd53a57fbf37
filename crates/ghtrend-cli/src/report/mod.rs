//! `report` command: compare each timeframe's snapshot for a date against its
//! predecessor, translate descriptions, and render Markdown.
//!
//! Timeframes are independent. A store error on one is logged and that
//! timeframe renders as having no data; the others still render.

mod render;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use ghtrend_core::{AppConfig, Timeframe};
use ghtrend_store::SnapshotStore;
use ghtrend_translate::{Translator, TranslatorConfig};

pub(crate) use render::{Report, TimeframeSection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReportOptions {
    pub date: NaiveDate,
    /// Translate descriptions when the config also enables translation.
    pub translate: bool,
    pub to_stdout: bool,
}

/// Builds the report for `options.date` and writes or prints it.
///
/// Returns the written path, or `None` when printing to stdout.
///
/// # Errors
///
/// Returns an error if the translator cannot be built or the report file
/// cannot be written.
pub(crate) async fn run_report(
    config: &AppConfig,
    options: &ReportOptions,
) -> anyhow::Result<Option<PathBuf>> {
    let store = SnapshotStore::new(&config.data_dir);
    let translator = if options.translate && config.translate_enabled {
        Some(
            Translator::new(TranslatorConfig::from_app_config(config))
                .context("failed to build translator")?,
        )
    } else {
        None
    };

    let sections = build_sections(&store, translator.as_ref(), options.date).await;
    let markdown = Report {
        date: options.date,
        generated_at: Utc::now(),
        sections: &sections,
        table_limit: config.report_table_limit,
    }
    .to_string();

    if options.to_stdout {
        print!("{markdown}");
        return Ok(None);
    }

    let path = write_report(&config.report_dir, options.date, &markdown)?;
    println!("report saved: {}", path.display());
    Ok(Some(path))
}

/// One section per timeframe in [`Timeframe::ALL`] order.
pub(crate) async fn build_sections(
    store: &SnapshotStore,
    translator: Option<&Translator>,
    date: NaiveDate,
) -> Vec<TimeframeSection> {
    let mut sections = Vec::with_capacity(Timeframe::ALL.len());

    for timeframe in Timeframe::ALL {
        let loaded = store
            .load(timeframe, date)
            .and_then(|current| match current {
                Some(current) => Ok(Some((current, store.load_previous(timeframe, date)?))),
                None => Ok(None),
            });

        let (current, previous) = match loaded {
            Ok(Some(pair)) => pair,
            Ok(None) => {
                tracing::warn!(%timeframe, %date, "no snapshot for report date");
                sections.push(TimeframeSection::missing(timeframe));
                continue;
            }
            Err(e) => {
                tracing::error!(%timeframe, %date, error = %e, "failed to load snapshots");
                sections.push(TimeframeSection::missing(timeframe));
                continue;
            }
        };

        let mut comparison = current.compare_with(previous.as_ref());
        if let Some(translator) = translator {
            let requests = translator.translate_records(comparison.records_mut()).await;
            comparison.refresh_derived();
            tracing::info!(%timeframe, requests, "translated descriptions");
        }

        tracing::info!(
            %timeframe,
            count = comparison.classified.len(),
            new = comparison.new_entries.len(),
            dropped = comparison.dropped.len(),
            previous = ?previous.as_ref().map(|p| p.date),
            "compared snapshots"
        );

        sections.push(TimeframeSection {
            timeframe,
            previous_date: previous.map(|p| p.date),
            comparison: Some(comparison),
        });
    }

    sections
}

/// Writes `{report_dir}/report-{date}.md`, creating the directory if needed.
pub(crate) fn write_report(
    report_dir: &Path,
    date: NaiveDate,
    markdown: &str,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(report_dir)
        .with_context(|| format!("failed to create {}", report_dir.display()))?;
    let path = report_dir.join(format!("report-{date}.md"));
    fs::write(&path, markdown).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
