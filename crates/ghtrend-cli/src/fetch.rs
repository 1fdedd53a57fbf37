//! `fetch` command: download each requested trending page and store it.
//!
//! Timeframes are fetched concurrently. A failing timeframe is logged and
//! counted; the command only fails when every timeframe failed.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use ghtrend_core::{AppConfig, Timeframe};
use ghtrend_scraper::TrendingClient;
use ghtrend_store::SnapshotStore;

/// Per-timeframe tally of a fetch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchSummary {
    pub saved: usize,
    pub failed: usize,
}

/// Requested timeframes in report order without repeats; empty means all.
pub(crate) fn select_timeframes(requested: &[Timeframe]) -> Vec<Timeframe> {
    if requested.is_empty() {
        return Timeframe::ALL.to_vec();
    }
    let mut selected = requested.to_vec();
    selected.sort_unstable();
    selected.dedup();
    selected
}

pub(crate) fn build_trending_client(config: &AppConfig) -> anyhow::Result<TrendingClient> {
    TrendingClient::new(
        &config.trending_url,
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
    )
    .context("failed to build trending client")
}

/// Fetches and saves a snapshot dated `date` for each requested timeframe.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or if every
/// timeframe failed. Individual failures are logged, not propagated.
pub(crate) async fn run_fetch(
    config: &AppConfig,
    requested: &[Timeframe],
    date: NaiveDate,
) -> anyhow::Result<FetchSummary> {
    let timeframes = select_timeframes(requested);
    let client = build_trending_client(config)?;
    let store = SnapshotStore::new(&config.data_dir);

    let results: Vec<(Timeframe, anyhow::Result<PathBuf>)> = stream::iter(timeframes.iter().copied())
        .map(|timeframe| {
            let fut = fetch_timeframe(&client, &store, timeframe, date);
            async move { (timeframe, fut.await) }
        })
        .buffer_unordered(Timeframe::ALL.len())
        .collect()
        .await;

    let mut summary = FetchSummary {
        saved: 0,
        failed: 0,
    };
    for (timeframe, result) in &results {
        match result {
            Ok(path) => {
                summary.saved += 1;
                println!("{timeframe}: saved {}", path.display());
            }
            Err(e) => {
                summary.failed += 1;
                tracing::error!(%timeframe, error = %format!("{e:#}"), "fetch failed");
            }
        }
    }

    if summary.failed > 0 && summary.saved == 0 {
        anyhow::bail!("all {} timeframes failed to fetch", summary.failed);
    }

    tracing::info!(
        saved = summary.saved,
        failed = summary.failed,
        %date,
        "fetch complete"
    );
    Ok(summary)
}

async fn fetch_timeframe(
    client: &TrendingClient,
    store: &SnapshotStore,
    timeframe: Timeframe,
    date: NaiveDate,
) -> anyhow::Result<PathBuf> {
    let snapshot = client
        .fetch_snapshot(timeframe, date)
        .await
        .with_context(|| format!("failed to fetch {timeframe} trending page"))?;
    store
        .save(&snapshot)
        .with_context(|| format!("failed to save {timeframe} snapshot"))
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
