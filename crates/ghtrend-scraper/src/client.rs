use std::time::Duration;

use chrono::NaiveDate;
use ghtrend_core::{Snapshot, Timeframe};
use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::parse::parse_trending_html;
use crate::rate_limit::retry_with_backoff;

/// HTTP client for the GitHub trending page.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. Transient errors (429, 5xx, network failures) are retried
/// with exponential backoff up to `max_retries` additional attempts.
/// Redirects are followed by reqwest's default policy.
pub struct TrendingClient {
    client: Client,
    base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff.
    backoff_base_secs: u64,
}

impl TrendingClient {
    /// Creates a client for the trending page at `base_url`
    /// (normally `https://github.com/trending`).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse, or
    /// [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let base_url = Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_secs,
        })
    }

    /// `{base_url}?since={timeframe}`.
    #[must_use]
    pub fn trending_url(&self, timeframe: Timeframe) -> String {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("since", timeframe.as_str());
        url.to_string()
    }

    /// Downloads the raw trending page HTML for `timeframe`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status; 5xx
    ///   is retried first.
    /// - [`ScraperError::Http`]: network or TLS failure after all retries exhausted.
    pub async fn fetch_page(&self, timeframe: Timeframe) -> Result<String, ScraperError> {
        let url = self.trending_url(timeframe);

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "text/html")
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ScraperError::RateLimited {
                        url,
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Fetches and parses the trending page into a snapshot dated `date`.
    ///
    /// An empty page produces an empty snapshot, not an error.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_page`], and returns
    /// [`ScraperError::Malformed`] if the parsed page repeats a repository.
    pub async fn fetch_snapshot(
        &self,
        timeframe: Timeframe,
        date: NaiveDate,
    ) -> Result<Snapshot, ScraperError> {
        let html = self.fetch_page(timeframe).await?;
        let repos = parse_trending_html(&html);
        if repos.is_empty() {
            tracing::warn!(%timeframe, "trending page contained no repositories");
        } else {
            tracing::info!(%timeframe, count = repos.len(), "parsed trending repositories");
        }

        let snapshot = Snapshot::new(timeframe, date, repos);
        snapshot.validate()?;
        Ok(snapshot)
    }
}
