use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid trending URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("scraped page produced an invalid snapshot: {0}")]
    Malformed(#[from] ghtrend_core::CoreError),
}
