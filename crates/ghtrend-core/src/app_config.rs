use std::path::PathBuf;

/// Runtime configuration for the CLI and the collaborators it builds.
///
/// Loaded from environment variables by [`crate::load_app_config`]; every
/// field has a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `{timeframe}-{date}.json` snapshot files.
    pub data_dir: PathBuf,
    /// Directory the rendered `report-{date}.md` files are written to.
    pub report_dir: PathBuf,
    pub log_level: String,
    /// Trending page URL without the `since` query parameter.
    pub trending_url: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_secs: u64,
    pub translate_enabled: bool,
    pub translate_url: String,
    pub translate_source_lang: String,
    pub translate_target_lang: String,
    /// Pause between consecutive translation requests.
    pub translate_delay_ms: u64,
    pub translate_timeout_secs: u64,
    /// Rows shown in each leaderboard table.
    pub report_table_limit: usize,
}
