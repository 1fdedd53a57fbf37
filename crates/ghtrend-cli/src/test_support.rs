use std::path::Path;

use ghtrend_core::{AppConfig, RepoRecord};

/// Config pointing at `root/data` and `root/reports`, with no retries,
/// translation disabled and a trending URL that tests override as needed.
pub(crate) fn test_config(root: &Path) -> AppConfig {
    AppConfig {
        data_dir: root.join("data"),
        report_dir: root.join("reports"),
        log_level: "info".to_owned(),
        trending_url: "http://127.0.0.1:9/trending".to_owned(),
        scraper_request_timeout_secs: 5,
        scraper_user_agent: "ghtrend-test/0.1".to_owned(),
        scraper_max_retries: 0,
        scraper_retry_backoff_base_secs: 0,
        translate_enabled: false,
        translate_url: "http://127.0.0.1:9/translate_a/single".to_owned(),
        translate_source_lang: "en".to_owned(),
        translate_target_lang: "zh-CN".to_owned(),
        translate_delay_ms: 0,
        translate_timeout_secs: 5,
        report_table_limit: 25,
    }
}

pub(crate) fn repo(rank: u32, name: &str) -> RepoRecord {
    let mut record = RepoRecord::new(rank, name);
    record.description = format!("About {name}");
    record.language = "Rust".to_owned();
    record.total_stars = 1_000 + u64::from(rank);
    record
}

pub(crate) fn repos(names: &[&str]) -> Vec<RepoRecord> {
    (1u32..).zip(names).map(|(rank, name)| repo(rank, name)).collect()
}
