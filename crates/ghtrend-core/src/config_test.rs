use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.data_dir, PathBuf::from("./data"));
    assert_eq!(cfg.report_dir, PathBuf::from("./reports"));
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.trending_url, "https://github.com/trending");
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.scraper_max_retries, 3);
    assert_eq!(cfg.scraper_retry_backoff_base_secs, 5);
    assert!(cfg.translate_enabled);
    assert_eq!(
        cfg.translate_url,
        "https://translate.googleapis.com/translate_a/single"
    );
    assert_eq!(cfg.translate_source_lang, "en");
    assert_eq!(cfg.translate_target_lang, "zh-CN");
    assert_eq!(cfg.translate_delay_ms, 200);
    assert_eq!(cfg.translate_timeout_secs, 10);
    assert_eq!(cfg.report_table_limit, 25);
}

#[test]
fn build_app_config_reads_directory_overrides() {
    let mut map = HashMap::new();
    map.insert("GHTREND_DATA_DIR", "/var/lib/ghtrend/data");
    map.insert("GHTREND_REPORT_DIR", "/var/lib/ghtrend/reports");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/ghtrend/data"));
    assert_eq!(cfg.report_dir, PathBuf::from("/var/lib/ghtrend/reports"));
}

#[test]
fn scraper_max_retries_override() {
    let mut map = HashMap::new();
    map.insert("GHTREND_SCRAPER_MAX_RETRIES", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_max_retries, 5);
}

#[test]
fn scraper_request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("GHTREND_SCRAPER_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GHTREND_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(GHTREND_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn translate_delay_ms_override() {
    let mut map = HashMap::new();
    map.insert("GHTREND_TRANSLATE_DELAY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.translate_delay_ms, 0);
}

#[test]
fn translate_enabled_accepts_common_spellings() {
    for (raw, expected) in [("0", false), ("FALSE", false), ("no", false), ("Yes", true)] {
        let mut map = HashMap::new();
        map.insert("GHTREND_TRANSLATE_ENABLED", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.translate_enabled, expected, "value {raw}");
    }
}

#[test]
fn translate_enabled_invalid() {
    let mut map = HashMap::new();
    map.insert("GHTREND_TRANSLATE_ENABLED", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GHTREND_TRANSLATE_ENABLED"),
        "expected InvalidEnvVar(GHTREND_TRANSLATE_ENABLED), got: {result:?}"
    );
}

#[test]
fn report_table_limit_invalid() {
    let mut map = HashMap::new();
    map.insert("GHTREND_REPORT_TABLE_LIMIT", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GHTREND_REPORT_TABLE_LIMIT"),
        "expected InvalidEnvVar(GHTREND_REPORT_TABLE_LIMIT), got: {result:?}"
    );
}
