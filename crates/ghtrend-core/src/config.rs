use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let data_dir = PathBuf::from(or_default("GHTREND_DATA_DIR", "./data"));
    let report_dir = PathBuf::from(or_default("GHTREND_REPORT_DIR", "./reports"));
    let log_level = or_default("GHTREND_LOG_LEVEL", "info");
    let trending_url = or_default("GHTREND_TRENDING_URL", "https://github.com/trending");

    let scraper_request_timeout_secs =
        parse_var(&or_default, "GHTREND_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default("GHTREND_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_max_retries = parse_var(&or_default, "GHTREND_SCRAPER_MAX_RETRIES", "3")?;
    let scraper_retry_backoff_base_secs =
        parse_var(&or_default, "GHTREND_SCRAPER_RETRY_BACKOFF_BASE_SECS", "5")?;

    let translate_enabled = parse_bool(
        "GHTREND_TRANSLATE_ENABLED",
        &or_default("GHTREND_TRANSLATE_ENABLED", "true"),
    )?;
    let translate_url = or_default(
        "GHTREND_TRANSLATE_URL",
        "https://translate.googleapis.com/translate_a/single",
    );
    let translate_source_lang = or_default("GHTREND_TRANSLATE_SOURCE_LANG", "en");
    let translate_target_lang = or_default("GHTREND_TRANSLATE_TARGET_LANG", "zh-CN");
    let translate_delay_ms = parse_var(&or_default, "GHTREND_TRANSLATE_DELAY_MS", "200")?;
    let translate_timeout_secs = parse_var(&or_default, "GHTREND_TRANSLATE_TIMEOUT_SECS", "10")?;

    let report_table_limit = parse_var(&or_default, "GHTREND_REPORT_TABLE_LIMIT", "25")?;

    Ok(AppConfig {
        data_dir,
        report_dir,
        log_level,
        trending_url,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
        translate_enabled,
        translate_url,
        translate_source_lang,
        translate_target_lang,
        translate_delay_ms,
        translate_timeout_secs,
        report_table_limit,
    })
}

fn parse_var<T, D>(or_default: &D, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: Fn(&str, &str) -> String,
{
    let raw = or_default(var, default);
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a boolean flag. Accepts `1/0`, `true/false`, `yes/no` in any case.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
