use std::time::Duration;

use ghtrend_core::{AppConfig, RepoRecord};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::TranslateError;
use crate::language::looks_like_target;

/// Settings for [`Translator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// When `false`, [`Translator::translate`] returns its input and
    /// [`Translator::translate_records`] leaves records untouched.
    pub enabled: bool,
    /// Endpoint URL, normally `https://translate.googleapis.com/translate_a/single`.
    pub url: String,
    pub source_lang: String,
    pub target_lang: String,
    pub timeout_secs: u64,
    /// Pause between consecutive network requests.
    pub delay_ms: u64,
}

impl TranslatorConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            enabled: config.translate_enabled,
            url: config.translate_url.clone(),
            source_lang: config.translate_source_lang.clone(),
            target_lang: config.translate_target_lang.clone(),
            timeout_secs: config.translate_timeout_secs,
            delay_ms: config.translate_delay_ms,
        }
    }
}

/// Sequential, rate-limited client for the `translate_a/single` endpoint.
pub struct Translator {
    client: Client,
    endpoint: Url,
    config: TranslatorConfig,
}

impl Translator {
    /// # Errors
    ///
    /// Returns [`TranslateError::InvalidUrl`] if the configured endpoint does
    /// not parse, or [`TranslateError::Http`] if the `reqwest::Client` cannot
    /// be built.
    pub fn new(config: TranslatorConfig) -> Result<Self, TranslateError> {
        let endpoint = Url::parse(&config.url).map_err(|e| TranslateError::InvalidUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("Mozilla/5.0")
            .build()?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Translates `text` into the target language.
    ///
    /// Returns `text` unchanged, without a request, when the translator is
    /// disabled, the text is blank, or it already reads as the target
    /// language. Any request failure is logged and also yields `text`.
    pub async fn translate(&self, text: &str) -> String {
        if !self.needs_request(text) {
            return text.to_owned();
        }

        match self.request_translation(text).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(error = %e, "translation failed, keeping original text");
                text.to_owned()
            }
        }
    }

    /// Fills `translated_description` on each record, one request at a time.
    ///
    /// Records with an empty description are skipped. Returns the number of
    /// network requests made. A disabled translator does nothing and returns 0.
    pub async fn translate_records<'a, I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = &'a mut RepoRecord>,
    {
        if !self.config.enabled {
            return 0;
        }

        let delay = Duration::from_millis(self.config.delay_ms);
        let mut requests = 0usize;

        for record in records {
            if record.description.trim().is_empty() {
                continue;
            }
            if self.needs_request(&record.description) {
                if requests > 0 && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                requests += 1;
            }
            let translated = self.translate(&record.description).await;
            record.translated_description = Some(translated);
        }

        tracing::debug!(requests, "translated descriptions");
        requests
    }

    fn needs_request(&self, text: &str) -> bool {
        self.config.enabled
            && !text.trim().is_empty()
            && !looks_like_target(text, &self.config.target_lang)
    }

    fn request_url(&self, text: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", &self.config.source_lang)
            .append_pair("tl", &self.config.target_lang)
            .append_pair("dt", "t")
            .append_pair("q", text);
        url
    }

    async fn request_translation(&self, text: &str) -> Result<String, TranslateError> {
        let response = self.client.get(self.request_url(text)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let json: Value = serde_json::from_str(&body).map_err(|e| TranslateError::Deserialize {
            context: "translate_a/single".to_owned(),
            source: e,
        })?;
        extract_translation(&json)
    }
}

/// Joins the translated segments `json[0][*][0]`.
fn extract_translation(json: &Value) -> Result<String, TranslateError> {
    let segments = json
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::UnexpectedShape("missing segment list".to_owned()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(TranslateError::UnexpectedShape(
            "no translated text in segments".to_owned(),
        ));
    }
    Ok(translated)
}

#[cfg(test)]
#[path = "translator_test.rs"]
mod tests;
