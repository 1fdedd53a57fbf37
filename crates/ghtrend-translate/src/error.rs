use thiserror::Error;

/// Errors from the translation endpoint.
///
/// Only [`crate::Translator::new`] surfaces these to callers. Per-request
/// failures are logged and swallowed by [`crate::Translator::translate`].
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid translation endpoint '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("translation endpoint returned HTTP {status}")]
    UnexpectedStatus { status: u16 },

    /// The response body could not be parsed as JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed but is not the nested `[[["text", ...], ...], ...]` shape.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}
