use thiserror::Error;

/// Errors from the generative-language client.
///
/// None of these ever escalate to chart-level failures: callers either
/// surface them as a retryable "no fortune today" or as a failed chat turn.
#[derive(Debug, Error)]
pub enum FortuneError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status or an empty payload.
    #[error("generative API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
