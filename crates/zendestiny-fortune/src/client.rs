//! HTTP client for the generative-language `generateContent` endpoint.
//!
//! Wraps `reqwest` with API key management and typed request/response
//! handling. Two consumption modes: a one-shot structured-output completion
//! for the daily fortune, and free-text generation for the chat session,
//! either as a single reply or as an SSE chunk stream.

use std::time::Duration;

use chrono::NaiveDate;
use futures::StreamExt;
use reqwest::Client;

use zendestiny_core::{BaziResult, DailyFortune, Language};

use crate::error::FortuneError;
use crate::prompt;
use crate::types::{Content, GenerateRequest, GenerateResponse, GenerationConfig};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for the generative-language REST API.
///
/// Use [`GeminiClient::new`] for production or
/// [`GeminiClient::with_base_url`] to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`FortuneError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, FortuneError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FortuneError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, FortuneError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("zendestiny/0.1 (bazi-toolkit)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn stream_endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:streamGenerateContent",
            self.base_url, self.model
        )
    }

    /// Sends a request and returns the first candidate's concatenated text.
    ///
    /// # Errors
    ///
    /// - [`FortuneError::Http`] on network failure.
    /// - [`FortuneError::Api`] on a non-success status or an empty
    ///   candidate list.
    /// - [`FortuneError::Deserialize`] if the envelope does not match the
    ///   expected shape.
    pub(crate) async fn generate(&self, request: &GenerateRequest) -> Result<String, FortuneError> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FortuneError::Api(format!("API returned status {status}")));
        }

        let body: serde_json::Value = response.json().await?;
        let envelope: GenerateResponse =
            serde_json::from_value(body).map_err(|e| FortuneError::Deserialize {
                context: "generateContent envelope".to_string(),
                source: e,
            })?;

        let text = envelope
            .candidates
            .first()
            .map(|c| c.content.text())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(FortuneError::Api("empty response text".to_string()));
        }
        Ok(text)
    }

    /// Sends a request to the streaming endpoint (SSE), invoking `on_chunk`
    /// for each text fragment as it arrives, and returns the full
    /// concatenated reply.
    ///
    /// # Errors
    ///
    /// - [`FortuneError::Http`] on network failure, including mid-stream.
    /// - [`FortuneError::Api`] on a non-success status or a stream that
    ///   carried no text.
    /// - [`FortuneError::Deserialize`] if a stream chunk does not match the
    ///   expected envelope.
    pub(crate) async fn generate_stream<F>(
        &self,
        request: &GenerateRequest,
        mut on_chunk: F,
    ) -> Result<String, FortuneError>
    where
        F: FnMut(&str),
    {
        let response = self
            .client
            .post(self.stream_endpoint())
            .query(&[("alt", "sse"), ("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FortuneError::Api(format!("API returned status {status}")));
        }

        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        let mut reply = String::new();
        while let Some(bytes) = stream.next().await {
            buffer.extend_from_slice(&bytes?);
            // SSE frames are newline-delimited; anything after the last
            // newline is an incomplete frame kept for the next read. Only
            // complete lines are decoded, so a multibyte character split
            // across network chunks stays intact.
            while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&line);
                let Some(payload) = line.trim().strip_prefix("data:") else {
                    continue;
                };
                let payload = payload.trim();
                if payload.is_empty() {
                    continue;
                }
                let envelope: GenerateResponse =
                    serde_json::from_str(payload).map_err(|e| FortuneError::Deserialize {
                        context: "streamGenerateContent chunk".to_string(),
                        source: e,
                    })?;
                let text = envelope
                    .candidates
                    .first()
                    .map(|c| c.content.text())
                    .unwrap_or_default();
                if !text.is_empty() {
                    on_chunk(&text);
                    reply.push_str(&text);
                }
            }
        }

        if reply.is_empty() {
            return Err(FortuneError::Api("empty response text".to_string()));
        }
        Ok(reply)
    }

    /// Fetches the structured daily fortune for a chart.
    ///
    /// The request pins `application/json` output with a schema requiring
    /// all six fortune fields, so a parse failure means the service broke
    /// its own contract.
    ///
    /// # Errors
    ///
    /// - [`FortuneError::Http`] on network failure.
    /// - [`FortuneError::Api`] on a non-success status or empty payload.
    /// - [`FortuneError::Deserialize`] if the payload is not a valid
    ///   fortune document.
    pub async fn generate_fortune(
        &self,
        chart: &BaziResult,
        language: Language,
        today: NaiveDate,
    ) -> Result<DailyFortune, FortuneError> {
        let request = GenerateRequest {
            contents: vec![Content::user(prompt::fortune_prompt(chart, language, today))],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: prompt::fortune_schema(),
            }),
        };

        let text = self.generate(&request).await?;
        serde_json::from_str(&text).map_err(|e| FortuneError::Deserialize {
            context: "daily fortune payload".to_string(),
            source: e,
        })
    }
}
