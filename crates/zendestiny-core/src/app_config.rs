use std::path::PathBuf;

use crate::chart::Language;

#[derive(Clone)]
pub struct AppConfig {
    /// API key for the generative-language service. Chart derivation works
    /// without it; fortune and chat commands require it.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    /// Path of the JSON key-value file backing profiles and the fortune cache.
    pub data_path: PathBuf,
    /// Default output language for AI-sourced content.
    pub language: Language,
    pub http_timeout_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("data_path", &self.data_path)
            .field("language", &self.language)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
