use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a provided value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a provided value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let gemini_api_key = lookup("GEMINI_API_KEY").ok();
    let gemini_base_url = or_default(
        "ZEN_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let gemini_model = or_default("ZEN_GEMINI_MODEL", "gemini-2.5-flash");
    let data_path = PathBuf::from(or_default("ZEN_DATA_PATH", "./zendestiny.json"));

    let language = or_default("ZEN_LANG", "zh")
        .parse()
        .map_err(|e: crate::CoreError| ConfigError::InvalidEnvVar {
            var: "ZEN_LANG".to_string(),
            reason: e.to_string(),
        })?;

    let http_timeout_secs = parse_u64("ZEN_HTTP_TIMEOUT_SECS", "30")?;
    let log_level = or_default("ZEN_LOG_LEVEL", "info");

    Ok(AppConfig {
        gemini_api_key,
        gemini_base_url,
        gemini_model,
        data_path,
        language,
        http_timeout_secs,
        log_level,
    })
}
