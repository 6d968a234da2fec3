//! Domain model for the zendestiny chart toolkit: sexagenary symbols and
//! their classification tables, pillar normalization, the assembled chart
//! snapshot, persisted profile/fortune payload types, and application
//! configuration.

use thiserror::Error;

pub mod app_config;
pub mod chart;
pub mod config;
pub mod fortune;
pub mod pillar;
pub mod profile;
pub mod symbols;

pub use app_config::AppConfig;
pub use chart::{BaziResult, DaYun, Gender, Language};
pub use config::{load_app_config, load_app_config_from_env};
pub use fortune::DailyFortune;
pub use pillar::Pillar;
pub use profile::SavedProfile;
pub use symbols::{Animal, Branch, Element, Stem};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unrecognized gender: {0}")]
    UnknownGender(String),

    #[error("unrecognized language: {0}")]
    UnknownLanguage(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
