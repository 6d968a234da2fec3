//! The AI-sourced daily-fortune payload.
//!
//! Treated as an opaque value: the fields mirror the structured-output
//! schema sent to the generative API, and the camelCase names match both
//! the wire contract and the cached JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyFortune {
    /// Overall luck for the day, clamped to 0–100 at the parse boundary.
    #[serde(deserialize_with = "clamp_score")]
    pub score: u8,
    /// One-sentence summary.
    pub summary: String,
    /// Detailed paragraph.
    pub analysis: String,
    /// Actionable advice.
    pub advice: String,
    pub lucky_color: String,
    pub lucky_direction: String,
}

/// The wire schema promises 0-100 but the model is not bound by it; an
/// out-of-range score is clamped rather than failing the whole payload.
fn clamp_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = u64::deserialize(deserializer)?;
    Ok(u8::try_from(raw.min(100)).unwrap_or(100))
}
