//! The assembled chart snapshot and its supporting value types.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::pillar::Pillar;
use crate::symbols::{Branch, Stem};
use crate::CoreError;

/// Birth gender, which together with the year-stem polarity selects the
/// direction of the luck-cycle sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(CoreError::UnknownGender(s.to_string())),
        }
    }
}

/// Output language for AI-sourced content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    En,
    Zh,
}

impl Language {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            _ => Err(CoreError::UnknownLanguage(s.to_string())),
        }
    }
}

/// One decade-scale luck cycle (da yun).
///
/// Retained entries always carry a concrete stem and branch; incomplete
/// raw entries are dropped during reconstruction, never stored partially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaYun {
    pub start_age: u32,
    pub end_age: u32,
    pub start_year: i32,
    pub stem: Stem,
    pub branch: Branch,
}

/// The immutable snapshot of one chart computation.
///
/// Constructed once per successful derivation and never mutated; the day
/// master is always a copy of the day pillar's stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaziResult {
    pub year_pillar: Pillar,
    pub month_pillar: Pillar,
    pub day_pillar: Pillar,
    pub hour_pillar: Pillar,
    pub day_master: Stem,
    pub da_yun: Vec<DaYun>,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub birth_time: NaiveTime,
    pub birth_place: String,
}

impl BaziResult {
    /// The birth instant in the `YYYY-MM-DDTHH:MM` form used for prompt
    /// context and cache keys.
    #[must_use]
    pub fn birth_instant(&self) -> String {
        format!(
            "{}T{}",
            self.birth_date.format("%Y-%m-%d"),
            self.birth_time.format("%H:%M")
        )
    }
}
