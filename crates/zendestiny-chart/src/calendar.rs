//! The calendar-conversion capability consumed by chart assembly.
//!
//! The raw output mirrors what a solar/lunar conversion library exposes:
//! eight characters as bare symbols plus an ordered major-cycle timeline.
//! The combined stem+branch token of a cycle entry is the one accessor
//! known to misbehave in conversion libraries, so it is modeled as an
//! `Option<String>`: any failure inside an implementation surfaces as
//! `None` or a short string, never as a panic.

use chrono::{NaiveDate, NaiveTime};

use crate::error::CalendarError;
use zendestiny_core::{Gender, Stem};

/// Direction of the major-cycle sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Forward,
    Reverse,
}

impl Polarity {
    /// Derives the cycle direction from the year-stem parity and gender:
    /// yang year + male or yin year + female runs forward, otherwise
    /// reverse. An unknown year stem counts as yin.
    #[must_use]
    pub fn derive(year_stem: Stem, gender: Gender) -> Self {
        match (year_stem.is_yang(), gender) {
            (true, Gender::Male) | (false, Gender::Female) => Polarity::Forward,
            (true, Gender::Female) | (false, Gender::Male) => Polarity::Reverse,
        }
    }
}

/// The four raw (stem, branch) character pairs for a birth instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEightChar {
    pub year_stem: char,
    pub year_branch: char,
    pub month_stem: char,
    pub month_branch: char,
    pub day_stem: char,
    pub day_branch: char,
    pub hour_stem: char,
    pub hour_branch: char,
}

/// One raw major-cycle entry as produced by a calendar source.
///
/// Index 0 of a raw sequence is the pre-birth/infancy segment and carries
/// no usable token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCycle {
    pub start_age: u32,
    pub end_age: u32,
    pub start_year: i32,
    /// Combined stem+branch token, or `None` when the source could not
    /// produce one for this entry.
    pub gan_zhi: Option<String>,
}

/// A solar-to-sexagenary calendar conversion source.
///
/// Implementations own all calendrical math; the chart layer treats their
/// output as opaque symbols and validates nothing beyond shape.
pub trait CalendarSource {
    /// The four (stem, branch) pairs for the given civil birth instant.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] when the instant cannot be converted.
    fn eight_characters(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<RawEightChar, CalendarError>;

    /// The ordered raw major-cycle timeline for the given birth instant
    /// and direction. Entry 0 is the pre-birth segment.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] when the instant cannot be converted.
    fn major_cycles(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        polarity: Polarity,
    ) -> Result<Vec<RawCycle>, CalendarError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yang_male_runs_forward() {
        assert_eq!(Polarity::derive(Stem::Jia, Gender::Male), Polarity::Forward);
    }

    #[test]
    fn yang_female_runs_reverse() {
        assert_eq!(Polarity::derive(Stem::Jia, Gender::Female), Polarity::Reverse);
    }

    #[test]
    fn yin_female_runs_forward() {
        assert_eq!(Polarity::derive(Stem::Yi, Gender::Female), Polarity::Forward);
    }

    #[test]
    fn unknown_stem_counts_as_yin() {
        assert_eq!(
            Polarity::derive(Stem::Unknown, Gender::Male),
            Polarity::Reverse
        );
    }
}
