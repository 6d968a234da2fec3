//! Built-in sexagenary calendar.
//!
//! A self-contained [`CalendarSource`] good enough for chart derivation
//! without an external conversion library. Day pillars are exact (anchored
//! on the Julian day number); year and month boundaries use fixed
//! approximate solar-term dates rather than astronomical terms, so charts
//! for births within a day of a term boundary may differ from an
//! ephemeris-backed source.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::calendar::{CalendarSource, Polarity, RawCycle, RawEightChar};
use crate::error::CalendarError;
use zendestiny_core::{Branch, Stem};

/// Supported civil-year range. Outside it the fixed term table is too far
/// from the real solar terms to be meaningful.
const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 3000;

/// Number of decade cycles emitted after the pre-birth segment.
const RAW_CYCLE_COUNT: i64 = 9;

/// Approximate solar-term cutoff for each civil month: `(day, offset)`
/// where `offset` counts sexagenary months from the Yin month (Lichun).
/// A date before its month's cutoff still belongs to the previous term.
const MONTH_TERMS: [(u32, i64); 12] = [
    (6, 11),  // Jan: Xiaohan opens the Chou month
    (4, 0),   // Feb: Lichun opens the Yin month and the sexagenary year
    (6, 1),   // Mar
    (5, 2),   // Apr
    (6, 3),   // May
    (6, 4),   // Jun
    (7, 5),   // Jul
    (8, 6),   // Aug
    (8, 7),   // Sep
    (8, 8),   // Oct
    (7, 9),   // Nov
    (7, 10),  // Dec
];

/// The built-in calendar source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SexagenaryCalendar;

impl SexagenaryCalendar {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Sexagenary year of a civil date: the civil year until Lichun, then the
/// civil year itself.
fn adjusted_year(date: NaiveDate) -> i32 {
    if (date.month(), date.day()) < (2, 4) {
        date.year() - 1
    } else {
        date.year()
    }
}

fn year_indices(date: NaiveDate) -> (i64, i64) {
    let y = i64::from(adjusted_year(date)) - 4;
    (y.rem_euclid(10), y.rem_euclid(12))
}

/// Months since the Yin month, 0–11, per the fixed term table.
fn month_offset(date: NaiveDate) -> i64 {
    let m = date.month0() as usize;
    let (cutoff, offset) = MONTH_TERMS[m];
    if date.day() >= cutoff {
        offset
    } else {
        MONTH_TERMS[(m + 11) % 12].1
    }
}

fn month_indices(date: NaiveDate) -> (i64, i64) {
    let (year_stem, _) = year_indices(date);
    let offset = month_offset(date);
    // Five-tigers rule: the Yin month's stem follows the year stem.
    let first_stem = (year_stem % 5) * 2 + 2;
    let stem = (first_stem + offset).rem_euclid(10);
    let branch = (2 + offset).rem_euclid(12);
    (stem, branch)
}

/// Position of the date in the 60-day cycle, anchored on the Julian day
/// number (1949-10-01 is day 0, Jiazi).
fn day_index(date: NaiveDate) -> i64 {
    let jdn = i64::from(date.num_days_from_ce()) + 1_721_425;
    (jdn + 49).rem_euclid(60)
}

fn hour_indices(time: NaiveTime, day_stem: i64) -> (i64, i64) {
    // 23:00 rolls into the Zi branch of the same day (early-zi convention).
    let branch = (i64::from(time.hour()) + 1) / 2 % 12;
    // Five-rats rule: the Zi hour's stem follows the day stem.
    let stem = ((day_stem % 5) * 2 + branch).rem_euclid(10);
    (stem, branch)
}

/// The fixed term date in `year` at the given month slot (0 = January).
/// Cutoff days never exceed 8, so the date always exists.
fn term_date(year: i32, slot: usize) -> NaiveDate {
    let (day, _) = MONTH_TERMS[slot];
    #[allow(clippy::cast_possible_truncation)]
    NaiveDate::from_ymd_opt(year, slot as u32 + 1, day).unwrap_or_default()
}

/// Days from the birth date to the nearest term boundary in the cycle
/// direction, divided by three per the three-days-per-year rule.
fn start_age(date: NaiveDate, polarity: Polarity) -> u32 {
    let days = match polarity {
        Polarity::Forward => {
            let next = (0..24)
                .map(|i| {
                    let slot = i32::try_from(date.month0()).unwrap_or(0) + i;
                    term_date(date.year() + slot.div_euclid(12), slot.rem_euclid(12) as usize)
                })
                .find(|t| *t > date)
                .unwrap_or(date);
            (next - date).num_days()
        }
        Polarity::Reverse => {
            let prev = (0..24)
                .map(|i| {
                    let slot = i32::try_from(date.month0()).unwrap_or(0) - i;
                    term_date(date.year() + slot.div_euclid(12), slot.rem_euclid(12) as usize)
                })
                .find(|t| *t <= date)
                .unwrap_or(date);
            (date - prev).num_days()
        }
    };
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let age = ((days + 1) / 3).max(1) as u32;
    age
}

fn check_range(date: NaiveDate) -> Result<(), CalendarError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        Ok(())
    } else {
        Err(CalendarError::OutOfRange(date.year()))
    }
}

impl CalendarSource for SexagenaryCalendar {
    fn eight_characters(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<RawEightChar, CalendarError> {
        check_range(date)?;
        let (year_stem, year_branch) = year_indices(date);
        let (month_stem, month_branch) = month_indices(date);
        let day = day_index(date);
        let (day_stem, day_branch) = (day % 10, day % 12);
        let (hour_stem, hour_branch) = hour_indices(time, day_stem);

        Ok(RawEightChar {
            year_stem: Stem::cycle(year_stem).character(),
            year_branch: Branch::cycle(year_branch).character(),
            month_stem: Stem::cycle(month_stem).character(),
            month_branch: Branch::cycle(month_branch).character(),
            day_stem: Stem::cycle(day_stem).character(),
            day_branch: Branch::cycle(day_branch).character(),
            hour_stem: Stem::cycle(hour_stem).character(),
            hour_branch: Branch::cycle(hour_branch).character(),
        })
    }

    fn major_cycles(
        &self,
        date: NaiveDate,
        _time: NaiveTime,
        polarity: Polarity,
    ) -> Result<Vec<RawCycle>, CalendarError> {
        check_range(date)?;
        let (month_stem, month_branch) = month_indices(date);
        let first_age = start_age(date, polarity);
        let direction: i64 = match polarity {
            Polarity::Forward => 1,
            Polarity::Reverse => -1,
        };

        let mut cycles = Vec::with_capacity(10);
        // Entry 0: the pre-birth/infancy segment, which has no token.
        cycles.push(RawCycle {
            start_age: 0,
            end_age: first_age.saturating_sub(1),
            start_year: date.year(),
            gan_zhi: None,
        });

        for i in 1..=RAW_CYCLE_COUNT {
            let stem = Stem::cycle(month_stem + direction * i);
            let branch = Branch::cycle(month_branch + direction * i);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let offset = (10 * (i - 1)) as u32;
            cycles.push(RawCycle {
                start_age: first_age + offset,
                end_age: first_age + offset + 9,
                start_year: date.year() + i32::try_from(first_age + offset).unwrap_or(0),
                gan_zhi: Some(format!("{}{}", stem.character(), branch.character())),
            });
        }

        Ok(cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn first_of_october_1949_is_a_jiazi_day() {
        let raw = SexagenaryCalendar::new()
            .eight_characters(date(1949, 10, 1), noon())
            .unwrap();
        assert_eq!(raw.day_stem, '甲');
        assert_eq!(raw.day_branch, '子');
    }

    #[test]
    fn millennium_noon_matches_the_almanac() {
        let raw = SexagenaryCalendar::new()
            .eight_characters(date(2000, 1, 1), noon())
            .unwrap();
        // 1999 is a Jimao year; the date sits in its Bingzi month.
        assert_eq!((raw.year_stem, raw.year_branch), ('己', '卯'));
        assert_eq!((raw.month_stem, raw.month_branch), ('丙', '子'));
        assert_eq!((raw.day_stem, raw.day_branch), ('戊', '午'));
        assert_eq!((raw.hour_stem, raw.hour_branch), ('戊', '午'));
    }

    #[test]
    fn year_boundary_sits_at_lichun() {
        let calendar = SexagenaryCalendar::new();
        let before = calendar.eight_characters(date(1984, 2, 3), noon()).unwrap();
        let after = calendar.eight_characters(date(1984, 2, 4), noon()).unwrap();
        assert_eq!((before.year_stem, before.year_branch), ('癸', '亥'));
        assert_eq!((after.year_stem, after.year_branch), ('甲', '子'));
    }

    #[test]
    fn late_evening_rolls_into_the_zi_branch() {
        let raw = SexagenaryCalendar::new()
            .eight_characters(date(2000, 1, 1), NaiveTime::from_hms_opt(23, 30, 0).unwrap())
            .unwrap();
        assert_eq!(raw.hour_branch, '子');
    }

    #[test]
    fn out_of_range_year_is_rejected() {
        let err = SexagenaryCalendar::new()
            .eight_characters(date(999, 6, 1), noon())
            .unwrap_err();
        assert!(matches!(err, CalendarError::OutOfRange(999)));
    }

    #[test]
    fn forward_cycles_step_the_month_pillar() {
        // 1990 is a Geng (yang) year; Jun 15 sits in the Renwu month.
        let cycles = SexagenaryCalendar::new()
            .major_cycles(date(1990, 6, 15), noon(), Polarity::Forward)
            .unwrap();
        assert_eq!(cycles.len(), 10);
        assert!(cycles[0].gan_zhi.is_none());
        assert_eq!(cycles[1].gan_zhi.as_deref(), Some("癸未"));
        assert_eq!(cycles[2].gan_zhi.as_deref(), Some("甲申"));
        assert_eq!(cycles[1].start_age, 7);
        assert_eq!(cycles[1].end_age, 16);
        assert_eq!(cycles[1].start_year, 1997);
        assert_eq!(cycles[2].start_age, 17);
    }

    #[test]
    fn reverse_cycles_step_backwards() {
        let cycles = SexagenaryCalendar::new()
            .major_cycles(date(1990, 6, 15), noon(), Polarity::Reverse)
            .unwrap();
        assert_eq!(cycles[1].gan_zhi.as_deref(), Some("辛巳"));
        assert_eq!(cycles[2].gan_zhi.as_deref(), Some("庚辰"));
    }

    #[test]
    fn start_age_is_at_least_one() {
        // Born the day before a term boundary.
        let cycles = SexagenaryCalendar::new()
            .major_cycles(date(1990, 7, 6), noon(), Polarity::Forward)
            .unwrap();
        assert_eq!(cycles[1].start_age, 1);
    }
}
