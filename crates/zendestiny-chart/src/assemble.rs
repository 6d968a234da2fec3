//! Chart assembly: input validation, calendar invocation, pillar
//! normalization, and cycle reconstruction.

use chrono::{NaiveDate, NaiveTime};

use zendestiny_core::{BaziResult, Gender, Pillar};

use crate::calendar::{CalendarSource, Polarity};
use crate::cycles::reconstruct_cycles;
use crate::error::{CalendarError, ChartError};

/// Splits a `-`/`:`-separated string into exactly `N` integers.
fn parse_parts<const N: usize>(raw: &str, separator: char) -> Option<[u32; N]> {
    let mut parts = [0u32; N];
    let mut iter = raw.split(separator);
    for slot in &mut parts {
        *slot = iter.next()?.trim().parse().ok()?;
    }
    if iter.next().is_some() {
        return None;
    }
    Some(parts)
}

/// Derives a full chart for the given birth data.
///
/// `date_str` must be `YYYY-MM-DD` and `time_str` must be `HH:MM`; any
/// other shape is an input error before the calendar source is consulted.
/// Once shape-valid, the instant is converted through `source`; a rejected
/// or impossible date surfaces as a single computation error and no
/// partial chart escapes. Per-cycle token failures inside the raw timeline
/// are dropped individually and never fail the chart.
///
/// # Errors
///
/// - [`ChartError::InvalidInput`] if the date or time string is malformed.
/// - [`ChartError::Computation`] if the calendar source rejects the instant.
pub fn calculate_bazi<C: CalendarSource>(
    source: &C,
    date_str: &str,
    time_str: &str,
    gender: Gender,
    birth_place: &str,
) -> Result<BaziResult, ChartError> {
    let [year, month, day] = parse_parts(date_str, '-')
        .ok_or_else(|| ChartError::InvalidInput(format!("date must be YYYY-MM-DD: {date_str}")))?;
    let [hour, minute] = parse_parts(time_str, ':')
        .ok_or_else(|| ChartError::InvalidInput(format!("time must be HH:MM: {time_str}")))?;

    let year = i32::try_from(year)
        .map_err(|_| ChartError::InvalidInput(format!("year out of range: {date_str}")))?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(CalendarError::ImpossibleDate { year, month, day })?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or(CalendarError::ImpossibleTime { hour, minute })?;

    let raw = source.eight_characters(date, time)?;

    let year_pillar = Pillar::from_chars(raw.year_stem, raw.year_branch);
    let month_pillar = Pillar::from_chars(raw.month_stem, raw.month_branch);
    let day_pillar = Pillar::from_chars(raw.day_stem, raw.day_branch);
    let hour_pillar = Pillar::from_chars(raw.hour_stem, raw.hour_branch);

    let polarity = Polarity::derive(year_pillar.stem, gender);
    let raw_cycles = source.major_cycles(date, time, polarity)?;
    let da_yun = reconstruct_cycles(&raw_cycles);

    Ok(BaziResult {
        day_master: day_pillar.stem,
        year_pillar,
        month_pillar,
        day_pillar,
        hour_pillar,
        da_yun,
        gender,
        birth_date: date,
        birth_time: time,
        birth_place: birth_place.to_string(),
    })
}
