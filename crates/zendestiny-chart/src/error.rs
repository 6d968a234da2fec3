use thiserror::Error;

/// Errors from the calendar-conversion layer.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The civil date does not exist (e.g. February 30th).
    #[error("impossible calendar date: {year:04}-{month:02}-{day:02}")]
    ImpossibleDate { year: i32, month: u32, day: u32 },

    /// The clock time is out of range.
    #[error("impossible time of day: {hour:02}:{minute:02}")]
    ImpossibleTime { hour: u32, minute: u32 },

    /// The date falls outside the range the calendar source supports.
    #[error("date out of supported range: year {0}")]
    OutOfRange(i32),
}

/// Errors returned by chart assembly.
///
/// Input errors and computation errors are kept distinct so callers can
/// tell a malformed request from a calendrically impossible one. No partial
/// chart ever escapes either way.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The date or time string did not have the expected shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The calendar source rejected or failed on well-formed input.
    #[error("chart computation failed: {0}")]
    Computation(#[from] CalendarError),
}
