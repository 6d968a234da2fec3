//! Chart derivation: turns a civil birth instant into the normalized
//! four-pillar chart with its bounded luck-cycle sequence.
//!
//! The calendrical math lives behind the [`CalendarSource`] capability;
//! [`SexagenaryCalendar`] is the built-in implementation. Everything above
//! that boundary treats calendar output as opaque, possibly malformed
//! symbols and degrades per entry rather than per chart.

pub mod assemble;
pub mod calendar;
pub mod cycles;
pub mod error;
pub mod sexagenary;

pub use assemble::calculate_bazi;
pub use calendar::{CalendarSource, Polarity, RawCycle, RawEightChar};
pub use cycles::{reconstruct_cycles, MAX_CYCLES};
pub use error::{CalendarError, ChartError};
pub use sexagenary::SexagenaryCalendar;
