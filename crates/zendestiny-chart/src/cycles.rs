//! Reconstruction of the bounded, validated luck-cycle sequence from raw
//! calendar output.

use zendestiny_core::{Branch, DaYun, Stem};

use crate::calendar::RawCycle;

/// Design cap on retained cycles: eight decades covers a lifespan.
pub const MAX_CYCLES: usize = 8;

/// Builds the validated [`DaYun`] sequence from a raw cycle timeline.
///
/// Raw index 0 is always skipped (the pre-birth segment carries no usable
/// decade). Of the remainder, at most [`MAX_CYCLES`] entries are accepted,
/// in their original order. A missing or empty token is a per-index
/// failure: it is logged and that index is dropped without aborting the
/// rest. Entries whose token does not decode to both a known stem and a
/// known branch are dropped the same way.
#[must_use]
pub fn reconstruct_cycles(raw: &[RawCycle]) -> Vec<DaYun> {
    let mut cycles = Vec::new();

    for (index, entry) in raw.iter().enumerate().skip(1) {
        if cycles.len() == MAX_CYCLES {
            break;
        }

        let Some(token) = entry.gan_zhi.as_deref().filter(|t| !t.is_empty()) else {
            tracing::warn!(index, "cycle entry has no stem/branch token, skipping");
            continue;
        };

        let mut chars = token.chars();
        let stem = chars.next().map_or(Stem::Unknown, Stem::decode);
        let branch = chars.next().map_or(Branch::Unknown, Branch::decode);
        if !stem.is_known() || !branch.is_known() {
            tracing::warn!(index, token, "cycle token is incomplete, skipping");
            continue;
        }

        cycles.push(DaYun {
            start_age: entry.start_age,
            end_age: entry.end_age,
            start_year: entry.start_year,
            stem,
            branch,
        });
    }

    cycles
}
