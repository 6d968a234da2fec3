//! Saved-profile identity records.
//!
//! A profile is the lightweight persisted identity needed to re-derive a
//! chart later, not the chart itself. Field names serialize in camelCase to
//! match the stored JSON history format.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chart::Gender;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProfile {
    pub id: Uuid,
    pub birth_place: String,
    pub birth_date: NaiveDate,
    pub birth_time: NaiveTime,
    pub gender: Gender,
}

impl SavedProfile {
    /// Creates a profile with a fresh random id.
    #[must_use]
    pub fn new(
        birth_place: impl Into<String>,
        birth_date: NaiveDate,
        birth_time: NaiveTime,
        gender: Gender,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            birth_place: birth_place.into(),
            birth_date,
            birth_time,
            gender,
        }
    }

    /// Whether two profiles describe the same person for history dedup.
    ///
    /// Birth time is intentionally not part of the identity: re-submitting
    /// the same place/date/gender with a different time is treated as a
    /// correction, not a new person.
    #[must_use]
    pub fn same_identity(&self, other: &SavedProfile) -> bool {
        self.birth_place == other.birth_place
            && self.birth_date == other.birth_date
            && self.gender == other.gender
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(time: NaiveTime) -> SavedProfile {
        SavedProfile::new(
            "Shanghai",
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            time,
            Gender::Female,
        )
    }

    #[test]
    fn identity_ignores_birth_time() {
        let a = profile(NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        let b = profile(NaiveTime::from_hms_opt(23, 15, 0).unwrap());
        assert!(a.same_identity(&b));
    }

    #[test]
    fn identity_distinguishes_gender() {
        let a = profile(NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        let mut b = a.clone();
        b.gender = Gender::Male;
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn serializes_in_camel_case() {
        let p = profile(NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("birthPlace").is_some());
        assert!(json.get("birthDate").is_some());
        assert!(json.get("birthTime").is_some());
    }
}
