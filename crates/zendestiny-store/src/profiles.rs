//! Saved-profile history over a [`KvStore`].
//!
//! The whole history lives as one JSON array under a fixed namespace key,
//! append-only except for explicit deletion by id.

use uuid::Uuid;

use zendestiny_core::SavedProfile;

use crate::error::StoreError;
use crate::kv::KvStore;

/// Namespace key holding the serialized profile history.
const PROFILES_KEY: &str = "zen_destiny_profiles";

/// Repository for the saved-profile history.
pub struct ProfileStore<'a> {
    store: &'a dyn KvStore,
}

impl<'a> ProfileStore<'a> {
    #[must_use]
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    /// All saved profiles in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the history cannot be read or decoded.
    pub fn list(&self) -> Result<Vec<SavedProfile>, StoreError> {
        match self.store.get(PROFILES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Appends `profile` unless an entry with the same identity (place,
    /// date, gender; time excluded) already exists. Returns whether the
    /// profile was actually added.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the history cannot be read or written.
    pub fn insert(&self, profile: &SavedProfile) -> Result<bool, StoreError> {
        let mut profiles = self.list()?;
        if profiles.iter().any(|p| p.same_identity(profile)) {
            return Ok(false);
        }
        profiles.push(profile.clone());
        self.persist(&profiles)?;
        Ok(true)
    }

    /// Deletes the profile with the given id. Returns whether anything was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the history cannot be read or written.
    pub fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut profiles = self.list()?;
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        if profiles.len() == before {
            return Ok(false);
        }
        self.persist(&profiles)?;
        Ok(true)
    }

    fn persist(&self, profiles: &[SavedProfile]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(profiles)?;
        self.store.set(PROFILES_KEY, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::{NaiveDate, NaiveTime};
    use zendestiny_core::Gender;

    fn profile(place: &str, hour: u32) -> SavedProfile {
        SavedProfile::new(
            place,
            NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            Gender::Male,
        )
    }

    #[test]
    fn insert_then_list_round_trips() {
        let store = MemoryStore::new();
        let profiles = ProfileStore::new(&store);
        let p = profile("Shanghai", 8);
        assert!(profiles.insert(&p).unwrap());
        assert_eq!(profiles.list().unwrap(), vec![p]);
    }

    #[test]
    fn same_identity_with_different_time_is_deduplicated() {
        let store = MemoryStore::new();
        let profiles = ProfileStore::new(&store);
        assert!(profiles.insert(&profile("Shanghai", 8)).unwrap());
        assert!(!profiles.insert(&profile("Shanghai", 23)).unwrap());
        assert_eq!(profiles.list().unwrap().len(), 1);
    }

    #[test]
    fn different_place_is_a_new_entry() {
        let store = MemoryStore::new();
        let profiles = ProfileStore::new(&store);
        profiles.insert(&profile("Shanghai", 8)).unwrap();
        assert!(profiles.insert(&profile("Beijing", 8)).unwrap());
        assert_eq!(profiles.list().unwrap().len(), 2);
    }

    #[test]
    fn delete_removes_only_the_matching_id() {
        let store = MemoryStore::new();
        let profiles = ProfileStore::new(&store);
        let a = profile("Shanghai", 8);
        let b = profile("Beijing", 8);
        profiles.insert(&a).unwrap();
        profiles.insert(&b).unwrap();

        assert!(profiles.delete(a.id).unwrap());
        assert!(!profiles.delete(a.id).unwrap());
        assert_eq!(profiles.list().unwrap(), vec![b]);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = MemoryStore::new();
        assert!(ProfileStore::new(&store).list().unwrap().is_empty());
    }
}
