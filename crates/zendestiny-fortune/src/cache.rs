//! Day-scoped read-through/write-through cache for fortune payloads.
//!
//! The cache key is fully determined by chart identity, language, and the
//! reader's calendar day; `today` is an explicit parameter so the policy
//! is deterministic and testable without touching process time. Past-day
//! entries are never evicted here; their lifetime belongs to the backing
//! store.

use std::future::Future;

use chrono::NaiveDate;

use zendestiny_core::{BaziResult, DailyFortune, Language};
use zendestiny_store::KvStore;

use crate::error::FortuneError;

/// Cache over a shared key-value store.
pub struct FortuneCache<'a> {
    store: &'a dyn KvStore,
}

/// Deterministic per-day cache key.
///
/// The chart identity deliberately mirrors the stored format: the full
/// birth instant (including time), unlike the saved-profile dedup key
/// which omits time.
#[must_use]
pub fn cache_key(chart: &BaziResult, language: Language, today: NaiveDate) -> String {
    format!(
        "fortune_json_{}_{}_{}_{}_{}",
        chart.birth_place,
        chart.birth_instant(),
        chart.gender,
        language.code(),
        today.format("%Y-%m-%d"),
    )
}

impl<'a> FortuneCache<'a> {
    #[must_use]
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    /// Returns today's fortune for the chart, fetching at most once.
    ///
    /// A present cache entry for today's key always wins over `fetch`. A
    /// successful fetch is written back under the key before being
    /// returned. A failed fetch yields `None` and writes nothing, so a
    /// previously cached good entry is never clobbered and the next
    /// invocation is free to retry.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        chart: &BaziResult,
        language: Language,
        today: NaiveDate,
        fetch: F,
    ) -> Option<DailyFortune>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DailyFortune, FortuneError>>,
    {
        let key = cache_key(chart, language, today);
        if let Some(cached) = self.read(&key) {
            return Some(cached);
        }
        self.fetch_and_store(&key, fetch).await
    }

    /// Fetches unconditionally, bypassing the cache read but not the
    /// write-back. Used for an explicit user-triggered refresh.
    pub async fn refresh<F, Fut>(
        &self,
        chart: &BaziResult,
        language: Language,
        today: NaiveDate,
        fetch: F,
    ) -> Option<DailyFortune>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DailyFortune, FortuneError>>,
    {
        let key = cache_key(chart, language, today);
        self.fetch_and_store(&key, fetch).await
    }

    /// A decodable cached value under `key`, treating store errors and
    /// corrupt entries as misses.
    fn read(&self, key: &str) -> Option<DailyFortune> {
        let raw = match self.store.get(key) {
            Ok(value) => value?,
            Err(e) => {
                tracing::warn!(key, error = %e, "fortune cache read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(fortune) => Some(fortune),
            Err(e) => {
                tracing::warn!(key, error = %e, "cached fortune entry is corrupt, refetching");
                None
            }
        }
    }

    async fn fetch_and_store<F, Fut>(&self, key: &str, fetch: F) -> Option<DailyFortune>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DailyFortune, FortuneError>>,
    {
        let fortune = match fetch().await {
            Ok(fortune) => fortune,
            Err(e) => {
                tracing::warn!(key, error = %e, "daily fortune fetch failed");
                return None;
            }
        };

        match serde_json::to_string(&fortune) {
            Ok(encoded) => {
                if let Err(e) = self.store.set(key, &encoded) {
                    tracing::warn!(key, error = %e, "fortune cache write failed");
                }
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "fortune could not be encoded for caching");
            }
        }
        Some(fortune)
    }
}
