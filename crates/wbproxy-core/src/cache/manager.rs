use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::models::{ComparisonResult, Country, Series};

/// Entries expire one hour after they are written.
pub const DEFAULT_TTL: Duration = Duration::hours(1);

#[derive(Debug, Clone)]
struct CachedData {
    data: Value,
    expires_at: DateTime<Utc>,
}

impl CachedData {
    fn new(data: Value, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Utc::now() + ttl,
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// In-memory store of upstream results with per-entry expiry.
///
/// Expired entries are evicted lazily when read; nothing is evicted by size.
/// The lock is never held across an await point.
pub struct CacheManager {
    entries: Mutex<HashMap<String, CachedData>>,
    ttl: Duration,
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl CacheManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// TTL applied by the typed `save_*` helpers.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CachedData>> {
        // A panic elsewhere cannot leave a half-written entry behind
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the payload stored under `key` if it has not expired.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries();
        match entries.get(key) {
            Some(cached) if cached.is_fresh(Utc::now()) => return Some(cached.data.clone()),
            Some(_) => {}
            None => return None,
        }

        entries.remove(key);
        debug!(key = key, "Evicted expired cache entry");
        None
    }

    /// Store `payload` under `key`, replacing any existing entry.
    pub fn put(&self, key: &str, payload: Value, ttl: Duration) {
        self.entries()
            .insert(key.to_string(), CachedData::new(payload, ttl));
    }

    /// Drop every entry, returning how many were removed.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries();
        let count = entries.len();
        entries.clear();
        count
    }

    /// Release all entries at the end of the store's lifetime.
    pub fn dispose(&self) {
        let count = self.clear();
        info!(entries = count, "Cache disposed");
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let payload = self.get(key)?;
        match serde_json::from_value(payload) {
            Ok(data) => {
                debug!(key = key, "Cache hit");
                Some(data)
            }
            Err(e) => {
                debug!(key = key, error = %e, "Discarding unreadable cache entry");
                self.entries().remove(key);
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, data: &T) {
        match serde_json::to_value(data) {
            Ok(payload) => self.put(key, payload, self.ttl),
            Err(e) => debug!(key = key, error = %e, "Failed to serialize cache entry"),
        }
    }

    // ===== Countries =====

    pub fn load_countries(&self) -> Option<Vec<Country>> {
        self.load(&keys::countries())
    }

    pub fn save_countries(&self, countries: &[Country]) {
        self.save(&keys::countries(), countries)
    }

    // ===== Series =====

    pub fn load_series(&self, country: &str, indicator: &str) -> Option<Series> {
        self.load(&keys::series(country, indicator))
    }

    pub fn save_series(&self, country: &str, indicator: &str, series: &Series) {
        self.save(&keys::series(country, indicator), series)
    }

    // ===== Comparisons =====

    pub fn load_comparison(&self, countries: &[String], indicator: &str) -> Option<ComparisonResult> {
        self.load(&keys::comparison(countries, indicator))
    }

    pub fn save_comparison(&self, countries: &[String], indicator: &str, result: &ComparisonResult) {
        self.save(&keys::comparison(countries, indicator), result)
    }
}

/// Cache key construction.
///
/// Keys encode the operation and every parameter affecting the result.
/// Parameters are written as quoted, escaped strings so no two parameter
/// sets share a key, whatever separators the caller's codes contain.
/// Comparison keys keep the caller's country order, so the same set in a
/// different order is a separate entry.
pub mod keys {
    pub fn countries() -> String {
        "countries".to_string()
    }

    pub fn series(country: &str, indicator: &str) -> String {
        format!("series:{:?}:{:?}", country, indicator)
    }

    pub fn comparison(countries: &[String], indicator: &str) -> String {
        format!("compare:{:?}:{:?}", countries, indicator)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataPoint;
    use serde_json::json;

    #[test]
    fn test_put_then_get_within_ttl() {
        let cache = CacheManager::default();
        cache.put("k", json!({"a": 1}), DEFAULT_TTL);
        assert_eq!(cache.get("k"), Some(json!({"a": 1})));
    }

    #[test]
    fn test_get_after_ttl_is_absent() {
        let cache = CacheManager::default();
        cache.put("k", json!([1, 2, 3]), Duration::zero());
        assert_eq!(cache.get("k"), None);
        // Expired entry is evicted by the read
        assert!(cache.is_empty());
    }

    #[test]
    fn test_entry_expires_once_clock_passes() {
        let cache = CacheManager::default();
        cache.put("k", json!("v"), DEFAULT_TTL);
        assert!(cache.get("k").is_some());

        // Age the entry past its expiry, as if an hour had gone by
        cache.entries().get_mut("k").expect("entry").expires_at =
            Utc::now() - Duration::seconds(1);
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_put_overwrites() {
        let cache = CacheManager::default();
        cache.put("k", json!(1), DEFAULT_TTL);
        cache.put("k", json!(2), DEFAULT_TTL);
        assert_eq!(cache.get("k"), Some(json!(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrite_refreshes_expiry() {
        let cache = CacheManager::default();
        cache.put("k", json!(1), Duration::zero());
        cache.put("k", json!(2), DEFAULT_TTL);
        assert_eq!(cache.get("k"), Some(json!(2)));
    }

    #[test]
    fn test_clear_drops_everything() {
        let cache = CacheManager::default();
        cache.put("a", json!(1), DEFAULT_TTL);
        cache.put("b", json!(2), DEFAULT_TTL);
        assert_eq!(cache.clear(), 2);
        assert!(cache.get("a").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_dispose_empties_cache() {
        let cache = CacheManager::default();
        cache.save_countries(&[]);
        cache.dispose();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_typed_series_roundtrip() {
        let cache = CacheManager::default();
        let series = vec![DataPoint::new(2019, 50.0), DataPoint::new(2020, 100.0)];
        cache.save_series("USA", "NY.GDP.MKTP.CD", &series);

        assert_eq!(cache.load_series("USA", "NY.GDP.MKTP.CD"), Some(series));
        assert_eq!(cache.load_series("CHN", "NY.GDP.MKTP.CD"), None);
    }

    #[test]
    fn test_unreadable_entry_is_discarded() {
        let cache = CacheManager::default();
        cache.put(&keys::series("USA", "X"), json!({"not": "a series"}), DEFAULT_TTL);
        assert_eq!(cache.load_series("USA", "X"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_comparison_key_is_order_sensitive() {
        let forward = vec!["USA".to_string(), "CHN".to_string()];
        let backward = vec!["CHN".to_string(), "USA".to_string()];
        assert_eq!(keys::comparison(&forward, "X"), r#"compare:["USA", "CHN"]:"X""#);
        assert_ne!(keys::comparison(&forward, "X"), keys::comparison(&backward, "X"));
    }

    #[test]
    fn test_keys_distinguish_operations() {
        assert_eq!(keys::countries(), "countries");
        assert_eq!(keys::series("UKR", "SP.POP.TOTL"), r#"series:"UKR":"SP.POP.TOTL""#);
        assert_ne!(
            keys::series("UKR", "X"),
            keys::comparison(&["UKR".to_string()], "X")
        );
    }

    #[test]
    fn test_series_keys_do_not_collide_on_separators() {
        assert_ne!(keys::series("A_B", "C"), keys::series("A", "B_C"));
        assert_ne!(keys::series("A:B", "C"), keys::series("A", "B:C"));
        assert_ne!(keys::series("A\":\"B", "C"), keys::series("A", "B\":\"C"));
    }

    #[test]
    fn test_comparison_keys_do_not_collide_on_separators() {
        let joined = vec!["USA,CHN".to_string()];
        let split = vec!["USA".to_string(), "CHN".to_string()];
        assert_ne!(keys::comparison(&joined, "X"), keys::comparison(&split, "X"));

        let left = vec!["USA".to_string()];
        assert_ne!(
            keys::comparison(&left, "CHN_X"),
            keys::comparison(&["USA_CHN".to_string()], "X")
        );
    }

    #[test]
    fn test_comparison_entries_are_kept_apart() {
        let cache = CacheManager::default();
        let joined = vec!["USA,CHN".to_string()];
        let split = vec!["USA".to_string(), "CHN".to_string()];

        let mut only_joined = ComparisonResult::new();
        only_joined.insert("USA,CHN".to_string(), Series::new());
        cache.save_comparison(&joined, "X", &only_joined);

        assert_eq!(cache.load_comparison(&split, "X"), None);
        assert_eq!(cache.load_comparison(&joined, "X"), Some(only_joined));
    }

    #[test]
    fn test_series_entries_are_kept_apart() {
        let cache = CacheManager::default();
        cache.save_series("A_B", "C", &vec![DataPoint::new(2020, 1.0)]);
        assert_eq!(cache.load_series("A", "B_C"), None);
    }
}
