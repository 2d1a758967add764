//! Multi-country comparison of a single indicator.
//!
//! The aggregator fans out one series fetch per country, runs them all
//! concurrently, and merges whatever succeeded into one map. A country whose
//! fetch fails is left out of the result rather than failing the comparison.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::cache::CacheManager;
use crate::models::ComparisonResult;

#[derive(Clone)]
pub struct Aggregator {
    client: ApiClient,
    cache: Arc<CacheManager>,
}

impl Aggregator {
    /// Build an aggregator sharing the client's cache.
    pub fn new(client: ApiClient) -> Self {
        let cache = Arc::clone(client.cache());
        Self { client, cache }
    }

    /// Compare one indicator across several countries.
    ///
    /// Duplicate codes are collapsed (first occurrence wins) before both the
    /// cache lookup and the fan-out. Never fails: an empty map is a valid
    /// answer when every fetch failed.
    pub async fn compare(&self, country_codes: &[String], indicator: &str) -> ComparisonResult {
        let codes = dedup_in_order(country_codes);
        if codes.is_empty() {
            return ComparisonResult::new();
        }

        if let Some(cached) = self.cache.load_comparison(&codes, indicator) {
            return cached;
        }

        let fetches: Vec<_> = codes
            .iter()
            .map(|code| {
                let client = &self.client;
                async move { (code, client.fetch_series(code, indicator).await) }
            })
            .collect();

        let results = futures::future::join_all(fetches).await;

        let mut comparison = ComparisonResult::new();
        for (code, result) in results {
            match result {
                Ok(series) => {
                    comparison.insert(code.clone(), series);
                }
                Err(e) => {
                    warn!(country = %code, indicator = indicator, error = %e, "Country left out of comparison");
                }
            }
        }

        debug!(
            requested = codes.len(),
            returned = comparison.len(),
            indicator = indicator,
            "Comparison assembled"
        );

        self.cache.save_comparison(&codes, indicator, &comparison);
        comparison
    }
}

fn dedup_in_order(codes: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    codes
        .iter()
        .filter(|code| seen.insert(code.as_str()))
        .cloned()
        .collect()
}
