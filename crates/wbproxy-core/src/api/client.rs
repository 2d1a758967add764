//! API client for the World Bank v2 REST API.
//!
//! This module provides the `ApiClient` struct for fetching the country
//! catalog and per-country indicator series. Upstream answers every call
//! with a two-element array, `[metadata, records]`; `records` is null when
//! there is nothing to return.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::cache::CacheManager;
use crate::models::{Country, Series, UpstreamCountry};
use crate::normalizer::{self, FIRST_YEAR, LAST_YEAR};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Public World Bank API root.
pub const DEFAULT_BASE_URL: &str = "https://api.worldbank.org/v2";

/// HTTP request timeout in seconds.
/// Bounds how long one slow country can hold up a comparison.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Page size for the country catalog; upstream lists just under 300 entries.
const CATALOG_PAGE_SIZE: u32 = 500;

/// Page size for one series; the 2000-2024 window has 25 yearly points.
const SERIES_PAGE_SIZE: u32 = 60;

/// API client for the indicators API.
/// Clone is cheap - reqwest::Client and the cache are both shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    cache: Arc<CacheManager>,
}

impl ApiClient {
    /// Create a client for the upstream rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration, cache: Arc<CacheManager>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            cache,
        })
    }

    /// Shared cache backing this client.
    pub fn cache(&self) -> &Arc<CacheManager> {
        &self.cache
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        debug!(url = %url, "Upstream request");
        let response = self.client.get(url.clone()).send().await?;
        let response = Self::check_response(response).await?;

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Malformed JSON from {}: {}", url, e)))
    }

    // ===== Data Fetching Methods =====

    /// Fetch all countries, excluding regional and income aggregates.
    pub async fn fetch_catalog(&self) -> Result<Vec<Country>, ApiError> {
        if let Some(countries) = self.cache.load_countries() {
            return Ok(countries);
        }

        let mut url = self.endpoint(&["country"])?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("per_page", &CATALOG_PAGE_SIZE.to_string());

        let payload = self.get_json(url).await?;
        let countries = parse_catalog(&payload);
        debug!(count = countries.len(), "Fetched country catalog");

        self.cache.save_countries(&countries);
        Ok(countries)
    }

    /// Fetch one indicator series for one country over the fixed year window.
    pub async fn fetch_series(&self, country: &str, indicator: &str) -> Result<Series, ApiError> {
        if let Some(series) = self.cache.load_series(country, indicator) {
            return Ok(series);
        }

        let mut url = self.endpoint(&["country", country, "indicator", indicator])?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("per_page", &SERIES_PAGE_SIZE.to_string())
            .append_pair("date", &format!("{}:{}", FIRST_YEAR, LAST_YEAR));

        let payload = self.get_json(url).await?;
        let series = normalizer::normalize_payload(&payload);
        debug!(country = country, indicator = indicator, points = series.len(), "Fetched series");

        self.cache.save_series(country, indicator, &series);
        Ok(series)
    }
}

/// Extract countries from a catalog payload.
/// Records that fail to parse are skipped individually.
fn parse_catalog(payload: &Value) -> Vec<Country> {
    let Some(records) = payload.get(1).and_then(Value::as_array) else {
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| UpstreamCountry::deserialize(record).ok())
        .filter_map(|raw| raw.to_country())
        .collect()
}
