use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One observation of an indicator for a country.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DataPoint {
    pub year: i32,
    pub value: f64,
}

impl DataPoint {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// Observations for one (country, indicator) pair, ascending by year.
pub type Series = Vec<DataPoint>;

/// Series keyed by country code.
///
/// Only countries whose upstream fetch succeeded are present. A missing key
/// means "unavailable", an empty series means "no data in range".
pub type ComparisonResult = BTreeMap<String, Series>;

/// Body of a comparison request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRequest {
    #[serde(default)]
    pub countries: Vec<String>,
    pub indicator: String,
}
