//! Conversion of upstream indicator payloads into normalized series.
//!
//! Upstream returns `[metadata, records]`, where each record looks like
//! `{"date": "2020", "value": 123.4, "countryiso3code": "UKR", ...}`. Values
//! are frequently null for years without data, dates are usually strings
//! and occasionally numbers. Normalization is permissive per record: a record
//! that cannot be interpreted is dropped and the rest are kept.

use serde_json::Value;
use tracing::debug;

use crate::models::{DataPoint, Series};

/// First year of the window requested from upstream.
pub const FIRST_YEAR: i32 = 2000;

/// Last year (inclusive) of the window requested from upstream.
pub const LAST_YEAR: i32 = 2024;

/// Normalize a full upstream response (`[metadata, records]`).
///
/// A payload without a records array (missing, null, or an upstream error
/// message in place of the metadata) yields an empty series.
pub fn normalize_payload(payload: &Value) -> Series {
    match payload.get(1).and_then(Value::as_array) {
        Some(records) => normalize_records(records),
        None => {
            debug!("Upstream payload has no records array");
            Series::new()
        }
    }
}

/// Normalize a slice of raw records.
///
/// Output is sorted ascending by year. The sort is stable, so duplicate
/// years (which upstream should not emit) keep their upstream order.
pub fn normalize_records(records: &[Value]) -> Series {
    let mut series: Series = records.iter().filter_map(parse_record).collect();
    series.sort_by_key(|p| p.year);

    let dropped = records.len() - series.len();
    if dropped > 0 {
        debug!(kept = series.len(), dropped, "Dropped uninterpretable records");
    }
    series
}

fn parse_record(record: &Value) -> Option<DataPoint> {
    let value = parse_value(record.get("value")?)?;
    let year = parse_year(record.get("date").or_else(|| record.get("year"))?)?;
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return None;
    }
    Some(DataPoint { year, value })
}

fn parse_year(raw: &Value) -> Option<i32> {
    match raw {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        _ => None,
    }
}

fn parse_value(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}
