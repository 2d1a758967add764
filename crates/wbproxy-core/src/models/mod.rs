//! Data models for countries, indicators and time series.
//!
//! This module contains the shapes served to the front end:
//!
//! - `Country`: catalog entry, plus the raw `UpstreamCountry` record it is built from
//! - `Indicator`, `IndicatorCategory`, `IndicatorCatalog`: the static metric catalog
//! - `DataPoint`, `Series`, `ComparisonResult`: normalized observations

pub mod country;
pub mod indicator;
pub mod series;

pub use country::{Country, UpstreamCountry, UpstreamLabel};
pub use indicator::{Indicator, IndicatorCatalog, IndicatorCategory};
pub use series::{ComparisonRequest, ComparisonResult, DataPoint, Series};
