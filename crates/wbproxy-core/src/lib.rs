//! Core library for wbproxy.
//!
//! wbproxy sits between a browser front end and the World Bank indicators
//! API. This crate holds everything except the HTTP surface:
//!
//! - [`normalizer`]: upstream records to ascending `{year, value}` series
//! - [`cache`]: in-memory store with per-entry expiry
//! - [`api`]: cache-backed upstream client
//! - [`aggregator`]: concurrent multi-country comparison
//! - [`catalog`]: the fixed indicator catalog

pub mod aggregator;
pub mod api;
pub mod cache;
pub mod catalog;
pub mod models;
pub mod normalizer;

pub use aggregator::Aggregator;
pub use api::{ApiClient, ApiError};
pub use cache::CacheManager;
