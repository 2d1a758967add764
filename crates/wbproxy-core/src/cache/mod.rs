//! In-memory caching of normalized upstream results.
//!
//! This module provides the `CacheManager`, an explicitly constructed store
//! shared by the upstream client and the aggregator. Entries are JSON values
//! considered stale one hour after they are written.
//!
//! Cached data types include:
//! - The country catalog
//! - Per-country indicator series
//! - Multi-country comparisons

pub mod manager;

pub use manager::{keys, CacheManager, DEFAULT_TTL};
