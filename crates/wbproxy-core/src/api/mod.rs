//! REST API client module for the World Bank indicators API.
//!
//! This module provides the `ApiClient` for fetching the country catalog
//! and per-country indicator series. Every call is cache-backed and its
//! result normalized before it is returned or stored.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
