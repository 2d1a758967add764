//! HTTP front for wbproxy.
//!
//! - [`config`]: environment-driven settings
//! - [`routes`]: axum router and handlers
//! - [`error`]: handler error rendering

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use wbproxy_core::{Aggregator, ApiClient, CacheManager};

pub use config::Config;
pub use routes::build_router;

/// Shared handler state. Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub aggregator: Aggregator,
    pub cache: Arc<CacheManager>,
}

impl AppState {
    pub fn new(client: ApiClient) -> Self {
        let cache = Arc::clone(client.cache());
        let aggregator = Aggregator::new(client.clone());
        Self {
            client,
            aggregator,
            cache,
        }
    }
}
