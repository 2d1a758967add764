//! Server configuration.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the working directory. Every setting has a default, so an empty
//! environment starts a proxy for the public World Bank API on port 8080.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use wbproxy_core::api::client::{DEFAULT_BASE_URL, REQUEST_TIMEOUT_SECS};
use wbproxy_core::cache::DEFAULT_TTL;

pub const ENV_BIND: &str = "WBPROXY_BIND";
pub const ENV_UPSTREAM_URL: &str = "WBPROXY_UPSTREAM_URL";
pub const ENV_TIMEOUT_SECS: &str = "WBPROXY_TIMEOUT_SECS";
pub const ENV_CACHE_TTL_SECS: &str = "WBPROXY_CACHE_TTL_SECS";

const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub upstream_url: String,
    pub request_timeout: Duration,
    pub cache_ttl: chrono::Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = var(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr: SocketAddr = bind
            .parse()
            .with_context(|| format!("{} is not a socket address: {}", ENV_BIND, bind))?;

        let upstream_url = var(ENV_UPSTREAM_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match var(ENV_TIMEOUT_SECS) {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("{} must be a whole number of seconds: {}", ENV_TIMEOUT_SECS, raw))?,
            None => REQUEST_TIMEOUT_SECS,
        };
        ensure!(timeout_secs > 0, "{} must be at least 1", ENV_TIMEOUT_SECS);

        let cache_ttl = match var(ENV_CACHE_TTL_SECS) {
            Some(raw) => {
                let secs = raw.parse::<u32>().with_context(|| {
                    format!("{} must be a whole number of seconds: {}", ENV_CACHE_TTL_SECS, raw)
                })?;
                chrono::Duration::seconds(i64::from(secs))
            }
            None => DEFAULT_TTL,
        };

        Ok(Self {
            bind_addr,
            upstream_url,
            request_timeout: Duration::from_secs(timeout_secs),
            cache_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).expect("defaults");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.upstream_url, "https://api.worldbank.org/v2");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.cache_ttl, chrono::Duration::hours(1));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (ENV_BIND, "127.0.0.1:9000"),
            (ENV_UPSTREAM_URL, "http://localhost:5000/v2"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_CACHE_TTL_SECS, "60"),
        ])
        .expect("overrides");
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse::<SocketAddr>().expect("addr"));
        assert_eq!(config.upstream_url, "http://localhost:5000/v2");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.cache_ttl, chrono::Duration::minutes(1));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[(ENV_BIND, "  "), (ENV_TIMEOUT_SECS, "")]).expect("blank");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[(ENV_BIND, "localhost")]).is_err());
        assert!(config_from(&[(ENV_TIMEOUT_SECS, "soon")]).is_err());
        assert!(config_from(&[(ENV_TIMEOUT_SECS, "0")]).is_err());
        assert!(config_from(&[(ENV_CACHE_TTL_SECS, "-5")]).is_err());
    }
}
