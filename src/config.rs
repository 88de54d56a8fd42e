//! Service Configuration
//!
//! Settings come from command-line flags and environment variables, falling back to
//! defaults that match the public deployment. Lookup goes through a closure so tests
//! never have to modify the process environment.

use crate::catalog::client::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:4200",
    "https://recipeparserv2-ui.onrender.com",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
}

/// Upstream catalog access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub retry_attempts: usize,
}

/// Term-search aggregation limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_results: usize,
    /// How many terms have their facet lookups in flight at once.
    pub term_concurrency: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 5_000,
            retry_attempts: 3,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 20,
            term_concurrency: 4,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
            catalog: CatalogConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    /// Loads from the process arguments and environment.
    pub fn load() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    /// Builds a config from an argument list (program name first) and an
    /// environment lookup.
    pub fn from_sources<F>(args: &[String], env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(port) = parse_var::<u16, _>(&env, "PORT")? {
            config.bind_addr.set_port(port);
        }
        if let Some(base_url) = env("MEALDB_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.catalog.base_url = base_url.trim().to_string();
        }
        if let Some(origins) = env("ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(timeout_ms) = parse_var(&env, "CATALOG_TIMEOUT_MS")? {
            config.catalog.timeout_ms = timeout_ms;
        }
        if let Some(attempts) = parse_var(&env, "CATALOG_RETRY_ATTEMPTS")? {
            config.catalog.retry_attempts = attempts;
        }
        if let Some(max_results) = parse_var(&env, "SEARCH_MAX_RESULTS")? {
            config.search.max_results = max_results;
        }
        if let Some(concurrency) = parse_var::<usize, _>(&env, "SEARCH_TERM_CONCURRENCY")? {
            config.search.term_concurrency = concurrency.max(1);
        }

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = args.get(i + 1).context("--bind requires <addr:port>")?;
                    config.bind_addr = value
                        .parse()
                        .with_context(|| format!("invalid --bind address: {}", value))?;
                    i += 2;
                }
                _ => {
                    i += 1;
                }
            }
        }

        Ok(config)
    }
}

fn parse_var<T, F>(env: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match env(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_sources(&args(&["bin"]), env_from(&[])).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.search.max_results, 20);
        assert_eq!(config.catalog.base_url, "https://www.themealdb.com/api/json/v1/1");
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn test_environment_overrides() {
        let env = env_from(&[
            ("PORT", "9000"),
            ("MEALDB_BASE_URL", "http://localhost:3000/api"),
            ("ALLOWED_ORIGINS", "http://a.test, ,http://b.test"),
            ("CATALOG_TIMEOUT_MS", "250"),
            ("CATALOG_RETRY_ATTEMPTS", "1"),
            ("SEARCH_MAX_RESULTS", "5"),
            ("SEARCH_TERM_CONCURRENCY", "0"),
        ]);

        let config = Config::from_sources(&args(&["bin"]), env).unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.catalog.base_url, "http://localhost:3000/api");
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.catalog.timeout_ms, 250);
        assert_eq!(config.catalog.retry_attempts, 1);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.term_concurrency, 1);
    }

    #[test]
    fn test_bind_flag_wins_over_port() {
        let env = env_from(&[("PORT", "9000")]);
        let config =
            Config::from_sources(&args(&["bin", "--bind", "127.0.0.1:7000"]), env).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:7000".parse().unwrap());
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let env = env_from(&[("PORT", "eighty")]);
        let err = Config::from_sources(&args(&["bin"]), env).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = Config::from_sources(&args(&["bin", "--bind"]), env_from(&[])).unwrap_err();
        assert!(err.to_string().contains("--bind"));

        assert!(
            Config::from_sources(&args(&["bin", "--bind", "nowhere"]), env_from(&[])).is_err()
        );
    }
}
