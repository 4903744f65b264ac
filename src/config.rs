// Configuration.
// Runtime settings loaded from environment variables with defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::paths;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_GEOIP_URL: &str = "https://ipapi.co/json/";
const DEFAULT_CACHE_TTL_HOURS: u64 = 24;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the venue search backend.
    pub api_base: String,
    /// Durable cache directory; `None` when the platform has no cache dir.
    pub cache_dir: Option<PathBuf>,
    /// Maximum age of a cached location search.
    pub cache_ttl: Duration,
    /// Per-request timeout for outbound HTTP calls.
    pub http_timeout: Duration,
    /// IP geolocation endpoint.
    pub geoip_url: String,
}

impl Config {
    /// Load from the process environment.
    ///
    /// # Environment Variables
    /// - `SCOUT_API_BASE` - backend base URL (default: http://localhost:8000)
    /// - `SCOUT_CACHE_DIR` - durable cache directory (default: platform cache dir)
    /// - `SCOUT_CACHE_TTL_HOURS` - cache TTL in hours (default: 24)
    /// - `SCOUT_HTTP_TIMEOUT_SECS` - HTTP request timeout (default: 30)
    /// - `SCOUT_GEOIP_URL` - IP geolocation endpoint (default: https://ipapi.co/json/)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` in place of the environment. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let number = |name: &str| non_empty(name).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            api_base: non_empty("SCOUT_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            cache_dir: non_empty("SCOUT_CACHE_DIR")
                .map(PathBuf::from)
                .or_else(paths::search_dir),
            cache_ttl: Duration::from_secs(
                number("SCOUT_CACHE_TTL_HOURS")
                .and_then(|hours| hours.checked_mul(60 * 60))
                .unwrap_or(DEFAULT_CACHE_TTL_HOURS * 60 * 60),
            ),
            http_timeout: Duration::from_secs(
                number("SCOUT_HTTP_TIMEOUT_SECS").unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
            geoip_url: non_empty("SCOUT_GEOIP_URL").unwrap_or_else(|| DEFAULT_GEOIP_URL.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.cache_ttl, Duration::from_secs(24 * 60 * 60));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.geoip_url, DEFAULT_GEOIP_URL);
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("SCOUT_API_BASE", "https://scout.example"),
            ("SCOUT_CACHE_DIR", "/tmp/scout-cache"),
            ("SCOUT_CACHE_TTL_HOURS", "6"),
            ("SCOUT_HTTP_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(config.api_base, "https://scout.example");
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/scout-cache")));
        assert_eq!(config.cache_ttl, Duration::from_secs(6 * 60 * 60));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_with(&[
            ("SCOUT_CACHE_TTL_HOURS", "a day"),
            ("SCOUT_HTTP_TIMEOUT_SECS", ""),
            ("SCOUT_API_BASE", "  "),
        ]);
        assert_eq!(config.cache_ttl, Duration::from_secs(24 * 60 * 60));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.api_base, DEFAULT_API_BASE);

        let config = config_with(&[("SCOUT_CACHE_TTL_HOURS", "10000000000000000")]);
        assert_eq!(config.cache_ttl, Duration::from_secs(24 * 60 * 60));
    }
}
