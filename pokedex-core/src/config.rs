//! Runtime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_PAGE_SIZE,
    DEFAULT_REAP_INTERVAL_SECONDS, MAX_PAGE_SIZE,
};
use crate::error::{PokedexError, Result};

/// Top-level configuration shared by the cache, pager and API client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PokedexConfig {
    /// Lifetime of a cached area in seconds
    pub cache_ttl_seconds: u64,
    /// Reaper sweep interval in seconds
    pub reap_interval_seconds: u64,
    /// Areas per page
    pub page_size: u32,
    /// PokeAPI base URL
    pub api_url: String,
    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,
    /// Seed for capture rolls (None = entropy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PokedexConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            reap_interval_seconds: DEFAULT_REAP_INTERVAL_SECONDS,
            page_size: DEFAULT_PAGE_SIZE,
            api_url: DEFAULT_API_URL.into(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
            seed: None,
        }
    }
}

impl PokedexConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the capture seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cache TTL as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Reap interval as a `Duration`.
    pub fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval_seconds)
    }

    /// Rejects values the rest of the program cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(PokedexError::ConfigError("page size must be at least 1".into()));
        }
        if self.page_size > MAX_PAGE_SIZE {
            return Err(PokedexError::ConfigError(format!(
                "page size must be at most {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.cache_ttl_seconds == 0 {
            return Err(PokedexError::ConfigError("cache TTL must be at least 1 second".into()));
        }
        if self.reap_interval_seconds == 0 {
            return Err(PokedexError::ConfigError(
                "reap interval must be at least 1 second".into(),
            ));
        }

        let parsed = url::Url::parse(&self.api_url)
            .map_err(|e| PokedexError::ConfigError(format!("invalid API URL '{}': {}", self.api_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PokedexError::ConfigError(format!(
                "API URL must be http(s), got '{}'",
                parsed.scheme()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_config_is_valid() {
        let config = PokedexConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.reap_interval(), Duration::from_secs(300));
    }

    #[test_case("not a url" ; "garbage")]
    #[test_case("ftp://pokeapi.co" ; "wrong scheme")]
    #[test_case("" ; "empty")]
    fn test_rejects_bad_api_url(url: &str) {
        let config = PokedexConfig::new().api_url(url);
        assert!(matches!(config.validate(), Err(PokedexError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let config = PokedexConfig::new().page_size(0);
        assert!(config.validate().is_err());
    }

    #[test_case(MAX_PAGE_SIZE + 1 ; "just over")]
    #[test_case(u32::MAX ; "max u32")]
    fn test_rejects_oversized_page_size(page_size: u32) {
        let config = PokedexConfig::new().page_size(page_size);
        assert!(matches!(config.validate(), Err(PokedexError::ConfigError(_))));
    }

    #[test]
    fn test_accepts_max_page_size() {
        let config = PokedexConfig::new().page_size(MAX_PAGE_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_durations() {
        let mut config = PokedexConfig::new();
        config.cache_ttl_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = PokedexConfig::new();
        config.reap_interval_seconds = 0;
        assert!(config.validate().is_err());
    }
}
