//! HTTP client implementation.
//!
//! Reads `location-area/{id}` for paging and `pokemon/{name}` for stats.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use pokedex_core::constants::{DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECONDS};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::{AreaFetcher, CreatureFetcher};
use pokedex_core::types::{CreatureStats, FetchedArea};
use pokedex_core::PokedexConfig;

use crate::dto::{LocationAreaResponse, PokemonResponse};

/// PokeAPI client configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ApiConfig {
    /// Base URL including the API version (e.g. "https://pokeapi.co/api/v2")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }
}

impl ApiConfig {
    /// Creates config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

impl From<&PokedexConfig> for ApiConfig {
    fn from(config: &PokedexConfig) -> Self {
        Self::new(config.api_url.clone()).with_timeout(config.timeout_seconds)
    }
}

/// PokeAPI client.
pub struct PokeApiClient {
    config: ApiConfig,
    http_client: reqwest::Client,
}

impl PokeApiClient {
    /// Creates a client for the public PokeAPI.
    pub fn new() -> Result<Self> {
        Self::with_config(ApiConfig::default())
    }

    /// Creates a new client with the given config.
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PokedexError::ConfigError(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, resource: &str, key: &str) -> String {
        format!(
            "{}/{}/{}/",
            self.config.base_url.trim_end_matches('/'),
            resource,
            key
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, resource: String) -> Result<T> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| PokedexError::HttpError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound(resource));
        }
        if !status.is_success() {
            warn!(%status, resource = %resource, "PokeAPI request failed");
            return Err(PokedexError::FetchFailed {
                target: resource,
                reason: format!("HTTP {}", status),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PokedexError::HttpError(e.to_string()))?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl AreaFetcher for PokeApiClient {
    #[instrument(skip(self))]
    async fn fetch_area(&self, id: u32) -> Result<FetchedArea> {
        let url = self.endpoint("location-area", &id.to_string());
        let response: LocationAreaResponse = self
            .get_json(&url, format!("location-area {}", id))
            .await?;

        let area = FetchedArea::from(response);
        debug!(id, name = %area.name, creatures = area.creatures.len(), "Fetched location area");
        Ok(area)
    }
}

#[async_trait]
impl CreatureFetcher for PokeApiClient {
    #[instrument(skip(self))]
    async fn fetch_creature(&self, name: &str) -> Result<CreatureStats> {
        let key = name.trim().to_lowercase();
        if key.is_empty() || key.contains('/') {
            return Err(PokedexError::UnknownCreature(name.to_string()));
        }

        let url = self.endpoint("pokemon", &key);
        let response: PokemonResponse = self.get_json(&url, format!("pokemon {}", key)).await?;

        let stats = CreatureStats::from(response);
        debug!(name = %key, base_experience = stats.base_experience, "Fetched pokemon");
        Ok(stats)
    }
}
