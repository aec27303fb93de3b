//! PokeAPI client for the Pokedex.
//!
//! Implements the [`AreaFetcher`](pokedex_core::AreaFetcher) and
//! [`CreatureFetcher`](pokedex_core::CreatureFetcher) seams over HTTP+JSON.

mod client;
mod dto;

pub use client::{ApiConfig, PokeApiClient};
