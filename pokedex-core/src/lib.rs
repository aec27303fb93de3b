//! # Pokedex Core
//!
//! Core types, errors, and traits shared by the Pokedex crates.
//!
//! - **Types**: fetched areas, area status, creature stats and progress
//! - **Errors**: one `PokedexError` for navigation, capture, fetch and config failures
//! - **Traits**: the `AreaFetcher` / `CreatureFetcher` seams to the network
//! - **Config**: `PokedexConfig` with validated defaults
//!
//! ## Example
//!
//! ```rust
//! use pokedex_core::{PokedexConfig, PokedexError};
//!
//! let config = PokedexConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(PokedexError::NoPriorPage.to_string(), "No previous locations!");
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, clippy::all)]

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::PokedexConfig;
pub use constants::*;
pub use error::{PokedexError, Result};
pub use traits::*;
pub use types::*;
