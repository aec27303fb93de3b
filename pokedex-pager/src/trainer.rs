//! Catching and inspecting discovered creatures.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use pokedex_cache::PokeCache;
use pokedex_core::constants::CAPTURE_ROLL_CEILING;
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::CreatureFetcher;
use pokedex_core::types::{CreatureState, CreatureStats};

/// Result of a catch attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatchOutcome {
    /// The roll beat the creature's base experience.
    Caught,
    /// The roll fell short; the creature can be tried again.
    Escaped,
    /// The creature was caught earlier; no roll was made.
    AlreadyCaught,
}

/// Capture service over the shared cache.
///
/// Stats are fetched the first time a creature is caught or inspected and
/// kept in the cache from then on.
pub struct Trainer {
    cache: Arc<PokeCache>,
    fetcher: Arc<dyn CreatureFetcher>,
    rng: Mutex<StdRng>,
}

impl Trainer {
    /// Creates a trainer with an entropy-seeded roll generator.
    pub fn new(cache: Arc<PokeCache>, fetcher: Arc<dyn CreatureFetcher>) -> Self {
        Self {
            cache,
            fetcher,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a trainer whose rolls are reproducible.
    pub fn with_seed(cache: Arc<PokeCache>, fetcher: Arc<dyn CreatureFetcher>, seed: u64) -> Self {
        Self {
            cache,
            fetcher,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Tries to catch a discovered creature.
    #[instrument(skip(self))]
    pub async fn catch(&self, name: &str) -> Result<CatchOutcome> {
        let state = self.known(name)?;
        if state.captured {
            return Ok(CatchOutcome::AlreadyCaught);
        }

        let stats = self.ensure_stats(state).await?;
        let draw = self.rng.lock().gen_range(0..CAPTURE_ROLL_CEILING);

        let caught = self.cache.attempt_capture(name, stats.base_experience, draw);
        debug!(draw, base_experience = stats.base_experience, caught, "Capture roll");

        if caught {
            info!(creature = name, "Caught creature");
            Ok(CatchOutcome::Caught)
        } else {
            Ok(CatchOutcome::Escaped)
        }
    }

    /// Returns the stats of a caught creature.
    #[instrument(skip(self))]
    pub async fn inspect(&self, name: &str) -> Result<CreatureStats> {
        let state = self.known(name)?;
        if !state.captured {
            return Err(PokedexError::NotCapturedYet(state.name));
        }
        self.ensure_stats(state).await
    }

    /// Names of all caught creatures, sorted.
    pub fn pokedex(&self) -> Vec<String> {
        let mut names = self.cache.list_captured();
        names.sort();
        names
    }

    fn known(&self, name: &str) -> Result<CreatureState> {
        self.cache
            .creature(name)
            .ok_or_else(|| PokedexError::UnknownCreature(name.trim().to_string()))
    }

    async fn ensure_stats(&self, state: CreatureState) -> Result<CreatureStats> {
        if let Some(stats) = state.stats {
            return Ok(stats);
        }

        let stats = self.fetcher.fetch_creature(&state.name).await?;
        self.cache.store_stats(&state.name, stats.clone());
        Ok(stats)
    }
}
