//! Fetch seams between the cache layer and the network.
//!
//! The pager and the trainer only see these traits, so tests can swap in
//! counting or failing fetchers without touching HTTP.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CreatureStats, FetchedArea};

// ═══════════════════════════════════════════════════════════════════════════════
// AREA FETCHER
// ═══════════════════════════════════════════════════════════════════════════════

/// Source of location areas keyed by numeric page id.
#[async_trait]
pub trait AreaFetcher: Send + Sync {
    /// Fetches one area and the names of the creatures encountered there.
    async fn fetch_area(&self, id: u32) -> Result<FetchedArea>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// CREATURE FETCHER
// ═══════════════════════════════════════════════════════════════════════════════

/// Source of detailed creature stats, used on first `catch` / `inspect`.
#[async_trait]
pub trait CreatureFetcher: Send + Sync {
    /// Fetches the stats for the named creature.
    async fn fetch_creature(&self, name: &str) -> Result<CreatureStats>;
}
