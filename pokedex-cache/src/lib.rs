//! TTL cache for Pokedex location areas.
//!
//! One lock guards two maps: location areas keyed by page id, which expire
//! after a fixed TTL, and creature progress keyed by name, which never does.
//! Expiry is enforced only by the background reaper; reads never check age.

mod cache;
mod reaper;

pub use cache::{AreaEntry, CacheConfig, CacheStats, PokeCache};
pub use reaper::ReaperReport;
