//! In-memory TTL cache for location areas and creature progress.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;

use pokedex_core::constants::{
    DEFAULT_CACHE_TTL_SECONDS, DEFAULT_REAP_INTERVAL_SECONDS, UNAVAILABLE_AREA_NAME,
};
use pokedex_core::types::{AreaStatus, CreatureState, CreatureStats};
use pokedex_core::PokedexConfig;

/// A cached location area.
///
/// Immutable once inserted, except that `creatures` may grow.
#[derive(Clone, Debug)]
pub struct AreaEntry {
    /// Page id
    pub id: u32,
    /// Insertion time; never updated
    pub created_at: Instant,
    /// Area name, or a placeholder when the fetch failed
    pub name: String,
    /// Creatures found in the area, without duplicates, in discovery order
    pub creatures: Vec<String>,
    /// Fetch outcome
    pub status: AreaStatus,
}

impl AreaEntry {
    fn new(id: u32, name: String, status: AreaStatus) -> Self {
        Self {
            id,
            created_at: Instant::now(),
            name,
            creatures: Vec::new(),
            status,
        }
    }

    /// Time since insertion.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.created_at)
    }

    fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) > ttl
    }

    /// Returns true if the fetch for this area failed.
    pub fn is_failed(&self) -> bool {
        self.status.is_failed()
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Area lifetime in seconds
    pub ttl_seconds: u64,
    /// Reaper sweep interval in seconds
    pub reap_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            reap_interval_seconds: DEFAULT_REAP_INTERVAL_SECONDS,
        }
    }
}

impl CacheConfig {
    /// Creates a config with the given TTL and sweep interval.
    pub fn new(ttl_seconds: u64, reap_interval_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            reap_interval_seconds,
        }
    }

    /// Area lifetime.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Reaper sweep interval.
    pub fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval_seconds)
    }
}

impl From<&PokedexConfig> for CacheConfig {
    fn from(config: &PokedexConfig) -> Self {
        Self::new(config.cache_ttl_seconds, config.reap_interval_seconds)
    }
}

#[derive(Default)]
struct CacheState {
    areas: HashMap<u32, AreaEntry>,
    creatures: HashMap<String, CreatureState>,
}

/// Shared cache for location areas and creature progress.
///
/// Thread-safe: every operation holds the single internal lock for its full
/// duration and never across an `.await`. Areas expire through
/// [`reap_expired`](Self::reap_expired), normally driven by the reaper task;
/// creature progress is permanent.
pub struct PokeCache {
    state: Mutex<CacheState>,
    config: CacheConfig,
}

impl PokeCache {
    /// Creates a new cache with default configuration and no reaper.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration and no reaper.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            config,
        }
    }

    /// Returns the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // AREAS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Inserts or replaces an area, restarting its TTL with no creatures.
    pub fn put(&self, id: u32, name: impl Into<String>) {
        let entry = AreaEntry::new(id, name.into(), AreaStatus::Fetched);
        self.state.lock().areas.insert(id, entry);
    }

    /// Caches a failed fetch so the id is not retried until it expires.
    pub fn put_failed(&self, id: u32, reason: impl Into<String>) {
        let status = AreaStatus::Failed {
            reason: reason.into(),
        };
        let entry = AreaEntry::new(id, UNAVAILABLE_AREA_NAME.to_string(), status);
        self.state.lock().areas.insert(id, entry);
    }

    /// Adds a creature to an area under the same key as `record_discovery`.
    /// No-op if the area is absent or already lists it.
    pub fn append_creature(&self, id: u32, creature: &str) {
        let creature = normalize(creature);
        let mut state = self.state.lock();
        if let Some(entry) = state.areas.get_mut(&id) {
            if !entry.creatures.contains(&creature) {
                entry.creatures.push(creature);
            }
        }
    }

    /// Gets a cached area by id. Does not check the TTL.
    pub fn get(&self, id: u32) -> Option<AreaEntry> {
        self.state.lock().areas.get(&id).cloned()
    }

    /// Finds an area by numeric id or by name.
    pub fn find_area(&self, query: &str) -> Option<AreaEntry> {
        let normalized = normalize(query);
        if let Ok(id) = normalized.parse::<u32>() {
            return self.get(id);
        }

        let state = self.state.lock();
        state
            .areas
            .values()
            .find(|e| !e.is_failed() && e.name == normalized)
            .cloned()
    }

    /// Removes a cached area.
    pub fn remove(&self, id: u32) {
        self.state.lock().areas.remove(&id);
    }

    /// Clears all cached areas. Creature progress is kept.
    pub fn clear_areas(&self) {
        self.state.lock().areas.clear();
    }

    /// Deletes every area older than the TTL and returns how many went.
    pub fn reap_expired(&self) -> usize {
        let ttl = self.config.ttl();
        let now = Instant::now();

        let mut state = self.state.lock();
        let before = state.areas.len();
        state.areas.retain(|_, e| !e.is_expired_at(now, ttl));
        let removed = before - state.areas.len();

        if removed > 0 {
            debug!(removed, remaining = state.areas.len(), "Reaped expired areas");
        }
        removed
    }

    /// Returns the number of cached areas (including expired, unreaped ones).
    pub fn len(&self) -> usize {
        self.state.lock().areas.len()
    }

    /// Returns true if no areas are cached.
    pub fn is_empty(&self) -> bool {
        self.state.lock().areas.is_empty()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CREATURES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Marks a creature as discovered. Existing progress is left untouched.
    pub fn record_discovery(&self, name: &str) {
        let key = normalize(name);
        self.state
            .lock()
            .creatures
            .entry(key.clone())
            .or_insert_with(|| CreatureState::discovered(key));
    }

    /// Stores detail stats for a creature, discovering it if needed.
    pub fn store_stats(&self, name: &str, stats: CreatureStats) {
        let key = normalize(name);
        let mut state = self.state.lock();
        let creature = state
            .creatures
            .entry(key.clone())
            .or_insert_with(|| CreatureState::discovered(key));
        creature.stats = Some(stats);
    }

    /// Returns a snapshot of a creature's progress.
    pub fn creature(&self, name: &str) -> Option<CreatureState> {
        self.state.lock().creatures.get(&normalize(name)).cloned()
    }

    /// Attempts to catch a creature with the given roll.
    ///
    /// Succeeds when the creature is known and `draw > base_experience`.
    /// A failed attempt leaves the creature's state unchanged.
    pub fn attempt_capture(&self, name: &str, base_experience: u32, draw: u32) -> bool {
        let mut state = self.state.lock();
        let Some(creature) = state.creatures.get_mut(&normalize(name)) else {
            return false;
        };

        if draw > base_experience {
            creature.captured = true;
            true
        } else {
            false
        }
    }

    /// Names of all caught creatures, in no particular order.
    pub fn list_captured(&self) -> Vec<String> {
        self.state
            .lock()
            .creatures
            .values()
            .filter(|c| c.captured)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let ttl = self.config.ttl();
        let now = Instant::now();
        let state = self.state.lock();

        let expired = state.areas.values().filter(|e| e.is_expired_at(now, ttl)).count();
        let failed = state.areas.values().filter(|e| e.is_failed()).count();
        let captured = state.creatures.values().filter(|c| c.captured).count();

        CacheStats {
            total_areas: state.areas.len(),
            expired_areas: expired,
            live_areas: state.areas.len().saturating_sub(expired),
            failed_areas: failed,
            discovered_creatures: state.creatures.len(),
            captured_creatures: captured,
        }
    }
}

impl Default for PokeCache {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Cached areas, including expired ones not yet reaped
    pub total_areas: usize,
    /// Areas past their TTL awaiting the next sweep
    pub expired_areas: usize,
    /// Areas within their TTL
    pub live_areas: usize,
    /// Areas cached as failed fetches
    pub failed_areas: usize,
    /// Creatures ever discovered
    pub discovered_creatures: usize,
    /// Creatures caught
    pub captured_creatures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn short_ttl_cache() -> PokeCache {
        PokeCache::with_config(CacheConfig::new(1, 1))
    }

    #[test]
    fn test_put_get() {
        let cache = PokeCache::new();
        cache.put(1, "canalave-city-area");

        let entry = cache.get(1).unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.name, "canalave-city-area");
        assert!(entry.creatures.is_empty());
        assert_eq!(entry.status, AreaStatus::Fetched);
    }

    #[test]
    fn test_get_miss() {
        let cache = PokeCache::new();
        assert!(cache.get(42).is_none());
    }

    #[test]
    fn test_put_overwrites_and_clears_creatures() {
        let cache = PokeCache::new();
        cache.put(1, "old-name");
        cache.append_creature(1, "tentacool");

        cache.put(1, "new-name");

        let entry = cache.get(1).unwrap();
        assert_eq!(entry.name, "new-name");
        assert!(entry.creatures.is_empty());
    }

    #[test]
    fn test_append_creature_idempotent() {
        let cache = PokeCache::new();
        cache.put(1, "canalave-city-area");

        cache.append_creature(1, "tentacool");
        cache.append_creature(1, "tentacool");
        cache.append_creature(1, "staryu");

        let entry = cache.get(1).unwrap();
        assert_eq!(entry.creatures, vec!["tentacool", "staryu"]);
    }

    #[test]
    fn test_append_creature_uses_discovery_key() {
        let cache = PokeCache::new();
        cache.put(1, "canalave-city-area");

        cache.append_creature(1, " Tentacool");
        cache.append_creature(1, "tentacool");
        cache.record_discovery(" Tentacool");

        let entry = cache.get(1).unwrap();
        assert_eq!(entry.creatures, vec!["tentacool"]);
        assert_eq!(cache.creature(&entry.creatures[0]).unwrap().name, "tentacool");
    }

    #[test]
    fn test_append_creature_missing_area_is_noop() {
        let cache = PokeCache::new();
        cache.append_creature(7, "tentacool");
        assert!(cache.get(7).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_failed() {
        let cache = PokeCache::new();
        cache.put_failed(3, "HTTP 500");

        let entry = cache.get(3).unwrap();
        assert!(entry.is_failed());
        assert_eq!(entry.name, UNAVAILABLE_AREA_NAME);
        assert_eq!(cache.stats().failed_areas, 1);
    }

    #[test]
    fn test_find_area_by_name_or_id() {
        let cache = PokeCache::new();
        cache.put(5, "eterna-city-area");
        cache.put_failed(6, "timeout");

        assert_eq!(cache.find_area("  Eterna-City-Area ").unwrap().id, 5);
        assert_eq!(cache.find_area("5").unwrap().name, "eterna-city-area");
        assert!(cache.find_area(UNAVAILABLE_AREA_NAME).is_none());
        assert!(cache.find_area("pallet-town").is_none());
    }

    #[test]
    fn test_remove_and_clear() {
        let cache = PokeCache::new();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.record_discovery("pikachu");

        cache.remove(1);
        assert!(cache.get(1).is_none());
        assert_eq!(cache.len(), 1);

        cache.clear_areas();
        assert!(cache.is_empty());
        assert!(cache.creature("pikachu").is_some());
    }

    #[test]
    fn test_record_discovery_keeps_progress() {
        let cache = PokeCache::new();
        cache.record_discovery("pikachu");
        assert!(cache.attempt_capture("pikachu", 112, 500));
        cache.store_stats(
            "pikachu",
            CreatureStats {
                base_experience: 112,
                ..Default::default()
            },
        );

        cache.record_discovery("pikachu");

        let state = cache.creature("pikachu").unwrap();
        assert!(state.captured);
        assert_eq!(state.stats.unwrap().base_experience, 112);
    }

    #[test]
    fn test_attempt_capture_threshold() {
        let cache = PokeCache::new();
        cache.record_discovery("snorlax");

        assert!(!cache.attempt_capture("snorlax", 189, 189));
        assert!(!cache.attempt_capture("snorlax", 189, 10));
        assert!(!cache.creature("snorlax").unwrap().captured);

        assert!(cache.attempt_capture("snorlax", 189, 190));
        assert!(cache.creature("snorlax").unwrap().captured);
    }

    #[test]
    fn test_attempt_capture_unknown() {
        let cache = PokeCache::new();
        assert!(!cache.attempt_capture("mew", 0, 999));
        assert!(cache.creature("mew").is_none());
        assert!(cache.list_captured().is_empty());
    }

    #[test]
    fn test_captured_never_reverts() {
        let cache = PokeCache::new();
        cache.record_discovery("pikachu");
        assert!(cache.attempt_capture("pikachu", 112, 113));
        assert!(!cache.attempt_capture("pikachu", 112, 0));
        assert!(cache.creature("pikachu").unwrap().captured);
    }

    #[test]
    fn test_list_captured() {
        let cache = PokeCache::new();
        cache.record_discovery("pikachu");
        cache.record_discovery("bulbasaur");

        assert!(cache.attempt_capture("pikachu", 112, 900));
        assert!(!cache.attempt_capture("bulbasaur", 64, 1));

        assert_eq!(cache.list_captured(), vec!["pikachu".to_string()]);
    }

    #[test]
    fn test_capture_normalizes_name() {
        let cache = PokeCache::new();
        cache.record_discovery("Pikachu");
        assert!(cache.attempt_capture(" PIKACHU ", 112, 900));
        assert_eq!(cache.list_captured(), vec!["pikachu".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_does_not_enforce_ttl() {
        let cache = short_ttl_cache();
        cache.put(1, "a");

        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(cache.get(1).is_some());
        assert_eq!(cache.stats().expired_areas, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reap_expired() {
        let cache = short_ttl_cache();
        cache.put(1, "old");
        cache.record_discovery("zubat");

        tokio::time::sleep(Duration::from_millis(1500)).await;
        cache.put(2, "fresh");

        assert_eq!(cache.reap_expired(), 1);
        assert!(cache.get(1).is_none());
        assert!(cache.get(2).is_some());
        assert!(cache.creature("zubat").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reap_keeps_entry_within_ttl() {
        let cache = short_ttl_cache();
        cache.put(1, "a");

        tokio::time::sleep(Duration::from_millis(900)).await;

        assert_eq!(cache.reap_expired(), 0);
        assert!(cache.get(1).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_restarts_ttl() {
        let cache = short_ttl_cache();
        cache.put(1, "a");
        tokio::time::sleep(Duration::from_millis(800)).await;
        cache.put(1, "a");
        tokio::time::sleep(Duration::from_millis(800)).await;

        assert_eq!(cache.reap_expired(), 0);
        assert!(cache.get(1).unwrap().age() < Duration::from_secs(1));
    }

    #[test]
    fn test_cache_stats() {
        let cache = PokeCache::new();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.record_discovery("pikachu");
        cache.attempt_capture("pikachu", 0, 1);

        let stats = cache.stats();
        assert_eq!(stats.total_areas, 2);
        assert_eq!(stats.live_areas, 2);
        assert_eq!(stats.expired_areas, 0);
        assert_eq!(stats.discovered_creatures, 1);
        assert_eq!(stats.captured_creatures, 1);
    }

    #[test]
    fn test_concurrent_writers() {
        let cache = std::sync::Arc::new(PokeCache::new());

        let handles: Vec<_> = (0..8u32)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..50u32 {
                        let id = t * 50 + i;
                        cache.put(id, format!("area-{id}"));
                        cache.append_creature(id, "magikarp");
                        cache.record_discovery("magikarp");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 400);
        assert_eq!(cache.get(399).unwrap().creatures, vec!["magikarp"]);
        assert_eq!(cache.stats().discovered_creatures, 1);
    }

    proptest! {
        #[test]
        fn prop_put_then_get(id in any::<u32>(), name in "[a-z-]{1,24}") {
            let cache = PokeCache::new();
            cache.put(id, name.clone());
            let entry = cache.get(id).unwrap();
            prop_assert_eq!(entry.id, id);
            prop_assert_eq!(entry.name, name);
        }

        #[test]
        fn prop_append_creature_is_set(names in proptest::collection::vec("[a-c]{1,2}", 0..20)) {
            let cache = PokeCache::new();
            cache.put(1, "area");
            for name in &names {
                cache.append_creature(1, name);
                cache.append_creature(1, name);
            }

            let creatures = cache.get(1).unwrap().creatures;
            let mut unique = names.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(creatures.len(), unique.len());
        }

        #[test]
        fn prop_capture_is_pure(base in 0u32..1000, draw in 0u32..1000) {
            let first = PokeCache::new();
            let second = PokeCache::new();
            first.record_discovery("eevee");
            second.record_discovery("eevee");
            prop_assert_eq!(
                first.attempt_capture("eevee", base, draw),
                second.attempt_capture("eevee", base, draw)
            );
            prop_assert_eq!(first.attempt_capture("eevee", base, draw), draw > base);
        }
    }
}
