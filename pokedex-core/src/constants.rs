//! Constants shared across the Pokedex crates.
//!
//! Defaults match the behaviour of the PokeAPI explorer: one-minute area
//! lifetime, a five-minute sweep, twenty areas per page.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// How long a cached area stays valid, in seconds.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 60;

/// How often the reaper sweeps expired areas, in seconds.
pub const DEFAULT_REAP_INTERVAL_SECONDS: u64 = 300;

// ═══════════════════════════════════════════════════════════════════════════════
// PAGINATION
// ═══════════════════════════════════════════════════════════════════════════════

/// First location-area id served by PokeAPI.
pub const FIRST_AREA_ID: u32 = 1;

/// Number of areas listed per `map` / `mapb`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest accepted page size. Every uncached id in a window gets its own
/// fetch task, so this also caps the fan-out of one step.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Display name stored for an area whose fetch failed.
pub const UNAVAILABLE_AREA_NAME: &str = "location unavailable";

// ═══════════════════════════════════════════════════════════════════════════════
// CAPTURE
// ═══════════════════════════════════════════════════════════════════════════════

/// Capture rolls are drawn uniformly from `0..CAPTURE_ROLL_CEILING`.
/// A roll above the creature's base experience catches it.
pub const CAPTURE_ROLL_CEILING: u32 = 1000;

// ═══════════════════════════════════════════════════════════════════════════════
// NETWORK
// ═══════════════════════════════════════════════════════════════════════════════

/// Public PokeAPI base URL.
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

/// HTTP request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;
