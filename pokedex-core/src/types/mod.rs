//! Domain types for the Pokedex.
//!
//! - [`FetchedArea`]: a location area as returned by the remote source
//! - [`AreaStatus`]: whether a cached area holds real data or a failed fetch
//! - [`CreatureStats`]: detail stats for a creature
//! - [`CreatureState`]: per-creature discovery and capture progress

mod area;
mod creature;

pub use area::*;
pub use creature::*;
